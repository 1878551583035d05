pub mod changelog;
pub mod identifiable;

// Re-exports
pub use changelog::*;
pub use identifiable::*;
