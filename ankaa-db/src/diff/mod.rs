pub mod config;
pub mod engine;
pub mod equality;
pub mod flatten;
pub mod tracker;

// Re-exports
pub use config::*;
pub use engine::*;
pub use equality::*;
pub use flatten::*;
pub use tracker::*;
