pub mod adapters;
pub mod diff;
pub mod models;
pub mod repository;
pub mod service;
