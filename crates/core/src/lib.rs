//! Core business logic for bazaar.

pub mod services;

pub use services::*;
