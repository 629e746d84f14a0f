//! HTTP request handlers

pub mod errors;
pub mod health;
pub mod templates;
pub mod sessions;
pub mod gestures;
