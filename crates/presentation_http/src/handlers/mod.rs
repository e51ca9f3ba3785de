//! HTTP request handlers

pub mod health;
pub mod parameters;
pub mod query;
