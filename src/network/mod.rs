//! Network layer - typed HTTP client for the accounts backend

pub mod client;

pub use client::{create_client, AccountApi, HttpAccountClient};
