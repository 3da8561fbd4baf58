//! HTTP download client.

mod client;

pub use client::HttpClient;
