//! Inbound adapters that translate external requests into store operations
//! while keeping framework details at the edge.
//!
//! HTTP handlers and screen views live under [`http`].

pub mod http;
