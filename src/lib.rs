//! Courier - minimal HTTP/1.1 file and echo server
//!
//! Core library for request parsing, routing, response encoding and the
//! TCP listener.

pub mod config;
pub mod http;
pub mod server;
pub mod storage;
