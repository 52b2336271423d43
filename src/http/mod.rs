//! HTTP protocol implementation.
//!
//! This module implements the small HTTP/1.1 subset the server speaks: one
//! request per connection, no keep-alive, no chunked bodies.
//!
//! # Architecture
//!
//! - **`parser`**: Turns the bytes read from a connection into a [`Request`](request::Request)
//! - **`request`**: Request representation, method and ordered headers
//! - **`router`**: Ordered route table and the handlers behind it
//! - **`response`**: Response representation with builder pattern
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip compression
//! - **`writer`**: Serializes and writes responses to the client
//! - **`connection`**: Per-connection state machine tying the above together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read up to the buffer limit
//!        └──────┬──────┘
//!               │ Request received (malformed → 404)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, then negotiate encoding
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use courier::http::connection::{Connection, ConnectionSettings};
//! use courier::http::router::Router;
//! use courier::storage::DiskStorage;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Router::new(DiskStorage::new("/tmp"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let conn = Connection::new(socket, router.clone(), ConnectionSettings::default());
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod writer;
