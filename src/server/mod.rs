//! TCP server: binds the listener and hands each accepted stream to a
//! [`Connection`](crate::http::connection::Connection).

pub mod listener;
