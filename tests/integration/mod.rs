//! Integration tests with mock HTTP server

pub mod async_client;
pub mod blocking;
pub mod mock_server;
