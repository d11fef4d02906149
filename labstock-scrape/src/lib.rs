pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod protocol;
pub mod server;
pub mod transport;
