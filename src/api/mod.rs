pub mod client;
pub mod endpoints;
pub mod models;
pub mod retry;
pub mod transport;
