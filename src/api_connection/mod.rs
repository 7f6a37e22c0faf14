pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, GenerativeModel};
pub use endpoints::{Provider, ResponseSchema};
