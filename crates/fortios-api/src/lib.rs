// fortios-api: Async Rust client for the FortiOS REST API (CMDB + monitor)

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::{Credentials, TokenPlacement};
pub use client::FortiClient;
pub use error::Error;
pub use models::{CmdbResponse, SystemStatus};
pub use transport::{TlsMode, TransportConfig};
