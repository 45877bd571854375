//! Virtual host registry for the ZTunnel relay
//!
//! Maps tunnel connection identifiers to their [`VirtualHost`] records and
//! hands out round-robin targets across every registered tunnel.

pub mod config;
pub mod error;
pub mod registry;
pub mod rotation;
pub mod storage;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::VirtualHosts;
pub use rotation::RotationPolicy;
pub use storage::VhostStorage;
pub use ztunnel_shared::VirtualHost;
