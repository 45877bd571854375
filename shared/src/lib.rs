//! ZTunnel Shared Library
//!
//! Common types and errors used by the relay's virtual host registry.

pub mod vhost;
pub mod error;

pub use error::{Error, Result};
pub use vhost::VirtualHost;
