//! Virtual host records shared between the relay components.

use serde::{Deserialize, Serialize};

/// Public routing identity of one tunnel connection.
///
/// Fields are opaque to the registry; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualHost {
    /// Identifier of the owning tunnel connection
    pub identifier: String,
    /// Listening port of the tunnel's local side
    pub port: String,
    /// Observed address of the tunnel client
    pub remote_address: String,
}

impl VirtualHost {
    pub fn new(
        identifier: impl Into<String>,
        port: impl Into<String>,
        remote_address: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            port: port.into(),
            remote_address: remote_address.into(),
        }
    }
}
