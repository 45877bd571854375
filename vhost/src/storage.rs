//! Storage abstraction for virtual host registries

use ztunnel_shared::VirtualHost;

use crate::error::RegistryError;

/// Operations the connection manager and request router need from a
/// virtual host store.
///
/// [`VirtualHosts`](crate::VirtualHosts) is the in-memory implementation;
/// other backends are substitutable behind `Arc<dyn VhostStorage>`.
pub trait VhostStorage: Send + Sync {
    /// Adds the given host under `identifier`, replacing any previous entry
    fn add_host(&self, host: &VirtualHost, identifier: &str);

    /// Deletes the entry for `identifier`, if any
    fn delete_host(&self, identifier: &str);

    /// Returns a copy of the host registered under `identifier`
    fn get_host(&self, identifier: &str) -> Option<VirtualHost>;

    /// Returns the `identifier` field of the record stored under `key`.
    ///
    /// `key` lives in the same key space as [`get_host`](Self::get_host):
    /// pass a connection identifier, not a host name.
    fn get_identifier(&self, key: &str) -> Option<String>;

    /// Returns the next host in round-robin order
    fn get_next_host(&self) -> Result<VirtualHost, RegistryError>;
}
