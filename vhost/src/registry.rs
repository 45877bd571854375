//! In-memory virtual host registry

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};
use ztunnel_shared::VirtualHost;

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::rotation::{self, RotationPolicy};
use crate::storage::VhostStorage;

/// Registry of virtual hosts keyed by tunnel connection identifier.
///
/// One mutex guards the whole table; every call holds it for its full
/// duration and never calls back into the registry while holding it.
/// Share it as `Arc<VirtualHosts>` between the connection manager and the
/// request router.
pub struct VirtualHosts {
    policy: RotationPolicy,
    state: Mutex<HostTable>,
}

#[derive(Default)]
struct HostTable {
    mapping: HashMap<String, VirtualHost>,
    /// Insertion order, only kept for [`RotationPolicy::Ordered`]
    order: Vec<String>,
    cursor: usize,
}

impl VirtualHosts {
    pub fn new() -> Self {
        Self::with_policy(RotationPolicy::default())
    }

    pub fn with_policy(policy: RotationPolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(HostTable::default()),
        }
    }

    pub fn with_config(config: &RegistryConfig) -> Self {
        Self::with_policy(config.rotation)
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    // Every critical section leaves the table consistent, so a panic in
    // another holder does not invalidate it.
    fn table(&self) -> MutexGuard<'_, HostTable> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a copy of `host` under `identifier`, replacing any previous
    /// entry.
    pub fn add_host(&self, host: &VirtualHost, identifier: &str) {
        let mut table = self.table();
        let replaced = table
            .mapping
            .insert(identifier.to_string(), host.clone())
            .is_some();

        if replaced {
            debug!(identifier, "Virtual host replaced");
        } else {
            if self.policy == RotationPolicy::Ordered {
                table.order.push(identifier.to_string());
            }
            debug!(identifier, hosts = table.mapping.len(), "Virtual host added");
        }
    }

    /// Removes the entry for `identifier`. Absent identifiers are ignored.
    ///
    /// Under [`RotationPolicy::Compat`] the cursor is left untouched, so a
    /// later [`get_next_host`](Self::get_next_host) may report
    /// [`RegistryError::CursorOutOfRange`] until the table grows again.
    pub fn delete_host(&self, identifier: &str) {
        let mut table = self.table();
        if table.mapping.remove(identifier).is_none() {
            return;
        }

        if self.policy == RotationPolicy::Ordered {
            let HostTable { order, cursor, .. } = &mut *table;
            rotation::forget_ordered(order, cursor, identifier);
        }
        debug!(identifier, hosts = table.mapping.len(), "Virtual host deleted");
    }

    /// Returns a copy of the host registered under `identifier`.
    pub fn get_host(&self, identifier: &str) -> Option<VirtualHost> {
        self.table().mapping.get(identifier).cloned()
    }

    /// Returns the identifier recorded for the entry stored under `key`.
    ///
    /// The lookup uses the identifier key space, exactly like
    /// [`get_host`](Self::get_host); a virtual host name will not match.
    pub fn get_identifier(&self, key: &str) -> Option<String> {
        self.table()
            .mapping
            .get(key)
            .map(|host| host.identifier.clone())
    }

    /// Returns the next host in round-robin order.
    pub fn get_next_host(&self) -> Result<VirtualHost, RegistryError> {
        let mut table = self.table();
        let HostTable {
            mapping,
            order,
            cursor,
        } = &mut *table;

        let result = match self.policy {
            RotationPolicy::Compat => rotation::next_compat(mapping, cursor),
            RotationPolicy::Ordered => rotation::next_ordered(mapping, order, cursor),
        };

        match &result {
            Err(RegistryError::CursorOutOfRange { cursor, len }) => {
                warn!(cursor, len, "Round-robin cursor is past the registered hosts");
            }
            Err(RegistryError::EmptyRegistry) => debug!("No virtual hosts registered"),
            Ok(_) => {}
        }
        result
    }

    /// Number of registered hosts
    pub fn len(&self) -> usize {
        self.table().mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().mapping.is_empty()
    }

    /// Snapshot of every registered host, sorted by identifier
    pub fn hosts(&self) -> Vec<VirtualHost> {
        let mut hosts: Vec<VirtualHost> = self.table().mapping.values().cloned().collect();
        hosts.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        hosts
    }
}

impl Default for VirtualHosts {
    fn default() -> Self {
        Self::new()
    }
}

impl VhostStorage for VirtualHosts {
    fn add_host(&self, host: &VirtualHost, identifier: &str) {
        VirtualHosts::add_host(self, host, identifier)
    }

    fn delete_host(&self, identifier: &str) {
        VirtualHosts::delete_host(self, identifier)
    }

    fn get_host(&self, identifier: &str) -> Option<VirtualHost> {
        VirtualHosts::get_host(self, identifier)
    }

    fn get_identifier(&self, key: &str) -> Option<String> {
        VirtualHosts::get_identifier(self, key)
    }

    fn get_next_host(&self) -> Result<VirtualHost, RegistryError> {
        VirtualHosts::get_next_host(self)
    }
}
