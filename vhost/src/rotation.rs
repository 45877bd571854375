//! Round-robin cursor algorithms
//!
//! Two policies share the registry's cursor:
//!
//! * [`RotationPolicy::Compat`] replays a numeric position against the map's
//!   iteration order. The order is unspecified and may change after any
//!   insertion or deletion, so fairness is best effort. After handing out the
//!   last position the cursor wraps to 1, not 0, and deletions never move it,
//!   which can leave it past the end of a shrunken map.
//! * [`RotationPolicy::Ordered`] walks hosts in insertion order, wraps to the
//!   first host, and keeps the cursor valid across deletions.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ztunnel_shared::VirtualHost;

use crate::error::RegistryError;

/// How `get_next_host` chooses its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// Position counting over the map's iteration order, wrap to 1
    #[default]
    Compat,
    /// Strict insertion-order rotation, wrap to 0
    Ordered,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rotation policy '{0}' (expected 'compat' or 'ordered')")]
pub struct ParseRotationError(pub String);

impl FromStr for RotationPolicy {
    type Err = ParseRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(RotationPolicy::Compat),
            "ordered" => Ok(RotationPolicy::Ordered),
            other => Err(ParseRotationError(other.to_string())),
        }
    }
}

impl fmt::Display for RotationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationPolicy::Compat => f.write_str("compat"),
            RotationPolicy::Ordered => f.write_str("ordered"),
        }
    }
}

/// Picks the host at `cursor` in iteration order and advances the cursor.
pub(crate) fn next_compat(
    mapping: &HashMap<String, VirtualHost>,
    cursor: &mut usize,
) -> Result<VirtualHost, RegistryError> {
    if *cursor == 0 && mapping.is_empty() {
        return Err(RegistryError::EmptyRegistry);
    }

    let len = mapping.len();
    match mapping.values().nth(*cursor) {
        Some(host) => {
            if *cursor == len - 1 {
                *cursor = 0;
            }
            *cursor += 1;
            Ok(host.clone())
        }
        None => Err(RegistryError::CursorOutOfRange {
            cursor: *cursor,
            len,
        }),
    }
}

/// Picks the host at `cursor` in insertion order and advances the cursor.
pub(crate) fn next_ordered(
    mapping: &HashMap<String, VirtualHost>,
    order: &[String],
    cursor: &mut usize,
) -> Result<VirtualHost, RegistryError> {
    if order.is_empty() {
        return Err(RegistryError::EmptyRegistry);
    }
    if *cursor >= order.len() {
        *cursor = 0;
    }

    let host = mapping
        .get(&order[*cursor])
        .ok_or(RegistryError::CursorOutOfRange {
            cursor: *cursor,
            len: mapping.len(),
        })?;
    *cursor = (*cursor + 1) % order.len();
    Ok(host.clone())
}

/// Drops `identifier` from the insertion order, keeping the cursor on the
/// host that followed it.
pub(crate) fn forget_ordered(order: &mut Vec<String>, cursor: &mut usize, identifier: &str) {
    let Some(pos) = order.iter().position(|id| id == identifier) else {
        return;
    };
    order.remove(pos);

    if pos < *cursor {
        *cursor -= 1;
    }
    if *cursor >= order.len() {
        *cursor = 0;
    }
}
