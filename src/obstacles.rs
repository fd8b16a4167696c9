//! Obstacle bookkeeping
//!
//! Registry of obstacles known to the dynamic manager, tracking whether
//! each one has been spawned on the pedsim side and whether the current
//! scenario still uses it. The obstacle descriptor itself is supplied by
//! the caller and opaque here.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ObstacleError, ObstacleResult};

/// Bookkeeping record for a single known obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownObstacle<O> {
    /// Caller-supplied obstacle descriptor
    pub obstacle: O,
    /// Whether the obstacle has been spawned on the pedsim side
    pub pedsim_spawned: bool,
    /// Whether the current scenario uses the obstacle
    pub used: bool,
}

impl<O> KnownObstacle<O> {
    /// Create a record with both flags cleared
    pub fn new(obstacle: O) -> Self {
        Self {
            obstacle,
            pedsim_spawned: false,
            used: false,
        }
    }

    /// Set the pedsim-spawned flag
    pub fn with_pedsim_spawned(mut self, pedsim_spawned: bool) -> Self {
        self.pedsim_spawned = pedsim_spawned;
        self
    }

    /// Set the used flag
    pub fn with_used(mut self, used: bool) -> Self {
        self.used = used;
        self
    }
}

/// Registry of known obstacles, keyed by name
///
/// At most one record per name; creating under an existing name returns
/// the existing record unchanged. Enumeration follows insertion order of
/// surviving entries.
#[derive(Debug, Clone)]
pub struct KnownObstacles<O> {
    /// Records indexed by obstacle name
    records: HashMap<String, KnownObstacle<O>>,
    /// Insertion order of live names
    order: Vec<String>,
}

impl<O> Default for KnownObstacles<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> KnownObstacles<O> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Get an existing record or insert `record` under `name`
    ///
    /// An existing record is returned unchanged and the supplied one is
    /// dropped; use [`forget`](Self::forget) first to overwrite.
    pub fn create_or_get(
        &mut self,
        name: impl Into<String>,
        record: KnownObstacle<O>,
    ) -> &mut KnownObstacle<O> {
        match self.records.entry(name.into()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                tracing::debug!("registered obstacle: {}", entry.key());
                entry.insert(record)
            }
        }
    }

    /// Get an existing record, or `None` if the name is unknown
    pub fn get(&self, name: &str) -> Option<&KnownObstacle<O>> {
        self.records.get(name)
    }

    /// Mutable variant of [`get`](Self::get)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut KnownObstacle<O>> {
        self.records.get_mut(name)
    }

    /// Delete an obstacle, returning its record
    ///
    /// Unknown names are an error; check [`contains`](Self::contains) first
    /// if a silent removal is wanted.
    pub fn forget(&mut self, name: &str) -> ObstacleResult<KnownObstacle<O>> {
        let record = self
            .records
            .remove(name)
            .ok_or_else(|| ObstacleError::NotFound(name.to_string()))?;
        self.order.retain(|known| known != name);
        tracing::debug!("forgot obstacle: {}", name);
        Ok(record)
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Obstacle names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Records in insertion order
    pub fn values(&self) -> impl Iterator<Item = &KnownObstacle<O>> {
        self.order.iter().filter_map(|name| self.records.get(name))
    }

    /// `(name, record)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KnownObstacle<O>)> {
        self.order
            .iter()
            .filter_map(|name| self.records.get(name).map(|record| (name.as_str(), record)))
    }

    /// Number of registered obstacles
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
        tracing::debug!("cleared obstacle registry");
    }
}
