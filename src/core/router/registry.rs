//! Health Registry (C3): the one piece of mutable shared state in the core.
//!
//! A single `RwLock<HashMap<...>>`. Reads (`is_healthy`, `in_cooldown`,
//! `candidates`, `summary`) take shared access; writes take exclusive
//! access. Everything handed back to a caller is a value copy, so there is
//! no synchronization left for the caller to do.

use super::config::RouterConfig;
use super::entry::{now_millis, EntryKey, EntrySnapshot, HealthState, RegistryEntry};
use crate::core::capability::Capability;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Per-state counts for one capability, as reported to operators.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct StateCounts {
    pub healthy: u32,
    pub unhealthy: u32,
    pub cooldown: u32,
    pub unknown: u32,
}

pub struct HealthRegistry {
    entries: RwLock<HashMap<EntryKey, RegistryEntry>>,
    config: RouterConfig,
}

impl HealthRegistry {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn failure_threshold(&self) -> u32 {
        self.config.failure_threshold
    }

    pub fn default_cooldown_ms(&self) -> u64 {
        self.config.default_cooldown.as_millis() as u64
    }

    /// Idempotent insert; if the key already exists, this is a no-op.
    pub fn register(
        &self,
        capability: Capability,
        provider_id: i64,
        provider_name: impl Into<String>,
        model_name: impl Into<String>,
        priority: i32,
    ) {
        let model_name = model_name.into();
        let key = EntryKey::new(capability, provider_id, model_name.clone());
        let mut entries = self.entries.write();
        entries.entry(key).or_insert_with(|| {
            RegistryEntry::new(capability, provider_id, provider_name, model_name, priority)
        });
    }

    /// True if the entry is absent (benefit of the doubt for unregistered
    /// keys — see design notes), or healthy/unknown, or an expired cooldown.
    pub fn is_healthy(&self, key: &EntryKey) -> bool {
        let entries = self.entries.read();
        match entries.get(key) {
            None => true,
            Some(entry) => {
                matches!(entry.effective_state_at(now_millis()), HealthState::Healthy | HealthState::Unknown)
            }
        }
    }

    /// True only while an unexpired cooldown is active.
    pub fn in_cooldown(&self, key: &EntryKey) -> bool {
        let entries = self.entries.read();
        entries
            .get(key)
            .is_some_and(|entry| entry.cooldown_active_at(now_millis()))
    }

    pub fn mark_healthy(&self, key: &EntryKey) {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get_mut(key) {
            entry.record_mark_healthy(now_millis());
        }
    }

    pub fn mark_unhealthy(&self, key: &EntryKey, error_message: &str, _http_status: u16) {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get_mut(key) {
            entry.record_mark_unhealthy(error_message, self.config.failure_threshold, now_millis());
        }
    }

    pub fn set_cooldown(&self, key: &EntryKey, duration_ms: u64, error_message: &str) {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get_mut(key) {
            entry.record_cooldown(error_message, duration_ms, now_millis());
        }
    }

    /// Snapshot every entry for a capability.
    pub fn list_all(&self, capability: Capability) -> Vec<EntrySnapshot> {
        let entries = self.entries.read();
        entries
            .values()
            .filter(|e| e.capability == capability)
            .map(EntrySnapshot::from)
            .collect()
    }

    /// Snapshot every registered entry across all capabilities.
    pub fn list_all_registered(&self) -> Vec<EntrySnapshot> {
        let entries = self.entries.read();
        entries.values().map(EntrySnapshot::from).collect()
    }

    /// Counts per effective state for one capability, reclassifying expired
    /// cooldowns as *unknown* on the fly.
    pub fn summary(&self, capability: Capability) -> StateCounts {
        let now = now_millis();
        let entries = self.entries.read();
        let mut counts = StateCounts::default();
        for entry in entries.values().filter(|e| e.capability == capability) {
            match entry.effective_state_at(now) {
                HealthState::Healthy => counts.healthy += 1,
                HealthState::Unhealthy => counts.unhealthy += 1,
                HealthState::Cooldown => counts.cooldown += 1,
                HealthState::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Counts per effective state, for every capability that has at least
    /// one registered entry.
    pub fn summary_all(&self) -> HashMap<Capability, StateCounts> {
        Capability::ALL
            .into_iter()
            .map(|cap| (cap, self.summary(cap)))
            .collect()
    }
}
