//! Registry entry and snapshot types (C3 data model).

use crate::core::capability::Capability;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Bound on the stored error message; upstream bodies can be arbitrarily
/// long and we only need enough to debug from a summary.
const LAST_ERROR_MAX_LEN: usize = 500;

/// Health state of one registry entry.
///
/// `Cooldown` always carries its own `until` via the entry's
/// `cooldown_until` field; there is no separate "cooling down right now"
/// flag to keep in sync — readers derive that from the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Unknown,
    Healthy,
    Unhealthy,
    Cooldown,
}

/// Current unix-epoch time in milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}

/// Key identifying one registry row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub capability: Capability,
    pub provider_id: i64,
    pub model_name: String,
}

impl EntryKey {
    pub fn new(capability: Capability, provider_id: i64, model_name: impl Into<String>) -> Self {
        Self {
            capability,
            provider_id,
            model_name: model_name.into(),
        }
    }
}

/// One row in the Health Registry.
///
/// `priority` is immutable for the entry's lifetime — it is a config
/// property set at `register` time, never touched by state transitions.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub capability: Capability,
    pub provider_id: i64,
    pub provider_name: String,
    pub model_name: String,
    pub priority: i32,

    pub state: HealthState,
    pub failure_count: u32,
    pub last_error: String,
    /// Zero means "no cooldown set".
    pub cooldown_until_ms: u64,

    pub last_checked_ms: u64,
    pub last_success_ms: u64,
}

impl RegistryEntry {
    pub fn new(
        capability: Capability,
        provider_id: i64,
        provider_name: impl Into<String>,
        model_name: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            capability,
            provider_id,
            provider_name: provider_name.into(),
            model_name: model_name.into(),
            priority,
            state: HealthState::Unknown,
            failure_count: 0,
            last_error: String::new(),
            cooldown_until_ms: 0,
            last_checked_ms: 0,
            last_success_ms: 0,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.capability, self.provider_id, self.model_name.clone())
    }

    /// True if this entry is presently inside an unexpired cooldown window.
    pub fn cooldown_active_at(&self, now_ms: u64) -> bool {
        self.state == HealthState::Cooldown && self.cooldown_until_ms > now_ms
    }

    /// State as an outside reader would see it right now: an expired
    /// cooldown reads back as *unknown* without ever being written.
    pub fn effective_state_at(&self, now_ms: u64) -> HealthState {
        if self.state == HealthState::Cooldown && self.cooldown_until_ms <= now_ms {
            HealthState::Unknown
        } else {
            self.state
        }
    }

    pub fn record_mark_healthy(&mut self, now_ms: u64) {
        self.state = HealthState::Healthy;
        self.failure_count = 0;
        self.last_error.clear();
        self.cooldown_until_ms = 0;
        self.last_checked_ms = now_ms;
        self.last_success_ms = now_ms;
    }

    pub fn record_mark_unhealthy(&mut self, error_message: &str, threshold: u32, now_ms: u64) {
        self.failure_count += 1;
        self.last_error = truncate(error_message, LAST_ERROR_MAX_LEN);
        self.last_checked_ms = now_ms;
        if self.failure_count >= threshold {
            self.state = HealthState::Unhealthy;
        }
    }

    pub fn record_cooldown(&mut self, error_message: &str, duration_ms: u64, now_ms: u64) {
        self.state = HealthState::Cooldown;
        self.cooldown_until_ms = now_ms + duration_ms;
        self.last_checked_ms = now_ms;
        if !error_message.is_empty() {
            self.last_error = truncate(error_message, LAST_ERROR_MAX_LEN);
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Value-copy view of an entry, safe to hand out past the registry lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub capability: Capability,
    pub provider_id: i64,
    pub provider_name: String,
    pub model_name: String,
    pub priority: i32,
    pub state: HealthState,
    pub failure_count: u32,
    pub last_error: String,
    pub cooldown_until_ms: u64,
    pub last_checked_ms: u64,
    pub last_success_ms: u64,
}

impl From<&RegistryEntry> for EntrySnapshot {
    fn from(entry: &RegistryEntry) -> Self {
        Self {
            capability: entry.capability,
            provider_id: entry.provider_id,
            provider_name: entry.provider_name.clone(),
            model_name: entry.model_name.clone(),
            priority: entry.priority,
            state: entry.state,
            failure_count: entry.failure_count,
            last_error: entry.last_error.clone(),
            cooldown_until_ms: entry.cooldown_until_ms,
            last_checked_ms: entry.last_checked_ms,
            last_success_ms: entry.last_success_ms,
        }
    }
}
