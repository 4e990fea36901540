//! Selector (C5): turns a registry snapshot into an ordered candidate list.
//!
//! Pure read path — no I/O, runs entirely under the Registry's shared lock.

use super::entry::{now_millis, EntrySnapshot, HealthState};
use super::registry::HealthRegistry;
use crate::core::capability::Capability;

/// Candidates for a capability, filtered and ordered for the Failover
/// Driver to walk in sequence.
///
/// 1. Drop *unhealthy* entries outright.
/// 2. Drop *cooldown* entries whose cooldown hasn't expired yet; an expired
///    cooldown re-enters the pool as if *unknown*.
/// 3. Sort by priority descending, breaking ties by last-success time
///    descending.
pub fn candidates(registry: &HealthRegistry, capability: Capability) -> Vec<EntrySnapshot> {
    let now = now_millis();
    let mut pool: Vec<EntrySnapshot> = registry
        .list_all(capability)
        .into_iter()
        .filter(|entry| {
            let effective = effective_state(entry, now);
            !matches!(effective, HealthState::Unhealthy)
                && !(entry.state == HealthState::Cooldown && entry.cooldown_until_ms > now)
        })
        .collect();

    pool.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.last_success_ms.cmp(&a.last_success_ms))
    });
    pool
}

fn effective_state(entry: &EntrySnapshot, now_ms: u64) -> HealthState {
    if entry.state == HealthState::Cooldown && entry.cooldown_until_ms <= now_ms {
        HealthState::Unknown
    } else {
        entry.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::router::config::RouterConfig;
    use std::time::Duration;

    fn registry() -> HealthRegistry {
        HealthRegistry::new(RouterConfig {
            failure_threshold: 3,
            default_cooldown: Duration::from_secs(3600),
        })
    }

    #[test]
    fn filters_unhealthy_and_active_cooldown() {
        let reg = registry();
        reg.register(Capability::Chat, 1, "a", "m1", 10);
        reg.register(Capability::Chat, 2, "b", "m2", 10);
        reg.register(Capability::Chat, 3, "c", "m3", 10);

        let k1 = super::super::entry::EntryKey::new(Capability::Chat, 1, "m1");
        let k2 = super::super::entry::EntryKey::new(Capability::Chat, 2, "m2");

        for _ in 0..3 {
            reg.mark_unhealthy(&k1, "boom", 500);
        }
        reg.set_cooldown(&k2, 60_000, "rate limit");

        let cands = candidates(&reg, Capability::Chat);
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].model_name, "m3");
    }

    #[test]
    fn orders_by_priority_then_recency() {
        let reg = registry();
        reg.register(Capability::Vision, 1, "a", "low", 5);
        reg.register(Capability::Vision, 2, "b", "high", 10);
        reg.mark_healthy(&super::super::entry::EntryKey::new(Capability::Vision, 1, "low"));
        reg.mark_healthy(&super::super::entry::EntryKey::new(Capability::Vision, 2, "high"));

        let cands = candidates(&reg, Capability::Vision);
        assert_eq!(cands[0].model_name, "high");
        assert_eq!(cands[1].model_name, "low");
    }

    #[test]
    fn expired_cooldown_rejoins_pool() {
        let reg = registry();
        reg.register(Capability::Audio, 1, "a", "", 10);
        let key = super::super::entry::EntryKey::new(Capability::Audio, 1, "");
        reg.set_cooldown(&key, 1, "rate limit");
        std::thread::sleep(Duration::from_millis(15));
        let cands = candidates(&reg, Capability::Audio);
        assert_eq!(cands.len(), 1);
    }
}
