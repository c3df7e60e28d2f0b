use serde::{Deserialize, Serialize};

/// Mutation gate shared by both store surfaces.
///
/// Two independent, monotonic flags: once `values_locked` is set no value
/// may change or be removed; once `attributes_locked` is set no new key may
/// be introduced, though existing keys may still change. The single-flag
/// store configures the same capability by setting both flags at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessPolicy {
    values_locked: bool,
    attributes_locked: bool,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid value changes and removals. Idempotent, never reset.
    pub fn lock_values(&mut self) {
        self.values_locked = true;
    }

    /// Forbid introducing new keys. Idempotent, never reset.
    pub fn lock_attributes(&mut self) {
        self.attributes_locked = true;
    }

    /// Uniform configuration: both mutation classes blocked at once.
    pub fn lock_all(&mut self) {
        self.values_locked = true;
        self.attributes_locked = true;
    }

    pub fn values_locked(&self) -> bool {
        self.values_locked
    }

    pub fn attributes_locked(&self) -> bool {
        self.attributes_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocked_by_default() {
        let policy = AccessPolicy::new();
        assert!(!policy.values_locked());
        assert!(!policy.attributes_locked());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut policy = AccessPolicy::new();
        policy.lock_attributes();
        assert!(!policy.values_locked());
        assert!(policy.attributes_locked());
    }

    #[test]
    fn test_locks_are_idempotent() {
        let mut policy = AccessPolicy::new();
        policy.lock_values();
        policy.lock_values();
        assert!(policy.values_locked());
    }

    #[test]
    fn test_lock_all_sets_both() {
        let mut policy = AccessPolicy::new();
        policy.lock_all();
        assert!(policy.values_locked());
        assert!(policy.attributes_locked());
    }
}
