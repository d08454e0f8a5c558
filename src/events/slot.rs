//! First-write-wins result slot.
//!
//! Handlers run from highest to lowest priority, so the first handler that
//! writes a slot is the highest-priority one that wants to. Later writes are
//! computed by their handlers but discarded here, never merged.
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultSlot<T> {
    value: T,
    overridden: bool,
}

impl<T> ResultSlot<T> {
    /// A slot holding the host's value, not yet claimed.
    pub fn new(value: T) -> Self {
        Self {
            value,
            overridden: false,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Claim the slot with `value`. Returns `false` (and keeps the current
    /// value) if a handler already claimed it.
    pub fn set(&mut self, value: T) -> bool {
        if self.overridden {
            trace!("override discarded, slot already claimed");
            return false;
        }
        self.value = value;
        self.overridden = true;
        true
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy> ResultSlot<T> {
    pub fn value(&self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_passthrough() {
        let slot = ResultSlot::new(1.0_f32);
        assert_eq!(slot.value(), 1.0);
        assert!(!slot.is_overridden());
    }

    #[test]
    fn test_first_write_wins() {
        let mut slot = ResultSlot::new(0);
        assert!(slot.set(5));
        assert!(!slot.set(7));
        assert_eq!(slot.value(), 5);
        assert!(slot.is_overridden());
    }

    #[test]
    fn test_override_with_same_value_still_claims() {
        let mut slot = ResultSlot::new(false);
        assert!(slot.set(false));
        assert!(!slot.set(true));
        assert!(!slot.into_inner());
    }
}
