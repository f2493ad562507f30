//! Transaction accumulator.
//!
//! Folds the per-value diffs of one transaction into two transitions at once:
//! the transaction-local payload stored on the action record, and the
//! cumulative transition stored in `computed_states`.

use crate::transition::StateTransition;
use retrace_core::ObservedValue;
use serde_json::Value;

/// Result of folding one transaction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedTransaction {
    /// Only the keys touched by this transaction
    pub payload: StateTransition,
    /// Every key observed so far, with this transaction applied
    pub cumulative: StateTransition,
}

/// Accumulates diffs for a single transaction
#[derive(Debug, Clone)]
pub struct TransactionAccumulator {
    payload: StateTransition,
    cumulative: StateTransition,
    folded: usize,
}

impl TransactionAccumulator {
    /// Start from an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::seeded(&StateTransition::new())
    }

    /// Start from the last cumulative transition in the log
    #[must_use]
    pub fn seeded(prior: &StateTransition) -> Self {
        Self {
            payload: StateTransition::new(),
            cumulative: prior.clone(),
            folded: 0,
        }
    }

    /// Fold one observed value's previous/next pair
    pub fn fold(&mut self, value: &ObservedValue, previous: Value, next: Value) {
        self.cumulative
            .record(value.key(), previous.clone(), next.clone());
        self.payload.record(value.key(), previous, next);
        self.folded += 1;
    }

    /// Fold pairs in iteration order
    pub fn fold_all<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (ObservedValue, Value, Value)>,
    {
        for (value, previous, next) in pairs {
            self.fold(&value, previous, next);
        }
    }

    /// Number of diffs folded, duplicates included
    #[must_use]
    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Transaction-local payload so far
    #[must_use]
    pub fn payload(&self) -> &StateTransition {
        &self.payload
    }

    /// Cumulative transition so far
    #[must_use]
    pub fn cumulative(&self) -> &StateTransition {
        &self.cumulative
    }

    /// Finish the transaction
    #[must_use]
    pub fn finish(self) -> RecordedTransaction {
        RecordedTransaction {
            payload: self.payload,
            cumulative: self.cumulative,
        }
    }
}

impl Default for TransactionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn observed(key: &str) -> ObservedValue {
        ObservedValue::new(key).unwrap()
    }

    #[test]
    fn test_empty_transaction() {
        let recorded = TransactionAccumulator::new().finish();
        assert!(recorded.payload.is_empty());
        assert!(recorded.cumulative.is_empty());
    }

    #[test]
    fn test_seeded_carries_forward() {
        let prior = StateTransition::new()
            .diff(&observed("a"), json!(0), json!(1))
            .diff(&observed("b"), json!("x"), json!("y"));

        let mut acc = TransactionAccumulator::seeded(&prior);
        acc.fold(&observed("a"), json!(1), json!(2));
        let recorded = acc.finish();

        assert_eq!(recorded.payload.len(), 1);
        assert_eq!(recorded.cumulative.next_state.get("a"), Some(&json!(2)));
        assert_eq!(recorded.cumulative.next_state.get("b"), Some(&json!("y")));
        assert_eq!(recorded.cumulative.previous_state.get("b"), Some(&json!("x")));
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let mut acc = TransactionAccumulator::new();
        acc.fold_all(vec![
            (observed("k"), json!(1), json!(2)),
            (observed("k"), json!(3), json!(4)),
        ]);
        assert_eq!(acc.folded(), 2);

        let recorded = acc.finish();
        assert_eq!(recorded.payload.next_state.get("k"), Some(&json!(4)));
        assert_eq!(recorded.cumulative.previous_state.get("k"), Some(&json!(3)));
    }

    #[test]
    fn test_prior_is_untouched() {
        let prior = StateTransition::new().diff(&observed("a"), json!(0), json!(1));
        let mut acc = TransactionAccumulator::seeded(&prior);
        acc.fold(&observed("a"), json!(1), json!(9));
        assert_eq!(prior.next_state.get("a"), Some(&json!(1)));
        assert_eq!(acc.cumulative().next_state.get("a"), Some(&json!(9)));
    }
}
