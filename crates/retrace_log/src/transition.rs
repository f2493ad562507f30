//! State transitions and the snapshot differ.

use retrace_core::{ObservedKey, ObservedValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-key values, in the order keys were first observed
pub type StateMap = IndexMap<ObservedKey, Value>;

/// Previous and next values for a set of observed keys
///
/// Both maps are always written together, so they share one key set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTransition {
    /// Values before the transaction
    pub previous_state: StateMap,
    /// Values after the transaction
    pub next_state: StateMap,
}

impl StateTransition {
    /// Create an empty transition
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `value`'s key set to the given pair
    ///
    /// Diffing the same key twice keeps the later pair.
    #[must_use]
    pub fn diff(&self, value: &ObservedValue, previous: Value, next: Value) -> Self {
        let mut out = self.clone();
        out.record(value.key(), previous, next);
        out
    }

    /// Set the pair for `key` in place
    pub fn record(&mut self, key: &ObservedKey, previous: Value, next: Value) {
        self.previous_state.insert(key.clone(), previous);
        self.next_state.insert(key.clone(), next);
    }

    /// Overlay every key of `other` onto this transition
    pub fn merge(&mut self, other: &StateTransition) {
        for (key, value) in &other.previous_state {
            self.previous_state.insert(key.clone(), value.clone());
        }
        for (key, value) in &other.next_state {
            self.next_state.insert(key.clone(), value.clone());
        }
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.next_state.len()
    }

    /// True if no key has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next_state.is_empty() && self.previous_state.is_empty()
    }

    /// Keys in observation order
    pub fn keys(&self) -> impl Iterator<Item = &ObservedKey> {
        self.next_state.keys()
    }

    /// Keys whose previous and next values differ
    #[must_use]
    pub fn changed_keys(&self) -> Vec<&ObservedKey> {
        self.next_state
            .iter()
            .filter(|(key, next)| self.previous_state.get(*key) != Some(*next))
            .map(|(key, _)| key)
            .collect()
    }

    /// Whether `key` changed value in this transition
    #[must_use]
    pub fn is_changed(&self, key: &str) -> bool {
        self.previous_state.get(key) != self.next_state.get(key)
    }

    /// Render one side as a JSON object
    #[must_use]
    pub fn side_as_value(side: &StateMap) -> Value {
        Value::Object(
            side.iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
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
    fn test_diff_is_pure() {
        let empty = StateTransition::new();
        let next = empty.diff(&observed("count"), json!(0), json!(1));

        assert!(empty.is_empty());
        assert_eq!(next.previous_state.get("count"), Some(&json!(0)));
        assert_eq!(next.next_state.get("count"), Some(&json!(1)));
    }

    #[test]
    fn test_diff_last_write_wins() {
        let payload = StateTransition::new()
            .diff(&observed("count"), json!(0), json!(1))
            .diff(&observed("count"), json!(5), json!(6));

        assert_eq!(payload.len(), 1);
        assert_eq!(payload.previous_state.get("count"), Some(&json!(5)));
        assert_eq!(payload.next_state.get("count"), Some(&json!(6)));
    }

    #[test]
    fn test_key_sets_match() {
        let payload = StateTransition::new()
            .diff(&observed("a"), json!(1), json!(2))
            .diff(&observed("b"), json!(null), json!("x"));

        let prev: Vec<_> = payload.previous_state.keys().collect();
        let next: Vec<_> = payload.next_state.keys().collect();
        assert_eq!(prev, next);
    }

    #[test]
    fn test_merge_overlays_keys() {
        let mut base = StateTransition::new()
            .diff(&observed("a"), json!(1), json!(2))
            .diff(&observed("b"), json!(1), json!(1));
        let delta = StateTransition::new().diff(&observed("a"), json!(2), json!(3));

        base.merge(&delta);
        assert_eq!(base.next_state.get("a"), Some(&json!(3)));
        assert_eq!(base.next_state.get("b"), Some(&json!(1)));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_changed_keys() {
        let payload = StateTransition::new()
            .diff(&observed("same"), json!(1), json!(1))
            .diff(&observed("moved"), json!(1), json!(2));

        let changed: Vec<_> = payload.changed_keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(changed, vec!["moved"]);
        assert!(payload.is_changed("moved"));
        assert!(!payload.is_changed("same"));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let ab = StateTransition::new()
            .diff(&observed("a"), json!(1), json!(2))
            .diff(&observed("b"), json!(3), json!(4));
        let ba = StateTransition::new()
            .diff(&observed("b"), json!(3), json!(4))
            .diff(&observed("a"), json!(1), json!(2));
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_serialized_field_names() {
        let payload = StateTransition::new().diff(&observed("k"), json!(1), json!(2));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["previousState"]["k"], json!(1));
        assert_eq!(value["nextState"]["k"], json!(2));
    }

    #[test]
    fn test_side_as_value() {
        let payload = StateTransition::new().diff(&observed("k"), json!(1), json!(2));
        assert_eq!(
            StateTransition::side_as_value(&payload.next_state),
            json!({"k": 2})
        );
    }
}
