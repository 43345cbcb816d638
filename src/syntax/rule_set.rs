//! Priority-ordered rule collections
//!
//! The set is always sorted by descending priority. Passes never see a
//! half-updated set: they work from a [`RuleSnapshot`] taken on the owning
//! thread, and later mutations copy the rules instead of touching the
//! snapshot.

use std::sync::Arc;

use super::rules::{Rule, RuleId};

/// Immutable view of a rule set handed to a highlighting pass
pub type RuleSnapshot = Arc<Vec<Rule>>;

/// Ordered collection of highlighting rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: RuleSnapshot,
    next_id: u64,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule and return its id
    ///
    /// Equal priorities keep insertion order, so the earlier rule claims
    /// contested text first.
    pub fn add(&mut self, mut rule: Rule) -> RuleId {
        self.next_id += 1;
        let id = RuleId(self.next_id);
        rule.id = id;

        let rules = Arc::make_mut(&mut self.rules);
        rules.push(rule);
        Self::sort(rules);
        id
    }

    /// Remove a rule by id
    pub fn remove(&mut self, id: RuleId) -> bool {
        let Some(idx) = self.rules.iter().position(|r| r.id == id) else {
            return false;
        };
        Arc::make_mut(&mut self.rules).remove(idx);
        true
    }

    /// Remove every rule
    pub fn clear(&mut self) {
        if !self.rules.is_empty() {
            self.rules = Arc::new(Vec::new());
        }
    }

    /// Modify a rule in place, re-sorting afterwards
    ///
    /// Returns false if no rule has this id.
    pub fn update<F>(&mut self, id: RuleId, f: F) -> bool
    where
        F: FnOnce(&mut Rule),
    {
        let Some(idx) = self.rules.iter().position(|r| r.id == id) else {
            return false;
        };
        let rules = Arc::make_mut(&mut self.rules);
        f(&mut rules[idx]);
        rules[idx].id = id;
        Self::sort(rules);
        true
    }

    /// Get a rule by id
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Rules in descending priority order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Cheap immutable copy for a pass running elsewhere
    pub fn snapshot(&self) -> RuleSnapshot {
        Arc::clone(&self.rules)
    }

    fn sort(rules: &mut [Rule]) {
        // Stable: ties stay in insertion order
        rules.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.add(rule);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Argb;

    fn rule(pattern: &str, priority: i32) -> Rule {
        Rule::new(pattern, Argb::WHITE, false, priority)
    }

    fn priorities(set: &RuleSet) -> Vec<i32> {
        set.iter().map(|r| r.priority()).collect()
    }

    #[test]
    fn test_sorted_after_every_add() {
        let mut set = RuleSet::new();
        set.add(rule("a", 10));
        assert_eq!(priorities(&set), vec![10]);
        set.add(rule("b", 30));
        assert_eq!(priorities(&set), vec![30, 10]);
        set.add(rule("c", 20));
        assert_eq!(priorities(&set), vec![30, 20, 10]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut set = RuleSet::new();
        set.add(rule("first", 20));
        set.add(rule("high", 40));
        set.add(rule("second", 20));
        let patterns: Vec<_> = set.iter().map(|r| r.pattern()).collect();
        assert_eq!(patterns, vec!["high", "first", "second"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set = RuleSet::new();
        let a = set.add(rule("a", 1));
        let b = set.add(rule("b", 2));
        assert!(set.remove(a));
        assert!(!set.remove(a));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(b).map(|r| r.pattern()), Some("b"));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let mut set = RuleSet::new();
        set.add(rule("a", 1));
        let snapshot = set.snapshot();
        set.add(rule("b", 2));
        set.clear();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].pattern(), "a");
    }

    #[test]
    fn test_update_resorts() {
        let mut set = RuleSet::new();
        let low = set.add(rule("low", 1));
        set.add(rule("mid", 5));
        assert!(set.update(low, |r| r.set_priority(9)));
        assert_eq!(priorities(&set), vec![9, 5]);
        assert_eq!(set.iter().next().map(|r| r.id()), Some(low));
    }
}
