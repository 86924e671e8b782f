//! Case-insensitive set of item names.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

/// String key ordered and compared without regard to case.
#[derive(Debug, Clone)]
struct CaseInsensitive(String);

impl CaseInsensitive {
    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().flat_map(char::to_lowercase)
    }
}

impl Ord for CaseInsensitive {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl PartialOrd for CaseInsensitive {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CaseInsensitive {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CaseInsensitive {}

/// Names of the items surfaced through a tree.
///
/// Membership is tracked independently of the owning collection: when an item
/// is deleted elsewhere its name stays here until a rename or reload replaces
/// it. The first spelling added wins, `add("Foo")` then `add("foo")` keeps
/// `"Foo"`.
#[derive(Debug, Default)]
pub struct NameSet {
    names: RwLock<BTreeSet<CaseInsensitive>>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self::new();
        for name in names {
            set.add(name);
        }
        set
    }

    /// Insert `name` unless an equal name (ignoring case) is present.
    ///
    /// Returns true if the set changed.
    pub fn add(&self, name: impl Into<String>) -> bool {
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(CaseInsensitive(name.into()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&CaseInsensitive(name.to_string()))
    }

    /// Replace `old` with `new` if `old` is a member.
    ///
    /// Returns true if the set changed. A `new` that equals a different
    /// member (ignoring case) leaves the set untouched and returns false;
    /// changing only the case of `old` is allowed. Runs under one write lock.
    pub fn rename(&self, old: &str, new: &str) -> bool {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        let old = CaseInsensitive(old.to_string());
        let new = CaseInsensitive(new.to_string());
        if !names.contains(&old) || (new != old && names.contains(&new)) {
            return false;
        }
        names.remove(&old);
        names.insert(new);
        true
    }

    /// Names in case-insensitive order.
    pub fn names(&self) -> Vec<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|n| n.0.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_name_in_different_case_when_adding_then_keeps_one_entry() {
        let set = NameSet::new();
        assert!(set.add("Foo"));
        assert!(!set.add("foo"));

        assert_eq!(set.len(), 1);
        assert_eq!(set.names(), vec!["Foo".to_string()]);
    }

    #[test]
    fn given_member_when_checking_other_case_then_contains() {
        let set = NameSet::from_names(["Deploy"]);
        assert!(set.contains("DEPLOY"));
        assert!(set.contains("deploy"));
        assert!(!set.contains("deploys"));
    }

    #[test]
    fn given_mixed_case_names_when_listing_then_ordered_ignoring_case() {
        let set = NameSet::from_names(["beta", "Alpha", "gamma", "BETA2"]);
        assert_eq!(set.names(), vec!["Alpha", "beta", "BETA2", "gamma"]);
    }

    #[test]
    fn given_missing_name_when_renaming_then_unchanged() {
        let set = NameSet::from_names(["job1"]);
        assert!(!set.rename("job2", "job3"));
        assert_eq!(set.names(), vec!["job1"]);
    }

    #[test]
    fn given_member_when_renaming_with_other_case_then_replaced() {
        let set = NameSet::from_names(["job1", "other"]);
        assert!(set.rename("JOB1", "renamed"));
        assert!(!set.contains("job1"));
        assert!(set.contains("renamed"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn given_target_taken_by_other_member_when_renaming_then_unchanged() {
        let set = NameSet::from_names(["job1", "Job2"]);
        assert!(!set.rename("job1", "JOB2"));
        assert_eq!(set.names(), vec!["job1", "Job2"]);
    }

    #[test]
    fn given_case_only_change_when_renaming_then_spelling_replaced() {
        let set = NameSet::from_names(["job1"]);
        assert!(set.rename("job1", "JOB1"));
        assert_eq!(set.names(), vec!["JOB1"]);
    }
}
