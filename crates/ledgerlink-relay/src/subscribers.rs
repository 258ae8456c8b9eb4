//! In-memory subscriber registry.
//!
//! The set of forwarding targets, kept behind an async `RwLock`. Delivery
//! code works on a snapshot copy, so a fan-out in flight never holds the
//! lock while control events mutate the set.

use tokio::sync::RwLock;

use ledgerlink_core::control::SubscriberUpdate;

/// What applying a control update actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl Applied {
    pub fn as_str(&self) -> &'static str {
        match self {
            Applied::Added => "added",
            Applied::AlreadyPresent => "already_present",
            Applied::Removed => "removed",
            Applied::NotPresent => "not_present",
        }
    }
}

/// Deduplicated forwarding targets in insertion order.
#[derive(Default)]
pub struct SubscriberSet {
    urls: RwLock<Vec<String>>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self {
            urls: RwLock::new(Vec::new()),
        }
    }

    /// Apply one control update. Adding a URL that is already present and
    /// removing one that is not are no-ops, so a replayed control event
    /// cannot corrupt the set.
    pub async fn apply(&self, update: &SubscriberUpdate) -> Applied {
        let mut urls = self.urls.write().await;
        match update {
            SubscriberUpdate::Add { url } => {
                if urls.iter().any(|u| u == url) {
                    Applied::AlreadyPresent
                } else {
                    urls.push(url.clone());
                    Applied::Added
                }
            }
            SubscriberUpdate::Remove { url } => match urls.iter().position(|u| u == url) {
                Some(i) => {
                    urls.remove(i);
                    Applied::Removed
                }
                None => Applied::NotPresent,
            },
        }
    }

    /// Copy of the current targets.
    pub async fn snapshot(&self) -> Vec<String> {
        self.urls.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.urls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.urls.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(url: &str) -> SubscriberUpdate {
        SubscriberUpdate::Add {
            url: url.to_string(),
        }
    }

    fn remove(url: &str) -> SubscriberUpdate {
        SubscriberUpdate::Remove {
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_add_keeps_one_entry() {
        let set = SubscriberSet::new();
        assert_eq!(set.apply(&add("http://a/hook")).await, Applied::Added);
        assert_eq!(
            set.apply(&add("http://a/hook")).await,
            Applied::AlreadyPresent
        );
        assert_eq!(set.snapshot().await, vec!["http://a/hook".to_string()]);
    }

    #[tokio::test]
    async fn double_add_then_one_stop_empties_the_set() {
        let set = SubscriberSet::new();
        set.apply(&add("http://a/hook")).await;
        set.apply(&add("http://a/hook")).await;
        set.apply(&remove("http://a/hook")).await;
        assert!(set.is_empty().await);
    }

    #[tokio::test]
    async fn removing_a_missing_url_is_a_no_op() {
        let set = SubscriberSet::new();
        set.apply(&add("http://a/hook")).await;
        assert_eq!(set.apply(&remove("http://b/hook")).await, Applied::NotPresent);
        assert_eq!(set.len().await, 1);
        assert_eq!(set.apply(&remove("http://a/hook")).await, Applied::Removed);
        assert!(set.is_empty().await);
    }

    #[tokio::test]
    async fn snapshot_is_isolated_from_later_updates() {
        let set = SubscriberSet::new();
        set.apply(&add("http://a/hook")).await;
        let snapshot = set.snapshot().await;
        set.apply(&add("http://b/hook")).await;
        assert_eq!(snapshot, vec!["http://a/hook".to_string()]);
        assert_eq!(set.len().await, 2);
    }

    #[tokio::test]
    async fn insertion_order_is_preserved() {
        let set = SubscriberSet::new();
        for url in ["http://a/1", "http://b/2", "http://c/3"] {
            set.apply(&add(url)).await;
        }
        set.apply(&remove("http://b/2")).await;
        assert_eq!(
            set.snapshot().await,
            vec!["http://a/1".to_string(), "http://c/3".to_string()]
        );
    }
}
