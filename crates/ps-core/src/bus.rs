//! `SubscriptionBus` — explicit observer registrations keyed by topic.
//!
//! Registrations are plain data: a subscriber that subscribes on entering a
//! state must unsubscribe on leaving it.  Delivery order is deterministic
//! (ascending `Subscriber`), independent of registration order.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Subscriber, Topic};

#[derive(Debug, Default)]
pub struct SubscriptionBus {
    inner: BTreeMap<Topic, BTreeSet<Subscriber>>,
}

impl SubscriptionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `subscriber` on `topic`.  Returns `false` if it already was.
    pub fn subscribe(&mut self, topic: Topic, subscriber: Subscriber) -> bool {
        self.inner.entry(topic).or_default().insert(subscriber)
    }

    /// Remove a registration.  Returns `false` if there was none.
    pub fn unsubscribe(&mut self, topic: Topic, subscriber: Subscriber) -> bool {
        let Some(set) = self.inner.get_mut(&topic) else {
            return false;
        };
        let removed = set.remove(&subscriber);
        if set.is_empty() {
            self.inner.remove(&topic);
        }
        removed
    }

    /// Snapshot of everyone registered on `topic`.
    ///
    /// Returned by value so handlers may (un)subscribe while the caller
    /// iterates.
    pub fn subscribers(&self, topic: Topic) -> Vec<Subscriber> {
        self.inner
            .get(&topic)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_subscribed(&self, topic: Topic, subscriber: Subscriber) -> bool {
        self.inner
            .get(&topic)
            .is_some_and(|set| set.contains(&subscriber))
    }

    /// Total number of (topic, subscriber) registrations.
    pub fn subscription_count(&self) -> usize {
        self.inner.values().map(BTreeSet::len).sum()
    }

    /// Number of registrations held by `subscriber` across all topics.
    pub fn count_for(&self, subscriber: Subscriber) -> usize {
        self.inner
            .values()
            .filter(|set| set.contains(&subscriber))
            .count()
    }
}
