//! Single-slot live subscription
//!
//! Holds at most one live subscription, keyed by what it watches. Replacing
//! the key always releases the previous subscription before the next one is
//! opened.

use std::future;

use findr_core::{RepoResult, Subscription};
use tracing::debug;

/// Exclusive owner of one keyed subscription
#[derive(Debug)]
pub struct SubscriptionSlot<K, T> {
    key: Option<K>,
    subscription: Option<Subscription<T>>,
}

impl<K, T> SubscriptionSlot<K, T>
where
    K: Copy + PartialEq + std::fmt::Display,
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            key: None,
            subscription: None,
        }
    }

    /// What the slot is currently watching
    pub fn key(&self) -> Option<K> {
        self.key
    }

    pub fn is_watching(&self, key: K) -> bool {
        self.key == Some(key)
    }

    /// Whether a live subscription is held
    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the current subscription, then open one for `key`
    pub fn replace<F>(&mut self, key: K, open: F)
    where
        F: FnOnce(K) -> Subscription<T>,
    {
        self.clear();
        self.subscription = Some(open(key));
        self.key = Some(key);
        debug!(key = %key, "Slot subscription opened");
    }

    /// Release the subscription and forget the key
    pub fn clear(&mut self) -> Option<K> {
        self.release();
        self.key.take()
    }

    /// Release the subscription but keep the key
    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            if let Some(key) = self.key {
                debug!(key = %key, "Slot subscription released");
            }
        }
    }

    /// Next delivery with the key it belongs to; `None` means the source
    /// closed. Never resolves while the slot holds no subscription.
    pub async fn next(&mut self) -> (K, Option<RepoResult<T>>) {
        match (self.key, self.subscription.as_mut()) {
            (Some(key), Some(subscription)) => (key, subscription.next().await),
            _ => future::pending().await,
        }
    }

    /// What [`next`](Self::next) would resolve to right now; `None` while
    /// nothing is queued or the slot is empty
    pub fn next_ready(&mut self) -> Option<(K, Option<RepoResult<T>>)> {
        let key = self.key?;
        let delivery = self.subscription.as_mut()?.next_ready()?;
        Some((key, delivery))
    }
}

impl<K, T> Default for SubscriptionSlot<K, T>
where
    K: Copy + PartialEq + std::fmt::Display,
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
