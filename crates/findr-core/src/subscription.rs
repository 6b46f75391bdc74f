//! Live subscription handle
//!
//! A `Subscription` is what a live query or the session listener hands back:
//! a stream of deliveries plus the hook that detaches the listener at the
//! source. The listener is released exactly once, either explicitly through
//! [`Subscription::unsubscribe`] or when the handle is dropped.

use std::fmt;

use futures::stream::{self, BoxStream, StreamExt};
use futures::FutureExt;

use crate::traits::RepoResult;

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// Owned handle on a live listener
pub struct Subscription<T> {
    stream: BoxStream<'static, RepoResult<T>>,
    release: Option<ReleaseFn>,
}

impl<T: Send + 'static> Subscription<T> {
    /// Wrap a delivery stream and the function that detaches it
    pub fn new<F>(stream: BoxStream<'static, RepoResult<T>>, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            stream,
            release: Some(Box::new(release)),
        }
    }

    /// Subscription that never delivers anything
    pub fn empty() -> Self {
        Self {
            stream: stream::pending().boxed(),
            release: None,
        }
    }

    /// Wait for the next delivery; `None` once the source has gone away
    pub async fn next(&mut self) -> Option<RepoResult<T>> {
        self.stream.next().await
    }

    /// What [`next`](Self::next) would resolve to right now, without
    /// waiting
    ///
    /// `None` means nothing is queued yet; `Some(None)` means the source has
    /// gone away.
    pub fn next_ready(&mut self) -> Option<Option<RepoResult<T>>> {
        self.stream.next().now_or_never()
    }

    /// Transform every successful delivery, turning mapping failures into
    /// delivery errors
    pub fn and_then<U, F>(mut self, mut f: F) -> Subscription<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> RepoResult<U> + Send + 'static,
    {
        let release = self.release.take();
        let source = std::mem::replace(&mut self.stream, stream::pending().boxed());
        Subscription {
            stream: source.map(move |item| item.and_then(&mut f)).boxed(),
            release,
        }
    }
}

impl<T> Subscription<T> {
    /// Detach the listener now
    pub fn unsubscribe(mut self) {
        self.release_listener();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_listener(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.release_listener();
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
