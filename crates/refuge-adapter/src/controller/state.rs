//! Shared handler state

use std::sync::Arc;

/// Ports handed to every request.
///
/// The repository is a cheap handle over shared storage and is cloned into
/// each request. The feed sits behind an `Arc`.
pub struct AppState<R, F> {
    pub repo: R,
    pub feed: Arc<F>,
}

impl<R, F> AppState<R, F> {
    pub fn new(repo: R, feed: F) -> Self {
        Self {
            repo,
            feed: Arc::new(feed),
        }
    }
}

impl<R: Clone, F> Clone for AppState<R, F> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            feed: Arc::clone(&self.feed),
        }
    }
}
