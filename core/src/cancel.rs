//! Cancellation of the initial fetch.
//!
//! A `CancelSource` is held by whoever owns the view; its `CancelToken`s go to
//! the work that must stop when the view is torn down. Calling `cancel()` or
//! dropping the source both cancel every token.

use tokio::sync::watch;

#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelSource {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the source is cancelled or dropped.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // An error means the source is gone, which counts as cancellation.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_cancelled() {
        let source = CancelSource::new();
        assert!(!source.token().is_cancelled());
    }

    #[test]
    fn cancel_reaches_existing_tokens() {
        let source = CancelSource::new();
        let token = source.token();
        source.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn dropping_source_cancels() {
        let source = CancelSource::new();
        let token = source.token();
        drop(source);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_future_resolves_after_cancel() {
        let source = CancelSource::new();
        let token = source.token();
        let waiter = tokio::spawn(async move { token.cancelled().await });
        source.cancel();
        waiter.await.unwrap();
    }
}
