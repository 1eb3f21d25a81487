//! Navigation cancellation token

use tokio::sync::watch;

/// Fires the matching token. Held by the navigator for the navigation
/// currently in flight; firing is idempotent.
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

/// Raced against staging fetches with `tokio::select!`
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelSource {
    pub fn new() -> (CancelSource, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelSource { tx }, CancelToken { rx })
    }

    /// Fire the token. Safe with no listener.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the token fires. A source dropped without firing
    /// never resolves this future; the racing fetch wins.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_fires_the_token() {
        let (source, mut token) = CancelSource::new();
        assert!(!token.is_cancelled());

        source.cancel();
        assert!(token.is_cancelled());
        token.cancelled().await;
    }

    #[tokio::test]
    async fn test_clones_observe_the_same_cancellation() {
        let (source, token) = CancelSource::new();
        let mut clone = token.clone();
        source.cancel();
        clone.cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_source_never_resolves() {
        let (source, mut token) = CancelSource::new();
        drop(source);

        tokio::select! {
            _ = token.cancelled() => panic!("token resolved without a cancel"),
            _ = tokio::time::sleep(Duration::from_millis(50)) => {}
        }
        assert!(!token.is_cancelled());
    }
}
