//! Suite cancellation signal.

use std::sync::Arc;

use tokio::sync::watch;

/// Sending half of a cancellation signal.
///
/// Cloning the token shares the same signal. Cancelling is idempotent.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Signals cancellation to every receiver.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns true once `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Creates a receiver observing this token.
    #[must_use]
    pub fn receiver(&self) -> CancellationReceiver {
        CancellationReceiver {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    receiver: watch::Receiver<bool>,
}

impl CancellationReceiver {
    /// A receiver that is never cancelled.
    #[must_use]
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// Returns true if cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once cancellation is signalled.
    ///
    /// Never completes if the token is dropped without cancelling.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
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
    async fn test_cancel_wakes_receiver() {
        let token = CancellationToken::new();
        let mut receiver = token.receiver();
        assert!(!receiver.is_cancelled());

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        tokio::time::timeout(Duration::from_secs(1), receiver.cancelled())
            .await
            .expect("receiver should observe cancellation");
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_receiver_created_after_cancel() {
        let token = CancellationToken::new();
        token.cancel();
        let mut receiver = token.receiver();
        assert!(receiver.is_cancelled());
        receiver.cancelled().await;
    }

    #[tokio::test]
    async fn test_never_does_not_complete() {
        let mut receiver = CancellationReceiver::never();
        let result =
            tokio::time::timeout(Duration::from_millis(20), receiver.cancelled()).await;
        assert!(result.is_err());
    }
}
