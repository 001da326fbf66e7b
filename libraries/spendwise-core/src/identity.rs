//! Identity contract: who owns the expense list right now

use tokio::sync::watch;

use crate::types::UserId;

/// Source of the current owner id, with change notification.
///
/// `None` means nobody is signed in.
pub trait IdentityProvider: Send + Sync {
    /// The owner id at this moment
    fn current_owner(&self) -> Option<UserId>;

    /// Receiver that is notified whenever the owner id changes
    fn subscribe(&self) -> watch::Receiver<Option<UserId>>;
}

/// Watch-channel backed owner id.
///
/// Setting the same owner twice does not notify subscribers.
#[derive(Debug)]
pub struct OwnerChannel {
    tx: watch::Sender<Option<UserId>>,
}

impl OwnerChannel {
    /// Start with the given owner (or nobody)
    pub fn new(owner: Option<UserId>) -> Self {
        let (tx, _rx) = watch::channel(owner);
        Self { tx }
    }

    /// Publish a new owner. Returns true if it differed from the previous one.
    pub fn set(&self, owner: Option<UserId>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == owner {
                false
            } else {
                *current = owner;
                true
            }
        })
    }
}

impl Default for OwnerChannel {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IdentityProvider for OwnerChannel {
    fn current_owner(&self) -> Option<UserId> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_notifies_only_on_change() {
        let channel = OwnerChannel::default();
        let mut rx = channel.subscribe();

        assert!(channel.set(Some(UserId::new("u1"))));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some(UserId::new("u1")));

        assert!(!channel.set(Some(UserId::new("u1"))));
        assert!(!rx.has_changed().unwrap());

        assert!(channel.set(None));
        assert_eq!(channel.current_owner(), None);
    }
}
