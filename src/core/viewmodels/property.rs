use std::fmt::{self, Debug};
use std::sync::Arc;
use tokio::sync::watch;

/// Observable value with a single writer and any number of watchers.
///
/// Clones share the same underlying value. Reads never block on writers for
/// longer than a clone, so it is safe to read from a render loop.
pub struct Property<T> {
    sender: Arc<watch::Sender<T>>,
    name: Arc<str>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (sender, _) = watch::channel(initial_value);
        let name: String = name.into();
        Self {
            sender: Arc::new(sender),
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Reads through a borrow instead of cloning. Do not hold across `.await`.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.sender.borrow())
    }

    pub fn set(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
    }

    pub fn subscribe(&self) -> PropertySubscriber<T> {
        PropertySubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property({})", self.name)
    }
}

pub struct PropertySubscriber<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> PropertySubscriber<T> {
    /// Resolves on the next write. Returns false once every property handle is gone.
    pub async fn wait_for_change(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    pub fn try_recv(&mut self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Latest value, marking it as seen.
    pub fn current(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_clones_share_value() {
        let property = Property::new(0u32, "counter");
        let other = property.clone();

        other.set(5);
        assert_eq!(property.get(), 5);

        property.update(|value| *value += 1);
        assert_eq!(other.get(), 6);
        assert_eq!(property.with(|value| *value * 2), 12);
        assert_eq!(property.name(), "counter");
    }

    #[tokio::test]
    async fn test_subscriber_sees_writes() {
        let property = Property::new(String::new(), "text");
        let mut subscriber = property.subscribe();
        assert!(!subscriber.try_recv());

        let writer = property.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            writer.set("hello".to_string());
        });

        assert!(subscriber.wait_for_change().await);
        assert_eq!(subscriber.current(), "hello");
        assert!(!subscriber.try_recv());
    }
}
