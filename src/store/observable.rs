//! Single-value publish/subscribe channel on top of `tokio::sync::watch`

use tokio::sync::watch;

/// Holds one current value; every subscriber sees the latest publish.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Observable { tx }
    }

    /// Replace the current value and wake all subscribers
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
            delivered_initial: false,
        }
    }
}

/// Receiving end of an [`Observable`].
///
/// The first `next()` resolves immediately with the current value. Later
/// calls wait for a publish; publishes that land between two calls are
/// conflated into the newest one.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    delivered_initial: bool,
}

impl<T: Clone> Subscription<T> {
    /// Next value, or `None` once the observable is gone. Cancel safe.
    pub async fn next(&mut self) -> Option<T> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Peek at the current value without consuming a notification
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }
}
