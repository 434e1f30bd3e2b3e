//! Minimal synchronous change notification.
//!
//! Stores own a `Notifier` and emit an event after every successful
//! mutation. Listeners run inline, in subscription order, before the
//! mutating call returns — there is no queue and no scheduling.

/// A list of subscribers for one event type.
pub struct Notifier<E> {
    listeners: Vec<Box<dyn Fn(&E)>>,
}

impl<E> Notifier<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Listeners cannot be removed; they live as long
    /// as the store that owns the notifier.
    pub fn subscribe(&mut self, listener: impl Fn(&E) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Invoke every listener with the event, synchronously.
    pub fn emit(&self, event: &E) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
