//! Change listeners shared by the filter and DPS stores

/// Callback invoked with the store's new state
pub type Listener<S> = Box<dyn FnMut(&S)>;

/// Handle returned by `subscribe`, consumed by `unsubscribe`
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Registered listeners for one store
pub struct Listeners<S> {
    next_id: u64,
    entries: Vec<(u64, Listener<S>)>,
}

impl<S> Default for Listeners<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Listeners<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Returns false if no listener here matches the subscription
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != subscription.0);
        self.entries.len() != before
    }

    /// Call every listener in subscription order
    pub fn notify(&mut self, state: &S) {
        for (_, listener) in &mut self.entries {
            listener(state);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> std::fmt::Debug for Listeners<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_reaches_subscribers_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u32> = Listeners::new();

        let sink = Rc::clone(&seen);
        let sub = listeners.subscribe(move |v| sink.borrow_mut().push(*v));

        listeners.notify(&1);
        assert!(listeners.unsubscribe(sub));
        listeners.notify(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(listeners.is_empty());
    }
}
