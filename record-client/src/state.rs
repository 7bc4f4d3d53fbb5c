//! Observable state for client front ends
//!
//! A desktop shell binds its widgets to values that announce their own
//! changes. This module provides that as an explicit subscription mechanism:
//! [`Observable`] holds a value and a list of listeners, and publishes to
//! them exactly once when `set` actually changes the value. [`Command`]
//! pairs an action with an optional availability predicate.

/// Handle returned by [`Observable::subscribe`]; pass it to
/// [`Observable::unsubscribe`] to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn Fn(&T) + Send>;

/// A value with change notification.
pub struct Observable<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

impl<T: PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies each subscriber once.
    ///
    /// Setting a value equal to the current one (under `==`) is a no-op: no
    /// listener runs. Returns whether a change was published.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, listener) in &self.listeners {
            listener(&self.value);
        }
        true
    }

    pub fn subscribe(&mut self, listener: impl Fn(&T) + Send + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }
}

/// An invokable action with an optional availability predicate.
///
/// With no predicate the command is always available. `execute` does not
/// gate on `can_execute`; the caller decides when to consult availability
/// (a UI disables the button, then invokes).
pub struct Command<P = ()> {
    action: Box<dyn Fn(&P) + Send>,
    can_execute: Option<Box<dyn Fn(&P) -> bool + Send>>,
}

impl<P> Command<P> {
    pub fn new(action: impl Fn(&P) + Send + 'static) -> Self {
        Self {
            action: Box::new(action),
            can_execute: None,
        }
    }

    pub fn with_predicate(
        action: impl Fn(&P) + Send + 'static,
        can_execute: impl Fn(&P) -> bool + Send + 'static,
    ) -> Self {
        Self {
            action: Box::new(action),
            can_execute: Some(Box::new(can_execute)),
        }
    }

    /// True when no predicate was supplied, otherwise whatever the
    /// predicate says for this parameter.
    pub fn can_execute(&self, parameter: &P) -> bool {
        match &self.can_execute {
            Some(predicate) => predicate(parameter),
            None => true,
        }
    }

    pub fn execute(&self, parameter: &P) {
        (self.action)(parameter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_set_notifies_exactly_once_on_change() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut value = Observable::new(0);

        let count_clone = count.clone();
        value.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(value.set(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*value.get(), 1);
    }

    #[test]
    fn test_set_equal_value_does_not_notify() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut value = Observable::new(String::from("same"));

        let count_clone = count.clone();
        value.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!value.set(String::from("same")));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_subscribers_see_the_new_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut value = Observable::new(10);

        for _ in 0..3 {
            let seen_clone = seen.clone();
            value.subscribe(move |v| {
                seen_clone.fetch_add(*v, Ordering::SeqCst);
            });
        }

        value.set(7);
        assert_eq!(seen.load(Ordering::SeqCst), 21);
    }

    #[test]
    fn test_unsubscribe_detaches_listener() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut value = Observable::new(0);

        let count_clone = count.clone();
        let subscription = value.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        value.unsubscribe(subscription);
        value.set(5);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_command_without_predicate_is_always_available() {
        let command: Command<i32> = Command::new(|_| {});
        assert!(command.can_execute(&0));
        assert!(command.can_execute(&-99));
    }

    #[test]
    fn test_command_delegates_to_predicate() {
        let command = Command::with_predicate(|_: &i32| {}, |n: &i32| *n > 0);
        assert!(command.can_execute(&1));
        assert!(!command.can_execute(&0));
    }

    #[test]
    fn test_command_execute_runs_action() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let command = Command::new(move |n: &usize| {
            count_clone.fetch_add(*n, Ordering::SeqCst);
        });

        command.execute(&4);
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }
}
