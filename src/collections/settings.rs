//! Case-insensitive string settings with change notification.

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use tracing::debug;

/// A change to an existing setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change<'a> {
    /// The lowercased key.
    pub key: &'a str,
    /// The new value, or `None` if the key was removed.
    pub value: Option<&'a str>,
}

/// Handle for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(Change<'_>)>;

/// String settings keyed case-insensitively.
///
/// Keys are stored lowercased. Subscribers are called synchronously, in
/// subscription order, whenever an existing key is reassigned or removed.
/// Adding a new key is silent.
#[derive(Default)]
pub struct Settings {
    values: BTreeMap<String, String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(&key.to_lowercase())
    }

    /// Assign a value, notifying subscribers if the key already existed.
    ///
    /// Returns the previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        let key = key.to_lowercase();
        let value = value.into();

        let previous = self.values.insert(key.clone(), value.clone());

        if previous.is_some() {
            self.notify(Change {
                key: &key,
                value: Some(value.as_str()),
            });
        }

        previous
    }

    /// Add the key with an empty value if it is missing.
    pub fn ensure_set(&mut self, key: &str) {
        self.values.entry(key.to_lowercase()).or_default();
    }

    /// Remove the key, notifying subscribers if it existed.
    pub fn unset(&mut self, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        let previous = self.values.remove(&key);

        if previous.is_some() {
            self.notify(Change {
                key: &key,
                value: None,
            });
        }

        previous
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Register a callback for changes.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Change<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let count = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != count
    }

    fn notify(&mut self, change: Change<'_>) {
        debug!(
            key = change.key,
            removed = change.value.is_none(),
            subscribers = self.subscribers.len(),
            "setting changed"
        );

        for (_, subscriber) in &mut self.subscribers {
            subscriber(change);
        }
    }
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("values", &self.values)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<K: ToString, V: Into<String>> FromIterator<(K, V)> for Settings {
    /// Collect settings without notifying anyone.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.to_string().to_lowercase(), v.into()))
            .collect();

        Self {
            values,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, vec};
    use core::cell::RefCell;

    use super::*;

    type Log = Rc<RefCell<Vec<(String, Option<String>)>>>;

    fn recorder(settings: &mut Settings) -> (SubscriptionId, Log) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);

        let id = settings.subscribe(move |c| {
            sink.borrow_mut()
                .push((c.key.to_string(), c.value.map(ToString::to_string)));
        });

        (id, log)
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut settings = Settings::new();
        settings.set("Volume", "7");

        assert_eq!(settings.get("VOLUME"), Some("7"));
        assert!(settings.contains_key("volume"));
        assert_eq!(settings.iter().collect::<Vec<_>>(), [("volume", "7")]);
    }

    #[test]
    fn notifies_on_reassignment_and_removal() {
        let mut settings = Settings::new();
        let (_, log) = recorder(&mut settings);

        settings.set("name", "a");
        assert_eq!(settings.set("NAME", "b"), Some("a".to_string()));
        settings.unset("Name");
        settings.unset("missing");

        assert_eq!(
            *log.borrow(),
            vec![
                ("name".to_string(), Some("b".to_string())),
                ("name".to_string(), None),
            ]
        );
    }

    #[test]
    fn ensure_set_keeps_existing() {
        let mut settings: Settings = [("Mode", "fast")].into_iter().collect();

        settings.ensure_set("mode");
        settings.ensure_set("Level");

        assert_eq!(settings.get("mode"), Some("fast"));
        assert_eq!(settings.get("level"), Some(""));
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut settings = Settings::new();
        let (id, log) = recorder(&mut settings);

        settings.set("k", "1");
        assert!(settings.unsubscribe(id));
        assert!(!settings.unsubscribe(id));
        settings.set("k", "2");

        assert!(log.borrow().is_empty());
    }
}
