use std::collections::HashMap;

/// Remembers the last message sent under each key so repeats are dropped.
///
/// Keys are homework names, or one of the sentinels the poll loop uses for
/// messages that are not about a particular homework.
#[derive(Debug, Default)]
pub struct NotificationGate {
    last_sent: HashMap<String, String>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing was recorded for `key` yet, or the text changed.
    pub fn should_notify(&self, key: &str, message: &str) -> bool {
        self.last_sent.get(key).map_or(true, |last| last != message)
    }

    pub fn record(&mut self, key: &str, message: &str) {
        self.last_sent.insert(key.to_string(), message.to_string());
    }

    /// Check and record in one step. Returns whether the message should go out.
    pub fn admit(&mut self, key: &str, message: &str) -> bool {
        if !self.should_notify(key, message) {
            return false;
        }
        self.record(key, message);
        true
    }

    #[cfg(test)]
    pub fn last_sent(&self, key: &str) -> Option<&str> {
        self.last_sent.get(key).map(String::as_str)
    }
}
