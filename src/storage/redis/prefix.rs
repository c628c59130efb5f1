//! Key namespacing

use std::sync::Arc;

/// Fixed namespace prepended to keys and channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPrefix(Arc<str>);

impl KeyPrefix {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self(Arc::from(prefix.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefix a single key
    pub fn apply(&self, key: &str) -> String {
        let mut full = String::with_capacity(self.0.len() + key.len());
        full.push_str(&self.0);
        full.push_str(key);
        full
    }

    /// Prefix every key in a slice
    pub fn apply_all<S: AsRef<str>>(&self, keys: &[S]) -> Vec<String> {
        keys.iter().map(|k| self.apply(k.as_ref())).collect()
    }

    /// Remove the prefix from a key the server handed back
    ///
    /// Keys outside the namespace are returned unchanged.
    pub fn strip<'a>(&self, key: &'a str) -> &'a str {
        key.strip_prefix(&*self.0).unwrap_or(key)
    }

    /// Remove the prefix, or `None` when the key lies outside the namespace
    pub fn strip_exact<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(&*self.0)
    }

    /// Prefix a glob pattern, matching the prefix literally
    pub fn apply_pattern(&self, pattern: &str) -> String {
        let mut full = escape_glob(&self.0);
        full.push_str(pattern);
        full
    }

    /// Undo [`KeyPrefix::apply_pattern`] on a pattern the server echoed back
    pub fn strip_pattern<'a>(&self, pattern: &'a str) -> &'a str {
        pattern
            .strip_prefix(escape_glob(&self.0).as_str())
            .unwrap_or(pattern)
    }
}

/// Backslash-escape the characters Redis treats as glob syntax
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl From<&str> for KeyPrefix {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

impl From<String> for KeyPrefix {
    fn from(prefix: String) -> Self {
        Self::new(prefix)
    }
}
