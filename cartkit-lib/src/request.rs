//! Request-scoped page context.
//!
//! Hook handlers receive the request explicitly instead of reading shared
//! controller state, so nothing request-scoped can leak across renders.

use std::collections::BTreeMap;

use serde_json::Value;

/// The parts of an HTTP request a module hook may inspect: posted form
/// fields and query parameters.
///
/// # Example
///
/// ```
/// use cartkit_lib::PageRequest;
/// use serde_json::json;
///
/// let request = PageRequest::new()
///     .with_posted("pay", json!("1"))
///     .with_query("paid", "true");
///
/// assert!(request.is_posted("pay"));
/// assert!(request.has_query("paid"));
/// assert!(!request.has_query("cancel"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageRequest {
    posted: BTreeMap<String, Value>,
    query: BTreeMap<String, String>,
}

impl PageRequest {
    /// An empty request (plain page render).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a posted form field.
    pub fn with_posted(mut self, key: impl Into<String>, value: Value) -> Self {
        self.posted.insert(key.into(), value);
        self
    }

    /// Add a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Check whether a form field was posted, regardless of its value.
    pub fn is_posted(&self, key: &str) -> bool {
        self.posted.contains_key(key)
    }

    /// Get a posted form field.
    pub fn posted(&self, key: &str) -> Option<&Value> {
        self.posted.get(key)
    }

    /// All posted form fields, in key order.
    pub fn posted_fields(&self) -> &BTreeMap<String, Value> {
        &self.posted
    }

    /// Check whether a query parameter is present, regardless of its value.
    pub fn has_query(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    /// Get a query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}
