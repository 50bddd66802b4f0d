use std::collections::HashMap;

use crate::value::Value;

/// Context key under which an embedder places the request-like object read by
/// the `query`, `headers`, `path`, `url` and `request` functions.
pub const REQUEST_KEY: &str = "_req";

/// The mutable store shared by every chain of one evaluation.
///
/// Assignment filters (`> name`) and registered functions write into it; later
/// filters and later chains read what earlier ones left behind. The caller owns
/// the context and lends it to [`Runtime::execute`] for one evaluation.
///
/// [`Runtime::execute`]: crate::runtime::Runtime::execute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context carrying a request-like object (`{query, headers, url}`).
    pub fn with_request(request: impl Into<Value>) -> Self {
        let mut context = Context::new();
        context.set(REQUEST_KEY, request.into());
        context
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The request-like object, if the embedder supplied one.
    pub fn request(&self) -> Option<&Value> {
        self.values.get(REQUEST_KEY)
    }

    /// Drop the request object, leaving only values produced by filters.
    pub fn take_request(&mut self) -> Option<Value> {
        self.values.remove(REQUEST_KEY)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(values: HashMap<String, Value>) -> Self {
        Context { values }
    }
}
