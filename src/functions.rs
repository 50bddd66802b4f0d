//! Named functions callable from filter expressions.
//!
//! A [`FunctionRegistry`] maps names to [`Function`]s. It starts out with the
//! built-in set (see [`builtins`] and [`request`]) and only ever grows:
//! names are unique and nothing can be unregistered.

pub mod builtins;
pub mod request;

use std::{collections::HashMap, fmt, future::Future, pin::Pin};

use crate::{context::Context, error::FilterError, value::Value};

/// Boxed, non-`Send` future returned by asynchronous functions.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

pub type SyncFn = Box<dyn Fn(&mut Context, Value, Vec<Value>) -> Result<Value, FilterError>>;

pub type AsyncFn = Box<
    dyn for<'a> Fn(&'a mut Context, Value, Vec<Value>) -> BoxFuture<'a, Result<Value, FilterError>>,
>;

/// A callable registered under a name.
///
/// Both kinds receive the shared context, the value flowing into the node, and
/// the node's literal arguments.
pub enum Function {
    /// Completes as soon as it returns
    Sync(SyncFn),

    /// Completes when its future resolves; the chain waits for it
    Async(AsyncFn),
}

impl Function {
    /// Wrap a synchronous closure.
    ///
    /// ```
    /// use pipette_lang::{Function, Value};
    ///
    /// let shout = Function::sync(|_ctx, prev, _args| {
    ///     Ok(Value::from(prev.to_display_string().to_uppercase()))
    /// });
    /// assert!(!shout.is_async());
    /// ```
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&mut Context, Value, Vec<Value>) -> Result<Value, FilterError> + 'static,
    {
        Function::Sync(Box::new(f))
    }

    /// Wrap a closure returning a boxed future.
    ///
    /// ```
    /// use pipette_lang::{Function, Value};
    ///
    /// let later = Function::asynchronous(|ctx, prev, _args| {
    ///     Box::pin(async move {
    ///         ctx.set("seen", prev.clone());
    ///         Ok(prev)
    ///     })
    /// });
    /// assert!(later.is_async());
    /// ```
    pub fn asynchronous<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut Context, Value, Vec<Value>) -> BoxFuture<'a, Result<Value, FilterError>>
            + 'static,
    {
        Function::Async(Box::new(f))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Function::Async(_))
    }

    pub async fn call(
        &self,
        ctx: &mut Context,
        prev: Value,
        args: Vec<Value>,
    ) -> Result<Value, FilterError> {
        match self {
            Function::Sync(f) => f(ctx, prev, args),
            Function::Async(f) => f(ctx, prev, args).await,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Sync(_) => f.write_str("Function::Sync"),
            Function::Async(_) => f.write_str("Function::Async"),
        }
    }
}

#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// An empty registry, without even the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::install(&mut registry);
        request::install(&mut registry);
        registry
    }

    /// Add a function.
    ///
    /// Fails with a generic error when the name is empty or already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: Function,
    ) -> Result<(), FilterError> {
        let name = name.into();

        if name.is_empty() {
            return Err(FilterError::generic(
                "You must specify a name for the function to register.",
            ));
        }

        if self.functions.contains_key(&name) {
            return Err(FilterError::generic(format!(
                "A function with the name {} is already defined.",
                name
            )));
        }

        tracing::debug!(function = %name, is_async = function.is_async(), "registered function");
        self.functions.insert(name, function);
        Ok(())
    }

    /// Built-ins are installed through here; their names never collide.
    pub(crate) fn install(&mut self, name: &str, function: Function) {
        self.functions.insert(name.to_string(), function);
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
