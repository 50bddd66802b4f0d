use std::future::Future;

use tracing::Instrument;

use crate::{
    ast::Tree,
    context::Context,
    error::FilterError,
    evaluator::Evaluator,
    functions::{Function, FunctionRegistry},
    parser,
    value::Value,
};

/// Entry point for running filter expressions.
///
/// A runtime owns the function registry: the built-ins plus anything an
/// embedder registers. Registration is append-only and names are unique.
///
/// # Examples
///
/// ```
/// use pipette_lang::{Context, Function, Runtime, Value};
///
/// let mut runtime = Runtime::new();
/// runtime
///     .register_function("fixture", Function::sync(|_ctx, _prev, _args| {
///         Ok(Value::from(serde_json::json!({ "abc": "def", "qrs": "tuv" })))
///     }))
///     .unwrap();
///
/// let mut ctx = Context::new();
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let values = rt
///     .block_on(runtime.execute("fixture.abc > abc, fixture < qrs > qwerty", &mut ctx).unwrap())
///     .unwrap();
///
/// assert_eq!(values, vec![Value::from("def"), Value::from("tuv")]);
/// assert_eq!(ctx.get("qwerty"), Some(&Value::from("tuv")));
/// ```
#[derive(Debug)]
pub struct Runtime {
    functions: FunctionRegistry,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// A runtime with the built-in functions registered.
    pub fn new() -> Self {
        Runtime {
            functions: FunctionRegistry::with_builtins(),
        }
    }

    /// A runtime with no functions at all.
    pub fn empty() -> Self {
        Runtime {
            functions: FunctionRegistry::new(),
        }
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Make a function callable by name from expressions run on this runtime.
    ///
    /// Fails with [`FilterError::Generic`] if the name is empty or taken.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: Function,
    ) -> Result<(), FilterError> {
        self.functions.register(name, function)
    }

    /// Parse an expression without running it.
    pub fn parse(text: &str) -> Result<Tree, FilterError> {
        parser::parse(text).map_err(|e| {
            tracing::debug!(error = %e, "failed to parse filter expression");
            FilterError::from(e)
        })
    }

    /// Parse `text` and prepare its evaluation against `ctx`.
    ///
    /// Malformed input is reported right away as [`FilterError::Parse`]. On
    /// success the returned future runs every chain and resolves to one value
    /// per chain, or to the first node or type error raised along the way.
    /// The context is mutated in place.
    pub fn execute<'a>(
        &'a self,
        text: &str,
        ctx: &'a mut Context,
    ) -> Result<impl Future<Output = Result<Vec<Value>, FilterError>> + use<'a>, FilterError> {
        let tree = Self::parse(text)?;
        let span = tracing::debug_span!("execute", chains = tree.chains.len());

        Ok(async move { self.evaluate(&tree, ctx).await }.instrument(span))
    }

    /// Evaluate an already parsed tree.
    pub async fn evaluate(&self, tree: &Tree, ctx: &mut Context) -> Result<Vec<Value>, FilterError> {
        Evaluator::new(&self.functions).eval_tree(tree, ctx).await
    }
}
