use crate::{
    ast::{Chain, FilterNode, Tree},
    behaviour,
    context::Context,
    error::FilterError,
    functions::FunctionRegistry,
    value::Value,
};

/// Walks a parsed tree, threading values through each chain.
///
/// Chains run one after another in source order, and so do the filters
/// within a chain; only one filter is ever in flight. Every chain sees the
/// same [`Context`], so values assigned by an earlier chain are visible to
/// later ones.
pub struct Evaluator<'r> {
    functions: &'r FunctionRegistry,
}

impl<'r> Evaluator<'r> {
    pub fn new(functions: &'r FunctionRegistry) -> Self {
        Evaluator { functions }
    }

    /// Evaluates every chain of a tree against a context.
    ///
    /// Returns one value per chain, in order. The first error aborts the whole
    /// evaluation: chains after the failing one never run.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette_lang::{Context, Evaluator, FunctionRegistry, Value, parser::parse};
    ///
    /// let functions = FunctionRegistry::with_builtins();
    /// let tree = parse("request < url > location").unwrap();
    /// let mut ctx = Context::with_request(Value::from(serde_json::json!({ "url": "/home" })));
    ///
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let values = rt.block_on(Evaluator::new(&functions).eval_tree(&tree, &mut ctx));
    /// assert_eq!(values.unwrap(), vec![Value::from("/home")]);
    /// assert_eq!(ctx.get("location"), Some(&Value::from("/home")));
    /// ```
    pub async fn eval_tree(
        &self,
        tree: &Tree,
        ctx: &mut Context,
    ) -> Result<Vec<Value>, FilterError> {
        let mut values = Vec::with_capacity(tree.chains.len());

        for (index, chain) in tree.chains.iter().enumerate() {
            tracing::debug!(chain = index, filters = chain.filters.len(), "evaluating chain");
            let value = self.eval_chain(chain, ctx).await.inspect_err(|e| {
                tracing::debug!(chain = index, error = %e, "chain failed");
            })?;
            values.push(value);
        }

        Ok(values)
    }

    /// Evaluates one chain, starting from a null previous value.
    pub async fn eval_chain(&self, chain: &Chain, ctx: &mut Context) -> Result<Value, FilterError> {
        let mut prev = Value::Null;

        for node in &chain.filters {
            prev = self.eval_node(node, prev, ctx).await?;
        }

        Ok(prev)
    }

    /// Evaluates a single filter.
    ///
    /// A falsy result is an error: a chain never hands `null`, `false`, `0`
    /// or `""` on to its next filter.
    pub async fn eval_node(
        &self,
        node: &FilterNode,
        prev: Value,
        ctx: &mut Context,
    ) -> Result<Value, FilterError> {
        tracing::trace!(kind = node.kind_name(), prev = prev.type_name(), "evaluating filter");

        let result = match node {
            FilterNode::Function { name, arguments } => {
                behaviour::function(self.functions, ctx, prev, name, arguments).await?
            }
            FilterNode::Property { path } => behaviour::property(&prev, path)?,
            FilterNode::Access { name } => behaviour::access(&prev, name)?,
            FilterNode::Assign { name } => behaviour::assign(ctx, prev, name)?,
            FilterNode::Subset { entries } => behaviour::subset(&prev, entries)?,
            FilterNode::Match { pattern, flags } => behaviour::matching(&prev, pattern, flags)?,
            FilterNode::Substitute {
                pattern,
                replacement,
                flags,
            } => behaviour::substitute(&prev, pattern, replacement, flags)?,
        };

        if !result.is_truthy() {
            return Err(FilterError::type_error("Result of filter operation was null"));
        }

        Ok(result)
    }
}
