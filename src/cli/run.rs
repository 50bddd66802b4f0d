//! Run filter expressions against text input

use std::time::Duration;

use super::CliError;
use crate::{Context, Function, REQUEST_KEY, Runtime, Value};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The filter expression to run
    pub expression: String,
    /// Text exposed to the expression through the `stdin` function
    pub input: Option<String>,
    /// JSON object placed in the context as the request
    pub request: Option<String>,
    /// JSON object the context starts out with
    pub context: Option<String>,
    /// Give up if evaluation takes longer than this
    pub timeout: Option<Duration>,
}

/// Chain values and the final context, as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub values: Vec<serde_json::Value>,
    pub context: serde_json::Value,
}

/// Build a context from a JSON object.
pub fn context_from_json(json: &str) -> Result<Context, CliError> {
    match Value::from(serde_json::from_str::<serde_json::Value>(json)?) {
        Value::Object(map) => Ok(Context::from(map)),
        other => Err(CliError::InvalidContext(other.type_name())),
    }
}

/// Execute a pipette run operation
pub async fn execute_run(options: &RunOptions) -> Result<RunOutput, CliError> {
    let mut runtime = Runtime::new();

    if let Some(input) = options.input.clone() {
        runtime.register_function(
            "stdin",
            Function::sync(move |_ctx, _prev, _args| Ok(Value::String(input.clone()))),
        )?;
    }

    let mut ctx = match &options.context {
        Some(json) => context_from_json(json)?,
        None => Context::new(),
    };

    if let Some(json) = &options.request {
        let request = serde_json::from_str::<serde_json::Value>(json)?;
        ctx.set(REQUEST_KEY, Value::from(request));
    }

    let evaluation = runtime.execute(&options.expression, &mut ctx)?;
    let values = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, evaluation)
            .await
            .map_err(|_| CliError::Timeout(limit))??,
        None => evaluation.await?,
    };

    ctx.take_request();

    Ok(RunOutput {
        values: values.into_iter().map(serde_json::Value::from).collect(),
        context: ctx.into_value().into(),
    })
}
