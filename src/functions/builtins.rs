//! Pure utilities: `get`, `split` and `join`.

use crate::{
    context::Context,
    error::FilterError,
    functions::{Function, FunctionRegistry},
    value::Value,
};

pub(crate) fn install(registry: &mut FunctionRegistry) {
    registry.install("get", Function::sync(get));
    registry.install("split", Function::sync(split));
    registry.install("join", Function::sync(join));
}

/// `get('name')` - read one field from the previous value.
pub fn get(_ctx: &mut Context, prev: Value, args: Vec<Value>) -> Result<Value, FilterError> {
    if !prev.is_truthy() {
        return Err(FilterError::type_error(
            "A previous value must be present in order to use `get`.",
        ));
    }

    let prop = match args.first() {
        Some(prop) if prop.is_truthy() => prop.to_display_string(),
        _ => return Err(FilterError::type_error("Property must be specified.")),
    };

    Ok(prev.field(&prop).unwrap_or(Value::Null))
}

/// `split(',')` - split a string, dropping empty fragments.
pub fn split(_ctx: &mut Context, prev: Value, args: Vec<Value>) -> Result<Value, FilterError> {
    let Value::String(text) = prev else {
        return Err(FilterError::type_error("Can't split on non-string."));
    };

    let fragments: Vec<Value> = match args.first() {
        None | Some(Value::Null) => vec![text],
        Some(delimiter) => {
            let delimiter = delimiter.to_display_string();
            if delimiter.is_empty() {
                text.chars().map(String::from).collect()
            } else {
                text.split(delimiter.as_str()).map(str::to_string).collect()
            }
        }
    }
    .into_iter()
    .filter(|fragment| !fragment.is_empty())
    .map(Value::String)
    .collect();

    Ok(Value::Array(fragments))
}

/// `join(' ')` - glue an array back into a string; strings pass through.
pub fn join(_ctx: &mut Context, prev: Value, args: Vec<Value>) -> Result<Value, FilterError> {
    match prev {
        Value::String(_) => Ok(prev),
        Value::Array(items) => {
            let glue = match args.first() {
                None | Some(Value::Null) => ",".to_string(),
                Some(glue) => glue.to_display_string(),
            };
            let joined = items
                .iter()
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(&glue);
            Ok(Value::String(joined))
        }
        _ => Err(FilterError::type_error("Can't join a non-array.")),
    }
}
