//! Runtime behaviour of each filter form.
//!
//! Every behaviour takes the value produced by the previous filter and returns
//! the value for the next one. Behaviours that need the shared context
//! (function calls and assignment) borrow it mutably; the rest are pure.

use crate::{
    ast::{Literal, SubsetEntry},
    context::Context,
    error::FilterError,
    functions::FunctionRegistry,
    pattern::Pattern,
    value::Value,
};

/// Call a registered function with the previous value followed by the
/// node's literal arguments.
pub async fn function(
    functions: &FunctionRegistry,
    ctx: &mut Context,
    prev: Value,
    name: &str,
    arguments: &[Literal],
) -> Result<Value, FilterError> {
    let function = functions.get(name).ok_or_else(|| {
        FilterError::node(format!("Function '{}' does not exist in map.", name))
    })?;

    let args: Vec<Value> = arguments.iter().map(Value::from).collect();
    function.call(ctx, prev, args).await
}

/// Walk a dot-chain path (`.a.b.c`).
pub fn property(prev: &Value, path: &[String]) -> Result<Value, FilterError> {
    if !prev.is_truthy() {
        return Err(FilterError::node("Can't extract property from null value."));
    }

    let mut pointer = prev.clone();
    for (idx, hop) in path.iter().enumerate() {
        pointer = match pointer.field(hop) {
            Some(next) if next.is_truthy() => next,
            _ => {
                return Err(FilterError::node(format!(
                    "Property '{}' is null.",
                    path[..=idx].join(".")
                )));
            }
        };
    }

    Ok(pointer)
}

/// Single-hop access (`< name`).
pub fn access(prev: &Value, name: &str) -> Result<Value, FilterError> {
    if !prev.is_truthy() {
        return Err(FilterError::type_error(
            "The value from which to access the property must be useful. (not null, truthy.)",
        ));
    }

    match prev.field(name) {
        Some(value) if value.is_truthy() => Ok(value),
        _ => Err(FilterError::type_error(
            "The returned value from the property access must be useful. (not null, truthy.)",
        )),
    }
}

/// Store the value in the context (`> name`) and pass it through.
pub fn assign(ctx: &mut Context, prev: Value, name: &str) -> Result<Value, FilterError> {
    if !prev.is_truthy() {
        return Err(FilterError::type_error(
            "The value in the assignment must be useful. (not null, truthy.)",
        ));
    }

    ctx.set(name, prev.clone());
    Ok(prev)
}

/// Pick indices and ranges out of a collection (`[0, 2-4]`).
///
/// Index entries silently skip elements that are missing *or falsy*, so a `0`
/// or `""` in the input never makes it into the output. Ranges are inclusive
/// when `lo` is non-negative; with a negative `lo` both bounds count from the
/// end and `hi` is exclusive.
pub fn subset(prev: &Value, entries: &[SubsetEntry]) -> Result<Value, FilterError> {
    if !matches!(prev, Value::Array(_) | Value::Object(_)) {
        return Err(FilterError::type_error(
            "The value piped to a subset must be an array.",
        ));
    }

    let mut result = Vec::new();

    for entry in entries {
        match *entry {
            SubsetEntry::Index(n) => {
                if let Some(item) = prev.lookup(&n.to_string())
                    && item.is_truthy()
                {
                    result.push(item.clone());
                }
            }
            SubsetEntry::Range(lo, hi) => {
                let Value::Array(items) = prev else {
                    return Err(FilterError::type_error(
                        "A range can only be taken from an array.",
                    ));
                };
                let hi = if lo >= 0 { hi.saturating_add(1) } else { hi };
                result.extend_from_slice(slice(items, lo, hi));
            }
        }
    }

    Ok(Value::Array(result))
}

/// Half-open slice with end-relative negative bounds, clamped to the array.
fn slice(items: &[Value], start: i64, end: i64) -> &[Value] {
    let len = items.len() as i64;
    let resolve = |bound: i64| {
        if bound < 0 {
            (len + bound).max(0)
        } else {
            bound.min(len)
        }
    };

    let (start, end) = (resolve(start), resolve(end));
    if start >= end {
        return &[];
    }
    &items[start as usize..end as usize]
}

/// Regular expression match (`m/find/flags`).
///
/// With `g` every full match is returned; otherwise the first match followed
/// by its capture groups. No match gives an empty array.
pub fn matching(prev: &Value, pattern: &str, flags: &str) -> Result<Value, FilterError> {
    let Value::String(text) = prev else {
        return Err(FilterError::type_error("Matching requires a string."));
    };

    let pattern = Pattern::compile(pattern, flags)?;

    let matches = if pattern.global {
        pattern
            .regex
            .find_iter(text)
            .map(|m| Value::from(m.as_str()))
            .collect()
    } else {
        match pattern.regex.captures(text) {
            Some(caps) => caps
                .iter()
                .map(|group| group.map(|m| Value::from(m.as_str())).unwrap_or(Value::Null))
                .collect(),
            None => Vec::new(),
        }
    };

    Ok(Value::Array(matches))
}

/// Regular expression substitution (`s/find/replace/flags`), applied to a
/// string or element-wise to an array of strings.
pub fn substitute(
    prev: &Value,
    pattern: &str,
    replacement: &str,
    flags: &str,
) -> Result<Value, FilterError> {
    let invalid = || FilterError::type_error("Substitution requires a string or array.");

    match prev {
        Value::String(text) => {
            let pattern = Pattern::compile(pattern, flags)?;
            Ok(Value::String(pattern.replace(text, replacement)))
        }
        Value::Array(items) => {
            let pattern = Pattern::compile(pattern, flags)?;
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Ok(Value::String(pattern.replace(text, replacement))),
                    _ => Err(invalid()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        _ => Err(invalid()),
    }
}
