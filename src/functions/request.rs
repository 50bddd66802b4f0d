//! Adapters over the request-like object an embedder stores in the context.
//!
//! The object is expected to look like `{query, headers, url}`. Each adapter
//! has a one-letter alias (`q`, `h`, `p`, `u`, `r`).

use crate::{
    context::Context,
    error::FilterError,
    functions::{Function, FunctionRegistry},
    value::Value,
};

type Adapter = fn(&mut Context, Value, Vec<Value>) -> Result<Value, FilterError>;

pub(crate) fn install(registry: &mut FunctionRegistry) {
    for (name, alias, adapter) in [
        ("query", "q", query as Adapter),
        ("headers", "h", headers),
        ("path", "p", path),
        ("url", "u", url),
        ("request", "r", request),
    ] {
        registry.install(name, Function::sync(adapter));
        registry.install(alias, Function::sync(adapter));
    }
}

fn current_request(ctx: &Context) -> Result<&Value, FilterError> {
    ctx.request()
        .filter(|request| request.is_truthy())
        .ok_or_else(|| FilterError::type_error("No request object is available in the context."))
}

fn field(ctx: &Context, name: &str) -> Result<Value, FilterError> {
    Ok(current_request(ctx)?
        .lookup(name)
        .cloned()
        .unwrap_or(Value::Null))
}

pub fn query(ctx: &mut Context, _prev: Value, _args: Vec<Value>) -> Result<Value, FilterError> {
    field(ctx, "query")
}

pub fn headers(ctx: &mut Context, _prev: Value, _args: Vec<Value>) -> Result<Value, FilterError> {
    field(ctx, "headers")
}

pub fn url(ctx: &mut Context, _prev: Value, _args: Vec<Value>) -> Result<Value, FilterError> {
    field(ctx, "url")
}

pub fn request(ctx: &mut Context, _prev: Value, _args: Vec<Value>) -> Result<Value, FilterError> {
    current_request(ctx).cloned()
}

pub fn path(ctx: &mut Context, _prev: Value, _args: Vec<Value>) -> Result<Value, FilterError> {
    match field(ctx, "url")? {
        Value::String(url) => Ok(pathname(&url).map(Value::from).unwrap_or(Value::Null)),
        _ => Ok(Value::Null),
    }
}

/// The path component of a URL: scheme and authority stripped, query and
/// fragment dropped.
///
/// ```
/// use pipette_lang::functions::request::pathname;
///
/// assert_eq!(pathname("/news/story?id=1"), Some("/news/story"));
/// assert_eq!(pathname("https://example.com/a/b#top"), Some("/a/b"));
/// assert_eq!(pathname("https://example.com"), Some("/"));
/// assert_eq!(pathname("?x=1"), None);
/// ```
pub fn pathname(url: &str) -> Option<&str> {
    let rest = match url.find("://") {
        Some(scheme_end) => {
            let after_scheme = &url[scheme_end + 3..];
            match after_scheme.find(['/', '?', '#']) {
                Some(i) if after_scheme[i..].starts_with('/') => &after_scheme[i..],
                _ => return Some("/"),
            }
        }
        None => url,
    };

    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let path = &rest[..end];
    (!path.is_empty()).then_some(path)
}
