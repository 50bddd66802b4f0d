// tests/functions_tests.rs

use pipette_lang::functions::{builtins, request};
use pipette_lang::{Context, ErrorKind, Function, FunctionRegistry, REQUEST_KEY, Value};
use serde_json::json;

fn noop() -> Function {
    Function::sync(|_ctx, prev, _args| Ok(prev))
}

fn strings(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| Value::from(*s)).collect())
}

fn request_context() -> Context {
    Context::with_request(Value::from(json!({
        "query": { "id": "42", "tab": "all" },
        "headers": { "host": "example.com", "accept": "text/html" },
        "url": "https://example.com/news/story?id=42#comments",
    })))
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_register_and_lookup() {
    let mut registry = FunctionRegistry::new();
    assert!(registry.is_empty());

    registry.register("abc", noop()).unwrap();
    assert!(registry.contains("abc"));
    assert!(registry.get("abc").is_some());
    assert!(registry.get("def").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_duplicate_name() {
    let mut registry = FunctionRegistry::new();
    registry.register("abc", noop()).unwrap();

    let err = registry.register("abc", noop()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.message(), "A function with the name abc is already defined.");
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_empty_name() {
    let mut registry = FunctionRegistry::new();
    let err = registry.register("", noop()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.message(), "You must specify a name for the function to register.");
    assert!(registry.is_empty());
}

#[test]
fn test_builtin_names_cannot_be_reused() {
    let mut registry = FunctionRegistry::with_builtins();
    let err = registry.register("split", noop()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
}

#[test]
fn test_builtin_names_sorted() {
    let registry = FunctionRegistry::with_builtins();
    assert_eq!(
        registry.names(),
        vec![
            "get", "h", "headers", "join", "p", "path", "q", "query", "r", "request", "split",
            "u", "url"
        ]
    );
}

#[test]
fn test_function_kind() {
    assert!(!noop().is_async());
    let later = Function::asynchronous(|_ctx, prev, _args| Box::pin(async move { Ok(prev) }));
    assert!(later.is_async());
    assert_eq!(format!("{:?}", later), "Function::Async");
}

#[tokio::test]
async fn test_call_sync_and_async() {
    let mut ctx = Context::new();

    let upper = Function::sync(|_ctx, prev, _args| {
        Ok(Value::from(prev.to_display_string().to_uppercase()))
    });
    assert_eq!(
        upper.call(&mut ctx, Value::from("abc"), vec![]).await.unwrap(),
        Value::from("ABC")
    );

    let remember = Function::asynchronous(|ctx, prev, args| {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let key = args
                .first()
                .map(Value::to_display_string)
                .unwrap_or_default();
            ctx.set(key, prev.clone());
            Ok(prev)
        })
    });
    let result = remember
        .call(&mut ctx, Value::from("xyz"), vec![Value::from("seen")])
        .await
        .unwrap();
    assert_eq!(result, Value::from("xyz"));
    assert_eq!(ctx.get("seen"), Some(&Value::from("xyz")));
}

// ============================================================================
// get / split / join
// ============================================================================

#[test]
fn test_get() {
    let mut ctx = Context::new();
    let prev = Value::from(json!({ "abc": "def" }));

    let result = builtins::get(&mut ctx, prev.clone(), vec![Value::from("abc")]).unwrap();
    assert_eq!(result, Value::from("def"));

    let result = builtins::get(&mut ctx, prev.clone(), vec![Value::from("missing")]).unwrap();
    assert_eq!(result, Value::Null);

    let result = builtins::get(&mut ctx, Value::from("abcd"), vec![Value::from("length")]).unwrap();
    assert_eq!(result, Value::Integer(4));

    let err = builtins::get(&mut ctx, prev, vec![]).unwrap_err();
    assert_eq!(err.message(), "Property must be specified.");

    let err = builtins::get(&mut ctx, Value::Null, vec![Value::from("abc")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(
        err.message(),
        "A previous value must be present in order to use `get`."
    );
}

#[test]
fn test_split() {
    let mut ctx = Context::new();

    let result = builtins::split(&mut ctx, Value::from("a,b,,c"), vec![Value::from(",")]).unwrap();
    assert_eq!(result, strings(&["a", "b", "c"]));

    let result = builtins::split(&mut ctx, Value::from("abc"), vec![Value::from("")]).unwrap();
    assert_eq!(result, strings(&["a", "b", "c"]));

    let result = builtins::split(&mut ctx, Value::from("a b"), vec![]).unwrap();
    assert_eq!(result, strings(&["a b"]));

    let err = builtins::split(&mut ctx, Value::Integer(1), vec![Value::from(",")]).unwrap_err();
    assert_eq!(err.message(), "Can't split on non-string.");
}

#[test]
fn test_join() {
    let mut ctx = Context::new();

    let result = builtins::join(&mut ctx, strings(&["a", "b"]), vec![Value::from(" ")]).unwrap();
    assert_eq!(result, Value::from("a b"));

    let mixed = Value::from(json!(["a", 1, null]));
    let result = builtins::join(&mut ctx, mixed, vec![]).unwrap();
    assert_eq!(result, Value::from("a,1,"));

    let result = builtins::join(&mut ctx, Value::from("as-is"), vec![Value::from(" ")]).unwrap();
    assert_eq!(result, Value::from("as-is"));

    let err = builtins::join(&mut ctx, Value::Null, vec![]).unwrap_err();
    assert_eq!(err.message(), "Can't join a non-array.");
}

// ============================================================================
// Request adapters
// ============================================================================

#[test]
fn test_request_fields() {
    let mut ctx = request_context();

    let query = request::query(&mut ctx, Value::Null, vec![]).unwrap();
    assert_eq!(query, Value::from(json!({ "id": "42", "tab": "all" })));

    let headers = request::headers(&mut ctx, Value::Null, vec![]).unwrap();
    assert_eq!(headers.lookup("host"), Some(&Value::from("example.com")));

    let url = request::url(&mut ctx, Value::Null, vec![]).unwrap();
    assert_eq!(url, Value::from("https://example.com/news/story?id=42#comments"));

    let path = request::path(&mut ctx, Value::Null, vec![]).unwrap();
    assert_eq!(path, Value::from("/news/story"));

    let whole = request::request(&mut ctx, Value::Null, vec![]).unwrap();
    assert_eq!(Some(&whole), ctx.get(REQUEST_KEY));
}

#[test]
fn test_request_missing() {
    let mut ctx = Context::new();
    let err = request::query(&mut ctx, Value::Null, vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(err.message(), "No request object is available in the context.");
}

#[test]
fn test_request_missing_field_is_null() {
    let mut ctx = Context::with_request(Value::from(json!({ "query": {} })));
    assert_eq!(request::url(&mut ctx, Value::Null, vec![]).unwrap(), Value::Null);
    assert_eq!(request::path(&mut ctx, Value::Null, vec![]).unwrap(), Value::Null);
}

#[test]
fn test_pathname() {
    assert_eq!(request::pathname("/a/b?c=d"), Some("/a/b"));
    assert_eq!(request::pathname("http://host:8080/x#frag"), Some("/x"));
    assert_eq!(request::pathname("http://host?x=1"), Some("/"));
    assert_eq!(request::pathname(""), None);
}
