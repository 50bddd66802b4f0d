// tests/behaviour_tests.rs

use pipette_lang::ast::{Literal, SubsetEntry};
use pipette_lang::behaviour;
use pipette_lang::{Context, ErrorKind, FilterError, Function, FunctionRegistry, Value};
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn path(hops: &[&str]) -> Vec<String> {
    hops.iter().map(|s| s.to_string()).collect()
}

fn ints(values: &[i64]) -> Value {
    Value::Array(values.iter().copied().map(Value::Integer).collect())
}

// ============================================================================
// Function
// ============================================================================

#[tokio::test]
async fn test_function_missing() {
    let functions = FunctionRegistry::new();
    let mut ctx = Context::new();

    let err = behaviour::function(&functions, &mut ctx, Value::Null, "non-exist", &[])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Node);
    assert_eq!(err.message(), "Function 'non-exist' does not exist in map.");
}

#[tokio::test]
async fn test_function_sync() {
    let mut functions = FunctionRegistry::new();
    functions
        .register(
            "01-local-fixture",
            Function::sync(|ctx, prev, args| {
                assert_eq!(prev, Value::from("abc"));
                assert!(args.is_empty());
                ctx.set("abc", "def");
                Ok(Value::from("qwerty"))
            }),
        )
        .unwrap();

    let mut ctx = Context::new();
    let result = behaviour::function(&functions, &mut ctx, Value::from("abc"), "01-local-fixture", &[])
        .await
        .unwrap();

    assert_eq!(result, Value::from("qwerty"));
    assert_eq!(ctx.get("abc"), Some(&Value::from("def")));
}

#[tokio::test]
async fn test_function_async() {
    let mut functions = FunctionRegistry::new();
    functions
        .register(
            "02-local-fixture",
            Function::asynchronous(|ctx, prev, args| {
                Box::pin(async move {
                    assert_eq!(prev, Value::from("abc"));
                    assert_eq!(args, vec![Value::from("klmn")]);
                    tokio::task::yield_now().await;
                    ctx.set("abc", "def");
                    Ok(Value::from("qwerty"))
                })
            }),
        )
        .unwrap();

    let mut ctx = Context::new();
    let result = behaviour::function(
        &functions,
        &mut ctx,
        Value::from("abc"),
        "02-local-fixture",
        &[Literal::String("klmn".to_string())],
    )
    .await
    .unwrap();

    assert_eq!(result, Value::from("qwerty"));
    assert_eq!(ctx.get("abc"), Some(&Value::from("def")));
}

#[tokio::test]
async fn test_function_receives_numeric_arguments() {
    let mut functions = FunctionRegistry::new();
    functions
        .register(
            "echo_args",
            Function::sync(|_ctx, _prev, args| Ok(Value::Array(args))),
        )
        .unwrap();

    let mut ctx = Context::new();
    let result = behaviour::function(
        &functions,
        &mut ctx,
        Value::Null,
        "echo_args",
        &[Literal::Integer(-2), Literal::Float(1.5)],
    )
    .await
    .unwrap();

    assert_eq!(result, Value::Array(vec![Value::Integer(-2), Value::Float(1.5)]));
}

// ============================================================================
// Property
// ============================================================================

#[test]
fn test_property_null_value() {
    let err = behaviour::property(&Value::Null, &path(&["abc"])).unwrap_err();
    assert_eq!(err, FilterError::node("Can't extract property from null value."));
}

#[test]
fn test_property_null_hop() {
    let err = behaviour::property(&value(json!({ "abc": null })), &path(&["abc", "def"])).unwrap_err();
    assert_eq!(err, FilterError::node("Property 'abc' is null."));
}

#[test]
fn test_property_names_partial_path() {
    let prev = value(json!({ "a": { "b": { "c": 1 } } }));
    let err = behaviour::property(&prev, &path(&["a", "b", "x", "y"])).unwrap_err();
    assert_eq!(err.message(), "Property 'a.b.x' is null.");
}

#[test]
fn test_property_single_hop() {
    let result = behaviour::property(&value(json!({ "abc": "def" })), &path(&["abc"])).unwrap();
    assert_eq!(result, Value::from("def"));
}

#[test]
fn test_property_deep() {
    let prev = value(json!({ "abc": { "def": { "ghi": "jklm" } } }));
    let result = behaviour::property(&prev, &path(&["abc", "def", "ghi"])).unwrap();
    assert_eq!(result, Value::from("jklm"));
}

#[test]
fn test_property_array_index() {
    let prev = value(json!({ "items": ["x", "y"] }));
    let result = behaviour::property(&prev, &path(&["items", "1"])).unwrap();
    assert_eq!(result, Value::from("y"));
}

#[test]
fn test_property_length() {
    let prev = value(json!({ "tags": ["a", "b", "c"], "name": "héllo" }));
    assert_eq!(
        behaviour::property(&prev, &path(&["tags", "length"])).unwrap(),
        Value::Integer(3)
    );
    assert_eq!(
        behaviour::property(&prev, &path(&["name", "length"])).unwrap(),
        Value::Integer(5)
    );
}

#[test]
fn test_property_length_of_empty_array_is_null() {
    let err = behaviour::property(&value(json!({ "tags": [] })), &path(&["tags", "length"]))
        .unwrap_err();
    assert_eq!(err.message(), "Property 'tags.length' is null.");
}

#[test]
fn test_object_length_is_a_plain_key() {
    let prev = value(json!({ "length": "long" }));
    assert_eq!(behaviour::access(&prev, "length").unwrap(), Value::from("long"));
    let err = behaviour::property(&value(json!({ "a": 1 })), &path(&["length"])).unwrap_err();
    assert_eq!(err.message(), "Property 'length' is null.");
}

// ============================================================================
// Subset
// ============================================================================

#[test]
fn test_subset_rejects_non_collections() {
    for prev in [Value::Null, Value::from("abc"), Value::Integer(3)] {
        let err = behaviour::subset(&prev, &[SubsetEntry::Index(0)]).unwrap_err();
        assert_eq!(
            err,
            FilterError::type_error("The value piped to a subset must be an array.")
        );
    }
}

#[test]
fn test_subset_indices() {
    let entries = [SubsetEntry::Index(0), SubsetEntry::Index(2), SubsetEntry::Index(4)];
    let result = behaviour::subset(&ints(&[1, 2, 3, 4, 5, 6]), &entries).unwrap();
    assert_eq!(result, ints(&[1, 3, 5]));
}

#[test]
fn test_subset_short_ranges() {
    let entries = [SubsetEntry::Range(4, 5), SubsetEntry::Range(2, 3)];
    let result = behaviour::subset(&ints(&[1, 2, 3, 4, 5, 6]), &entries).unwrap();
    assert_eq!(result, ints(&[5, 6, 3, 4]));
}

#[test]
fn test_subset_longer_ranges() {
    let input = ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
    let entries = [SubsetEntry::Range(2, 10), SubsetEntry::Range(2, 3)];
    let result = behaviour::subset(&input, &entries).unwrap();
    assert_eq!(result, ints(&[3, 4, 5, 6, 7, 8, 9, 10, 11, 3, 4]));
}

#[test]
fn test_subset_mixed() {
    let input = ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
    let entries = [
        SubsetEntry::Range(2, 10),
        SubsetEntry::Index(5),
        SubsetEntry::Range(2, 3),
    ];
    let result = behaviour::subset(&input, &entries).unwrap();
    assert_eq!(result, ints(&[3, 4, 5, 6, 7, 8, 9, 10, 11, 6, 3, 4]));
}

#[test]
fn test_subset_negative_range_is_end_relative_and_exclusive() {
    let result = behaviour::subset(&ints(&[1, 2, 3, 4, 5, 6]), &[SubsetEntry::Range(-3, -1)]).unwrap();
    assert_eq!(result, ints(&[4, 5]));
}

#[test]
fn test_subset_range_is_clamped() {
    let result = behaviour::subset(&ints(&[1, 2, 3]), &[SubsetEntry::Range(1, 100)]).unwrap();
    assert_eq!(result, ints(&[2, 3]));
    let result = behaviour::subset(&ints(&[1, 2, 3]), &[SubsetEntry::Range(5, 9)]).unwrap();
    assert_eq!(result, ints(&[]));
}

// Elements are dropped when falsy, not only when missing. Kept as observed.
#[test]
fn test_subset_index_drops_falsy_elements() {
    let input = value(json!([0, "", null, false, 7]));
    let entries: Vec<_> = (0..6).map(SubsetEntry::Index).collect();
    let result = behaviour::subset(&input, &entries).unwrap();
    assert_eq!(result, ints(&[7]));
}

#[test]
fn test_subset_object_by_index() {
    let input = value(json!({ "0": "zero", "1": "one" }));
    let result = behaviour::subset(&input, &[SubsetEntry::Index(1)]).unwrap();
    assert_eq!(result, Value::Array(vec![Value::from("one")]));

    let err = behaviour::subset(&input, &[SubsetEntry::Range(0, 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

// ============================================================================
// Substitution
// ============================================================================

#[test]
fn test_substitute_rejects_other_values() {
    for prev in [Value::Null, value(json!({}))] {
        let err = behaviour::substitute(&prev, "[a-z]", "#", "i").unwrap_err();
        assert_eq!(
            err,
            FilterError::type_error("Substitution requires a string or array.")
        );
    }
}

#[test]
fn test_substitute_string() {
    let result = behaviour::substitute(&Value::from("a1b2C3d4e5F6"), "[a-z]", "#", "ig").unwrap();
    assert_eq!(result, Value::from("#1#2#3#4#5#6"));
}

#[test]
fn test_substitute_first_only_without_g() {
    let result = behaviour::substitute(&Value::from("aaa"), "a", "b", "").unwrap();
    assert_eq!(result, Value::from("baa"));
}

#[test]
fn test_substitute_array() {
    let input = value(json!(["a1b2C3d4e5F6", "abc123"]));
    let result = behaviour::substitute(&input, "[a-z]", "#", "ig").unwrap();
    assert_eq!(result, value(json!(["#1#2#3#4#5#6", "###123"])));
}

#[test]
fn test_substitute_capture_groups() {
    let result =
        behaviour::substitute(&Value::from("a_xyz a_q"), "a_([a-z]{0,3})", "b_$1", "g").unwrap();
    assert_eq!(result, Value::from("b_xyz b_q"));
}

#[test]
fn test_substitute_escaped_slash() {
    let result = behaviour::substitute(&Value::from("/a/b"), r"\/", "-", "g").unwrap();
    assert_eq!(result, Value::from("-a-b"));
}

#[test]
fn test_substitute_bad_regex() {
    let err = behaviour::substitute(&Value::from("abc"), "(", "x", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Node);
    let err = behaviour::substitute(&Value::from("abc"), "a", "x", "y").unwrap_err();
    assert_eq!(err.message(), "Unsupported regular expression flag 'y'.");
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_match_rejects_non_strings() {
    for prev in [Value::Null, value(json!({})), value(json!(["abc"]))] {
        let err = behaviour::matching(&prev, "[a-z]+", "i").unwrap_err();
        assert_eq!(err, FilterError::type_error("Matching requires a string."));
    }
}

#[test]
fn test_match_global() {
    let result = behaviour::matching(&Value::from("123 abc 123 def"), "[a-z]+", "ig").unwrap();
    assert_eq!(result, value(json!(["abc", "def"])));
}

#[test]
fn test_match_groups_without_g() {
    let result = behaviour::matching(&Value::from("key=value"), "(\\w+)=(\\w+)(;)?", "").unwrap();
    assert_eq!(result, value(json!(["key=value", "key", "value", null])));
}

#[test]
fn test_match_none() {
    let result = behaviour::matching(&Value::from("123"), "[a-z]+", "g").unwrap();
    assert_eq!(result, Value::Array(vec![]));
}

#[test]
fn test_match_case_insensitive() {
    let result = behaviour::matching(&Value::from("ABC"), "abc", "i").unwrap();
    assert_eq!(result, value(json!(["ABC"])));
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assign_rejects_falsy() {
    let mut ctx = Context::new();
    let err = behaviour::assign(&mut ctx, Value::Null, "abc").unwrap_err();
    assert_eq!(
        err,
        FilterError::type_error("The value in the assignment must be useful. (not null, truthy.)")
    );
    assert!(ctx.is_empty());
}

#[test]
fn test_assign_writes_context() {
    let mut ctx = Context::new();
    let result = behaviour::assign(&mut ctx, Value::from("def"), "abc").unwrap();
    assert_eq!(result, Value::from("def"));
    assert_eq!(ctx.get("abc"), Some(&Value::from("def")));
}

// ============================================================================
// Access
// ============================================================================

#[test]
fn test_access_rejects_falsy_input() {
    let err = behaviour::access(&Value::Null, "abc").unwrap_err();
    assert_eq!(
        err,
        FilterError::type_error(
            "The value from which to access the property must be useful. (not null, truthy.)"
        )
    );
}

#[test]
fn test_access_rejects_falsy_result() {
    let err = behaviour::access(&value(json!({ "abc": null })), "abc").unwrap_err();
    assert_eq!(
        err,
        FilterError::type_error(
            "The returned value from the property access must be useful. (not null, truthy.)"
        )
    );
}

#[test]
fn test_access_reads_field() {
    let result = behaviour::access(&value(json!({ "abc": "def" })), "abc").unwrap();
    assert_eq!(result, Value::from("def"));
}
