//! Integration tests for resolver chain dispatch

mod common;

use common::{RecordingResolver, init_tracing};
use keymask_core::{MapSensitive, Metadata};
use keymask_resolver::{MapFlatTypeResolver, ResolverChain, TypeResolver};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_only_matching_resolver_is_invoked() {
    init_tracing();

    let first = Arc::new(RecordingResolver::new("first", 1, "first-only"));
    let second = Arc::new(RecordingResolver::new("second", 2, "second-only"));
    let chain = ResolverChain::with_resolvers(vec![
        first.clone() as Arc<dyn TypeResolver>,
        second.clone() as Arc<dyn TypeResolver>,
    ]);

    let result = chain
        .resolve(json!("value"), &Metadata::new().with_marker("second-only"))
        .unwrap();

    assert_eq!(result, json!("resolved by second"));
    assert_eq!(first.call_count(), 0);
    assert_eq!(second.call_count(), 1);
}

#[test]
fn test_no_matching_resolver_returns_input() {
    let first = Arc::new(RecordingResolver::new("first", 1, "first-only"));
    let second = Arc::new(RecordingResolver::new("second", 2, "second-only"));
    let chain = ResolverChain::with_resolvers(vec![
        first.clone() as Arc<dyn TypeResolver>,
        second.clone() as Arc<dyn TypeResolver>,
    ]);

    let value = json!({"phoneNo": "13800138000", "nested": [1, 2, 3]});
    let result = chain.resolve(value.clone(), &Metadata::new()).unwrap();

    assert_eq!(result, value);
    assert_eq!(first.call_count(), 0);
    assert_eq!(second.call_count(), 0);
}

#[test]
fn test_dispatch_short_circuits() {
    let early = Arc::new(RecordingResolver::new("early", 1, "shared"));
    let late = Arc::new(RecordingResolver::new("late", 5, "shared"));
    let chain = ResolverChain::with_resolvers(vec![
        late.clone() as Arc<dyn TypeResolver>,
        early.clone() as Arc<dyn TypeResolver>,
    ]);

    let result = chain
        .resolve(json!(1), &Metadata::new().with_marker("shared"))
        .unwrap();

    assert_eq!(result, json!("resolved by early"));
    assert_eq!(early.call_count(), 1);
    assert_eq!(late.call_count(), 0);
}

#[test]
fn test_map_resolver_claims_annotated_objects_first() {
    let generic = Arc::new(RecordingResolver::new("generic", 10, "audit"));
    let chain = ResolverChain::with_resolvers(vec![
        generic.clone() as Arc<dyn TypeResolver>,
        Arc::new(MapFlatTypeResolver::default()),
    ]);

    let metadata = Metadata::new()
        .with_marker("audit")
        .with_map_sensitive(MapSensitive::default());

    let result = chain
        .resolve(json!({"phoneNo": "13800138000"}), &metadata)
        .unwrap();

    assert_eq!(result, json!({"phoneNo": "138****8000"}));
    assert_eq!(generic.call_count(), 0);

    // Not an object: the map resolver declines and the generic one takes it
    let result = chain.resolve(json!("13800138000"), &metadata).unwrap();
    assert_eq!(result, json!("resolved by generic"));
    assert_eq!(generic.call_count(), 1);
}

#[test]
fn test_resolver_errors_propagate() {
    let chain = ResolverChain::default();
    let metadata = Metadata::new().with_map_sensitive(MapSensitive::new("phoneNo:3,4,*"));

    let result = chain.resolve(json!({"phoneNo": "1380"}), &metadata);

    assert!(result.is_err());
}
