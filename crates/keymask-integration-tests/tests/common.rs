//! Common test utilities for integration tests

use keymask_core::{Condition, Container, Metadata, Result};
use keymask_resolver::TypeResolver;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolver that claims values carrying a marker and records each call
#[allow(dead_code)]
pub struct RecordingResolver {
    name: String,
    order: i32,
    marker: String,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl RecordingResolver {
    pub fn new(name: &str, order: i32, marker: &str) -> Self {
        Self {
            name: name.to_string(),
            order,
            marker: marker.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `resolve` was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TypeResolver for RecordingResolver {
    fn support(&self, _value: &Value, metadata: &Metadata) -> bool {
        metadata.has_marker(&self.marker)
    }

    fn resolve(&self, _value: &Value, _metadata: &Metadata) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::String(format!("resolved by {}", self.name)))
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Condition that only masks containers flagged with `"vip": true`
#[allow(dead_code)]
pub struct VipOnly;

impl Condition for VipOnly {
    fn required(&self, target: &dyn Container) -> bool {
        target.get_value("vip") == Some(&Value::Bool(true))
    }

    fn name(&self) -> &str {
        "vip_only"
    }
}

/// Install a test subscriber so engine logs show up with `--nocapture`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("keymask_pii=trace,keymask_resolver=trace")
        .try_init();
}
