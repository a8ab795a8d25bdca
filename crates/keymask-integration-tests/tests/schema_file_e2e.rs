//! End-to-end tests: schema file on disk to masked records

mod common;

use common::VipOnly;
use keymask_config_file::LoadedSchema;
use keymask_core::{ConditionRegistry, Error};
use serde_json::json;
use std::sync::Arc;

const SCHEMA: &str = r#"
engine:
  parallel: true
  parallel_min_keys: 2
fields:
  - path: customer
    map_sensitive:
      config: "phoneNo:3,4,*;email:2,3,*;idCard:6,4,#"
  - path: payment.card
    map_sensitive:
      config: "number:0,4,x"
      condition: vip_only
"#;

fn write_schema(contents: &str) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    std::fs::write(file.path(), contents).unwrap();
    file
}

fn conditions() -> ConditionRegistry {
    let mut registry = ConditionRegistry::new();
    registry.register(Arc::new(VipOnly));
    registry
}

#[test]
fn test_schema_file_masks_records() {
    let file = write_schema(SCHEMA);
    let loaded = LoadedSchema::from_file(file.path(), &conditions()).unwrap();
    let chain = loaded.chain();

    let record = json!({
        "customer": {
            "phoneNo": "13800138000",
            "email": "zhang.san@example.com",
            "idCard": "110101199003077777",
            "name": "Zhang San"
        },
        "payment": {"card": {"number": "6222020200112233", "vip": true}},
        "note": "unrelated"
    });

    let masked = loaded.schema.apply(&record, &chain).unwrap();

    assert_eq!(
        masked,
        json!({
            "customer": {
                "phoneNo": "138****8000",
                "email": "zh****************com",
                "idCard": "110101########7777",
                "name": "Zhang San"
            },
            "payment": {"card": {"number": "xxxxxxxxxxxx2233", "vip": true}},
            "note": "unrelated"
        })
    );
}

#[test]
fn test_schema_file_condition_skips_container() {
    let file = write_schema(SCHEMA);
    let loaded = LoadedSchema::from_file(file.path(), &conditions()).unwrap();

    let record = json!({"payment": {"card": {"number": "6222020200112233", "vip": false}}});
    let masked = loaded.schema.apply(&record, &loaded.chain()).unwrap();

    assert_eq!(masked, record);
}

#[test]
fn test_schema_file_without_condition_registered() {
    let file = write_schema(SCHEMA);
    let result = LoadedSchema::from_file(file.path(), &ConditionRegistry::new());

    assert!(matches!(result, Err(Error::UnknownCondition(name)) if name == "vip_only"));
}

#[test]
fn test_schema_file_short_value_fails_whole_record() {
    let file = write_schema(SCHEMA);
    let loaded = LoadedSchema::from_file(file.path(), &conditions()).unwrap();

    let record = json!({"customer": {"phoneNo": "13800138000", "idCard": "short"}});
    let result = loaded.schema.apply(&record, &loaded.chain());

    assert!(matches!(result, Err(Error::InvalidOffset { .. })));
}
