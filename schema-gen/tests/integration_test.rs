use end_use_split::input::Input;
use schemars::schema_for;

#[test]
fn test_generate_json_schema() {
    let schema = schema_for!(Input);
    assert!(serde_json::to_string_pretty(&schema).is_ok());
}

#[test]
fn test_schema_describes_top_level_sections() {
    let schema = serde_json::to_value(schema_for!(Input)).unwrap();
    let properties = schema["properties"].as_object().unwrap();
    for key in ["Parameters", "Savings", "MonthlyRecords", "MonthlyTemperatures"] {
        assert!(properties.contains_key(key), "schema is missing {key}");
    }
}
