use cpl::{cpl, Map, Number, Value};

#[test]
fn test_cpl_macro_null() {
    let value = cpl!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_cpl_macro_booleans() {
    assert_eq!(cpl!(true), Value::Bool(true));
    assert_eq!(cpl!(false), Value::Bool(false));
}

#[test]
fn test_cpl_macro_numbers() {
    assert_eq!(cpl!(42), Value::Number(Number::Integer(42)));
    assert_eq!(cpl!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(cpl!(-123), Value::Number(Number::Integer(-123)));
}

#[test]
fn test_cpl_macro_strings() {
    assert_eq!(cpl!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(cpl!(""), Value::String("".to_string()));
}

#[test]
fn test_cpl_macro_sequences() {
    assert_eq!(cpl!([]), Value::Sequence(vec![]));

    assert_eq!(
        cpl!([1, 2, 3]),
        Value::Sequence(vec![
            Value::Number(Number::Integer(1)),
            Value::Number(Number::Integer(2)),
            Value::Number(Number::Integer(3)),
        ])
    );

    assert_eq!(
        cpl!([1, "hello", true, null]),
        Value::Sequence(vec![
            Value::Number(Number::Integer(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_cpl_macro_mappings() {
    assert_eq!(cpl!({}), Value::Mapping(Map::new()));

    let value = cpl!({
        "name": "Adi",
        "age": 30,
        "active": true
    });
    let map = value.as_mapping().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("name"), Some(&Value::String("Adi".to_string())));
    assert_eq!(map.get("age"), Some(&Value::Number(Number::Integer(30))));
    assert_eq!(map.get("active"), Some(&Value::Bool(true)));
}

#[test]
fn test_cpl_macro_nesting() {
    let value = cpl!({
        "user": {
            "name": "Adi",
            "tags": ["scribe", "archivist"]
        },
        "rows": [{ "id": 1 }, { "id": 2 }]
    });

    let user = value.as_mapping().unwrap().get("user").unwrap();
    assert_eq!(
        user.as_mapping().unwrap().get("name"),
        Some(&Value::String("Adi".to_string()))
    );

    let rows = value.as_mapping().unwrap().get("rows").unwrap();
    assert_eq!(rows.as_sequence().unwrap().len(), 2);
}

#[test]
fn test_cpl_macro_preserves_insertion_order() {
    let value = cpl!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<&str> = value.as_mapping().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_cpl_macro_trailing_commas() {
    let value = cpl!({
        "items": [1, 2, 3,],
    });
    let items = value.as_mapping().unwrap().get("items").unwrap();
    assert_eq!(items.as_sequence().unwrap().len(), 3);
}
