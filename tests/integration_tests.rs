use cpl::{
    cpl, flatten, parse, render, render_with_options, unflatten, Ledger, Record, RenderOptions,
    Value,
};

#[test]
fn test_structured_value_to_lines_and_back() {
    let value = cpl!({
        "name": "Adi",
        "age": 30,
        "address": { "city": "Jerusalem", "zip": "91000" },
        "tags": ["scribe", "archivist"]
    });

    let record = flatten(&value).unwrap();
    let ledger: Ledger = vec![record].into();
    let text = render(&ledger);

    assert_eq!(
        text,
        "name:Adi,age:30,address.city:Jerusalem,address.zip:91000,\
         tags.0:scribe,tags.1:archivist\n"
    );

    let parsed = parse(&text).unwrap();
    assert_eq!(unflatten(&parsed.records()[0]).unwrap(), value);
}

#[test]
fn test_many_records_share_one_key_map() {
    let people = [
        ("Adi", "scribe", "Jerusalem"),
        ("Lev", "scout", "Hebron"),
        ("Noa", "smith", "Jaffa"),
    ];

    let records: Vec<Record> = people
        .iter()
        .map(|(name, role, city)| {
            let value = cpl!({
                "person": { "name": *name, "role": *role },
                "address": { "city": *city }
            });
            flatten(&value).unwrap()
        })
        .collect();

    let ledger: Ledger = records.into();
    let compressed = render_with_options(&ledger, RenderOptions::compressed());

    // One header, then one line per record
    assert_eq!(compressed.lines().count(), 4);
    assert!(compressed.starts_with("%k0=person.name,k1=person.role,k2=address.city\n"));

    let parsed = parse(&compressed).unwrap();
    assert_eq!(parsed, ledger);
    assert_eq!(
        unflatten(&parsed.records()[1]).unwrap(),
        cpl!({
            "person": { "name": "Lev", "role": "scout" },
            "address": { "city": "Hebron" }
        })
    );
}

#[test]
fn test_native_types_survive_the_line_format() {
    let value = cpl!({
        "count": 42,
        "ratio": 1.5,
        "whole": 3.0,
        "flag": true,
        "label": "007",
        "missing": null
    });

    let record = flatten(&value).unwrap();
    let ledger: Ledger = vec![record].into();
    let parsed = parse(&render(&ledger)).unwrap();
    let back = unflatten(&parsed.records()[0]).unwrap();

    assert_eq!(back, value);
    // `007` is not a canonical integer and stays a string
    assert_eq!(
        back.as_mapping().unwrap().get("label"),
        Some(&Value::String("007".to_string()))
    );
}

#[test]
fn test_json_bridge_into_cpl() {
    let json = r#"{
        "name": "Adi",
        "age": 30,
        "address": { "city": "Jerusalem" },
        "tags": ["scribe", "archivist"]
    }"#;

    let value: Value = serde_json::from_str(json).unwrap();
    let record = flatten(&value).unwrap();

    assert_eq!(record.get("name"), Some("Adi"));
    assert_eq!(record.get("age"), Some("30"));
    assert_eq!(record.get("address.city"), Some("Jerusalem"));
    assert_eq!(record.get("tags.1"), Some("archivist"));
}

#[test]
fn test_json_bridge_out_of_cpl() {
    let text = "name:Adi,age:30,tags.0:scribe,verified:true\n";
    let ledger = parse(text).unwrap();
    let value = unflatten(&ledger.records()[0]).unwrap();

    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Adi",
            "age": 30,
            "tags": ["scribe"],
            "verified": true
        })
    );
}

#[test]
fn test_json_roundtrip_through_cpl_lines() {
    let json = serde_json::json!({
        "user": { "name": "Adi", "scores": [1, 2, 3] },
        "active": false
    });

    let value: Value = serde_json::from_value(json.clone()).unwrap();
    let ledger: Ledger = vec![flatten(&value).unwrap()].into();
    let text = render_with_options(&ledger, RenderOptions::compressed());

    let parsed = parse(&text).unwrap();
    let back = unflatten(&parsed.records()[0]).unwrap();
    assert_eq!(serde_json::to_value(&back).unwrap(), json);
}

#[test]
fn test_values_with_delimiters_end_to_end() {
    let value = cpl!({
        "url": "http://example.com:8080/a,b",
        "note": "tab\there\nand a new line"
    });

    let ledger: Ledger = vec![flatten(&value).unwrap()].into();
    let text = render(&ledger);
    let parsed = parse(&text).unwrap();
    assert_eq!(unflatten(&parsed.records()[0]).unwrap(), value);
}

#[test]
fn test_structural_conflict_is_not_silently_merged() {
    let text = "a:1,a.b:2\n";
    let ledger = parse(text).unwrap();
    let err = unflatten(&ledger.records()[0]).unwrap_err();
    assert!(matches!(err, cpl::Error::StructuralConflict { .. }));
}

#[test]
fn test_streaming_entry_points() {
    let input = "user.name:Adi\nuser.name:Lev\n";
    let ledger = cpl::from_reader(input.as_bytes()).unwrap();

    let mut out = Vec::new();
    cpl::to_writer_with_options(&mut out, &ledger, RenderOptions::compressed()).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text, "%k0=user.name\n@k0:Adi\n@k0:Lev\n");
    assert_eq!(parse(&text).unwrap(), ledger);
}
