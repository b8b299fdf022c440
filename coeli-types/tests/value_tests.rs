use coeli_types::{
    is_property_key, IllegalCause, MediaKind, Primitive, Value, ValueKind,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn value_type(name: &str) -> serde_json::Value {
    json!({"$type": {"$type": "ValueType", "name": name}})
}

// ── Classification ───────────────────────────────────────────────

#[test]
fn null_is_null() {
    assert_eq!(Value::from_json(&json!(null)), Value::Null);
}

#[test]
fn typed_primitive_is_scalar() {
    let v = Value::from_json(&json!({"value": "hello", "$metadata": value_type("Token")}));
    match v {
        Value::Primitive(Primitive::Scalar(s)) => {
            assert_eq!(s.kind, ValueKind::Token);
            assert_eq!(s.as_text(), Some("hello"));
        }
        other => panic!("expected scalar, got {other:?}"),
    }
}

#[test]
fn numeric_primitive_keeps_unit() {
    let v = Value::from_json(&json!({
        "value": 12.5,
        "$metadata": {"$type": {"$type": "ValueType", "name": "Decimal", "unit": "kg"}}
    }));
    let Value::Primitive(Primitive::Scalar(s)) = v else {
        panic!("expected scalar");
    };
    assert_eq!(s.kind, ValueKind::Decimal);
    assert_eq!(s.unit.as_deref(), Some("kg"));
    assert_eq!(s.value.as_f64(), Some(12.5));
}

#[test]
fn dating_fields_are_read() {
    let v = Value::from_json(&json!({
        "value": "c. 1890",
        "year": 1890,
        "month": 4,
        "bc": false,
        "uncertaintyBefore": "c. ",
        "indexSince": {"value": "1890-04-01"},
        "$metadata": value_type("Dating")
    }));
    let Value::Primitive(Primitive::Scalar(s)) = v else {
        panic!("expected scalar");
    };
    assert_eq!(s.dating.year, Some(1890));
    assert_eq!(s.dating.month, Some(4));
    assert_eq!(s.dating.day, None);
    assert_eq!(s.dating.bc, Some(false));
    assert_eq!(s.dating.uncertainty_before.as_deref(), Some("c. "));
    assert_eq!(s.dating.index_since.as_deref(), Some("1890-04-01"));
}

#[test]
fn image_is_media() {
    let v = Value::from_json(&json!({
        "original": {"value": "https://cdn/x.jpg"},
        "small": {"value": "https://cdn/x_s.jpg"},
        "public": {"value": true},
        "mimeType": {"value": "image/jpeg"}
    }));
    let Value::Primitive(Primitive::Media(m)) = v else {
        panic!("expected media");
    };
    assert_eq!(m.kind, MediaKind::Image);
    assert_eq!(m.original, "https://cdn/x.jpg");
    assert_eq!(m.small.as_deref(), Some("https://cdn/x_s.jpg"));
    assert!(m.public);
    assert_eq!(m.large, None);
}

#[test]
fn media_kind_follows_mime_prefix() {
    let media = |mime: &str, stream: Option<&str>| {
        let mut raw = json!({
            "original": {"value": "o"},
            "public": {"value": false},
            "mimeType": {"value": mime}
        });
        if let Some(s) = stream {
            raw["stream"] = json!({"value": s});
        }
        match Value::from_json(&raw) {
            Value::Primitive(Primitive::Media(m)) => m.kind,
            other => panic!("expected media, got {other:?}"),
        }
    };
    assert_eq!(media("video/mp4", None), MediaKind::Video);
    assert_eq!(media("video/mp4", Some("https://s/public/v.m3u8")), MediaKind::PublicVideoStream);
    assert_eq!(media("application/pdf", None), MediaKind::Pdf);
    assert_eq!(media("audio/ogg", None), MediaKind::Audio);
    assert_eq!(media("text/plain", None), MediaKind::Other);
}

#[test]
fn media_wins_over_value_type() {
    let v = Value::from_json(&json!({
        "original": {"value": "o"},
        "public": {"value": true},
        "mimeType": {"value": "image/png"},
        "$metadata": value_type("Binary")
    }));
    assert!(matches!(v, Value::Primitive(Primitive::Media(_))));
}

#[test]
fn cause_is_illegal() {
    let v = Value::from_json(&json!({
        "value": "x",
        "rang": "r",
        "cause": {"references": [{"href": "https://h/a/1"}, {"href": "https://h/a/2"}]}
    }));
    let Value::Illegal(i) = v else {
        panic!("expected illegal");
    };
    assert_eq!(i.value, "x");
    assert!(i.is_cycle());
    match &i.cause {
        IllegalCause::CycleReference { references } => {
            assert_eq!(references.len(), 2);
            assert_eq!(references[1].href, "https://h/a/2");
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn illegal_wins_over_reference() {
    let v = Value::from_json(&json!({"href": "https://h/a/1", "value": "x", "cause": "loop"}));
    assert!(matches!(v, Value::Illegal(_)));
}

#[test]
fn href_is_reference_with_properties() {
    let v = Value::from_json(&json!({
        "href": "https://h/api/t/Person/7",
        "label": {"value": "Ada"},
        "$metadata": {"$type": {"$type": "ReferenceType", "references": "Person"}},
        "isCalculated": true
    }));
    let Value::Reference(r) = v else {
        panic!("expected reference");
    };
    assert_eq!(r.href, "https://h/api/t/Person/7");
    assert_eq!(r.label(), Some("Ada"));
    assert_eq!(r.metadata.unwrap().references.as_deref(), Some("Person"));
    assert_eq!(r.is_calculated, Some(true));
    assert!(!r.properties.contains_key("href"));
    assert!(!r.properties.contains_key("isCalculated"));
}

#[test]
fn empty_href_is_not_reference() {
    let v = Value::from_json(&json!({"href": "", "values": []}));
    assert!(matches!(v, Value::Repeated(_)));
}

#[test]
fn embedded_type_is_embedded() {
    let v = Value::from_json(&json!({
        "$metadata": {"$type": {"$type": "EmbeddedType", "name": "PeriodInterval"}, "id": "e1"},
        "since": {"href": "https://h/p/1", "label": {"value": "Baroque"}}
    }));
    let Value::Embedded(e) = v else {
        panic!("expected embedded");
    };
    assert_eq!(e.type_name(), Some("PeriodInterval"));
    assert_eq!(e.metadata.id.as_deref(), Some("e1"));
    assert!(matches!(e.properties.get("since"), Some(Value::Reference(_))));
}

#[test]
fn values_is_repeated_in_order() {
    let v = Value::from_json(&json!({"values": [
        {"value": "a", "$metadata": value_type("Token")},
        {"value": "b", "$metadata": value_type("Token")},
        null
    ]}));
    let Value::Repeated(r) = v else {
        panic!("expected repeated");
    };
    assert_eq!(r.values.len(), 3);
    assert_eq!(r.values[0].as_text(), Some("a"));
    assert_eq!(r.values[1].as_text(), Some("b"));
    assert!(r.values[2].is_null());
}

#[test]
fn bare_value_is_untyped_scalar() {
    let v = Value::from_json(&json!({"value": "plain"}));
    let Value::Primitive(Primitive::Scalar(s)) = v else {
        panic!("expected scalar");
    };
    assert_eq!(s.kind, ValueKind::Untyped);
}

#[test]
fn unknown_object_is_null() {
    assert!(Value::from_json(&json!({"whatever": 1})).is_null());
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn is_calculated_round_trips() {
    let raw = json!({
        "value": 3,
        "isCalculated": true,
        "$metadata": value_type("Integral")
    });
    let v: Value = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(v.is_calculated(), Some(true));
    assert_eq!(serde_json::to_value(&v).unwrap(), raw);
}

#[test]
fn reference_serializes_back_to_wire_shape() {
    let raw = json!({
        "href": "https://h/api/t/Place/3",
        "label": {"value": "Girona"}
    });
    let v = Value::from_json(&raw);
    assert_eq!(v.to_json(), raw);
}

// ── Property keys ────────────────────────────────────────────────

#[test]
fn property_keys_exclude_metadata_and_href() {
    assert!(is_property_key("title"));
    assert!(!is_property_key("$metadata"));
    assert!(!is_property_key("$anything"));
    assert!(!is_property_key("href"));
}
