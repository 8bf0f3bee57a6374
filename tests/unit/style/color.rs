use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(parse_color("#ff0000").unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(parse_color("#0000FF80").unwrap(), Rgba8::new(0, 0, 255, 128));
    assert!(parse_color("#ff00").is_err());
    assert!(parse_color("#gg0000").is_err());
    assert!(parse_color("ff0000").is_err());
}

#[test]
fn parses_names_case_insensitively() {
    assert_eq!(parse_color("White").unwrap(), Rgba8::WHITE);
    assert_eq!(
        "LightBlue".parse::<Rgba8>().unwrap(),
        Rgba8::opaque(173, 216, 230)
    );
}

#[test]
fn deserializes_all_json_shapes() {
    let c: Rgba8 = serde_json::from_value(json!("#102030")).unwrap();
    assert_eq!(c, Rgba8::opaque(0x10, 0x20, 0x30));

    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::opaque(1, 2, 3));

    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 4));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn serializes_as_hex_with_alpha() {
    let v = serde_json::to_value(Rgba8::new(255, 0, 16, 128)).unwrap();
    assert_eq!(v, json!("#ff001080"));
}
