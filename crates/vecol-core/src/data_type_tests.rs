//! Tests for JSON value rendering.

use crate::column::{Column, ColumnConst, ColumnFixedString, ColumnString, ColumnVector};
use crate::config::JsonFormatSettings;
use crate::data_type::DataType;
use crate::error::Error;

fn render(
    data_type: DataType,
    column: &Column,
    row: usize,
    settings: &JsonFormatSettings,
) -> String {
    let mut out = Vec::new();
    data_type
        .serialize_text_json(column, row, &mut out, settings)
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn render_default(data_type: DataType, column: &Column, row: usize) -> String {
    render(data_type, column, row, &JsonFormatSettings::default())
}

#[test]
fn test_names() {
    assert_eq!(DataType::String.name(), "String");
    assert_eq!(DataType::FixedString(16).name(), "FixedString(16)");
    assert_eq!(DataType::UInt8.to_string(), "UInt8");
    assert!(DataType::FixedString(1).is_string_or_fixed_string());
    assert!(!DataType::Int64.is_string_or_fixed_string());
}

#[test]
fn test_string_escaping() {
    let column = Column::String(ColumnString::from_strings(["a\"b\\c\n", "x/y"]));
    assert_eq!(render_default(DataType::String, &column, 0), r#""a\"b\\c\n""#);
    assert_eq!(render_default(DataType::String, &column, 1), r#""x\/y""#);

    let plain = JsonFormatSettings {
        escape_forward_slashes: false,
        ..JsonFormatSettings::default()
    };
    assert_eq!(render(DataType::String, &column, 1, &plain), r#""x/y""#);
}

#[test]
fn test_control_characters_are_escaped() {
    let column = Column::String(ColumnString::from_strings([&[0x01_u8][..]]));
    assert_eq!(render_default(DataType::String, &column, 0), r#""\u0001""#);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let column = Column::String(ColumnString::from_strings([&[b'a', 0xff][..]]));
    assert_eq!(render_default(DataType::String, &column, 0), "\"a\u{fffd}\"");
}

#[test]
fn test_fixed_string_keeps_padding() {
    let column = Column::FixedString(ColumnFixedString::from_strings(3, ["a"]).unwrap());
    assert_eq!(
        render_default(DataType::FixedString(3), &column, 0),
        r#""a\u0000\u0000""#
    );
}

#[test]
fn test_integers() {
    let bytes = Column::UInt8(ColumnVector::from(vec![0, 255]));
    assert_eq!(render_default(DataType::UInt8, &bytes, 1), "255");

    let wide = Column::Int64(ColumnVector::from(vec![i64::MIN]));
    assert_eq!(
        render_default(DataType::Int64, &wide, 0),
        "\"-9223372036854775808\""
    );
    let unquoted = JsonFormatSettings {
        quote_64bit_integers: false,
        ..JsonFormatSettings::default()
    };
    assert_eq!(
        render(DataType::Int64, &wide, 0, &unquoted),
        "-9223372036854775808"
    );
}

#[test]
fn test_floats() {
    let column = Column::Float64(ColumnVector::from(vec![
        1.5,
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ]));
    assert_eq!(render_default(DataType::Float64, &column, 0), "1.5");
    for row in 1..4 {
        assert_eq!(render_default(DataType::Float64, &column, row), "null");
    }

    let quoted = JsonFormatSettings {
        quote_denormals: true,
        ..JsonFormatSettings::default()
    };
    assert_eq!(render(DataType::Float64, &column, 1, &quoted), "\"nan\"");
    assert_eq!(render(DataType::Float64, &column, 2, &quoted), "\"inf\"");
    assert_eq!(render(DataType::Float64, &column, 3, &quoted), "\"-inf\"");
}

#[test]
fn test_const_renders_for_every_row() {
    let column = Column::Const(ColumnConst::new(
        Column::Int64(ColumnVector::from(vec![7])),
        10,
    ));
    assert_eq!(render_default(DataType::Int64, &column, 9), "\"7\"");
}

#[test]
fn test_type_mismatch_is_an_error() {
    let column = Column::UInt8(ColumnVector::from(vec![1]));
    let mut out = Vec::new();
    let err = DataType::String
        .serialize_text_json(&column, 0, &mut out, &JsonFormatSettings::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ColumnTypeMismatch { ref data_type, column: "UInt8" } if data_type == "String"
    ));
    assert!(out.is_empty());
}
