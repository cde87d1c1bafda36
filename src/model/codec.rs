//! Serde adapters for Seller Center's string-encoded scalars.
//!
//! Seller Center sends almost every scalar as a JSON string, and uses `""`
//! for "no value". Each submodule here is meant for `#[serde(with = "...")]`
//! (or `deserialize_with`) on a model field:
//!
//! | module           | Rust type                   | wire                          |
//! |------------------|-----------------------------|-------------------------------|
//! | [`float`]        | `f64`                       | `"12.340000"`                 |
//! | [`boolean`]      | `bool`                      | `"1"` / `"0"`                 |
//! | [`int`]          | `i64`                       | `"42"`                        |
//! | [`timestamp`]    | `Option<DateTime<Utc>>`     | `"2018-02-07 12:09:22"`       |
//! | [`string_list`]  | `Vec<String>`               | `"A,B"`                       |
//! | [`int_list`]     | `Vec<i64>`                  | `"2,3"`                       |
//!
//! Reading is lenient: a bare JSON number or boolean is accepted where the
//! server sends one, and `""` or `null` decodes to the zero value. Text that
//! does not parse is an error. Writing always produces the string form.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/// Reads a scalar as text. `None` stands for `null` and `""`.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(if flag { "1" } else { "0" }.to_string())),
        Value::Array(_) => Err(de::Error::invalid_type(Unexpected::Seq, &"a scalar")),
        Value::Object(_) => Err(de::Error::invalid_type(Unexpected::Map, &"a scalar")),
    }
}

fn parse_error<E: de::Error>(kind: &str, text: &str, reason: &dyn std::fmt::Display) -> E {
    E::custom(format!("invalid {kind} '{text}': {reason}"))
}

/// Decimal numbers such as prices: `"12.34"` ↔ `12.34`.
pub mod float {
    use serde::{Deserializer, Serializer};

    /// Writes six fixed decimals, e.g. `"12.340000"`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:.6}"))
    }

    /// # Errors
    ///
    /// Fails if the text is not a decimal number.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match super::scalar_text(deserializer)? {
            None => Ok(0.0),
            Some(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| super::parse_error("number", &text, &e)),
        }
    }
}

/// Flags: `"1"` is true, anything else (including `""`) is false.
pub mod boolean {
    use serde::{Deserializer, Serializer};

    /// Writes `"1"` or `"0"`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    /// # Errors
    ///
    /// Fails only if the value is an array or an object.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(super::scalar_text(deserializer)?.as_deref() == Some("1"))
    }
}

/// Integers such as ids and counts: `"42"` ↔ `42`.
pub mod int {
    use serde::{Deserializer, Serializer};

    /// Writes the decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// # Errors
    ///
    /// Fails if the text is not an integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match super::scalar_text(deserializer)? {
            None => Ok(0),
            Some(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|e| super::parse_error("integer", &text, &e)),
        }
    }
}

/// Timestamps. `""` decodes to `None`.
///
/// Accepted forms are `2018-02-07 12:09:22` (taken as UTC), RFC 3339 and
/// `2018-02-07T12:09:22+0100`. Values are written as RFC 3339 with a `Z`
/// suffix.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserializer, Serializer};

    const PLAIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

    /// Parses one of the accepted timestamp forms.
    ///
    /// # Errors
    ///
    /// Returns the RFC 3339 parse error when no form matches.
    pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        let text = text.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, PLAIN_FORMAT) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        if let Ok(parsed) = DateTime::parse_from_str(text, OFFSET_FORMAT) {
            return Ok(parsed.with_timezone(&Utc));
        }
        DateTime::parse_from_rfc3339(text).map(|parsed| parsed.with_timezone(&Utc))
    }

    /// Writes RFC 3339, or `""` for `None`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(instant) => {
                serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            None => serializer.serialize_str(""),
        }
    }

    /// # Errors
    ///
    /// Fails if the text matches none of the accepted forms.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match super::scalar_text(deserializer)? {
            None => Ok(None),
            Some(text) => parse(&text)
                .map(Some)
                .map_err(|e| super::parse_error("timestamp", &text, &e)),
        }
    }
}

/// Comma-joined strings: `"A,B"` ↔ `["A", "B"]`. A JSON array is also read.
pub mod string_list {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::{Deserialize, Serializer};
    use serde_json::Value;

    /// Writes the items joined with `,`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.join(","))
    }

    /// # Errors
    ///
    /// Fails if the value is an object or an array holding non-scalars.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            Value::String(text) if text.is_empty() => Ok(Vec::new()),
            Value::String(text) => Ok(text.split(',').map(str::to_string).collect()),
            Value::Number(number) => Ok(vec![number.to_string()]),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text),
                    Value::Number(number) => Ok(number.to_string()),
                    _ => Err(<D::Error as de::Error>::invalid_type(
                        Unexpected::Other("non-scalar item"),
                        &"a string",
                    )),
                })
                .collect(),
            Value::Bool(flag) => Err(de::Error::invalid_type(Unexpected::Bool(flag), &"a string")),
            Value::Object(_) => Err(de::Error::invalid_type(Unexpected::Map, &"a string")),
        }
    }
}

/// Comma-joined integers: `"2,3"` ↔ `[2, 3]`.
pub mod int_list {
    use serde::{Deserializer, Serializer};

    /// Writes the numbers joined with `,`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
        let joined = value
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&joined)
    }

    /// # Errors
    ///
    /// Fails if any item is not an integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
        super::string_list::deserialize(deserializer)?
            .iter()
            .map(|text| {
                text.trim()
                    .parse::<i64>()
                    .map_err(|e| super::parse_error::<D::Error>("integer", text, &e))
            })
            .collect()
    }
}

/// Reads a string that the server sometimes sends as a number.
///
/// `null` becomes `""`. Use with `deserialize_with`.
pub mod lenient_string {
    use serde::Deserializer;

    /// # Errors
    ///
    /// Fails if the value is an array or an object.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(super::scalar_text(deserializer)?.unwrap_or_default())
    }
}

/// Reads a structured value that the server replaces with `""` when empty.
///
/// `""` and `null` become `T::default()`. Use with `deserialize_with`.
pub mod empty_as_default {
    use serde::de::{DeserializeOwned, Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;

    /// # Errors
    ///
    /// Fails if a non-empty value does not decode as `T`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(T::default()),
            Value::String(text) if text.is_empty() => Ok(T::default()),
            value => serde_json::from_value(value).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase", default)]
    struct Sample {
        #[serde(with = "float")]
        price: f64,
        #[serde(with = "boolean")]
        gift_option: bool,
        #[serde(with = "int")]
        order_id: i64,
        #[serde(with = "timestamp")]
        created_at: Option<DateTime<Utc>>,
        #[serde(with = "string_list")]
        categories: Vec<String>,
        #[serde(with = "int_list")]
        category_ids: Vec<i64>,
        #[serde(deserialize_with = "lenient_string::deserialize")]
        request_id: String,
        #[serde(deserialize_with = "empty_as_default::deserialize")]
        data: BTreeMap<String, String>,
    }

    #[test]
    fn test_decodes_string_encoded_scalars() {
        let sample: Sample = serde_json::from_value(json!({
            "Price": "12.34",
            "GiftOption": "1",
            "OrderId": "42",
            "CreatedAt": "2018-02-07 12:09:22",
            "Categories": "A,B",
            "CategoryIds": "2,3",
            "RequestId": "abc",
            "Data": {"Color": "red"}
        }))
        .unwrap();

        assert!((sample.price - 12.34).abs() < f64::EPSILON);
        assert!(sample.gift_option);
        assert_eq!(sample.order_id, 42);
        assert_eq!(
            sample.created_at,
            Some(Utc.with_ymd_and_hms(2018, 2, 7, 12, 9, 22).unwrap())
        );
        assert_eq!(sample.categories, vec!["A", "B"]);
        assert_eq!(sample.category_ids, vec![2, 3]);
        assert_eq!(sample.request_id, "abc");
        assert_eq!(sample.data.get("Color").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_empty_string_decodes_to_zero_values() {
        let sample: Sample = serde_json::from_value(json!({
            "Price": "",
            "GiftOption": "",
            "OrderId": "",
            "CreatedAt": "",
            "Categories": "",
            "CategoryIds": "",
            "RequestId": "",
            "Data": ""
        }))
        .unwrap();

        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_absent_and_null_decode_to_zero_values() {
        let absent: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent, Sample::default());

        let nulls: Sample = serde_json::from_value(json!({
            "Price": null,
            "OrderId": null,
            "CreatedAt": null,
            "RequestId": null,
            "Data": null
        }))
        .unwrap();
        assert_eq!(nulls, Sample::default());
    }

    #[test]
    fn test_accepts_bare_json_scalars() {
        let sample: Sample = serde_json::from_value(json!({
            "Price": 9.5,
            "GiftOption": true,
            "OrderId": 7,
            "RequestId": 123
        }))
        .unwrap();

        assert!((sample.price - 9.5).abs() < f64::EPSILON);
        assert!(sample.gift_option);
        assert_eq!(sample.order_id, 7);
        assert_eq!(sample.request_id, "123");
    }

    #[test]
    fn test_boolean_is_true_only_for_one() {
        for flag in ["0", "true", "yes", "2"] {
            let sample: Sample = serde_json::from_value(json!({ "GiftOption": flag })).unwrap();
            assert!(!sample.gift_option, "{flag} should decode as false");
        }
    }

    #[test]
    fn test_non_numeric_text_is_an_error() {
        assert!(serde_json::from_value::<Sample>(json!({"Price": "abc"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"OrderId": "4x"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"CategoryIds": "1,b"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"CreatedAt": "yesterday"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"OrderId": {"x": 1}})).is_err());
    }

    #[test]
    fn test_encodes_string_forms() {
        let sample = Sample {
            price: 12.34,
            gift_option: true,
            order_id: 42,
            created_at: Some(Utc.with_ymd_and_hms(2018, 2, 7, 12, 9, 22).unwrap()),
            categories: vec!["A".to_string(), "B".to_string()],
            category_ids: vec![2, 3],
            request_id: String::new(),
            data: BTreeMap::new(),
        };

        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["Price"], "12.340000");
        assert_eq!(value["GiftOption"], "1");
        assert_eq!(value["OrderId"], "42");
        assert_eq!(value["CreatedAt"], "2018-02-07T12:09:22Z");
        assert_eq!(value["Categories"], "A,B");
        assert_eq!(value["CategoryIds"], "2,3");
    }

    #[test]
    fn test_encoded_values_decode_back() {
        let sample = Sample {
            price: 1500.5,
            gift_option: false,
            order_id: -3,
            created_at: Some(Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 59).unwrap()),
            categories: vec!["Shoes".to_string()],
            category_ids: vec![10],
            request_id: "r-1".to_string(),
            data: BTreeMap::from([("Size".to_string(), "M".to_string())]),
        };

        let decoded: Sample = serde_json::from_value(serde_json::to_value(&sample).unwrap()).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2018, 2, 7, 11, 9, 22).unwrap();
        assert_eq!(timestamp::parse("2018-02-07 11:09:22").unwrap(), expected);
        assert_eq!(timestamp::parse("2018-02-07T11:09:22Z").unwrap(), expected);
        assert_eq!(timestamp::parse("2018-02-07T12:09:22+01:00").unwrap(), expected);
        assert_eq!(timestamp::parse("2018-02-07T12:09:22+0100").unwrap(), expected);
        assert!(timestamp::parse("07/02/2018").is_err());
    }

    #[test]
    fn test_string_list_reads_arrays() {
        let sample: Sample =
            serde_json::from_value(json!({"Categories": ["A", 2], "CategoryIds": ["4", 5]})).unwrap();
        assert_eq!(sample.categories, vec!["A", "2"]);
        assert_eq!(sample.category_ids, vec![4, 5]);
    }
}
