use std::fmt;

use serde::de::DeserializeOwned;

/// A recognized setting carried a value of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    key: String,
    reason: String,
}

impl InvalidValue {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending setting.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for `{}`: {}", self.key, self.reason)
    }
}

impl std::error::Error for InvalidValue {}

pub(crate) fn decode<T: DeserializeOwned>(
    key: &str,
    value: serde_yaml::Value,
) -> Result<T, InvalidValue> {
    serde_yaml::from_value(value).map_err(|e| InvalidValue::new(key, e.to_string()))
}

pub(crate) fn check<T>(key: &str, result: Result<T, String>) -> Result<T, InvalidValue> {
    result.map_err(|reason| InvalidValue::new(key, reason))
}

pub(crate) fn encode<T: serde::Serialize>(value: &T) -> crate::Result<serde_yaml::Value> {
    serde_yaml::to_value(value)
        .map_err(|e| crate::Status::new("Failed to encode setting").with_source(e))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_names_key_on_type_mismatch() {
        let value = serde_yaml::Value::String("nope".to_owned());
        let err = decode::<bool>("RELATIVE_URLS", value).unwrap_err();
        assert_eq!(err.key(), "RELATIVE_URLS");
        assert!(err.to_string().starts_with("invalid value for `RELATIVE_URLS`"));
    }

    #[test]
    fn decode_accepts_matching_type() {
        let value = serde_yaml::Value::Bool(true);
        assert_eq!(decode::<bool>("RELATIVE_URLS", value), Ok(true));
    }
}
