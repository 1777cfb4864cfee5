//! Response shapes accepted from the text-returning inference services.

use crate::error::StageError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The two layouts hosted inference endpoints use for text results: a bare
/// object, or a batch whose first record carries the result.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResponseShape {
    Object(Map<String, Value>),
    List(Vec<Map<String, Value>>),
}

impl ResponseShape {
    pub(crate) fn parse(body: &[u8]) -> Result<Self, StageError> {
        serde_json::from_slice(body).map_err(|_| {
            let preview: String = String::from_utf8_lossy(body).chars().take(200).collect();
            StageError::UnexpectedShape(format!(
                "expected an object or a list of objects, got: {}",
                preview
            ))
        })
    }

    fn record(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::List(items) => items.first(),
        }
    }

    /// Extracts the string stored under `field`.
    ///
    /// The string may be empty; callers decide whether that is acceptable.
    pub(crate) fn text_field(&self, field: &str) -> Result<String, StageError> {
        let record = self
            .record()
            .ok_or_else(|| StageError::UnexpectedShape("empty result list".to_string()))?;

        match record.get(field) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Null) | None => {
                if let Some(Value::String(reported)) = record.get("error") {
                    Err(StageError::UnexpectedShape(format!(
                        "missing `{}`; service reported: {}",
                        field, reported
                    )))
                } else {
                    Err(StageError::UnexpectedShape(format!("missing `{}`", field)))
                }
            }
            Some(other) => Err(StageError::UnexpectedShape(format!(
                "`{}` is not a string: {}",
                field, other
            ))),
        }
    }
}
