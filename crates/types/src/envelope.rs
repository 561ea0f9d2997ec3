//! Tagged success/failure wrapper for operation outcomes.

use serde::{Deserialize, Serialize};

/// Outcome of an asynchronous place operation in its wire shape.
///
/// Serializes as `{"type": "success", "payload": ...}` or
/// `{"type": "failure", "error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Envelope<T> {
    Success { payload: T },
    Failure { error: ErrorValue },
}

/// Diagnostic carried by a failed [`Envelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorValue {
    /// Stable machine-readable category, e.g. `status` or `conversion`.
    pub kind: String,
    pub message: String,
    /// Raw backend status for backend-status failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorValue {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self::Success { payload }
    }

    pub fn failure(error: ErrorValue) -> Self {
        Self::Failure { error }
    }

    /// Wraps a `Result`, converting the error into its diagnostic form.
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<ErrorValue>,
    {
        match result {
            Ok(payload) => Self::Success { payload },
            Err(error) => Self::Failure { error: error.into() },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorValue> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorValue> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::Failure { error } => Err(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success { payload } => Envelope::Success { payload: f(payload) },
            Self::Failure { error } => Envelope::Failure { error },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_uses_type_tag() {
        let envelope = Envelope::success(vec![1, 2]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, serde_json::json!({ "type": "success", "payload": [1, 2] }));
    }

    #[test]
    fn failure_carries_status_for_diagnostics() {
        let envelope: Envelope<Vec<u8>> =
            Envelope::failure(ErrorValue::new("status", "Query status OVER_QUERY_LIMIT").with_status("OVER_QUERY_LIMIT"));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "failure");
        assert_eq!(value["error"]["status"], "OVER_QUERY_LIMIT");
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn from_result_keeps_exactly_one_arm() {
        let ok: Envelope<u8> = Envelope::from_result(Ok::<u8, ErrorValue>(7));
        assert_eq!(ok.payload(), Some(&7));
        assert!(ok.error().is_none());

        let err: Envelope<u8> = Envelope::from_result(Err(ErrorValue::new("conversion", "missing geometry")));
        assert!(!err.is_success());
        assert_eq!(err.error().map(|e| e.kind.as_str()), Some("conversion"));
        assert_eq!(err.map(|n| n + 1).into_result().unwrap_err().message, "missing geometry");
    }
}
