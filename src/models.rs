//! Request/response payloads exchanged over the request and response topics

use crate::error::{Result, WorkerError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Requests
// ============================================================================

/// TranslationRequest - a validated inbound task
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Opaque identifier, passed through unchanged (`Value::Null` when absent)
    pub id: Value,
    /// Non-empty text to translate
    pub text: String,
}

impl TranslationRequest {
    /// Decode and validate raw message bytes
    ///
    /// Returns `MalformedMessage` when the bytes are not a UTF-8 JSON object,
    /// and `InvalidRequest` when `text` is missing, null, empty or not a string.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        // Decoding into a map rejects arrays and scalars; duplicate keys keep the last value
        let mut fields: Map<String, Value> = serde_json::from_slice(payload).map_err(|e| {
            WorkerError::MalformedMessage(format!(
                "{} (payload: {})",
                e,
                String::from_utf8_lossy(payload)
            ))
        })?;

        let id = fields.remove("id").unwrap_or(Value::Null);
        let text = match fields.remove("text") {
            Some(Value::String(text)) if !text.is_empty() => text,
            Some(Value::String(_)) | Some(Value::Null) | None => {
                return Err(WorkerError::InvalidRequest(format!(
                    "empty text in request (id: {})",
                    id
                )))
            }
            Some(other) => {
                return Err(WorkerError::InvalidRequest(format!(
                    "text must be a string, got {} (id: {})",
                    other, id
                )))
            }
        };

        Ok(Self { id, text })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Task status reported back on the response topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
}

/// TranslationResponse - published once a request has been translated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub id: Value,
    pub translated_text: String,
    pub status: TaskStatus,
}

impl TranslationResponse {
    pub fn completed(request: &TranslationRequest, translated_text: String) -> Self {
        Self {
            id: request.id.clone(),
            translated_text,
            status: TaskStatus::Completed,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| WorkerError::Publish(format!("failed to serialize response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_decode_valid_request() {
        let request =
            TranslationRequest::from_bytes(r#"{"id":"1","text":"مرحبا"}"#.as_bytes()).unwrap();
        assert_eq!(request.id, json!("1"));
        assert_eq!(request.text, "مرحبا");
    }

    #[test]
    fn test_missing_id_becomes_null() {
        let request = TranslationRequest::from_bytes(br#"{"text":"hi"}"#).unwrap();
        assert_eq!(request.id, Value::Null);
    }

    #[test]
    fn test_numeric_id_passes_through() {
        let request = TranslationRequest::from_bytes(br#"{"id":42,"text":"hi"}"#).unwrap();
        assert_eq!(request.id, json!(42));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = TranslationRequest::from_bytes(b"not-json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedMessage);
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = TranslationRequest::from_bytes(br#"["text"]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedMessage);
    }

    #[test]
    fn test_positional_array_is_malformed() {
        let err = TranslationRequest::from_bytes(br#"[1,"hello"]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedMessage);
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        let request =
            TranslationRequest::from_bytes(br#"{"id":"1","text":"a","text":"b"}"#).unwrap();
        assert_eq!(request.id, json!("1"));
        assert_eq!(request.text, "b");
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = TranslationRequest::from_bytes(&[0x7b, 0x22, 0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedMessage);
    }

    #[test]
    fn test_empty_missing_or_null_text_is_invalid() {
        for payload in [
            &br#"{"id":"2","text":""}"#[..],
            &br#"{"id":"2"}"#[..],
            &br#"{"id":"2","text":null}"#[..],
            &br#"{}"#[..],
        ] {
            let err = TranslationRequest::from_bytes(payload).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        }
    }

    #[test]
    fn test_non_string_text_is_invalid() {
        let err = TranslationRequest::from_bytes(br#"{"id":"2","text":5}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_response_wire_format() {
        let request = TranslationRequest {
            id: json!("1"),
            text: "مرحبا".to_string(),
        };
        let response = TranslationResponse::completed(&request, "Hello".to_string());
        let bytes = response.to_bytes().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"id":"1","translated_text":"Hello","status":"completed"}"#
        );
    }

    #[test]
    fn test_response_with_null_id() {
        let request = TranslationRequest {
            id: Value::Null,
            text: "x".to_string(),
        };
        let bytes = TranslationResponse::completed(&request, "y".to_string())
            .to_bytes()
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"id":null,"translated_text":"y","status":"completed"}"#
        );
    }
}
