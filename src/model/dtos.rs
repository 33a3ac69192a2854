use serde::Deserialize;
use serde_json::Value;

use super::structs::truthy_text;

/// Parameters shared by signup and unregister requests
#[derive(Debug, Clone, Copy)]
pub struct EnrollmentParams<'a> {
    pub activity: &'a str,
    pub email: &'a str,
}

/// Body the backend sends with mutation responses. Fields are kept loosely
/// typed so one odd field never hides the other.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Outcome of a request that reached the server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    /// `None` when the body was empty or not JSON.
    pub body: Option<ApiMessage>,
}

impl ApiReply {
    pub fn from_text(status: u16, text: &str) -> Self {
        Self {
            status,
            body: serde_json::from_str(text).ok(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-supplied success message; `None` when missing or falsy.
    pub fn message(&self) -> Option<String> {
        self.body.as_ref()?.message.as_ref().and_then(truthy_text)
    }

    /// Server-supplied error detail; `None` when missing or falsy.
    /// Non-string details are shown as JSON.
    pub fn detail(&self) -> Option<String> {
        self.body.as_ref()?.detail.as_ref().and_then(truthy_text)
    }
}
