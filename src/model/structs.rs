use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorKind, Result};

/// Snapshot of every activity returned by `GET /activities`, in response order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ActivityCatalog(pub IndexMap<String, ActivityRecord>);

impl ActivityCatalog {
    /// Parse a `GET /activities` response. Non-2xx statuses and bodies that
    /// are not a catalog object are errors.
    pub fn from_response(status: u16, text: &str) -> Result<Self> {
        if !(200..300).contains(&status) {
            return Err(ErrorKind::Status(status).into());
        }
        Ok(serde_json::from_str(text)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActivityRecord)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ActivityRecord> {
        self.0.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ActivityRecord {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub max_participants: Option<i64>,
    #[serde(default, deserialize_with = "roster")]
    pub participants: Vec<Participant>,
}

impl ActivityRecord {
    /// Capacity minus roster size. Negative when the activity is oversubscribed.
    pub fn spots_left(&self) -> i64 {
        self.max_participants.unwrap_or(0) - self.participants.len() as i64
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn schedule(&self) -> &str {
        self.schedule.as_deref().unwrap_or("TBD")
    }
}

// Anything other than an array is an empty roster.
fn roster<'de, D>(deserializer: D) -> core::result::Result<Vec<Participant>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(Participant::from).collect()),
        _ => Ok(Vec::new()),
    }
}

/// A roster entry. The backend sends bare identifiers, but records with
/// `name`/`email` fields and the occasional odd value are tolerated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Participant {
    Id(String),
    Record(Map<String, Value>),
    Other(Value),
}

impl From<Value> for Participant {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Participant::Id(s),
            Value::Object(map) => Participant::Record(map),
            other => Participant::Other(other),
        }
    }
}

/// How a participant is shown and how it is addressed in unregister calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub display: String,
    pub key: String,
}

impl Participant {
    pub fn identity(&self) -> Identity {
        match self {
            Participant::Id(s) if s.is_empty() => Identity::unknown(),
            Participant::Id(s) => Identity {
                display: s.clone(),
                key: s.clone(),
            },
            Participant::Record(map) => {
                let name = map.get("name").and_then(truthy_text);
                let email = map.get("email").and_then(truthy_text);
                let display = match name.clone().or_else(|| email.clone()) {
                    Some(display) => display,
                    None => Value::Object(map.clone()).to_string(),
                };
                let key = email.or(name).unwrap_or_else(|| display.clone());
                Identity { display, key }
            }
            Participant::Other(value) if is_falsy(value) => Identity::unknown(),
            Participant::Other(value) => {
                let text = value.to_string();
                Identity {
                    display: text.clone(),
                    key: text,
                }
            }
        }
    }
}

impl Identity {
    fn unknown() -> Self {
        Identity {
            display: "Unknown".to_string(),
            key: "?".to_string(),
        }
    }
}

/// Text of a loosely typed field, or `None` when it is missing or falsy.
/// Strings are taken as-is; other values are shown as JSON.
pub(crate) fn truthy_text(value: &Value) -> Option<String> {
    match value {
        _ if is_falsy(value) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn participant(value: Value) -> Participant {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn plain_identifier_is_both_display_and_key() {
        let id = participant(json!("michael@mergington.edu")).identity();
        assert_eq!(id.display, "michael@mergington.edu");
        assert_eq!(id.key, "michael@mergington.edu");
    }

    #[test]
    fn record_prefers_name_for_display_and_email_for_key() {
        let id = participant(json!({"name": "Ada Lovelace", "email": "ada@x.com"})).identity();
        assert_eq!(id.display, "Ada Lovelace");
        assert_eq!(id.key, "ada@x.com");
    }

    #[test]
    fn record_with_only_name_uses_it_for_both() {
        let id = participant(json!({"name": "Ada"})).identity();
        assert_eq!(id.display, "Ada");
        assert_eq!(id.key, "Ada");
    }

    #[test]
    fn record_without_name_or_email_falls_back_to_json() {
        let id = participant(json!({"grade": 10})).identity();
        assert_eq!(id.display, r#"{"grade":10}"#);
        assert_eq!(id.key, id.display);
    }

    #[test]
    fn empty_name_is_skipped() {
        let id = participant(json!({"name": "", "email": "e@x.com"})).identity();
        assert_eq!(id.display, "e@x.com");
    }

    #[test]
    fn record_fallback_keeps_field_order() {
        let id = participant(json!({"grade": 10, "age": 5})).identity();
        assert_eq!(id.display, r#"{"grade":10,"age":5}"#);
        assert_eq!(id.key, id.display);
    }

    #[test]
    fn non_string_name_is_shown_as_text() {
        let id = participant(json!({"name": 42})).identity();
        assert_eq!(id.display, "42");
        assert_eq!(id.key, "42");

        let id = participant(json!({"name": 0, "email": false, "grade": 9})).identity();
        assert_eq!(id.display, r#"{"name":0,"email":false,"grade":9}"#);
    }

    #[test]
    fn falsy_entries_are_unknown() {
        for value in [json!(null), json!(""), json!(0), json!(false)] {
            let id = participant(value).identity();
            assert_eq!(id.display, "Unknown");
            assert_eq!(id.key, "?");
        }
    }

    #[test]
    fn scalar_entries_render_as_text() {
        let id = participant(json!(42)).identity();
        assert_eq!(id.display, "42");
        assert_eq!(id.key, "42");
    }

    #[test]
    fn record_defaults_and_spots_left() {
        let record: ActivityRecord = serde_json::from_value(json!({
            "max_participants": 1,
            "participants": ["a@x.com", "b@x.com", "c@x.com"]
        }))
        .unwrap();
        assert_eq!(record.description(), "");
        assert_eq!(record.schedule(), "TBD");
        assert_eq!(record.spots_left(), -2);
    }

    #[test]
    fn non_array_roster_is_empty() {
        let record: ActivityRecord =
            serde_json::from_value(json!({"max_participants": 3, "participants": "nobody"}))
                .unwrap();
        assert!(record.participants.is_empty());
        assert_eq!(record.spots_left(), 3);
    }

    #[test]
    fn catalog_response_with_error_status_is_rejected() {
        let err = ActivityCatalog::from_response(503, r#"{"detail":"maintenance"}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Status(503)));
    }

    #[test]
    fn catalog_response_that_is_not_json_is_rejected() {
        let err = ActivityCatalog::from_response(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SerdeJsonError(_)));
    }

    #[test]
    fn catalog_response_of_wrong_shape_is_rejected() {
        assert!(ActivityCatalog::from_response(200, r#"{"detail":"x"}"#).is_err());
        assert!(ActivityCatalog::from_response(200, "[]").is_err());
    }

    #[test]
    fn catalog_response_parses_on_success() {
        let catalog =
            ActivityCatalog::from_response(200, r#"{"Chess Club": {"max_participants": 2}}"#)
                .unwrap();
        assert_eq!(catalog.get("Chess Club").unwrap().spots_left(), 2);
    }

    #[test]
    fn catalog_keeps_response_order() {
        let catalog: ActivityCatalog = serde_json::from_str(
            r#"{"Zumba": {}, "Art Club": {}, "Chess Club": {}}"#,
        )
        .unwrap();
        let names: Vec<_> = catalog.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["Zumba", "Art Club", "Chess Club"]);
    }
}
