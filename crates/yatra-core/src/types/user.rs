//! User record type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

/// A user record as returned by the booking service.
///
/// The shape is owned by the remote service; the client treats it as an
/// unstructured bag of fields and persists it verbatim. The only
/// requirement is that it is a JSON object.
///
/// # Example
///
/// ```
/// use yatra_core::User;
/// use serde_json::json;
///
/// let user = User::try_from(json!({
///     "_id": "65f1c0a2",
///     "username": "sita",
///     "email": "sita@example.com",
///     "country": "Nepal"
/// })).unwrap();
///
/// assert_eq!(user.id(), Some("65f1c0a2"));
/// assert_eq!(user.get("country").and_then(|v| v.as_str()), Some("Nepal"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    /// Create a user from a JSON object map.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the user's id, read from `_id` or `id`.
    pub fn id(&self) -> Option<&str> {
        self.str_field("_id").or_else(|| self.str_field("id"))
    }

    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// Returns a raw field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the user, returning the JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl TryFrom<Value> for User {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(InvalidInputError::User {
                reason: format!("expected a JSON object, got {}", kind(&other)),
            }
            .into()),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_mongo_style_id() {
        let user = User::try_from(json!({"_id": "abc", "id": "ignored"})).unwrap();
        assert_eq!(user.id(), Some("abc"));
    }

    #[test]
    fn falls_back_to_plain_id() {
        let user = User::try_from(json!({"id": "abc"})).unwrap();
        assert_eq!(user.id(), Some("abc"));
    }

    #[test]
    fn non_string_fields_are_not_coerced() {
        let user = User::try_from(json!({"_id": 42, "username": null})).unwrap();
        assert_eq!(user.id(), None);
        assert_eq!(user.username(), None);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(User::try_from(json!(null)).is_err());
        assert!(User::try_from(json!("sita")).is_err());
        assert!(User::try_from(json!([{"_id": "abc"}])).is_err());
    }

    #[test]
    fn serializes_verbatim() {
        let raw = json!({"_id": "abc", "img": null, "isAdmin": false, "nested": {"a": [1, 2]}});
        let user = User::try_from(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }
}
