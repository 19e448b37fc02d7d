use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend-assigned record id. Mock backends hand out either strings or
/// numbers; both normalize to the string form stored in the session marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// A record of the `users` collection.
///
/// `password` is cleartext because that is what the backend stores; it is
/// compared verbatim at login and never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Body of `POST /users`; the backend assigns the id.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

impl NewUser {
    /// Stamps the record with the current UTC time, e.g. `2024-03-05T12:00:00.000Z`.
    #[must_use]
    pub fn new(username: String, email: String, password: String) -> Self {
        Self {
            username,
            email,
            password,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// The record as stored once the backend assigned `id`.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            created_at: Some(self.created_at),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_accepts_strings_and_numbers() {
        let text: UserId = serde_json::from_value(json!("a1b2")).unwrap();
        let number: UserId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(text.as_str(), "a1b2");
        assert_eq!(number.as_str(), "7");
        assert!(serde_json::from_value::<UserId>(json!(null)).is_err());
    }

    #[test]
    fn user_uses_camel_case_and_tolerates_missing_created_at() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "ann",
            "email": "ann@x.com",
            "password": "abc123"
        }))
        .unwrap();
        assert_eq!(user.id, UserId::new("1"));
        assert_eq!(user.created_at, None);

        let user: User = serde_json::from_value(json!({
            "id": "1",
            "username": "ann",
            "email": "ann@x.com",
            "password": "abc123",
            "createdAt": "2024-03-05T12:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(user.created_at.as_deref(), Some("2024-03-05T12:00:00.000Z"));
    }

    #[test]
    fn debug_redacts_password() {
        let user = NewUser::new("ann".into(), "ann@x.com".into(), "abc123".into());
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("abc123"));

        let rendered = format!("{:?}", user.into_user(UserId::new("1")));
        assert!(rendered.contains("ann@x.com"));
        assert!(!rendered.contains("abc123"));
    }

    #[test]
    fn new_user_serializes_backend_shape() {
        let user = NewUser::new("ann".into(), "ann@x.com".into(), "abc123".into());
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["username"], "ann");
        assert_eq!(value["password"], "abc123");

        let created_at = value["createdAt"].as_str().unwrap();
        assert!(created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    }
}
