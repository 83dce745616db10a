use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ModelError;

/// A user record. Serialized with the camelCase keys clients send (`isActive`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// Partial update: only the fields present in the body are merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "integral_id")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, is_active: bool) -> Self {
        Self { id, name: name.into(), email: email.into(), is_active }
    }

    /// Shallow merge of `patch` over this record.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

impl UserPatch {
    /// Type-check an update body. Must be a JSON object with known keys only.
    pub fn from_json(body: &Value) -> Result<Self, ModelError> {
        if !body.is_object() {
            return Err(ModelError::Validation("patch body must be a JSON object".into()));
        }
        serde_json::from_value(body.clone()).map_err(|e| ModelError::Validation(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Primitive type checks for a create body: `id` number, `name`/`email`
/// strings, `isActive` boolean. Extra keys are dropped.
pub fn parse_new_user(body: &Value) -> Result<User, ModelError> {
    let id = body
        .get("id")
        .and_then(as_integer)
        .ok_or_else(|| ModelError::invalid("id", "an integer number"))?;
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::invalid("name", "a string"))?;
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::invalid("email", "a string"))?;
    let is_active = body
        .get("isActive")
        .and_then(Value::as_bool)
        .ok_or_else(|| ModelError::invalid("isActive", "a boolean"))?;
    Ok(User::new(id, name, email, is_active))
}

fn integral_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_integer(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom("`id` must be an integer number")),
    }
}

// 3 and 3.0 are the same number on the wire.
fn as_integer(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Lenient `:id` parsing: skips leading whitespace, takes an optional sign and
/// the leading run of digits (`"12abc"` is 12). `None` matches no record.
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let n: i64 = rest[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

/// Records present at process start.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "João Silva", "joao@email.com", true),
        User::new(2, "Maria Souza", "maria@email.com", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_keys() {
        let v = serde_json::to_value(User::new(7, "A", "a@e.com", true)).unwrap();
        assert_eq!(v, json!({"id": 7, "name": "A", "email": "a@e.com", "isActive": true}));
    }

    #[test]
    fn parse_new_user_accepts_well_typed_body() {
        let body = json!({"id": 3, "name": "X", "email": "x@e.com", "isActive": true, "extra": 1});
        let user = parse_new_user(&body).unwrap();
        assert_eq!(user, User::new(3, "X", "x@e.com", true));
    }

    #[test]
    fn parse_new_user_accepts_integral_float_id() {
        let body = json!({"id": 4.0, "name": "X", "email": "x@e.com", "isActive": false});
        assert_eq!(parse_new_user(&body).unwrap().id, 4);
    }

    #[test]
    fn parse_new_user_rejects_wrong_types_and_missing_fields() {
        let cases = [
            json!({"id": "abc", "name": "X"}),
            json!({"id": 1.5, "name": "X", "email": "x@e.com", "isActive": true}),
            json!({"id": 3, "name": 5, "email": "x@e.com", "isActive": true}),
            json!({"id": 3, "name": "X", "isActive": true}),
            json!({"id": 3, "name": "X", "email": "x@e.com", "isActive": "yes"}),
            json!([1, 2]),
            json!(null),
        ];
        for body in cases {
            assert!(
                matches!(parse_new_user(&body), Err(ModelError::Validation(_))),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut user = seed_users().remove(0);
        let patch = UserPatch::from_json(&json!({"name": "João Atualizado"})).unwrap();
        user.apply(patch);
        assert_eq!(user, User::new(1, "João Atualizado", "joao@email.com", true));
    }

    #[test]
    fn patch_rejects_unknown_fields_and_wrong_types() {
        assert!(UserPatch::from_json(&json!({"role": "admin"})).is_err());
        assert!(UserPatch::from_json(&json!({"isActive": "no"})).is_err());
        assert!(UserPatch::from_json(&json!(["name"])).is_err());
        assert!(UserPatch::from_json(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn patch_id_accepts_the_same_numbers_as_create() {
        assert_eq!(UserPatch::from_json(&json!({"id": 3.0})).unwrap().id, Some(3));
        assert_eq!(UserPatch::from_json(&json!({"id": 3})).unwrap().id, Some(3));
        assert_eq!(UserPatch::from_json(&json!({"id": null})).unwrap().id, None);
        assert!(UserPatch::from_json(&json!({"id": 1.5})).is_err());
        assert!(UserPatch::from_json(&json!({"id": "3"})).is_err());
    }

    #[test]
    fn parse_id_follows_leading_digits() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("  7"), Some(7));
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("+5"), Some(5));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }

    #[test]
    fn seed_has_joao_then_maria() {
        let seed = seed_users();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].name, "João Silva");
        assert_eq!(seed[1].name, "Maria Souza");
        assert!(!seed[1].is_active);
    }
}
