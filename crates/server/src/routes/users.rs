use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use models::user::{parse_id, User};
use serde_json::{Map, Value};
use service::user_service;
use tracing::debug;

use crate::errors::ApiError;
use crate::routes::AppState;

/// A request body as a JSON body parser sees it.
#[derive(Debug, PartialEq)]
enum JsonBody {
    /// No JSON content type, or nothing but whitespace.
    Missing,
    Parsed(Value),
    Malformed,
}

impl JsonBody {
    fn read(headers: &HeaderMap, bytes: &[u8]) -> Self {
        if !has_json_content_type(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
            return JsonBody::Missing;
        }
        match serde_json::from_slice(bytes) {
            Ok(v) => JsonBody::Parsed(v),
            Err(e) => {
                debug!(error = %e, "unreadable JSON body");
                JsonBody::Malformed
            }
        }
    }

    /// Body for a create: anything unparsed becomes `null`, which fails the
    /// type checks.
    fn into_create_body(self) -> Value {
        match self {
            JsonBody::Parsed(v) => v,
            JsonBody::Missing | JsonBody::Malformed => Value::Null,
        }
    }

    /// Body for an update: a missing body is an empty patch; a malformed one
    /// becomes `null` and is rejected after the 404 check.
    fn into_patch_body(self) -> Value {
        match self {
            JsonBody::Parsed(v) => v,
            JsonBody::Missing => Value::Object(Map::new()),
            JsonBody::Malformed => Value::Null,
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(ct) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn path_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or(ApiError::NotFound)
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(user_service::list_users(&state.users).await)
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = path_id(&raw_id)?;
    let user = user_service::get_user(&state.users, id).await?;
    Ok(Json(user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let body = JsonBody::read(&headers, &body).into_create_body();
    let created = user_service::create_user(&state.users, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let id = path_id(&raw_id)?;
    let body = JsonBody::read(&headers, &body).into_patch_body();
    let updated = user_service::update_user(&state.users, id, &body).await?;
    Ok(Json(updated))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&raw_id)?;
    user_service::delete_user(&state.users, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers(ct: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        h
    }

    #[test]
    fn body_without_json_content_type_is_missing() {
        assert_eq!(JsonBody::read(&HeaderMap::new(), b"{\"name\":\"x\"}"), JsonBody::Missing);
        assert_eq!(JsonBody::read(&json_headers("text/plain"), b"{}"), JsonBody::Missing);
    }

    #[test]
    fn blank_json_body_is_missing() {
        assert_eq!(JsonBody::read(&json_headers("application/json"), b""), JsonBody::Missing);
        assert_eq!(JsonBody::read(&json_headers("application/json"), b" \n"), JsonBody::Missing);
    }

    #[test]
    fn json_content_type_variants_are_parsed() {
        let body = br#"{"name":"x"}"#;
        for ct in ["application/json", "application/json; charset=utf-8", "application/merge-patch+json"] {
            assert!(matches!(JsonBody::read(&json_headers(ct), body), JsonBody::Parsed(_)), "{ct}");
        }
    }

    #[test]
    fn syntax_errors_are_malformed() {
        assert_eq!(JsonBody::read(&json_headers("application/json"), b"{nope"), JsonBody::Malformed);
    }

    #[test]
    fn missing_patch_body_is_an_empty_object() {
        assert_eq!(JsonBody::Missing.into_patch_body(), Value::Object(Map::new()));
        assert_eq!(JsonBody::Missing.into_create_body(), Value::Null);
        assert_eq!(JsonBody::Malformed.into_patch_body(), Value::Null);
    }
}
