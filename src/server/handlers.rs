//! Request handlers
//!
//! Maps the locker endpoints onto the access gate and scoped storage:
//! registration and login issue session cookies, `/files` serves directory
//! listings as JSON and file contents as raw bytes, uploads are write-once.

use std::sync::Arc;

use axum::Form;
use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::error::LockerError;
use crate::error::handlers::{error_to_status, handle_error};
use crate::gate::{AccessGate, UserContext};
use crate::server::cookies::{credential_from_cookies, session_cookie_headers};

pub type SharedGate = Arc<AccessGate>;

/// Login/password form body. Fields are optional so a missing one maps to
/// 400 rather than a framework rejection.
#[derive(Debug, Deserialize)]
pub struct AuthForm {
    pub login: Option<String>,
    pub password: Option<String>,
}

fn error_response(err: LockerError) -> Response {
    handle_error(&err);
    let status =
        StatusCode::from_u16(error_to_status(&err)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        // IO detail stays in the log, not on the wire
        (status, "Internal server error".to_string()).into_response()
    } else {
        (status, err.to_string()).into_response()
    }
}

fn authenticated_response(login: &str, secret: &str) -> Response {
    match session_cookie_headers(login, secret) {
        Some(headers) => (AppendHeaders(headers), Redirect::to("/files/")).into_response(),
        None => error_response(LockerError::BadRequest("Invalid login".into())),
    }
}

/// Authorizes a request off its cookie pair.
fn authorize(gate: &AccessGate, headers: &HeaderMap) -> Result<UserContext, LockerError> {
    let source = credential_from_cookies(headers).ok_or(LockerError::Unauthenticated)?;
    gate.authorize(&source)
}

pub async fn index() -> Redirect {
    Redirect::to("/files/")
}

pub async fn register(State(gate): State<SharedGate>, Form(form): Form<AuthForm>) -> Response {
    let (Some(login), Some(password)) = (form.login, form.password) else {
        return error_response(LockerError::BadRequest("Missing login or password".into()));
    };
    match gate.register(&login, &password) {
        Ok((context, secret)) => authenticated_response(&context.login, &secret),
        Err(err) => error_response(err),
    }
}

pub async fn login(State(gate): State<SharedGate>, Form(form): Form<AuthForm>) -> Response {
    let (Some(login), Some(password)) = (form.login, form.password) else {
        return error_response(LockerError::BadRequest("Missing login or password".into()));
    };
    match gate.login(&login, &password) {
        Ok((context, secret)) => authenticated_response(&context.login, &secret),
        Err(err) => error_response(err),
    }
}

/// GET /files/ — list the user's root
pub async fn browse_root(State(gate): State<SharedGate>, headers: HeaderMap) -> Response {
    serve_entry(&gate, &headers, "").await
}

/// GET /files/{*path} — list a directory or download a file
pub async fn browse(
    State(gate): State<SharedGate>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_entry(&gate, &headers, &path).await
}

async fn serve_entry(gate: &AccessGate, headers: &HeaderMap, requested: &str) -> Response {
    let context = match authorize(gate, headers) {
        Ok(context) => context,
        Err(err) => return error_response(err),
    };

    let confined = match gate.storage().resolve(&context.login, requested) {
        Ok(confined) => confined,
        Err(err) => return error_response(err.into()),
    };

    if confined.is_dir() {
        return match gate.storage().list(&confined) {
            Ok(names) => Json(names).into_response(),
            Err(err) => error_response(err.into()),
        };
    }

    match gate.storage().read(&confined) {
        Ok(bytes) => ([(CONTENT_TYPE, "application/octet-stream")], bytes).into_response(),
        Err(err) => error_response(err.into()),
    }
}

/// POST /files/{*path} — upload a single file to a path that must not exist
pub async fn upload(
    State(gate): State<SharedGate>,
    Path(path): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let context = match authorize(&gate, &headers) {
        Ok(context) => context,
        Err(err) => return error_response(err),
    };

    let confined = match gate.storage().resolve(&context.login, &path) {
        Ok(confined) => confined,
        Err(err) => return error_response(err.into()),
    };

    let bytes = match file_field(multipart).await {
        Ok(bytes) => bytes,
        Err(err) => return error_response(err),
    };

    match gate.storage().write(&confined, &bytes) {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => error_response(err.into()),
    }
}

/// Pulls the single `file` field out of a multipart body.
async fn file_field(mut multipart: Multipart) -> Result<Vec<u8>, LockerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| LockerError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| LockerError::BadRequest(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(LockerError::BadRequest("Missing file field".into()))
}
