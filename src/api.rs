//! HTTP/JSON transport over [`ContactManager`].
//!
//! | route                       | success                         |
//! |-----------------------------|---------------------------------|
//! | `POST   /api/contacts`      | `201` + created contact         |
//! | `GET    /api/contacts`      | `200` + every contact           |
//! | `PUT    /api/contacts/:id`  | `200` + updated contact         |
//! | `DELETE /api/contacts/:id`  | `200` + `{"message": "Contact deleted"}` |
//!
//! Validation and uniqueness failures are `400`, unknown ids `404`,
//! storage faults `500`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::{AppError, Contact, ContactDraft, ContactManager, ContactPatch, Uuid};
use crate::validation::Violation;

pub type SharedManager = Arc<ContactManager>;

pub fn router(manager: SharedManager) -> Router {
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/:id", put(update_contact).delete(delete_contact))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(manager)
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    MalformedBody(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedBody(error) => bad_request(error, Vec::new()),
            ApiError::App(err) => err.into_response(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                let message = format!("Validation error: {errors}");
                bad_request(message, errors.0)
            }
            AppError::Uniqueness(field) => {
                bad_request(field.taken_message(), vec![Violation::taken(field)])
            }
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Contact not found" })),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "contact store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: other.to_string(),
                        violations: Vec::new(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn bad_request(error: String, violations: Vec<Violation>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error, violations })).into_response()
}

// Ids that are not UUIDs cannot name a stored contact.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::App(AppError::contact_not_found()))
}

// Store calls may block on file I/O, so they run on the blocking pool.
async fn with_manager<T, F>(manager: SharedManager, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&ContactManager) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || op(&manager))
        .await
        .map_err(AppError::unavailable)?;
    Ok(outcome?)
}

async fn create_contact(
    State(manager): State<SharedManager>,
    payload: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(draft) = payload?;
    let contact = with_manager(manager, move |m| m.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn list_contacts(
    State(manager): State<SharedManager>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(with_manager(manager, |m| m.list()).await?))
}

async fn update_contact(
    State(manager): State<SharedManager>,
    Path(id): Path<String>,
    payload: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let contact = with_manager(manager, move |m| m.update(&id, patch)).await?;
    Ok(Json(contact))
}

async fn delete_contact(
    State(manager): State<SharedManager>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    with_manager(manager, move |m| m.delete(&id)).await?;
    Ok(Json(json!({ "message": "Contact deleted" })))
}
