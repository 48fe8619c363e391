use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use triage_engine::{Error, RetrieveRequest, RetrieveResponse, SuggestRequest, SuggestResponse};

use crate::state::{AppState, ReloadReport, load_corpus};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/tickets/retrieve", post(retrieve))
		.route("/v1/tickets/suggest", post(suggest))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/reload_corpus", post(reload_corpus)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn retrieve(
	State(state): State<AppState>,
	Json(payload): Json<RetrieveRequest>,
) -> Result<Json<RetrieveResponse>, ApiError> {
	let response = state.service.retrieve(payload).await?;
	Ok(Json(response))
}

async fn suggest(
	State(state): State<AppState>,
	Json(payload): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
	let response = state.service.suggest(payload).await?;
	Ok(Json(response))
}

async fn reload_corpus(State(state): State<AppState>) -> Result<Json<ReloadReport>, ApiError> {
	let corpus = load_corpus(&state.service).await.map_err(|err| {
		json_error(StatusCode::BAD_GATEWAY, "reload_failed", err.to_string())
	})?;
	let report = ReloadReport { tickets: corpus.len(), dimensions: corpus.dimensions() };

	state.service.replace_corpus(corpus);

	Ok(Json(report))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			Error::NoMatch =>
				json_error(StatusCode::NOT_FOUND, "no_match", "No matching tickets found."),
			Error::Provider { message } =>
				json_error(StatusCode::BAD_GATEWAY, "provider_error", message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}
