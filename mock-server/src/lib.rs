use std::{fmt, str::FromStr};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

/// Body returned in `Mode::Malformed`.
pub const MALFORMED_BODY: &str = "this is not json";

/// Message attached to a validation rejected by `Mode::RequireVariables`.
pub const NO_VARIABLES_MESSAGE: &str = "no variables supplied";

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub validations: Option<Vec<Validation>>,
}

#[derive(Debug, Deserialize)]
pub struct Validation {
    pub id: String,
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub results: Vec<CheckResult>,
}

/// How the `/check` handler answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Every validation is valid with an empty message.
    #[default]
    Echo,
    /// A validation is valid only if it carries at least one variable.
    RequireVariables,
    /// `200 OK` with a body that is not JSON.
    Malformed,
    /// `500` with a well-formed echo body.
    ServerError,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "echo" => Ok(Mode::Echo),
            "require-variables" => Ok(Mode::RequireVariables),
            "malformed" => Ok(Mode::Malformed),
            "server-error" => Ok(Mode::ServerError),
            other => Err(format!("unknown mock mode: {other}")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Echo => "echo",
            Mode::RequireVariables => "require-variables",
            Mode::Malformed => "malformed",
            Mode::ServerError => "server-error",
        };
        f.write_str(name)
    }
}

pub fn app() -> Router {
    app_with_mode(Mode::Echo)
}

pub fn app_with_mode(mode: Mode) -> Router {
    Router::new()
        .route("/{version}/check", post(check))
        .with_state(mode)
}

pub async fn run(listener: TcpListener, mode: Mode) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_mode(mode)).await
}

/// Verdicts for `request` under `mode`, in request order.
pub fn evaluate(mode: Mode, request: CheckRequest) -> CheckResponse {
    let results = request
        .validations
        .unwrap_or_default()
        .into_iter()
        .map(|validation| {
            let has_variables = validation
                .variables
                .as_ref()
                .is_some_and(|variables| !variables.is_empty());
            match mode {
                Mode::RequireVariables if !has_variables => CheckResult {
                    id: validation.id,
                    is_valid: false,
                    message: NO_VARIABLES_MESSAGE.to_string(),
                },
                _ => CheckResult {
                    id: validation.id,
                    is_valid: true,
                    message: String::new(),
                },
            }
        })
        .collect();
    CheckResponse { results }
}

async fn check(
    State(mode): State<Mode>,
    Path(version): Path<String>,
    Json(request): Json<CheckRequest>,
) -> Response {
    let count = request.validations.as_ref().map_or(0, Vec::len);
    tracing::debug!(%version, %mode, validations = count, "check request");

    match mode {
        Mode::Malformed => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            MALFORMED_BODY,
        )
            .into_response(),
        Mode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(evaluate(mode, request))).into_response()
        }
        Mode::Echo | Mode::RequireVariables => Json(evaluate(mode, request)).into_response(),
    }
}
