use axum::{
    extract::{FromRequest, Request, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::label::request::{fold_form_fields, parse_request};
use crate::label::{GenerationError, ValidationError};
use crate::state::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const PDF_DISPOSITION: &str = "inline; filename=\"ship-label.pdf\"";

/// POST /get-label
/// Validates the payload, renders the label off the async runtime, and returns
/// the PDF inline. A failure is reported once before the error response goes out.
pub async fn get_label_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    match generate_label(&state, request).await {
        Ok(pdf) => Ok((
            [
                (CONTENT_TYPE, "application/pdf"),
                (CONTENT_DISPOSITION, PDF_DISPOSITION),
            ],
            pdf,
        )
            .into_response()),
        Err(err) => {
            state.reporter.report(err.to_report()).await;
            Err(err)
        }
    }
}

async fn generate_label(state: &AppState, request: Request) -> Result<Vec<u8>, AppError> {
    let payload = read_payload(request).await?;
    let label_request = parse_request(payload)?;
    debug!(order = %label_request.order, "Label request validated");

    let generator = state.generator.clone();
    let pdf = tokio::task::spawn_blocking(move || generator.generate(&label_request))
        .await
        .map_err(|e| GenerationError::Task(e.to_string()))??;

    Ok(pdf)
}

/// Reads a JSON or url-encoded body into an untyped value. Anything that does
/// not parse is a validation failure.
async fn read_payload(request: Request) -> Result<Value, ValidationError> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

    if is_form {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|_| ValidationError)?;
        Ok(fold_form_fields(pairs))
    } else {
        let Json(value) = Json::<Value>::from_request(request, &())
            .await
            .map_err(|_| ValidationError)?;
        Ok(value)
    }
}
