use crate::booking::{BookingRequest, ErrorResponse, MessageResponse};
use crate::config::MailConfig;
use crate::mailer::{MailTransport, TransportError};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use schemars::{schema::RootSchema, schema_for};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

pub const SUCCESS_MESSAGE: &str = "Booking request sent successfully";
pub const FAILURE_MESSAGE: &str = "Failed to send booking request";

/// Upper bound on one mail hand-off. Kept below the server-wide request
/// timeout so an expiry still answers with the JSON failure body.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(25);

#[derive(Clone)]
pub struct IntakeState {
    mailer: Arc<dyn MailTransport>,
    sender: String,
    recipient: String,
    send_timeout: Duration,
}

impl IntakeState {
    pub fn new(mailer: Arc<dyn MailTransport>, mail: &MailConfig) -> Self {
        Self {
            mailer,
            sender: mail.sender.clone(),
            recipient: mail.recipient.clone(),
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }
}

/// Every variant answers the caller with the same 500 body. The detail only
/// goes to the log.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("malformed booking request: {0}")]
    MalformedRequest(#[from] JsonRejection),

    #[error("failed to render booking email: {0}")]
    Template(#[from] askama::Error),

    #[error("mail transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        error!("Error sending booking request: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: FAILURE_MESSAGE.to_string(),
            }),
        )
            .into_response()
    }
}

async fn handle_booking(
    State(state): State<IntakeState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, IntakeError> {
    let Json(booking) = payload?;
    debug!("Booking request for {} {}", booking.date, booking.time);

    let mail = booking.compose_email(&state.sender, &state.recipient)?;
    tokio::time::timeout(state.send_timeout, state.mailer.send(mail))
        .await
        .map_err(|_| TransportError::TimedOut(state.send_timeout))??;

    info!("Booking request forwarded to {}", state.recipient);
    Ok(Json(MessageResponse {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}

async fn handle_schema() -> Json<RootSchema> {
    Json(schema_for!(BookingRequest))
}

pub fn booking_api(state: IntakeState) -> Router {
    Router::new()
        .route("/", post(handle_booking))
        .route("/schema", get(handle_schema))
        .with_state(state)
}
