//! Booking form controller.
//!
//! Holds what the operator typed, enforces the constraints the browser
//! checks natively, and tracks one submission at a time: `idle` until a
//! submit is accepted, `submitting` while the request is outstanding, then
//! back to idle with a status message.

use crate::booking::{BookingRequest, ErrorResponse};
use crate::hourmin::HourMin;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};
use validator::{Validate, ValidationError, ValidationErrors};

pub const SUCCESS_STATUS: &str = "Booking request sent successfully! We'll get back to you soon.";
pub const FALLBACK_ERROR_STATUS: &str = "Failed to send booking request. Please try again later.";

const SUBMIT_LABEL: &str = "BOOK NOW";
const SUBMITTING_LABEL: &str = "SENDING...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Date,
    Time,
    Theme,
}

impl FormField {
    const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Date,
        FormField::Time,
        FormField::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Date => "date",
            FormField::Time => "time",
            FormField::Theme => "theme",
        }
    }

    fn invalid_reason(&self) -> &'static str {
        match self {
            FormField::Email => "is not a valid email address",
            FormField::Date => "is not a valid date",
            FormField::Time => "is not a valid time",
            FormField::Name | FormField::Theme => "is invalid",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{field} {reason}")]
    Validation {
        field: FormField,
        reason: &'static str,
    },

    #[error("booking request rejected: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { message: Option<String> },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<ValidationErrors> for SubmitError {
    // Reports the first failing field in form order, "is required" taking
    // precedence over a syntax complaint on the same field.
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        FormField::ALL
            .iter()
            .find_map(|field| {
                let errors = field_errors.get(field.as_str())?;
                let reason = if errors.iter().any(|e| e.code == "length") {
                    "is required"
                } else {
                    field.invalid_reason()
                };
                Some(SubmitError::Validation {
                    field: *field,
                    reason,
                })
            })
            .unwrap_or(SubmitError::Validation {
                field: FormField::Name,
                reason: "is invalid",
            })
    }
}

/// The channel a form submits through.
#[async_trait]
pub trait BookingClient: Send + Sync {
    async fn send(&self, request: &BookingRequest) -> Result<(), SubmitError>;
}

/// Posts booking requests as JSON to `{base_url}/api/book`.
pub struct HttpBookingClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpBookingClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/book", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl BookingClient for HttpBookingClient {
    async fn send(&self, request: &BookingRequest) -> Result<(), SubmitError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error);
        debug!("Booking endpoint answered {}: {:?}", status, message);
        Err(SubmitError::Rejected { message })
    }
}

/// Raw input values, exactly as typed. The attributes mirror the
/// `required`, `type="email"`, `type="date"` and `type="time"` inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct FormFields {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1), email)]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1), custom(function = "calendar_date"))]
    pub date: String,
    #[validate(length(min = 1), custom(function = "wall_clock_time"))]
    pub time: String,
    #[validate(length(min = 1))]
    pub theme: String,
    pub additional_details: String,
}

impl FormFields {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            theme: self.theme.trim().to_string(),
            additional_details: self.additional_details.trim().to_string(),
        }
    }
}

fn calendar_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date"))
}

fn wall_clock_time(value: &str) -> Result<(), ValidationError> {
    HourMin::try_from(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("time"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn message(&self) -> &str {
        match self {
            SubmitStatus::Success(message) | SubmitStatus::Error(message) => message,
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// A previous submission was still outstanding.
    Ignored,
    /// Caught before anything was sent.
    Invalid(SubmitError),
}

#[derive(Debug, Default)]
pub struct BookingForm {
    pub fields: FormFields,
    submitting: bool,
    status: Option<SubmitStatus>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: FormFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_enabled(&self) -> bool {
        !self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn status(&self) -> Option<&SubmitStatus> {
        self.status.as_ref()
    }

    /// Runs the native constraint checks and builds the request body.
    pub fn validate(&self) -> Result<BookingRequest, SubmitError> {
        let fields = self.fields.trimmed();
        fields.validate()?;

        Ok(BookingRequest {
            phone: optional(fields.phone),
            additional_details: optional(fields.additional_details),
            name: fields.name,
            email: fields.email,
            date: fields.date,
            time: fields.time,
            theme: fields.theme,
        })
    }

    /// Starts a submission. `Ok(None)` means one is already outstanding and
    /// this submit was swallowed by the disabled control.
    pub fn begin_submit(&mut self) -> Result<Option<BookingRequest>, SubmitError> {
        if self.submitting {
            debug!("Submit ignored, a booking request is already outstanding");
            return Ok(None);
        }

        // an invalid form never fires the submit event, the old status stays
        let request = self.validate()?;
        self.status = None;
        self.submitting = true;
        Ok(Some(request))
    }

    /// Applies the result of the request started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        match result {
            Ok(()) => {
                self.status = Some(SubmitStatus::Success(SUCCESS_STATUS.to_string()));
                self.fields = FormFields::default();
            }
            Err(e) => {
                error!("Form submission error: {}", e);
                let message = match e {
                    SubmitError::Rejected {
                        message: Some(message),
                    } => message,
                    _ => FALLBACK_ERROR_STATUS.to_string(),
                };
                self.status = Some(SubmitStatus::Error(message));
            }
        }
        self.submitting = false;
    }

    /// One submit action: validate, one call to `client`, update state.
    pub async fn submit<C>(&mut self, client: &C) -> SubmitOutcome
    where
        C: BookingClient + ?Sized,
    {
        let request = match self.begin_submit() {
            Ok(Some(request)) => request,
            Ok(None) => return SubmitOutcome::Ignored,
            Err(e) => return SubmitOutcome::Invalid(e),
        };

        let result = client.send(&request).await;
        let sent = result.is_ok();
        self.finish_submit(result);

        if sent {
            SubmitOutcome::Sent
        } else {
            SubmitOutcome::Failed
        }
    }
}

fn optional(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormFields {
        FormFields {
            name: "A. Khan".to_string(),
            email: "a@x.com".to_string(),
            phone: String::new(),
            date: "2025-05-01".to_string(),
            time: "14:00".to_string(),
            theme: "Urban".to_string(),
            additional_details: String::new(),
        }
    }

    #[test]
    fn validate_builds_request_with_absent_optionals() {
        let form = BookingForm::with_fields(filled());
        let request = form.validate().unwrap();
        assert_eq!(request.name, "A. Khan");
        assert_eq!(request.phone, None);
        assert_eq!(request.additional_details, None);
    }

    #[test]
    fn each_required_field_is_enforced() {
        let cases: [(fn(&mut FormFields), FormField); 5] = [
            (|f: &mut FormFields| f.name.clear(), FormField::Name),
            (|f: &mut FormFields| f.email = "  ".to_string(), FormField::Email),
            (|f: &mut FormFields| f.date.clear(), FormField::Date),
            (|f: &mut FormFields| f.time.clear(), FormField::Time),
            (|f: &mut FormFields| f.theme.clear(), FormField::Theme),
        ];

        for (blank, expected) in cases {
            let mut fields = filled();
            blank(&mut fields);
            match BookingForm::with_fields(fields).validate() {
                Err(SubmitError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation failure on {expected}, got {other:?}"),
            }
        }
    }

    fn email_accepted(email: &str) -> bool {
        let mut fields = filled();
        fields.email = email.to_string();
        BookingForm::with_fields(fields).validate().is_ok()
    }

    #[test]
    fn email_syntax_is_checked() {
        assert!(email_accepted("a@x.com"));
        assert!(email_accepted("first.last+shoot@studio-mail.example"));
        assert!(email_accepted("  a@x.com  "));
        assert!(!email_accepted("a.x.com"));
        assert!(!email_accepted("@x.com"));
        assert!(!email_accepted("a@"));
        assert!(!email_accepted("a b@x.com"));
        assert!(!email_accepted("a@x@y.com"));
    }

    #[test]
    fn blank_email_is_reported_as_required() {
        let mut fields = filled();
        fields.email.clear();
        match BookingForm::with_fields(fields).validate() {
            Err(SubmitError::Validation { field, reason }) => {
                assert_eq!(field, FormField::Email);
                assert_eq!(reason, "is required");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn malformed_date_and_time_are_rejected() {
        let mut fields = filled();
        fields.date = "01/05/2025".to_string();
        assert!(matches!(
            BookingForm::with_fields(fields).validate(),
            Err(SubmitError::Validation { field: FormField::Date, .. })
        ));

        let mut fields = filled();
        fields.time = "2pm".to_string();
        assert!(matches!(
            BookingForm::with_fields(fields).validate(),
            Err(SubmitError::Validation { field: FormField::Time, .. })
        ));
    }

    #[test]
    fn begin_submit_disables_the_control() {
        let mut form = BookingForm::with_fields(filled());
        assert_eq!(form.submit_label(), "BOOK NOW");

        assert!(form.begin_submit().unwrap().is_some());
        assert!(form.is_submitting());
        assert!(!form.submit_enabled());
        assert_eq!(form.submit_label(), "SENDING...");

        // second press while outstanding
        assert!(form.begin_submit().unwrap().is_none());
    }

    #[test]
    fn invalid_form_never_enters_submitting_state() {
        let mut fields = filled();
        fields.theme.clear();
        let mut form = BookingForm::with_fields(fields);

        assert!(form.begin_submit().is_err());
        assert!(!form.is_submitting());
    }

    #[test]
    fn begin_submit_clears_previous_status() {
        let mut form = BookingForm::with_fields(filled());
        form.begin_submit().unwrap();
        form.finish_submit(Err(SubmitError::Rejected { message: None }));
        assert!(form.status().is_some());

        form.begin_submit().unwrap();
        assert!(form.status().is_none());
    }

    #[test]
    fn invalid_submit_keeps_previous_status() {
        let mut form = BookingForm::with_fields(filled());
        form.begin_submit().unwrap();
        form.finish_submit(Ok(()));

        // the form was cleared by the success, so this press is invalid
        assert!(form.begin_submit().is_err());
        assert_eq!(
            form.status(),
            Some(&SubmitStatus::Success(SUCCESS_STATUS.to_string()))
        );
    }

    #[test]
    fn success_clears_fields() {
        let mut form = BookingForm::with_fields(filled());
        form.begin_submit().unwrap();
        form.finish_submit(Ok(()));

        assert_eq!(form.fields, FormFields::default());
        assert_eq!(
            form.status(),
            Some(&SubmitStatus::Success(SUCCESS_STATUS.to_string()))
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn failure_prefers_server_message_and_keeps_fields() {
        let mut form = BookingForm::with_fields(filled());
        form.begin_submit().unwrap();
        form.finish_submit(Err(SubmitError::Rejected {
            message: Some("Failed to send booking request".to_string()),
        }));

        assert_eq!(form.fields, filled());
        assert_eq!(
            form.status().map(SubmitStatus::message),
            Some("Failed to send booking request")
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn failure_without_server_message_uses_fallback() {
        let mut form = BookingForm::with_fields(filled());
        form.begin_submit().unwrap();
        form.finish_submit(Err(SubmitError::Rejected { message: None }));

        assert_eq!(
            form.status(),
            Some(&SubmitStatus::Error(FALLBACK_ERROR_STATUS.to_string()))
        );
    }

    #[test]
    fn endpoint_url_is_normalized() {
        let client = HttpBookingClient::new("http://localhost:3000/");
        assert_eq!(client.endpoint, "http://localhost:3000/api/book");
    }
}
