use crate::mailer::OutgoingMail;
use askama::Template;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A request to schedule a shoot, as posted by the booking form.
///
/// The request has no identity and is never stored: it is built for one
/// submission, turned into one email and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    /// Preferred date, `YYYY-MM-DD`.
    pub date: String,
    /// Preferred time, `HH:MM`.
    pub time: String,
    pub theme: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub additional_details: Option<String>,
}

// The browser form always submits every key, so an untouched optional
// input arrives as "" rather than being left out.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl BookingRequest {
    pub fn subject(&self) -> String {
        format!("New Photography Booking Request from {}", self.name)
    }

    pub fn html_body(&self) -> askama::Result<String> {
        BookingEmail {
            name: &self.name,
            email: &self.email,
            phone: self.phone.as_deref(),
            date: &self.date,
            time: &self.time,
            theme: &self.theme,
            additional_details: self.additional_details.as_deref(),
        }
        .render()
    }

    /// Maps the request onto the booking email template. Sender and
    /// recipient come from configuration, never from the payload.
    pub fn compose_email(&self, from: &str, to: &str) -> askama::Result<OutgoingMail> {
        Ok(OutgoingMail {
            from: from.to_string(),
            to: to.to_string(),
            subject: self.subject(),
            html_body: self.html_body()?,
        })
    }
}

// Absent optionals render as "Not provided" / "None provided".
#[derive(Template)]
#[template(path = "booking_email.html")]
struct BookingEmail<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    date: &'a str,
    time: &'a str,
    theme: &'a str,
    additional_details: Option<&'a str>,
}
