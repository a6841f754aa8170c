use serde::{Deserialize, Serialize};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    UtcOffset,
};
use uuid::Uuid;

use super::errors::UserError;

/// Request body for user registration. Every field is optional at the wire
/// level so that absence can be reported with the fixed validation message.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// Registration input after the presence check.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub username: String,
    pub birthdate: Date,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned after login.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (taken in UTC).
pub fn parse_birthdate(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let plain = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &plain).ok().or_else(|| {
        OffsetDateTime::parse(raw, &Rfc3339)
            .ok()
            .map(|dt| dt.to_offset(UtcOffset::UTC).date())
    })
}

impl RegisterRequest {
    pub fn into_new_user(self) -> Result<NewUser, UserError> {
        let missing = || UserError::MissingFields;
        let email = present(self.email).ok_or_else(missing)?;
        let password = present(self.password).ok_or_else(missing)?;
        let username = present(self.username).ok_or_else(missing)?;
        let birthdate = present(self.birthdate)
            .as_deref()
            .and_then(parse_birthdate)
            .ok_or_else(missing)?;
        let gender = present(self.gender).ok_or_else(missing)?;
        let height = positive(self.height).ok_or_else(missing)?;
        let weight = positive(self.weight).ok_or_else(missing)?;

        Ok(NewUser {
            name: present(self.name).map(|n| n.trim().to_string()),
            email: normalize_email(&email),
            password,
            username: username.trim().to_string(),
            birthdate,
            gender: gender.trim().to_string(),
            height,
            weight,
        })
    }
}
