use serde::Serialize;
use time::{Date, OffsetDateTime};

use super::{
    errors::UserError,
    repo_types::{iso_date, User},
};
use crate::nutrition::age_in_years;

/// Display view of a stored user: no id, no password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub gender: String,
    #[serde(with = "iso_date")]
    pub birthdate: Date,
    pub age: u32,
    pub height: f64,
    pub weight: f64,
    pub fatneed: f64,
    pub proteinneed: f64,
    pub caloryneed: f64,
    pub fiberneed: f64,
    pub carbohidrateneed: f64,
    pub smoke: Option<bool>,
    pub alcho: Option<bool>,
    pub active: Option<bool>,
    pub cardiovascular: Option<bool>,
}

/// Upper-cases the first character and leaves the rest as is.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl UserProfile {
    /// Fails with [`UserError::ProfileUnavailable`] when the record has no gender.
    pub fn from_record(user: User, now: OffsetDateTime) -> Result<Self, UserError> {
        let gender = user
            .gender
            .as_deref()
            .filter(|g| !g.is_empty())
            .map(capitalize)
            .ok_or(UserError::ProfileUnavailable)?;
        let age = age_in_years(user.birthdate, now).ok_or(UserError::ProfileUnavailable)?;

        Ok(Self {
            username: user.username,
            email: user.email,
            gender,
            birthdate: user.birthdate,
            age,
            height: user.height,
            weight: user.weight,
            fatneed: user.fatneed,
            proteinneed: user.proteinneed,
            caloryneed: user.caloryneed,
            fiberneed: user.fiberneed,
            carbohidrateneed: user.carbohidrateneed,
            smoke: user.smoke,
            alcho: user.alcho,
            active: user.active,
            cardiovascular: user.cardiovascular,
        })
    }
}
