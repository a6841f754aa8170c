use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

pub const DEFAULT_ROLE: &str = "user";

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // argon2 hash, not exposed in JSON
    pub username: String,
    #[serde(with = "iso_date")]
    pub birthdate: Date,
    pub gender: Option<String>,
    pub height: f64, // cm
    pub weight: f64, // kg
    pub fatneed: f64,
    pub proteinneed: f64,
    pub caloryneed: f64,
    pub fiberneed: f64,
    pub carbohidrateneed: f64,
    pub role: String,
    pub smoke: Option<bool>,
    pub alcho: Option<bool>,
    pub active: Option<bool>,
    pub cardiovascular: Option<bool>,
}

#[cfg(test)]
pub(crate) fn sample_user(gender: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        name: None,
        email: "ana@example.com".into(),
        password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        username: "ana".into(),
        birthdate: time::macros::date!(1996 - 01 - 01),
        gender: gender.map(str::to_string),
        height: 165.0,
        weight: 58.0,
        fatneed: 50.0,
        proteinneed: 80.0,
        caloryneed: 2200.0,
        fiberneed: 30.0,
        carbohidrateneed: 0.0,
        role: DEFAULT_ROLE.into(),
        smoke: Some(false),
        alcho: None,
        active: Some(true),
        cardiovascular: None,
    }
}
