use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    dto::{normalize_email, LoginRequest, NewUser, RegisterRequest},
    errors::UserError,
    repo::UserStore,
    repo_types::{User, DEFAULT_ROLE},
};
use crate::{
    auth::{password, JwtKeys},
    nutrition::{compute_targets, Biometrics},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        )
        .unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Validates, checks email uniqueness, computes nutrient targets, hashes the
/// password and stores the new user. Returns the record as composed.
pub async fn register_user(
    store: &dyn UserStore,
    payload: RegisterRequest,
    now: OffsetDateTime,
) -> Result<User, UserError> {
    let input: NewUser = payload.into_new_user()?;

    if !is_valid_email(&input.email) {
        warn!(email = %input.email, "invalid email");
        return Err(UserError::InvalidEmail);
    }

    if store.find_by_email(&input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(UserError::EmailTaken);
    }

    let targets = compute_targets(
        &Biometrics {
            gender: &input.gender,
            birthdate: input.birthdate,
            height_cm: input.height,
            weight_kg: input.weight,
        },
        now,
    )
    .ok_or(UserError::MissingFields)?;

    let hash = password::hash_password(&input.password)?;

    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        password: hash,
        username: input.username,
        birthdate: input.birthdate,
        gender: Some(input.gender),
        height: input.height,
        weight: input.weight,
        fatneed: targets.fatneed,
        proteinneed: targets.proteinneed,
        caloryneed: targets.caloryneed,
        fiberneed: targets.fiberneed,
        carbohidrateneed: targets.carbohidrateneed,
        role: DEFAULT_ROLE.to_string(),
        smoke: None,
        alcho: None,
        active: None,
        cardiovascular: None,
    };

    if let Err(e) = store.create(&user).await {
        error!(error = %e, email = %user.email, "create user failed");
        return Err(UserError::RegisterFailed);
    }

    info!(user_id = %user.id, email = %user.email, age = targets.age, bmr = targets.bmr, "user registered");
    Ok(user)
}

/// Verifies credentials and returns the user together with a signed access token.
pub async fn login_user(
    store: &dyn UserStore,
    keys: &JwtKeys,
    payload: LoginRequest,
) -> Result<(User, String), UserError> {
    let (email, plain) = match (payload.email, payload.password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (normalize_email(&e), p),
        _ => return Err(UserError::MissingFields),
    };

    let Some(user) = store.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(UserError::InvalidCredentials);
    };

    if !password::verify_password(&plain, &user.password)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(UserError::InvalidCredentials);
    }

    let token = keys.sign(user.id, &user.role)?;
    info!(user_id = %user.id, "user logged in");
    Ok((user, token))
}
