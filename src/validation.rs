use std::borrow::Cow;

use chrono::NaiveDateTime;
use validator::{Validate, ValidationError};

use crate::auth::Role;
use crate::error::AppError;
use crate::store::DELIMITER;

const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

fn no_delimiter(value: &str) -> Result<(), ValidationError> {
    if value.contains(DELIMITER) {
        let mut error = ValidationError::new("delimiter");
        error.message = Some(Cow::from(format!(
            "'{}' is not allowed in this field",
            DELIMITER
        )));
        return Err(error);
    }
    Ok(())
}

fn known_role(value: &str) -> Result<(), ValidationError> {
    value.parse::<Role>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("role");
        error.message = Some(Cow::from("Role must be 'coach' or 'client'"));
        error
    })
}

/// Registration input after trimming. Uniqueness is checked against the
/// directory separately.
#[derive(Debug, Clone, Validate)]
pub struct RegistrationRequest {
    #[validate(
        length(min = 1, message = "Username cannot be empty"),
        custom(function = "no_delimiter")
    )]
    pub username: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,

    #[validate(custom(function = "known_role"))]
    pub role: String,

    #[validate(
        length(min = 1, message = "Email cannot be empty"),
        custom(function = "no_delimiter")
    )]
    pub email: String,
}

impl RegistrationRequest {
    pub fn new(username: &str, password: &str, role: &str, email: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
            role: role.trim().to_lowercase(),
            email: email.trim().to_string(),
        }
    }

    pub fn validate_custom(self) -> Result<Self, AppError> {
        self.validate()?;
        Ok(self)
    }
}

/// Parse a session slot from its stored date and time strings.
pub fn parse_slot(date: &str, time: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), SLOT_FORMAT).map_err(|_| {
        AppError::Format(format!(
            "Invalid date or time '{} {}', expected YYYY-MM-DD and HH:MM",
            date, time
        ))
    })
}

/// Parse a slot and require it to be strictly after `now`. Slots carry no
/// seconds, so a slot in the current minute is always rejected.
pub fn parse_future_slot(
    date: &str,
    time: &str,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, AppError> {
    let slot = parse_slot(date, time)?;
    if slot <= now {
        return Err(AppError::Validation(
            "That time is in the past. Please choose a future time.".to_string(),
        ));
    }
    Ok(slot)
}
