//! Request payload validation.
//!
//! `validate` is the business-rule dispatcher: it selects the rule set by the
//! `Payload` variant and returns one message per violated rule. `check` adds
//! the declarative schema constraints declared on the DTOs (email format,
//! lengths, role name) and turns any message into a `ServiceError`.

use crate::database::models::{AccountDto, VehicleDto};
use crate::errors::{ServiceError, ServiceResult};
use validator::{Validate, ValidationErrors};

/// Earliest model year accepted for a vehicle.
pub const MIN_VEHICLE_YEAR: i32 = 1950;

/// Every payload kind that goes through validation.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Vehicle(&'a VehicleDto),
    Account(&'a AccountDto),
}

impl<'a> From<&'a VehicleDto> for Payload<'a> {
    fn from(dto: &'a VehicleDto) -> Self {
        Payload::Vehicle(dto)
    }
}

impl<'a> From<&'a AccountDto> for Payload<'a> {
    fn from(dto: &'a AccountDto) -> Self {
        Payload::Account(dto)
    }
}

struct Violation {
    field: &'static str,
    message: String,
}

fn blank(field: &'static str) -> Violation {
    Violation {
        field,
        message: format!("The '{}' field cannot be blank", field),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn rule_violations(payload: Payload<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    match payload {
        Payload::Vehicle(vehicle) => {
            if is_blank(&vehicle.name) {
                violations.push(blank("name"));
            }
            if is_blank(&vehicle.brand) {
                violations.push(blank("brand"));
            }
            if vehicle.year < MIN_VEHICLE_YEAR {
                violations.push(Violation {
                    field: "year",
                    message: format!(
                        "The 'year' field cannot be earlier than {}",
                        MIN_VEHICLE_YEAR
                    ),
                });
            }
        }
        Payload::Account(account) => {
            if is_blank(&account.email) {
                violations.push(blank("email"));
            }
            if is_blank(&account.secret) {
                violations.push(blank("secret"));
            }
            if is_blank(&account.role) {
                violations.push(blank("role"));
            }
        }
    }

    violations
}

/// Business-rule validation. An empty list means the payload is valid.
pub fn validate<'a>(payload: impl Into<Payload<'a>>) -> Vec<String> {
    rule_violations(payload.into())
        .into_iter()
        .map(|violation| violation.message)
        .collect()
}

/// Formats validator::ValidationErrors as `field: message` pairs, sorted by field
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
    field_errors.sort_by(|(a, _), (b, _)| a.cmp(b));

    field_errors
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string())
                )
            })
        })
        .collect()
}

fn schema_errors(payload: Payload<'_>) -> Option<ValidationErrors> {
    let result = match payload {
        Payload::Vehicle(vehicle) => vehicle.validate(),
        Payload::Account(account) => account.validate(),
    };
    result.err()
}

/// Runs the business rules and the schema constraints, accumulating every
/// message. Schema errors on a field already reported as blank are dropped.
pub fn check<'a>(payload: impl Into<Payload<'a>>) -> ServiceResult<()> {
    let payload = payload.into();
    let violations = rule_violations(payload);

    let mut messages: Vec<String> = violations
        .iter()
        .map(|violation| violation.message.clone())
        .collect();

    if let Some(mut errors) = schema_errors(payload) {
        for violation in &violations {
            errors.errors_mut().remove(violation.field);
        }
        messages.extend(validation_messages(&errors));
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::validation_messages(messages))
    }
}
