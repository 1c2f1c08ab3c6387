//! Employee validation utilities

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during employee validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmployeeValidationError {
    #[error("Employee ID cannot be empty")]
    EmptyId,

    #[error("Employee ID '{0}' is not a valid UUID")]
    MalformedId(String),

    #[error("The {0} cannot be empty")]
    EmptyField(&'static str),

    #[error("The {field} must be at least {min} characters")]
    FieldTooShort { field: &'static str, min: usize },

    #[error("The {field} must be less than {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("The {field} must contain only letters, found '{found}'")]
    InvalidNameCharacter { field: &'static str, found: char },

    #[error("Email '{0}' is not a valid address")]
    InvalidEmail(String),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 255;
const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an employee ID (UUID string)
pub fn validate_employee_id(id: &str) -> Result<(), EmployeeValidationError> {
    if id.is_empty() {
        return Err(EmployeeValidationError::EmptyId);
    }

    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| EmployeeValidationError::MalformedId(id.to_string()))
}

/// Validate a first name or surname
///
/// Rules:
/// - Cannot be empty
/// - Between 2 and 255 characters
/// - Letters, spaces, apostrophes and hyphens only
pub fn validate_person_name(field: &'static str, value: &str) -> Result<(), EmployeeValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(EmployeeValidationError::EmptyField(field));
    }

    let len = value.chars().count();

    if len < MIN_NAME_LENGTH {
        return Err(EmployeeValidationError::FieldTooShort {
            field,
            min: MIN_NAME_LENGTH,
        });
    }

    if len > MAX_NAME_LENGTH {
        return Err(EmployeeValidationError::FieldTooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }

    if let Some(found) = value
        .chars()
        .find(|c| !(c.is_alphabetic() || matches!(c, ' ' | '\'' | '-')))
    {
        return Err(EmployeeValidationError::InvalidNameCharacter { field, found });
    }

    Ok(())
}

/// Validate an email address
///
/// Only the shape is checked: one `@`, a non-empty local part and a domain
/// containing a dot. Comparison for uniqueness is case-sensitive.
pub fn validate_email(email: &str) -> Result<(), EmployeeValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(EmployeeValidationError::EmptyField("email"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(EmployeeValidationError::FieldTooLong {
            field: "email",
            max: MAX_EMAIL_LENGTH,
        });
    }

    let invalid = || EmployeeValidationError::InvalidEmail(email.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let well_formed_domain = domain
        .split('.')
        .all(|label| !label.is_empty())
        && domain.contains('.');

    if !well_formed_domain {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 6 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), EmployeeValidationError> {
    if password.is_empty() {
        return Err(EmployeeValidationError::EmptyField("password"));
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(EmployeeValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(EmployeeValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}
