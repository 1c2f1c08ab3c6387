//! Department validation utilities

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during department validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DepartmentValidationError {
    #[error("Department ID cannot be empty")]
    EmptyId,

    #[error("Department ID '{0}' is not a valid UUID")]
    MalformedId(String),

    #[error("The name cannot be empty")]
    EmptyName,

    #[error("The name must be at least {0} characters")]
    NameTooShort(usize),

    #[error("The name must be less than {0} characters")]
    NameTooLong(usize),

    #[error("The name must contain only letters, spaces and hyphens, found '{0}'")]
    InvalidNameCharacter(char),
}

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 255;

/// Validate a department ID (UUID string)
pub fn validate_department_id(id: &str) -> Result<(), DepartmentValidationError> {
    if id.is_empty() {
        return Err(DepartmentValidationError::EmptyId);
    }

    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| DepartmentValidationError::MalformedId(id.to_string()))
}

/// Validate a department name
///
/// Rules:
/// - Cannot be empty or whitespace only
/// - Between 2 and 255 characters
/// - Letters, spaces and hyphens only
pub fn validate_department_name(name: &str) -> Result<(), DepartmentValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(DepartmentValidationError::EmptyName);
    }

    let len = name.chars().count();

    if len < MIN_NAME_LENGTH {
        return Err(DepartmentValidationError::NameTooShort(MIN_NAME_LENGTH));
    }

    if len > MAX_NAME_LENGTH {
        return Err(DepartmentValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_alphabetic() || *c == ' ' || *c == '-'))
    {
        return Err(DepartmentValidationError::InvalidNameCharacter(c));
    }

    Ok(())
}

/// Department names are unique regardless of case and surrounding whitespace
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_department_names() {
        assert!(validate_department_name("Orthodontics").is_ok());
        assert!(validate_department_name("General Dentistry").is_ok());
        assert!(validate_department_name("Oral-Surgery").is_ok());
        assert!(validate_department_name("  Pediatric Dentistry  ").is_ok());
    }

    #[test]
    fn test_empty_department_name() {
        assert_eq!(
            validate_department_name("   "),
            Err(DepartmentValidationError::EmptyName)
        );
    }

    #[test]
    fn test_department_name_length() {
        assert_eq!(
            validate_department_name("A"),
            Err(DepartmentValidationError::NameTooShort(2))
        );
        assert_eq!(
            validate_department_name(&"a".repeat(256)),
            Err(DepartmentValidationError::NameTooLong(255))
        );
    }

    #[test]
    fn test_department_name_invalid_character() {
        assert_eq!(
            validate_department_name("Dept 42"),
            Err(DepartmentValidationError::InvalidNameCharacter('4'))
        );
    }

    #[test]
    fn test_department_id() {
        assert!(validate_department_id("5f0c6d3e-8a41-4b8e-9a55-0d2b3c4e5f60").is_ok());
        assert_eq!(
            validate_department_id(""),
            Err(DepartmentValidationError::EmptyId)
        );
        assert!(matches!(
            validate_department_id("orthodontics"),
            Err(DepartmentValidationError::MalformedId(_))
        ));
    }

    #[test]
    fn test_names_match_ignores_case() {
        assert!(names_match("Orthodontics", "orthodontics"));
        assert!(names_match(" Orthodontics", "ORTHODONTICS "));
        assert!(!names_match("Orthodontics", "Surgery"));
    }
}
