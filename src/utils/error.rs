//! Error handling for settings loading
//!
//! This module provides a unified error type and result type for reading
//! a settings resource and parsing its mapping sections.

use std::fmt;

/// Settings loading error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The resource could not be read or is not well-formed XML
    ResourceParse { resource: String, cause: String },
    /// A required attribute is absent or empty
    MissingAttribute {
        resource: String,
        section: String,
        element: String,
        attribute: String,
    },
    /// An attribute is present but violates a constraint
    InvalidAttribute {
        resource: String,
        section: String,
        element: String,
        attribute: String,
        constraint: String,
    },
    /// Every failure of one parse call, in document order
    Multiple(Vec<SettingsError>),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ResourceParse { resource, cause } => {
                write!(f, "Could not parse resource '{}': {}", resource, cause)
            }
            SettingsError::MissingAttribute {
                resource,
                section,
                element,
                attribute,
            } => write!(
                f,
                "{}: the <{}> element in section '{}' must have the attribute '{}'",
                resource, element, section, attribute
            ),
            SettingsError::InvalidAttribute {
                resource,
                section,
                element,
                attribute,
                constraint,
            } => write!(
                f,
                "{}: the attribute '{}' of the <{}> element in section '{}' {}",
                resource, attribute, element, section, constraint
            ),
            SettingsError::Multiple(errors) => {
                write!(f, "{} invalid mapping entries", errors.len())?;
                for err in errors {
                    write!(f, "\n  - {}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

// Convenience constructors for errors
impl SettingsError {
    pub fn resource(resource: impl Into<String>, cause: impl fmt::Display) -> Self {
        SettingsError::ResourceParse {
            resource: resource.into(),
            cause: cause.to_string(),
        }
    }

    pub fn missing(
        resource: impl Into<String>,
        section: impl Into<String>,
        element: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        SettingsError::MissingAttribute {
            resource: resource.into(),
            section: section.into(),
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    pub fn invalid(
        resource: impl Into<String>,
        section: impl Into<String>,
        element: impl Into<String>,
        attribute: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        SettingsError::InvalidAttribute {
            resource: resource.into(),
            section: section.into(),
            element: element.into(),
            attribute: attribute.into(),
            constraint: constraint.into(),
        }
    }

    /// Attribute named by a missing/invalid attribute error
    pub fn attribute(&self) -> Option<&str> {
        match self {
            SettingsError::MissingAttribute { attribute, .. }
            | SettingsError::InvalidAttribute { attribute, .. } => Some(attribute),
            _ => None,
        }
    }

    /// Section named by a missing/invalid attribute error
    pub fn section(&self) -> Option<&str> {
        match self {
            SettingsError::MissingAttribute { section, .. }
            | SettingsError::InvalidAttribute { section, .. } => Some(section),
            _ => None,
        }
    }

    /// Flatten into the individual errors
    pub fn into_errors(self) -> Vec<SettingsError> {
        match self {
            SettingsError::Multiple(errors) => errors,
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_display() {
        let err = SettingsError::missing("test.xml", "CharacterToSymbolMappings", "Map", "char");
        let msg = err.to_string();
        assert!(msg.contains("test.xml"));
        assert!(msg.contains("<Map>"));
        assert!(msg.contains("'char'"));
        assert_eq!(err.attribute(), Some("char"));
        assert_eq!(err.section(), Some("CharacterToSymbolMappings"));
    }

    #[test]
    fn test_invalid_attribute_display() {
        let err = SettingsError::invalid(
            "test.xml",
            "CharacterToFormulaMappings",
            "Map",
            "char",
            "must be exactly one character",
        );
        assert!(err.to_string().ends_with("must be exactly one character"));
    }

    #[test]
    fn test_resource_error_has_no_attribute() {
        let err = SettingsError::resource("missing.xml", "not found");
        assert!(err.to_string().contains("missing.xml"));
        assert_eq!(err.attribute(), None);
        assert_eq!(err.section(), None);
    }

    #[test]
    fn test_multiple_flattens() {
        let err = SettingsError::Multiple(vec![
            SettingsError::missing("a", "s", "Map", "char"),
            SettingsError::missing("a", "s", "Map", "symbol"),
        ]);
        assert!(err.to_string().starts_with("2 invalid mapping entries"));
        assert_eq!(err.into_errors().len(), 2);
    }
}
