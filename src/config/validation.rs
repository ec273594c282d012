//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain whitespace, got '{0}'")]
    InvalidServerName(String),
    #[error("policy.domains_forbidden_when_restricted contains an empty entry")]
    EmptyForbiddenDomain,
    #[error("policy.domains_forbidden_when_restricted expects domains, not user ids, got '{0}'")]
    ForbiddenDomainIsUserId(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    for domain in &config.policy.domains_forbidden_when_restricted {
        if domain.trim().is_empty() {
            errors.push(ValidationError::EmptyForbiddenDomain);
        } else if domain.starts_with('@') {
            errors.push(ValidationError::ForbiddenDomainIsUserId(domain.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
