// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-zero buffer sizes and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::RecallConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RecallConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.session.buffer_capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "session.buffer_capacity must be at least 1".to_string(),
        });
    }

    if config.session.extraction_interval == 0 {
        errors.push(ConfigError::Validation {
            message: "session.extraction_interval must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.max_tokens must be positive".to_string(),
        });
    }

    if config.extraction.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "extraction.max_tokens must be positive".to_string(),
        });
    }

    if let Some(model) = &config.extraction.model {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "extraction.model must not be empty when set".to_string(),
            });
        }
    }

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
