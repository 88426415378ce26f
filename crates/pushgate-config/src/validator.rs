//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, HostKind};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error, if any, into a [`ConfigError::InvalidValue`].
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        match self.errors.first() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path.clone(),
                message: error.message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_notification(config, &mut result);
        Self::validate_worker(config, &mut result);
        Self::validate_host(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_notification(config: &Config, result: &mut ValidationResult) {
        let n = &config.notification;

        // Fallbacks must guarantee a non-empty title and body.
        if n.fallback_title.trim().is_empty() {
            result.add_error(ValidationError::new(
                "notification.fallback_title",
                "fallback_title cannot be empty",
            ));
        }
        if n.fallback_body.trim().is_empty() {
            result.add_error(ValidationError::new(
                "notification.fallback_body",
                "fallback_body cannot be empty",
            ));
        }
        if n.default_click_action.is_empty() {
            result.add_error(ValidationError::new(
                "notification.default_click_action",
                "default_click_action cannot be empty",
            ));
        } else if n.default_click_action != "/" {
            result.add_warning(ValidationWarning::new(
                "notification.default_click_action",
                format!(
                    "default_click_action '{}' is not the application root",
                    n.default_click_action
                ),
            ));
        }
        if n.icon.is_empty() {
            result.add_error(ValidationError::new(
                "notification.icon",
                "icon cannot be empty",
            ));
        }
    }

    fn validate_worker(config: &Config, result: &mut ValidationResult) {
        if config.worker.queue_capacity == 0 {
            result.add_error(ValidationError::new(
                "worker.queue_capacity",
                "queue_capacity must be greater than 0",
            ));
        }

        if config.worker.dedupe_capacity > 10_000 {
            result.add_warning(ValidationWarning::new(
                "worker.dedupe_capacity",
                "dedupe_capacity is very high (>10000), history is kept in memory",
            ));
        }
    }

    fn validate_host(config: &Config, result: &mut ValidationResult) {
        let origin = &config.host.app_origin;
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            result.add_error(ValidationError::new(
                "host.app_origin",
                "app_origin must start with http:// or https://",
            ));
        }

        if config.host.kind == HostKind::Memory && config.host.open_command.is_some() {
            result.add_warning(ValidationWarning::new(
                "host.open_command",
                "open_command is ignored by the memory host",
            ));
        }

        if let Some(cmd) = &config.host.open_command {
            if cmd.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "host.open_command",
                    "open_command cannot be empty when set",
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "'{}' is not a plain level, it will be parsed as a filter directive",
                    config.logging.level
                ),
            ));
        }

        if config.logging.max_files == 0 {
            result.add_error(ValidationError::new(
                "logging.max_files",
                "max_files must be greater than 0",
            ));
        }
    }
}
