//! Core error types for calmcal-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures are reported per field; reschedule warnings and deadline notices
//! are advisory and never appear here.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for calmcal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Event request validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Slot search errors
    #[error("Scheduling error: {0}")]
    Slot(#[from] SlotError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote metrics service errors
    #[error("Metrics service error: {0}")]
    MetricsService(#[from] MetricsServiceError),

    /// Referenced task id is not in the task list
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Title must be at most {max} characters (got {len})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Event type is required")]
    MissingType,

    #[error("Due date is required")]
    MissingDueDate,

    /// Estimated hours outside the accepted range
    #[error("Estimated hours must be between {min} and {max} (got {value})")]
    DurationOutOfRange { value: f64, min: f64, max: f64 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Name of the request field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyTitle | ValidationError::TitleTooLong { .. } => "title",
            ValidationError::MissingType => "type",
            ValidationError::MissingDueDate => "dueDate",
            ValidationError::DurationOutOfRange { .. } => "estimatedHours",
            ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Every field error found while validating one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// First error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field(), e))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Slot search errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// Duration is zero, negative or not a number
    #[error("Task duration must be a positive number of hours (got {0})")]
    InvalidDuration(f64),

    /// Duration above the configured ceiling
    #[error("Task duration of {hours}h exceeds the maximum of {max}h")]
    DurationTooLong { hours: f64, max: f64 },

    /// Search bound reached without a free slot
    #[error("No free slot found within {days} days")]
    NoSlotWithin { days: u32 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the config tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Remote metrics service errors.
#[derive(Error, Debug)]
pub enum MetricsServiceError {
    /// Request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Service returned {code}: {message}")]
    Status { code: u16, message: String },

    /// Response body was not a metrics payload
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Configured service URL is unusable
    #[error("Invalid service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidValue {
            key: "metrics.service_url".to_string(),
            message: err.to_string(),
        }
    }
}
