//! Server configuration for the enrollment response API.
//!
//! Every field can be given on the command line or through an environment variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ENROLLMENT_HOST` | 127.0.0.1 | Host to bind |
//! | `ENROLLMENT_PORT` | 3001 | Server port |
//! | `ENROLLMENT_LOG_LEVEL` | info | Log level |
//! | `ENROLLMENT_STORAGE` | memory | Storage backend (`memory` or `mongodb`) |
//! | `ENROLLMENT_MONGODB_URI` | mongodb://localhost:27017 | MongoDB connection string |
//! | `ENROLLMENT_MONGODB_DATABASE` | fhir | MongoDB database name |
//! | `ENROLLMENT_PUBLIC_HOST` | OS hostname | Host written into `Location` headers |
//! | `ENROLLMENT_PUBLIC_PORT` | 3001 | Port written into `Location` headers |
//! | `ENROLLMENT_ERROR_POLICY` | compatible | Status code mapping (`compatible` or `strict`) |
//! | `ENROLLMENT_MAX_BODY_SIZE` | 10485760 | Max request body (bytes) |
//!
//! # Example
//!
//! ```rust
//! use enrollment_rest::{ErrorPolicy, ServerConfig};
//!
//! let config = ServerConfig {
//!     port: 8080,
//!     error_policy: ErrorPolicy::Strict,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

use axum::http::StatusCode;
use clap::{Parser, ValueEnum};

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    Memory,
    Mongodb,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => f.write_str("memory"),
            StorageKind::Mongodb => f.write_str("mongodb"),
        }
    }
}

/// Chooses the status codes the handlers answer with.
///
/// `Compatible` keeps the codes existing clients rely on: a malformed id on update or
/// delete is a 400, everything else that fails is a 500, and create answers 200.
/// `Strict` answers 400 for malformed input, 404 for missing resources and 201 for create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    #[default]
    Compatible,
    Strict,
}

impl ErrorPolicy {
    /// Status of a successful create.
    pub fn created_status(self) -> StatusCode {
        match self {
            ErrorPolicy::Compatible => StatusCode::OK,
            ErrorPolicy::Strict => StatusCode::CREATED,
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Compatible => f.write_str("compatible"),
            ErrorPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Server configuration.
///
/// Built from command line arguments and environment variables using
/// [`ServerConfig::parse`], from the environment alone with [`ServerConfig::from_env`],
/// or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "enrollment-server")]
#[command(about = "EnrollmentResponse REST API server")]
pub struct ServerConfig {
    /// Host address to bind to.
    #[arg(long, env = "ENROLLMENT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "ENROLLMENT_PORT", default_value = "3001")]
    pub port: u16,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ENROLLMENT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Storage backend.
    #[arg(long, env = "ENROLLMENT_STORAGE", value_enum, default_value_t = StorageKind::Memory)]
    pub storage: StorageKind,

    /// MongoDB connection string, used when `storage` is `mongodb`.
    #[arg(long, env = "ENROLLMENT_MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name.
    #[arg(long, env = "ENROLLMENT_MONGODB_DATABASE", default_value = "fhir")]
    pub mongodb_database: String,

    /// Host written into `Location` headers. Defaults to the OS hostname.
    #[arg(long, env = "ENROLLMENT_PUBLIC_HOST")]
    pub public_host: Option<String>,

    /// Port written into `Location` headers.
    #[arg(long, env = "ENROLLMENT_PUBLIC_PORT", default_value = "3001")]
    pub public_port: u16,

    /// Status code mapping for errors and create.
    #[arg(long, env = "ENROLLMENT_ERROR_POLICY", value_enum, default_value_t = ErrorPolicy::Compatible)]
    pub error_policy: ErrorPolicy,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ENROLLMENT_MAX_BODY_SIZE", default_value = "10485760")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            log_level: "info".to_string(),
            storage: StorageKind::Memory,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "fhir".to_string(),
            public_host: None,
            public_port: 3001,
            error_policy: ErrorPolicy::Compatible,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables only, falling back to defaults
    /// when they do not parse.
    pub fn from_env() -> Self {
        Self::try_parse_from(["enrollment-server"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.public_port == 0 {
            errors.push("Public port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.storage == StorageKind::Mongodb && self.mongodb_database.trim().is_empty() {
            errors.push("MongoDB database name cannot be empty".to_string());
        }

        if matches!(&self.public_host, Some(host) if host.trim().is_empty()) {
            errors.push("Public host cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Pins the public host so `Location` headers do not depend on the machine.
    pub fn for_testing() -> Self {
        Self {
            log_level: "debug".to_string(),
            public_host: Some("localhost".to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.error_policy, ErrorPolicy::Compatible);
        assert!(config.public_host.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
        assert!(ServerConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = ServerConfig {
            port: 0,
            max_body_size: 0,
            storage: StorageKind::Mongodb,
            mongodb_database: " ".to_string(),
            ..Default::default()
        };

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("Port")));
        assert!(errors.iter().any(|e| e.contains("database")));
    }

    #[test]
    fn test_empty_database_ignored_for_memory_storage() {
        let config = ServerConfig {
            mongodb_database: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "enrollment-server",
            "--port",
            "8080",
            "--storage",
            "mongodb",
            "--error-policy",
            "strict",
            "--public-host",
            "api.example.org",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageKind::Mongodb);
        assert_eq!(config.error_policy, ErrorPolicy::Strict);
        assert_eq!(config.public_host.as_deref(), Some("api.example.org"));
    }

    #[test]
    fn test_created_status_follows_policy() {
        assert_eq!(ErrorPolicy::Compatible.created_status(), StatusCode::OK);
        assert_eq!(ErrorPolicy::Strict.created_status(), StatusCode::CREATED);
    }
}
