use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Missing required environment variable: {name}")]
    MissingEnvVar { name: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration file error ({path}): {message}")]
    ConfigFileError { path: String, message: String },

    #[error("Failed to start '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Process,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl LauncherError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LauncherError::MissingEnvVar { .. }
            | LauncherError::InvalidConfigValueError { .. }
            | LauncherError::ConfigFileError { .. } => ErrorCategory::Configuration,
            LauncherError::SpawnError { .. } => ErrorCategory::Process,
            LauncherError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Process | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit code reported when the launcher fails before the child could
    /// report one of its own. Spawn failures follow the shell's 126/127.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::SpawnError { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                127
            }
            LauncherError::SpawnError { .. } => 126,
            _ => match self.severity() {
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LauncherError::MissingEnvVar { name } => {
                format!("Export {} in the job environment before starting the launcher", name)
            }
            LauncherError::InvalidConfigValueError { field, .. } => {
                format!("Check the value configured for {}", field)
            }
            LauncherError::ConfigFileError { .. } => {
                "Make sure the file exists and is valid TOML".to_string()
            }
            LauncherError::SpawnError { .. } => {
                "Check the interpreter path (--interpreter or [interpreter] program)".to_string()
            }
            LauncherError::SerializationError(_) => {
                "Retry; if the problem persists inspect the host".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Process => format!("Could not run the maintenance script: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_interpreter_maps_to_127() {
        let err = LauncherError::SpawnError {
            program: "python3".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.exit_code(), 127);
        assert_eq!(err.category(), ErrorCategory::Process);
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = LauncherError::MissingEnvVar {
            name: "REGION".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("REGION"));
    }

    #[test]
    fn test_serialization_error_is_critical() {
        let err = LauncherError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
