use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuctionError {
    #[error("auction already closed")]
    AlreadyClosed,

    #[error("unknown item: #{id}")]
    UnknownItem { id: usize },

    #[error("unknown attendee: #{id}")]
    UnknownAttendee { id: usize },

    #[error("no item named '{name}'")]
    UnknownItemName { name: String },

    #[error("no attendee named '{name}'")]
    UnknownAttendeeName { name: String },

    #[error("attendee '{name}' is registered more than once")]
    DuplicateAttendee { name: String },

    #[error("invalid budget format: '{value}'")]
    InvalidBudgetFormat { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auction,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuctionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuctionError::AlreadyClosed
            | AuctionError::UnknownItem { .. }
            | AuctionError::UnknownAttendee { .. } => ErrorCategory::Auction,
            AuctionError::UnknownItemName { .. }
            | AuctionError::UnknownAttendeeName { .. }
            | AuctionError::DuplicateAttendee { .. }
            | AuctionError::InvalidBudgetFormat { .. }
            | AuctionError::CsvError(_) => ErrorCategory::Input,
            AuctionError::ConfigValidationError { .. }
            | AuctionError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AuctionError::IoError(_) | AuctionError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // closing twice leaves every budget untouched
            ErrorCategory::Auction => match self {
                AuctionError::AlreadyClosed => ErrorSeverity::Low,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuctionError::AlreadyClosed => {
                "The auction has already been closed; results are final.".to_string()
            }
            AuctionError::UnknownItemName { name } => {
                format!("A bid refers to the item '{}', which is not in the auction.", name)
            }
            AuctionError::UnknownAttendeeName { name } => {
                format!("A bid refers to '{}', who is not a registered attendee.", name)
            }
            AuctionError::InvalidBudgetFormat { value } => {
                format!("Could not read '{}' as a dollar amount.", value)
            }
            AuctionError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuctionError::AlreadyClosed => "Start a new auction instead of closing this one again",
            AuctionError::UnknownItem { .. } | AuctionError::UnknownAttendee { .. } => {
                "Use the ids returned by add_item and register_attendee"
            }
            AuctionError::UnknownItemName { .. } => "Check the item names in the [[items]] section",
            AuctionError::UnknownAttendeeName { .. } => {
                "Add the attendee to [[attendees]] or to the roster file"
            }
            AuctionError::DuplicateAttendee { .. } => "Give every attendee a unique name",
            AuctionError::InvalidBudgetFormat { .. } => {
                "Write budgets like \"$50\" or \"75\", or drop --strict-budgets"
            }
            AuctionError::CsvError(_) => "Make sure the roster has a 'name,budget' header",
            AuctionError::ConfigValidationError { .. }
            | AuctionError::InvalidConfigValueError { .. } => {
                "Fix the scenario file and run again"
            }
            AuctionError::IoError(_) => "Check that the path exists and is readable",
            AuctionError::SerializationError(_) => "Try the text output format",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuctionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_closed_is_low_severity() {
        let err = AuctionError::AlreadyClosed;
        assert_eq!(err.category(), ErrorCategory::Auction);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AuctionError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_budget_error_message() {
        let err = AuctionError::InvalidBudgetFormat {
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "invalid budget format: 'lots'");
        assert!(err.user_friendly_message().contains("lots"));
    }
}
