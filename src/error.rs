use thiserror::Error;

/// Everything an operation on the store can report back to the menu.
///
/// Display strings are printed to the user as-is.
#[derive(Error, Debug)]
pub enum CrowdfundError {
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Invalid Egyptian phone number!")]
    InvalidPhone,
    #[error("Invalid date format!")]
    InvalidDateFormat,
    #[error("Invalid date range!")]
    InvalidDateRange,
    /// Missing title and foreign owner are deliberately the same outcome.
    #[error("Project not found or not owned by you!")]
    NotFoundOrNotOwned,
    #[error("Invalid credentials!")]
    InvalidCredentials,
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl CrowdfundError {
    /// Short machine name used in journal events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => "password_mismatch",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidDateFormat => "invalid_date_format",
            Self::InvalidDateRange => "invalid_date_range",
            Self::NotFoundOrNotOwned => "not_found_or_not_owned",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Storage(_) => "storage",
            Self::Encoding(_) => "encoding",
        }
    }

    /// True for failures of the backing file rather than of user input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Encoding(_))
    }
}

pub type CrowdfundResult<T> = std::result::Result<T, CrowdfundError>;
