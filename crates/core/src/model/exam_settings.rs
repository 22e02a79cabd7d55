use thiserror::Error;

use crate::model::countdown::ExpiryPolicy;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamSettingsError {
    #[error("exam duration must be between 1 second and 24 hours")]
    InvalidDuration,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing configuration for one exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSettings {
    duration_secs: u32,
    on_expire: ExpiryPolicy,
}

impl ExamSettings {
    /// The stock two-hour exam with the timer holding at zero.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            duration_secs: 2 * 60 * 60,
            on_expire: ExpiryPolicy::Hold,
        }
    }

    /// Creates custom exam settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is zero or longer than 24 hours.
    pub fn new(duration_secs: u32, on_expire: ExpiryPolicy) -> Result<Self, ExamSettingsError> {
        if duration_secs == 0 || duration_secs > 24 * 60 * 60 {
            return Err(ExamSettingsError::InvalidDuration);
        }
        Ok(Self {
            duration_secs,
            on_expire,
        })
    }

    // Accessors
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn on_expire(&self) -> ExpiryPolicy {
        self.on_expire
    }
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self::standard()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
