use std::fmt;
use std::str::FromStr;

//
// ─── EXPIRY POLICY ─────────────────────────────────────────────────────────────
//

/// What the exam does when the countdown reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Timer sits at 00:00:00 and the attempt stays editable.
    #[default]
    Hold,
    /// The attempt is submitted once, as if the user pressed the button.
    AutoSubmit,
}

impl fmt::Display for ExpiryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryPolicy::Hold => write!(f, "none"),
            ExpiryPolicy::AutoSubmit => write!(f, "auto-submit"),
        }
    }
}

/// Error type for parsing an expiry policy from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExpiryPolicyError {
    raw: String,
}

impl fmt::Display for ParseExpiryPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown expiry policy {:?}, expected \"none\" or \"auto-submit\"",
            self.raw
        )
    }
}

impl std::error::Error for ParseExpiryPolicyError {}

impl FromStr for ExpiryPolicy {
    type Err = ParseExpiryPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(ExpiryPolicy::Hold),
            "auto-submit" => Ok(ExpiryPolicy::AutoSubmit),
            other => Err(ParseExpiryPolicyError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── COUNTDOWN ─────────────────────────────────────────────────────────────────
//

/// Remaining exam time in whole seconds.
///
/// The caller drives `tick` once per second; the value floors at zero and
/// never goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            remaining_secs: duration_secs,
        }
    }

    /// Advances the countdown by one second, holding at zero.
    pub fn tick(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_counts_down_to_zero_and_holds() {
        let mut countdown = Countdown::new(2);
        countdown.tick();
        assert_eq!(countdown.remaining_secs(), 1);
        countdown.tick();
        assert_eq!(countdown.remaining_secs(), 0);
        assert!(countdown.is_expired());

        countdown.tick();
        assert_eq!(countdown.remaining_secs(), 0);
    }

    #[test]
    fn policy_parses_config_values() {
        assert_eq!("none".parse::<ExpiryPolicy>().unwrap(), ExpiryPolicy::Hold);
        assert_eq!(
            "auto-submit".parse::<ExpiryPolicy>().unwrap(),
            ExpiryPolicy::AutoSubmit
        );
        assert!("later".parse::<ExpiryPolicy>().is_err());
    }

    #[test]
    fn policy_display_round_trips() {
        for policy in [ExpiryPolicy::Hold, ExpiryPolicy::AutoSubmit] {
            let parsed: ExpiryPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
    }
}
