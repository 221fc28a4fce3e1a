//! Local timer for a temporarily disabled blocking state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tracks how long blocking was asked to stay disabled.
///
/// This is local bookkeeping only; the Pi-hole's actual state is learned on
/// the next poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "remaining_seconds")]
pub enum DisableCountdown {
    #[default]
    Inactive,
    /// Disabled until an explicit `enable`
    Indefinite,
    /// Seconds left, always non-zero
    Remaining(u32),
}

impl DisableCountdown {
    /// Countdown for a timed disable; zero seconds means nothing to count
    pub fn for_seconds(seconds: u32) -> Self {
        if seconds == 0 {
            Self::Inactive
        } else {
            Self::Remaining(seconds)
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// `None` while disabled indefinitely
    pub fn remaining_seconds(&self) -> Option<u32> {
        match self {
            Self::Inactive => Some(0),
            Self::Indefinite => None,
            Self::Remaining(seconds) => Some(*seconds),
        }
    }

    /// Advance by one second. Returns true when this tick ran the timer out.
    pub fn tick(&mut self) -> bool {
        match *self {
            Self::Remaining(seconds) if seconds <= 1 => {
                *self = Self::Inactive;
                true
            }
            Self::Remaining(seconds) => {
                *self = Self::Remaining(seconds - 1);
                false
            }
            Self::Inactive | Self::Indefinite => false,
        }
    }
}

impl fmt::Display for DisableCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Indefinite => write!(f, "disabled indefinitely"),
            Self::Remaining(seconds) => write!(f, "disabled for {}s", seconds),
        }
    }
}
