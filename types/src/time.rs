//! Scheduled-time tokens for delayed dispatch.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// When a delayed task becomes due, relative to the moment it was dispatched.
///
/// Recording dispatchers keep this as inert metadata. Runtime dispatchers
/// honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchTime {
    /// Due immediately.
    #[default]
    Now,
    /// Due once the delay has elapsed.
    After(Duration),
    /// Never due.
    Forever,
}

impl DispatchTime {
    /// A zero delay collapses to [`DispatchTime::Now`].
    #[must_use]
    pub fn after(delay: Duration) -> Self {
        if delay.is_zero() {
            Self::Now
        } else {
            Self::After(delay)
        }
    }

    #[must_use]
    pub fn after_millis(millis: u64) -> Self {
        Self::after(Duration::from_millis(millis))
    }

    #[must_use]
    pub fn after_secs(secs: u64) -> Self {
        Self::after(Duration::from_secs(secs))
    }

    /// Delay until the task is due. `None` for [`DispatchTime::Forever`].
    #[must_use]
    pub fn delay(self) -> Option<Duration> {
        match self {
            Self::Now => Some(Duration::ZERO),
            Self::After(delay) => Some(delay),
            Self::Forever => None,
        }
    }

    #[must_use]
    pub fn is_forever(self) -> bool {
        matches!(self, Self::Forever)
    }
}

impl From<Duration> for DispatchTime {
    fn from(delay: Duration) -> Self {
        Self::after(delay)
    }
}

impl fmt::Display for DispatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Now => f.write_str("now"),
            Self::After(delay) => write!(f, "+{delay:?}"),
            Self::Forever => f.write_str("forever"),
        }
    }
}
