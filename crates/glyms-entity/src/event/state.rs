//! Event lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an event.
///
/// ```text
/// pending ──► confirmed ──► planned
///    │            │ ▲          │
///    │            └─┘          │
///    └──────► cancelled ◄──────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventState {
    /// Collecting preferences.
    Pending,
    /// Tally applied; activity and date are fixed.
    Confirmed,
    /// Logistics booked.
    Planned,
    /// Terminal.
    Cancelled,
}

impl EventState {
    /// Every state, in lifecycle order.
    pub const ALL: [EventState; 4] = [
        EventState::Pending,
        EventState::Confirmed,
        EventState::Planned,
        EventState::Cancelled,
    ];

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// `confirmed → confirmed` is allowed and re-runs the tally.
    pub fn can_transition_to(&self, next: EventState) -> bool {
        use EventState::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Confirmed)
                | (Confirmed, Planned)
                | (Confirmed, Cancelled)
                | (Planned, Cancelled)
        )
    }

    /// States from which `target` can be reached, as stored in the database.
    pub fn sources_of(target: EventState) -> Vec<&'static str> {
        Self::ALL
            .into_iter()
            .filter(|state| state.can_transition_to(target))
            .map(|state| state.as_str())
            .collect()
    }

    /// Whether preferences may still be submitted.
    pub fn accepts_preferences(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the event is in its terminal state.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Return the state as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Planned => "planned",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventState {
    type Err = glyms_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "planned" => Ok(Self::Planned),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(glyms_core::AppError::validation(format!(
                "Invalid event state: '{s}'. Expected one of: pending, confirmed, planned, cancelled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EventState::*;
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Planned));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Planned.can_transition_to(Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Planned));
        assert!(!Planned.can_transition_to(Confirmed));
        assert!(!Planned.can_transition_to(Pending));
        for next in [Pending, Confirmed, Planned, Cancelled] {
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_sources_of() {
        assert_eq!(EventState::sources_of(Confirmed), vec!["pending", "confirmed"]);
        assert_eq!(EventState::sources_of(Planned), vec!["confirmed"]);
        assert_eq!(
            EventState::sources_of(Cancelled),
            vec!["pending", "confirmed", "planned"]
        );
        assert!(EventState::sources_of(Pending).is_empty());
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Confirmed".parse::<EventState>().unwrap(), Confirmed);
        assert!("done".parse::<EventState>().is_err());
    }
}
