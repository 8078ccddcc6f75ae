use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::TransitionError;

/// Lifecycle state of a recorded transaction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    #[default]
    Pending,
    Success,
    Error,
}

impl TxStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, TxStatus::Pending)
    }

    /// Only pending -> success and pending -> error are allowed.
    pub fn can_transition_to(&self, next: TxStatus) -> bool {
        matches!(
            (self, next),
            (TxStatus::Pending, TxStatus::Success) | (TxStatus::Pending, TxStatus::Error)
        )
    }
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStatus::Pending => write!(f, "pending"),
            TxStatus::Success => write!(f, "success"),
            TxStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for TxStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TxStatus::Pending),
            "success" => Ok(TxStatus::Success),
            "error" => Ok(TxStatus::Error),
            other => Err(TransitionError::InvalidOutcome(other.to_string())),
        }
    }
}

/// Confirmation result reported by the chain client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    Success,
    Error,
}

impl From<TxOutcome> for TxStatus {
    fn from(outcome: TxOutcome) -> Self {
        match outcome {
            TxOutcome::Success => TxStatus::Success,
            TxOutcome::Error => TxStatus::Error,
        }
    }
}

impl From<bool> for TxOutcome {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            TxOutcome::Success
        } else {
            TxOutcome::Error
        }
    }
}

impl FromStr for TxOutcome {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<TxStatus>()? {
            TxStatus::Success => Ok(TxOutcome::Success),
            TxStatus::Error => Ok(TxOutcome::Error),
            TxStatus::Pending => Err(TransitionError::InvalidOutcome(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_moves_forward() {
        assert!(TxStatus::Pending.can_transition_to(TxStatus::Success));
        assert!(TxStatus::Pending.can_transition_to(TxStatus::Error));
        assert!(!TxStatus::Pending.can_transition_to(TxStatus::Pending));
        assert!(!TxStatus::Success.can_transition_to(TxStatus::Error));
        assert!(!TxStatus::Success.can_transition_to(TxStatus::Pending));
        assert!(!TxStatus::Error.can_transition_to(TxStatus::Success));
        assert!(!TxStatus::Error.can_transition_to(TxStatus::Pending));
    }

    #[test]
    fn outcome_parsing_rejects_pending() {
        assert_eq!("success".parse::<TxOutcome>().unwrap(), TxOutcome::Success);
        assert_eq!("ERROR".parse::<TxOutcome>().unwrap(), TxOutcome::Error);
        assert!("pending".parse::<TxOutcome>().is_err());
        assert!("done".parse::<TxOutcome>().is_err());
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in [TxStatus::Pending, TxStatus::Success, TxStatus::Error] {
            assert_eq!(status.to_string().parse::<TxStatus>().unwrap(), status);
        }
        assert!(TxStatus::Success.is_final());
        assert!(!TxStatus::Pending.is_final());
    }
}
