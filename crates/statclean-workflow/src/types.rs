//! Core workflow types
//!
//! Defines the identifiers and the six workflow steps shared by the
//! controller, the activity trail and the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique session identifier (one controller per session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique activity entry identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate new entry ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// The six workflow stages, numbered 1 through 6.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    #[default]
    Upload = 1,
    Clean = 2,
    Validate = 3,
    Weight = 4,
    Estimate = 5,
    Report = 6,
}

impl Step {
    /// All steps in workflow order
    pub const ALL: [Step; 6] = [
        Step::Upload,
        Step::Clean,
        Step::Validate,
        Step::Weight,
        Step::Estimate,
        Step::Report,
    ];

    /// First step of every session
    pub const FIRST: Step = Step::Upload;

    /// Last step; the workflow does not advance past it
    pub const LAST: Step = Step::Report;

    /// Number of steps in the workflow
    pub const COUNT: u8 = 6;

    /// Step number in `1..=6`
    #[inline]
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Step for a number, `None` outside `1..=6`
    #[must_use]
    pub fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::Upload),
            2 => Some(Step::Clean),
            3 => Some(Step::Validate),
            4 => Some(Step::Weight),
            5 => Some(Step::Estimate),
            6 => Some(Step::Report),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    #[inline]
    #[must_use]
    pub fn previous(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    /// Display label used in step navigation
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Step::Upload => "Upload",
            Step::Clean => "Clean",
            Step::Validate => "Validate",
            Step::Weight => "Weight",
            Step::Estimate => "Estimate",
            Step::Report => "Report",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::from_number(value).ok_or_else(|| format!("step out of range: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_round_trips_for_every_step() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(7), None);
    }

    #[test]
    fn default_is_the_first_step() {
        assert_eq!(Step::default(), Step::FIRST);
        assert_eq!(Step::default(), Step::Upload);
    }

    #[test]
    fn neighbours_stop_at_the_ends() {
        assert_eq!(Step::Upload.previous(), None);
        assert_eq!(Step::Upload.next(), Some(Step::Clean));
        assert_eq!(Step::Report.next(), None);
        assert_eq!(Step::Report.previous(), Some(Step::Estimate));
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Step::Weight).unwrap();
        assert_eq!(json, "4");
        let back: Step = serde_json::from_str("4").unwrap();
        assert_eq!(back, Step::Weight);
        assert!(serde_json::from_str::<Step>("9").is_err());
    }
}
