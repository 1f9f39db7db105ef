use serde::{Deserialize, Serialize};

/// Direction of an attendance transition.
/// Serialized on the wire as `"clockIn"` / `"clockOut"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClockAction {
    #[serde(rename = "clockIn")]
    ClockIn,
    #[serde(rename = "clockOut")]
    ClockOut,
}

impl ClockAction {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "in",
            ClockAction::ClockOut => "out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(ClockAction::ClockIn),
            "out" => Some(ClockAction::ClockOut),
            _ => None,
        }
    }

    /// Human-readable name used in user-facing messages.
    pub fn describe(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "clock-in",
            ClockAction::ClockOut => "clock-out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, ClockAction::ClockIn)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, ClockAction::ClockOut)
    }
}
