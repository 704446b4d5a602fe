use std::fmt;

use serde::{Deserialize, Serialize};

/// Playing position as used by the scoring configuration.
///
/// Unrecognized labels map to `Unknown`; the GPS benchmark table treats that
/// variant like a centre forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PositionCode {
    CenterBack,
    LeftBack,
    RightBack,
    DefensiveMid,
    CentralMid,
    AttackingMid,
    Winger,
    CenterForward,
    Goalkeeper,
    Unknown,
}

impl PositionCode {
    pub const ALL: [PositionCode; 9] = [
        PositionCode::CenterBack,
        PositionCode::LeftBack,
        PositionCode::RightBack,
        PositionCode::DefensiveMid,
        PositionCode::CentralMid,
        PositionCode::AttackingMid,
        PositionCode::Winger,
        PositionCode::CenterForward,
        PositionCode::Goalkeeper,
    ];

    pub fn parse(raw: &str) -> Self {
        let s = raw.trim().to_ascii_uppercase();
        match s.as_str() {
            "CB" | "IV" | "CENTER BACK" | "CENTRE BACK" | "CENTRE-BACK" | "CENTER-BACK" => {
                PositionCode::CenterBack
            }
            "LB" | "LWB" | "LEFT BACK" => PositionCode::LeftBack,
            "RB" | "RWB" | "RIGHT BACK" => PositionCode::RightBack,
            "6" | "DM" | "CDM" => PositionCode::DefensiveMid,
            "8" | "CM" => PositionCode::CentralMid,
            "10" | "AM" | "CAM" => PositionCode::AttackingMid,
            "LW/RW" | "LW" | "RW" | "W" | "LM" | "RM" | "WINGER" => PositionCode::Winger,
            "CF" | "ST" | "9" | "STRIKER" | "FORWARD" => PositionCode::CenterForward,
            "GK" | "TW" | "GOALKEEPER" | "KEEPER" => PositionCode::Goalkeeper,
            _ => PositionCode::Unknown,
        }
    }

    /// Canonical short label, the form written by the reference configuration.
    pub fn code(self) -> &'static str {
        match self {
            PositionCode::CenterBack => "CB",
            PositionCode::LeftBack => "LB",
            PositionCode::RightBack => "RB",
            PositionCode::DefensiveMid => "6",
            PositionCode::CentralMid => "8",
            PositionCode::AttackingMid => "10",
            PositionCode::Winger => "LW/RW",
            PositionCode::CenterForward => "CF",
            PositionCode::Goalkeeper => "GK",
            PositionCode::Unknown => "?",
        }
    }
}

impl From<String> for PositionCode {
    fn from(raw: String) -> Self {
        PositionCode::parse(&raw)
    }
}

impl From<&str> for PositionCode {
    fn from(raw: &str) -> Self {
        PositionCode::parse(raw)
    }
}

impl From<PositionCode> for String {
    fn from(code: PositionCode) -> Self {
        code.code().to_string()
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
