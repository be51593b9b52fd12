// File: adtruth-common/src/models/verdict.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Classification label for an ad claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Safe,
    Exaggerated,
    Misleading,
    Unknown,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::Safe,
        Verdict::Exaggerated,
        Verdict::Misleading,
        Verdict::Unknown,
    ];

    /// Fixed severity table; never derived from anything but the verdict.
    pub fn trust_score(self) -> TrustScore {
        match self {
            Verdict::Misleading => TrustScore(30),
            Verdict::Exaggerated => TrustScore(60),
            Verdict::Safe => TrustScore(90),
            Verdict::Unknown => TrustScore(50),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::Exaggerated => "Exaggerated",
            Verdict::Misleading => "Misleading",
            Verdict::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Parse(format!("Unknown verdict label: {}", s)))
    }
}

/// Integer trust score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, Error> {
        if value > Self::MAX {
            return Err(Error::Parse(format!("Trust score out of range: {}", value)));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for TrustScore {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let narrowed = u8::try_from(value)
            .map_err(|_| Error::Parse(format!("Trust score out of range: {}", value)))?;
        TrustScore::new(narrowed)
    }
}

impl From<TrustScore> for i64 {
    fn from(score: TrustScore) -> Self {
        i64::from(score.0)
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
