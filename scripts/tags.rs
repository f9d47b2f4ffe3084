use std::{fmt, str::FromStr};

use thiserror::Error;

/// Category label used to pick which deployment scripts run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployTag {
    Token,
}

impl DeployTag {
    pub const ALL: &'static [DeployTag] = &[DeployTag::Token];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "Token",
        }
    }
}

impl fmt::Display for DeployTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown deploy tag {0:?}")]
pub struct UnknownTag(pub String);

impl FromStr for DeployTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeployTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}
