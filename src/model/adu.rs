//! Argumentative discourse units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::DomainId;
use crate::error::Error;

/// Database identity of an ADU.
pub type AduId = i32;

/// Role of an ADU in an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AduKind {
    /// The conclusion being argued for or against.
    Claim,
    /// A reason offered for or against a claim.
    Premise,
}

impl AduKind {
    /// The value stored in the `type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Premise => "premise",
        }
    }
}

impl fmt::Display for AduKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AduKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claim" => Ok(Self::Claim),
            "premise" => Ok(Self::Premise),
            other => Err(Error::Parse(format!("unknown ADU type '{other}'"))),
        }
    }
}

/// A stored argumentative discourse unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adu {
    pub id: AduId,
    pub text: String,
    pub kind: AduKind,
    pub domain_id: DomainId,
}

impl Adu {
    #[must_use]
    pub fn is_claim(&self) -> bool {
        self.kind == AduKind::Claim
    }
}

/// An ADU that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdu {
    pub text: String,
    pub kind: AduKind,
    pub domain_id: DomainId,
}

impl NewAdu {
    #[must_use]
    pub fn claim(text: impl Into<String>, domain_id: DomainId) -> Self {
        Self {
            text: text.into(),
            kind: AduKind::Claim,
            domain_id,
        }
    }

    #[must_use]
    pub fn premise(text: impl Into<String>, domain_id: DomainId) -> Self {
        Self {
            text: text.into(),
            kind: AduKind::Premise,
            domain_id,
        }
    }
}
