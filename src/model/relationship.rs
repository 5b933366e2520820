//! Directed links between ADUs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::adu::AduId;
use super::domain::DomainId;
use crate::error::Error;

/// Kind of link from one ADU to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationCategory {
    Support,
    Attack,
    /// Premise argues in favour of the claim.
    StancePro,
    /// Premise argues against the claim.
    StanceCon,
}

impl RelationCategory {
    /// The value stored in the `category` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Attack => "attack",
            Self::StancePro => "stance_pro",
            Self::StanceCon => "stance_con",
        }
    }

    /// Map a dataset stance label (`PRO`/`CON`) to a category.
    #[must_use]
    pub fn from_stance(stance: &str) -> Option<Self> {
        match stance.trim() {
            "PRO" => Some(Self::StancePro),
            "CON" => Some(Self::StanceCon),
            _ => None,
        }
    }
}

impl fmt::Display for RelationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "support" => Ok(Self::Support),
            "attack" => Ok(Self::Attack),
            "stance_pro" => Ok(Self::StancePro),
            "stance_con" => Ok(Self::StanceCon),
            other => Err(Error::Parse(format!(
                "unknown relationship category '{other}'"
            ))),
        }
    }
}

/// A stored relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: i32,
    pub from_adu_id: AduId,
    pub to_adu_id: AduId,
    pub category: RelationCategory,
    pub domain_id: DomainId,
}

/// A relationship that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelationship {
    pub from_adu_id: AduId,
    pub to_adu_id: AduId,
    pub category: RelationCategory,
    pub domain_id: DomainId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stance_labels_map_to_categories() {
        assert_eq!(
            RelationCategory::from_stance("PRO"),
            Some(RelationCategory::StancePro)
        );
        assert_eq!(
            RelationCategory::from_stance(" CON "),
            Some(RelationCategory::StanceCon)
        );
        assert_eq!(RelationCategory::from_stance("pro"), None);
        assert_eq!(RelationCategory::from_stance(""), None);
    }

    #[test]
    fn category_string_forms_agree() {
        for category in [
            RelationCategory::Support,
            RelationCategory::Attack,
            RelationCategory::StancePro,
            RelationCategory::StanceCon,
        ] {
            let parsed: RelationCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        assert!(matches!(
            "neutral".parse::<RelationCategory>(),
            Err(Error::Parse(_))
        ));
    }
}
