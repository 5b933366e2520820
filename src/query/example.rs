//! Claims and claim/premise training examples per split.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::split::Split;
use crate::error::Result;
use crate::model::{Adu, AduId, RelationCategory};
use crate::store::{ArgumentStore, LinkedPremise};

/// Preferred stance for the k-th included claim is `STANCE_ROTATION[k % 2]`
/// (k counted from 1).
const STANCE_ROTATION: [RelationCategory; 2] =
    [RelationCategory::StancePro, RelationCategory::StanceCon];

/// A claim, one of its premises, and the category of the link between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub claim: Adu,
    pub premise: Adu,
    pub category: RelationCategory,
}

/// Claims belonging to `split`, ordered by id.
///
/// # Errors
/// Propagates store errors.
pub fn claims<S: ArgumentStore + ?Sized>(store: &mut S, split: Split) -> Result<Vec<Adu>> {
    let total = store.count_claims()?;
    let (start, end) = split.bounds(total);
    store.claims_page(start, end - start)
}

/// One training example per claim of `split` that has at least one premise.
///
/// Stances alternate across the included claims so the examples stay
/// balanced between `stance_pro` and `stance_con` where the data allows.
///
/// # Errors
/// Propagates store errors.
pub fn examples<S: ArgumentStore + ?Sized>(
    store: &mut S,
    split: Split,
) -> Result<Vec<TrainingExample>> {
    let claims = claims(store, split)?;
    let ids: Vec<AduId> = claims.iter().map(|c| c.id).collect();
    let linked = store.premises_for_claims(&ids)?;
    let examples = select_examples(&claims, linked);
    debug!(
        split = %split,
        claims = claims.len(),
        examples = examples.len(),
        "built training examples"
    );
    Ok(examples)
}

/// Pick one premise per claim, alternating the preferred stance.
///
/// Claims without premises are skipped and do not advance the rotation.
/// When no premise has the preferred stance the first linked premise is
/// used.
#[must_use]
pub fn select_examples(claims: &[Adu], linked: Vec<LinkedPremise>) -> Vec<TrainingExample> {
    let mut by_claim: HashMap<AduId, Vec<(Adu, RelationCategory)>> = HashMap::new();
    for link in linked {
        by_claim
            .entry(link.claim_id)
            .or_default()
            .push((link.premise, link.category));
    }

    let mut examples = Vec::new();
    for claim in claims {
        let Some(premises) = by_claim.get(&claim.id) else {
            continue;
        };
        let Some(first) = premises.first() else {
            continue;
        };
        let desired = STANCE_ROTATION[(examples.len() + 1) % 2];
        let (premise, category) = premises
            .iter()
            .find(|(_, category)| *category == desired)
            .unwrap_or(first);
        examples.push(TrainingExample {
            claim: claim.clone(),
            premise: premise.clone(),
            category: *category,
        });
    }
    examples
}
