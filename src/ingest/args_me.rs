//! Importer for the args.me corpus.
//!
//! The corpus is a single JSON document `{"arguments": [...]}`. Only
//! arguments whose conclusion matches their discussion title are kept; each
//! such conclusion becomes a domain and a claim, and every premise becomes a
//! premise ADU linked to the claim by its stance.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::batch::commit_in_batches;
use super::ImportSummary;
use crate::error::Result;
use crate::model::{AduId, DomainId, NewAdu, NewDomain, NewRelationship, RelationCategory};
use crate::store::ArgumentStore;

#[derive(Debug, Clone, Deserialize)]
pub struct ArgsMeCorpus {
    pub arguments: Vec<ArgsMeArgument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgsMeArgument {
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub premises: Vec<ArgsMePremise>,
    #[serde(default)]
    pub context: ArgsMeContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgsMeContext {
    #[serde(rename = "discussionTitle", default)]
    pub discussion_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArgsMePremise {
    pub text: String,
    #[serde(default)]
    pub stance: String,
}

impl ArgsMeArgument {
    /// The conclusion, if it names the discussion the argument belongs to.
    fn topic(&self) -> Option<&str> {
        match (&self.conclusion, &self.context.discussion_title) {
            (Some(conclusion), Some(title)) if conclusion == title => Some(conclusion),
            _ => None,
        }
    }
}

/// Read the corpus and sort its arguments by lowercase conclusion.
///
/// # Errors
/// Returns an IO or JSON error if the file cannot be read or parsed.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ArgsMeArgument>> {
    let file = File::open(path.as_ref())?;
    let corpus: ArgsMeCorpus = serde_json::from_reader(BufReader::new(file))?;
    let mut arguments = corpus.arguments;
    arguments.sort_by_cached_key(|a| a.conclusion.as_deref().unwrap_or_default().to_lowercase());
    info!(arguments = arguments.len(), "loaded args.me corpus");
    Ok(arguments)
}

/// Unique topics in first-seen order, one domain each.
#[must_use]
pub fn plan_domains(arguments: &[ArgsMeArgument]) -> Vec<NewDomain> {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    for argument in arguments {
        let Some(topic) = argument.topic() else {
            debug!(conclusion = ?argument.conclusion, "topic mismatch, skipping");
            continue;
        };
        if seen.insert(topic) {
            domains.push(NewDomain::new(topic));
        }
    }
    domains
}

/// Premise ADUs for every kept argument plus one claim per unique topic.
///
/// Premises are not deduplicated. Arguments whose domain is unknown are
/// skipped.
#[must_use]
pub fn plan_adus(
    arguments: &[ArgsMeArgument],
    domain_ids: &HashMap<String, DomainId>,
) -> Vec<NewAdu> {
    let mut claims_added = HashSet::new();
    let mut adus = Vec::new();
    for argument in arguments {
        let Some(topic) = argument.topic() else {
            continue;
        };
        let Some(&domain_id) = domain_ids.get(topic) else {
            warn!(topic, "missing domain id for topic");
            continue;
        };

        adus.extend(
            argument
                .premises
                .iter()
                .map(|p| NewAdu::premise(p.text.clone(), domain_id)),
        );
        if claims_added.insert(topic) {
            adus.push(NewAdu::claim(topic, domain_id));
        }
    }
    adus
}

/// Premise-to-claim links. Returns the links and the number of premises
/// that could not be linked.
#[must_use]
pub fn plan_relationships(
    arguments: &[ArgsMeArgument],
    adu_ids: &HashMap<String, AduId>,
    domain_ids: &HashMap<String, DomainId>,
) -> (Vec<NewRelationship>, usize) {
    let mut relationships = Vec::new();
    let mut skipped = 0;
    for argument in arguments {
        let Some(topic) = argument.topic() else {
            continue;
        };
        let Some(&domain_id) = domain_ids.get(topic) else {
            continue;
        };
        let Some(&claim_id) = adu_ids.get(topic) else {
            warn!(topic, "claim ADU not found");
            skipped += argument.premises.len();
            continue;
        };

        for premise in &argument.premises {
            let Some(category) = RelationCategory::from_stance(&premise.stance) else {
                warn!(stance = %premise.stance, text = %premise.text, "unknown stance for premise");
                skipped += 1;
                continue;
            };
            let Some(&premise_id) = adu_ids.get(&premise.text) else {
                warn!(text = %premise.text, "premise ADU not found");
                skipped += 1;
                continue;
            };
            relationships.push(NewRelationship {
                from_adu_id: premise_id,
                to_adu_id: claim_id,
                category,
                domain_id,
            });
        }
    }
    (relationships, skipped)
}

/// Import `arguments` (as returned by [`load`]) into `store`.
///
/// Domains that already exist are reused. ADUs are looked up by text, and
/// when several ADUs share a text the one stored last wins.
///
/// # Errors
/// Returns the first store error. Batches committed before it are kept.
pub fn import<S: ArgumentStore>(
    store: &mut S,
    arguments: &[ArgsMeArgument],
    batch_size: usize,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary {
        skipped: arguments.iter().filter(|a| a.topic().is_none()).count(),
        ..ImportSummary::default()
    };

    let existing: HashSet<String> = store
        .domains()?
        .into_iter()
        .map(|d| d.domain_name)
        .collect();
    let new_domains: Vec<NewDomain> = plan_domains(arguments)
        .into_iter()
        .filter(|d| !existing.contains(&d.domain_name))
        .collect();
    info!(found = new_domains.len(), "topics found in dataset");
    summary.domains = store.in_transaction(|s| s.insert_domains(&new_domains))?;

    let domain_ids: HashMap<String, DomainId> = store
        .domains()?
        .into_iter()
        .map(|d| (d.domain_name, d.id))
        .collect();

    let adus = plan_adus(arguments, &domain_ids);
    info!(found = adus.len(), "ADUs found in dataset");
    summary.adus = commit_in_batches(store, &adus, batch_size, |s, batch| s.insert_adus(batch))?;

    let adu_ids: HashMap<String, AduId> = store
        .adus()?
        .into_iter()
        .map(|a| (a.text, a.id))
        .collect();

    let (relationships, unlinked) = plan_relationships(arguments, &adu_ids, &domain_ids);
    summary.skipped += unlinked;
    info!(
        found = relationships.len(),
        "relationships found in dataset"
    );
    summary.relationships = commit_in_batches(store, &relationships, batch_size, |s, batch| {
        s.insert_relationships(batch)
    })?;

    info!(
        domains = summary.domains,
        adus = summary.adus,
        relationships = summary.relationships,
        skipped = summary.skipped,
        "args.me import finished"
    );
    Ok(summary)
}
