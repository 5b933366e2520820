//! Importer for the IBM Debater claim-stance dataset.
//!
//! Each CSV row is a claim about a debate topic. The topic becomes a domain
//! and a claim ADU; every row becomes a premise ADU linked to that claim by
//! its stance.
//!
//! Stances map as in the args.me importer (`PRO` to `stance_pro`, `CON` to
//! `stance_con`), which intentionally differs from the legacy mapper's
//! `support`/`stance_pro` labels.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::ImportSummary;
use crate::error::{Error, Result};
use crate::model::{NewAdu, NewDomain, NewRelationship, RelationCategory};
use crate::store::ArgumentStore;

/// The columns of `claim_stance_dataset_v1.csv` used by the importer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimStanceRecord {
    #[serde(rename = "topicId")]
    pub topic_id: i64,
    #[serde(rename = "topicText")]
    pub topic_text: String,
    #[serde(rename = "claims.claimCorrectedText")]
    pub claim_text: String,
    #[serde(rename = "claims.stance")]
    pub stance: String,
}

/// Parse records from CSV with a header row. Unused columns are ignored.
///
/// # Errors
/// Returns a CSV error for a malformed row or a missing column.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ClaimStanceRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Read the dataset from `path`.
///
/// # Errors
/// Returns a CSV error if the file cannot be opened or parsed.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ClaimStanceRecord>> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    let records = reader
        .into_deserialize()
        .collect::<std::result::Result<Vec<ClaimStanceRecord>, _>>()?;
    info!(rows = records.len(), "loaded claim-stance dataset");
    Ok(records)
}

/// Import `records` into `store`, one transaction per topic.
///
/// Topics are processed in ascending id order and take their name from the
/// first row of the group. A topic whose name is already a domain reuses
/// that domain. Rows with an unknown stance are stored as premises without a
/// relationship.
///
/// # Errors
/// Returns the first store error. Topics committed before it are kept.
pub fn import<S: ArgumentStore>(
    store: &mut S,
    records: &[ClaimStanceRecord],
) -> Result<ImportSummary> {
    let mut topics: BTreeMap<i64, Vec<&ClaimStanceRecord>> = BTreeMap::new();
    for record in records {
        topics.entry(record.topic_id).or_default().push(record);
    }

    let mut summary = ImportSummary::default();
    for (topic_id, rows) in &topics {
        let topic_text = rows[0].topic_text.as_str();
        let topic_summary = store.in_transaction(|s| import_topic(s, topic_text, rows))?;
        debug!(topic_id, adus = topic_summary.adus, "imported topic");

        summary.domains += topic_summary.domains;
        summary.adus += topic_summary.adus;
        summary.relationships += topic_summary.relationships;
        summary.skipped += topic_summary.skipped;
    }

    info!(
        topics = topics.len(),
        domains = summary.domains,
        adus = summary.adus,
        relationships = summary.relationships,
        skipped = summary.skipped,
        "claim-stance import finished"
    );
    Ok(summary)
}

fn import_topic<S: ArgumentStore>(
    store: &mut S,
    topic_text: &str,
    rows: &[&ClaimStanceRecord],
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    let domain = match store.domain_by_name(topic_text)? {
        Some(domain) => domain,
        None => {
            summary.domains += store.insert_domains(&[NewDomain::new(topic_text)])?;
            store
                .domain_by_name(topic_text)?
                .ok_or_else(|| {
                    Error::Database(format!("domain '{topic_text}' missing after insert"))
                })?
        }
    };

    let claim = store.insert_adu(&NewAdu::claim(topic_text, domain.id))?;
    summary.adus += 1;

    for row in rows {
        let premise = store.insert_adu(&NewAdu::premise(row.claim_text.clone(), domain.id))?;
        summary.adus += 1;

        let Some(category) = RelationCategory::from_stance(&row.stance) else {
            warn!(stance = %row.stance, text = %row.claim_text, "unknown stance for premise");
            summary.skipped += 1;
            continue;
        };
        store.insert_relationship(&NewRelationship {
            from_adu_id: premise.id,
            to_adu_id: claim.id,
            category,
            domain_id: domain.id,
        })?;
        summary.relationships += 1;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AduId;
    use crate::store::MemoryStore;

    const SAMPLE: &str = "\
topicId,split,topicText,claims.stance,claims.claimCorrectedText,claims.Compatible
2,train,Ban violent video games,PRO,Games cause aggression,yes
1,test,Abolish zoos,CON,Zoos protect species,yes
2,train,Ban violent video games,CON,No causal link exists,yes
1,test,Abolish zoos,,Animals are stressed,no
";

    #[test]
    fn reads_named_columns() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            ClaimStanceRecord {
                topic_id: 2,
                topic_text: "Ban violent video games".to_string(),
                claim_text: "Games cause aggression".to_string(),
                stance: "PRO".to_string(),
            }
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let result = read_records("topicId,topicText\n1,x\n".as_bytes());
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn import_groups_by_topic_in_id_order() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        let mut store = MemoryStore::new();

        let summary = import(&mut store, &records).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                domains: 2,
                adus: 6,
                relationships: 3,
                skipped: 1,
            }
        );

        let names: Vec<String> = store
            .domains()
            .unwrap()
            .into_iter()
            .map(|d| d.domain_name)
            .collect();
        assert_eq!(names, vec!["Abolish zoos", "Ban violent video games"]);

        let claims: Vec<String> = store
            .adus()
            .unwrap()
            .into_iter()
            .filter(|a| a.is_claim())
            .map(|a| a.text)
            .collect();
        assert_eq!(claims, names);
    }

    #[test]
    fn stance_maps_to_category() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        let mut store = MemoryStore::new();
        import(&mut store, &records).unwrap();

        let adus = store.adus().unwrap();
        let text_of = |id: AduId| {
            let adu = adus.iter().find(|a| a.id == id).unwrap();
            adu.text.clone()
        };
        let mut links: Vec<(String, RelationCategory)> = store
            .relationships()
            .unwrap()
            .into_iter()
            .map(|r| (text_of(r.from_adu_id), r.category))
            .collect();
        links.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(
            links,
            vec![
                ("Games cause aggression".to_string(), RelationCategory::StancePro),
                ("No causal link exists".to_string(), RelationCategory::StanceCon),
                ("Zoos protect species".to_string(), RelationCategory::StanceCon),
            ]
        );
    }

    #[test]
    fn reuses_existing_domain() {
        let mut store = MemoryStore::new();
        store
            .insert_domains(&[NewDomain::new("Abolish zoos")])
            .unwrap();
        let records = read_records(SAMPLE.as_bytes()).unwrap();

        let summary = import(&mut store, &records).unwrap();
        assert_eq!(summary.domains, 1);
        assert_eq!(store.domains().unwrap().len(), 2);
    }
}
