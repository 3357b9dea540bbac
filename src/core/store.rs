//! Rules documents on disk, with an explicit fallback to the built-in preset

use super::preset::default_rules;
use super::rules::PayeRules;
use anyhow::Context;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Where to resolve rules from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    Preset,
    File(PathBuf),
}

impl From<Option<PathBuf>> for RulesSource {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(RulesSource::Preset, RulesSource::File)
    }
}

/// Stored form of a rules configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RulesDocument {
    #[serde(flatten)]
    pub rules: PayeRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl RulesDocument {
    pub fn new(rules: PayeRules) -> Self {
        RulesDocument {
            rules,
            updated_at: None,
            updated_by: None,
        }
    }

    pub fn stamped(rules: PayeRules, at: DateTime<Utc>) -> Self {
        RulesDocument {
            rules,
            updated_at: Some(at),
            updated_by: None,
        }
    }
}

/// Parse and validate a rules document
pub fn read_rules_document<R: Read>(reader: R) -> anyhow::Result<RulesDocument> {
    let document: RulesDocument = serde_json::from_reader(reader)?;
    document.rules.validate()?;
    Ok(document)
}

/// Resolve rules, validating anything read from disk
pub fn load_rules(source: &RulesSource) -> anyhow::Result<RulesDocument> {
    match source {
        RulesSource::Preset => {
            log::debug!("Using built-in rules preset");
            Ok(RulesDocument::new(default_rules()))
        }
        RulesSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open rules file {}", path.display()))?;
            let document = read_rules_document(BufReader::new(file))
                .with_context(|| format!("invalid rules document {}", path.display()))?;
            log::info!(
                "Loaded {} rules for {} from {} ({} brackets)",
                document.rules.currency,
                document.rules.year,
                path.display(),
                document.rules.brackets.len()
            );
            Ok(document)
        }
    }
}

pub fn write_rules_document(path: &Path, document: &RulesDocument) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create rules file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Hex SHA-256 of the canonical JSON form of the rules
pub fn fingerprint(rules: &PayeRules) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(rules)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}
