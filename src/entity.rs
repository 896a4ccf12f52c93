//! Pairing of source and target nodes into translation entities.
//!
//! Pairing is positional: the i-th `<source>` goes with the i-th `<target>`, whatever
//! `<trans-unit>` either one sits in. A document that reorders targets or leaves one out
//! in the middle produces wrong pairs without any error. Only a shortage of targets at
//! the end is detected.

use serde::Serialize;
use tracing::warn;

use crate::{
    error::ConvertError,
    nodes::{TranslationNode, TranslationNodeSet},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntity {
    pub source: String,
    pub target: String,
}

impl TranslationEntity {
    fn new(source: &TranslationNode, target: &TranslationNode) -> Self {
        Self {
            source: source.first_text.clone().unwrap_or_default(),
            target: target.first_text.clone().unwrap_or_default(),
        }
    }
}

pub fn build_entities(nodes: &TranslationNodeSet) -> Result<Vec<TranslationEntity>, ConvertError> {
    let sources = nodes.source_nodes.len();
    let targets = nodes.target_nodes.len();

    if targets < sources {
        return Err(ConvertError::MissingTarget {
            index: targets,
            sources,
            targets,
        });
    }
    if targets > sources {
        warn!(
            "Ignoring {} surplus target nodes ({} sources, {} targets)",
            targets - sources,
            sources,
            targets
        );
    }

    Ok(nodes
        .source_nodes
        .iter()
        .zip(&nodes.target_nodes)
        .map(|(source, target)| TranslationEntity::new(source, target))
        .collect())
}
