//! Handoff of the merged failure index to external renderers.
//!
//! Rendering itself is out of scope; this module only builds the
//! renderer-facing payload — each attribution annotated with its stable
//! color class and emoji — serializes it as JSON, and produces a short
//! human summary for the terminal.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::Label;
use crate::merge::MergedFailureIndex;
use crate::style;

/// One attribution with its presentation hints attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledAttribution {
    pub attribution: String,
    pub color: &'static str,
    pub emoji: &'static str,
}

/// Annotate every attribution with its stable style assignment.
pub fn handoff(index: &MergedFailureIndex) -> BTreeMap<&str, Vec<StyledAttribution>> {
    index
        .iter()
        .map(|(test, attributions)| {
            let styled = attributions
                .iter()
                .map(|attribution| StyledAttribution {
                    attribution: attribution.clone(),
                    color: style::color_class(attribution),
                    emoji: style::emoji(attribution),
                })
                .collect();
            (test.as_str(), styled)
        })
        .collect()
}

/// Write the annotated index as pretty-printed JSON.
pub fn write_json(path: &Path, index: &MergedFailureIndex) -> Result<()> {
    let json = serde_json::to_string_pretty(&handoff(index))?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Short human-readable summary, one line per failing test.
pub fn summary(index: &MergedFailureIndex) -> String {
    let mut out = String::new();
    for (test, attributions) in index {
        let label = Label::Many(attributions.clone());
        let _ = writeln!(out, "{test}: {}", label.render());
    }
    out
}
