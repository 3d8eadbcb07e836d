//! Output reporters for prauc
//!
//! Two outputs are produced:
//! - the precision-recall table, one TSV row per emitted point (`table`)
//! - one summary line per program on the console, as `text` or `json`

mod table;

pub use table::TableWriter;

use crate::models::ProgramSummary;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported summary formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// `program\tauc` with two decimals
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for SummaryFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SummaryFormat::Text),
            "json" => Ok(SummaryFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

/// Render one program summary as a single line (without newline)
pub fn render_summary(summary: &ProgramSummary, format: SummaryFormat) -> Result<String> {
    match format {
        SummaryFormat::Text => Ok(format!("{}\t{:.2}", summary.program, summary.auc)),
        SummaryFormat::Json => Ok(serde_json::to_string(summary)?),
    }
}
