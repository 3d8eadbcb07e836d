//! Program grouping pipeline
//!
//! Walks the records once, in input order:
//! 1. A new program id finalizes the active program (if any) and starts
//!    a fresh accumulator with its recall 1.0 start point
//! 2. Every record feeds the active accumulator
//! 3. End of input finalizes the active program
//!
//! Each finalized program is handed to the caller as soon as it closes,
//! so summaries come out in encounter order.

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::config::CurveParams;
use crate::curve::{PointSink, ProgramAccumulator};
use crate::input::InputError;
use crate::models::{ProgramSummary, Record};

/// Totals for one pass over the input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub programs: usize,
    pub points: usize,
}

/// Single-pass PR-AUC evaluation over grouped records.
pub struct Pipeline {
    params: CurveParams,
}

impl Pipeline {
    pub fn new(params: CurveParams) -> Self {
        Self { params }
    }

    /// Run the pass, writing points to `sink` and summaries to `on_summary`.
    pub fn run<I, S, F>(&self, records: I, sink: &mut S, mut on_summary: F) -> Result<RunStats>
    where
        I: IntoIterator<Item = Result<Record, InputError>>,
        S: PointSink + ?Sized,
        F: FnMut(&ProgramSummary) -> Result<()>,
    {
        let mut stats = RunStats::default();
        let mut active: Option<ProgramAccumulator> = None;
        let mut finished: FxHashSet<String> = FxHashSet::default();

        for record in records {
            let record = record?;

            let switching = active
                .as_ref()
                .map_or(true, |acc| acc.program() != record.program);
            if switching {
                if let Some(acc) = active.take() {
                    finished.insert(acc.program().to_string());
                    self.finish(acc, sink, &mut stats, &mut on_summary)?;
                }
                if finished.contains(&record.program) {
                    warn!(
                        "line {}: program '{}' reappears after its block ended",
                        record.line, record.program
                    );
                }
                let acc = ProgramAccumulator::start(self.params, record.program.as_str(), sink)
                    .with_context(|| {
                        format!("Failed to write start point for '{}'", record.program)
                    })?;
                active = Some(acc);
            }

            if let Some(acc) = active.as_mut() {
                acc.observe(record.counts, sink)
                    .with_context(|| format!("Failed to write points for line {}", record.line))?;
            }
            stats.records += 1;
        }

        if let Some(acc) = active.take() {
            self.finish(acc, sink, &mut stats, &mut on_summary)?;
        }

        info!(
            "Processed {} records across {} programs ({} points)",
            stats.records, stats.programs, stats.points
        );
        Ok(stats)
    }

    fn finish<S, F>(
        &self,
        acc: ProgramAccumulator,
        sink: &mut S,
        stats: &mut RunStats,
        on_summary: &mut F,
    ) -> Result<()>
    where
        S: PointSink + ?Sized,
        F: FnMut(&ProgramSummary) -> Result<()>,
    {
        let program = acc.program().to_string();
        let summary = acc
            .finish(sink)
            .with_context(|| format!("Failed to write end point for '{}'", program))?;
        stats.programs += 1;
        stats.points += summary.points;
        on_summary(&summary)
    }
}
