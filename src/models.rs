//! Core data models for prauc
//!
//! These models flow from the input reader through the curve accumulator
//! to the reporters.

use serde::Serialize;

/// Cumulative true/false positive counts at one threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub tp: u64,
    pub fp: u64,
}

impl Counts {
    pub fn new(tp: u64, fp: u64) -> Self {
        Self { tp, fp }
    }

    /// The threshold that rejects every candidate
    pub fn is_empty(&self) -> bool {
        self.tp == 0 && self.fp == 0
    }

    /// tp / (tp + fp). Callers must not pass empty counts.
    pub fn precision(&self) -> f64 {
        self.tp as f64 / (self.tp + self.fp) as f64
    }
}

/// One data line of the ranked input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub program: String,
    pub counts: Counts,
    /// 1-based line number in the input file
    pub line: usize,
}

/// A point on the precision-recall curve
///
/// `is_final` marks an observed threshold; interpolated points and the
/// synthetic start/end points carry `false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrPoint {
    pub recall: f64,
    pub precision: f64,
    pub is_final: bool,
}

impl PrPoint {
    pub fn observed(recall: f64, precision: f64) -> Self {
        Self {
            recall,
            precision,
            is_final: true,
        }
    }

    pub fn synthetic(recall: f64, precision: f64) -> Self {
        Self {
            recall,
            precision,
            is_final: false,
        }
    }
}

/// Result of finalizing one program's block of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramSummary {
    pub program: String,
    pub auc: f64,
    /// Table rows written for this program, interpolated ones included
    pub points: usize,
    /// Data records consumed for this program
    pub records: usize,
}
