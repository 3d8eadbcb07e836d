//! prauc - precision-recall curves and PR-AUC per program
//!
//! Turns a ranked list of cumulative true/false positive counts, grouped by
//! program, into a precision-recall table with interpolated points and one
//! approximate area-under-curve value per program.
//!
//! # Example
//!
//! ```rust
//! use prauc::config::CurveParams;
//! use prauc::input::RecordReader;
//! use prauc::pipeline::Pipeline;
//! use prauc::reporters::TableWriter;
//!
//! let params = CurveParams::new(2, 4)?;
//! let input = "program score tp fp\nP1 0.9 1 0\nP1 0.1 2 0\n";
//! let mut table = TableWriter::new(Vec::new());
//! let mut aucs = Vec::new();
//! Pipeline::new(params).run(RecordReader::new(input.as_bytes()), &mut table, |s| {
//!     aucs.push(s.auc);
//!     Ok(())
//! })?;
//! assert_eq!(aucs.len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod curve;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod reporters;
