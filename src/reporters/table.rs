//! Tab-separated precision-recall table
//!
//! Row layout: `program\trecall\tprecision\tis_final`, where `is_final` is
//! `1` for observed thresholds and `0` for synthetic points.

use crate::curve::PointSink;
use crate::models::PrPoint;
use std::io::{self, Write};

pub struct TableWriter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> PointSink for TableWriter<W> {
    fn write_point(&mut self, program: &str, point: &PrPoint) -> io::Result<()> {
        // Debug prints the shortest round-trip form: "1.0" rather than "1",
        // and exponent form ("5e-6") below 1e-4
        writeln!(
            self.out,
            "{}\t{:?}\t{:?}\t{}",
            program,
            point.recall,
            point.precision,
            u8::from(point.is_final)
        )?;
        self.rows += 1;
        Ok(())
    }
}
