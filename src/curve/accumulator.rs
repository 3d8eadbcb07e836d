//! Running state for one program's block of records

use super::{emit_point, PointSink};
use crate::config::CurveParams;
use crate::models::{Counts, PrPoint, ProgramSummary};
use std::io;
use tracing::{debug, warn};

/// Wraps a sink and counts the points passing through it
struct Counting<'s, S: ?Sized> {
    inner: &'s mut S,
    written: usize,
}

impl<S: PointSink + ?Sized> PointSink for Counting<'_, S> {
    fn write_point(&mut self, program: &str, point: &PrPoint) -> io::Result<()> {
        self.written += 1;
        self.inner.write_point(program, point)
    }
}

/// Accumulates the AUC of a single program
///
/// Created by [`ProgramAccumulator::start`], which writes the recall 1.0
/// start point, fed one [`Counts`] per record, and consumed by
/// [`ProgramAccumulator::finish`], which writes the recall 0.0 end point.
#[derive(Debug)]
pub struct ProgramAccumulator {
    params: CurveParams,
    program: String,
    last: Counts,
    auc: f64,
    points: usize,
    records: usize,
}

impl ProgramAccumulator {
    pub fn start<S: PointSink + ?Sized>(
        params: CurveParams,
        program: impl Into<String>,
        sink: &mut S,
    ) -> io::Result<Self> {
        let mut acc = Self {
            params,
            program: program.into(),
            last: params.accept_all(),
            auc: 0.0,
            points: 0,
            records: 0,
        };
        acc.auc = acc.emit(params.accept_all(), None, sink)?;
        Ok(acc)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// AUC accumulated so far
    pub fn auc(&self) -> f64 {
        self.auc
    }

    /// Add the counts observed at the next, stricter threshold
    pub fn observe<S: PointSink + ?Sized>(
        &mut self,
        counts: Counts,
        sink: &mut S,
    ) -> io::Result<()> {
        if counts.tp > self.params.ntruth() {
            warn!(
                "{}: tp {} exceeds ntruth {}, recall will exceed 1.0",
                self.program,
                counts.tp,
                self.params.ntruth()
            );
        }
        self.auc += self.emit(counts, Some(self.last), sink)?;
        self.last = counts;
        self.records += 1;
        Ok(())
    }

    /// Close the curve at zero recall and report the program's totals
    pub fn finish<S: PointSink + ?Sized>(mut self, sink: &mut S) -> io::Result<ProgramSummary> {
        self.auc += self.emit(Counts::default(), Some(self.last), sink)?;
        debug!(
            "{}: {} records, {} points, auc {:.4}",
            self.program, self.records, self.points, self.auc
        );
        Ok(ProgramSummary {
            program: self.program,
            auc: self.auc,
            points: self.points,
            records: self.records,
        })
    }

    fn emit<S: PointSink + ?Sized>(
        &mut self,
        current: Counts,
        previous: Option<Counts>,
        sink: &mut S,
    ) -> io::Result<f64> {
        let mut counting = Counting {
            inner: sink,
            written: 0,
        };
        let area = emit_point(&self.params, &self.program, current, previous, &mut counting)?;
        self.points += counting.written;
        Ok(area)
    }
}
