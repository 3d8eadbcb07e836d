//! Run configuration for prauc
//!
//! Holds the dataset totals and the interpolation step shared by every
//! program in a run. Values come from the command line (see `cli`) and
//! are validated once, up front.

use thiserror::Error;

/// Default recall step between interpolated points (one percentage point)
pub const DEFAULT_RECALL_STEP: f64 = 0.01;

/// Smallest accepted recall step; bounds the interpolation loop
pub const MIN_RECALL_STEP: f64 = 1e-6;

/// Errors raised while validating run parameters
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("ntruth must be greater than zero")]
    ZeroTruth,

    #[error("ntotal ({ntotal}) must be at least ntruth ({ntruth})")]
    TotalBelowTruth { ntruth: u64, ntotal: u64 },

    #[error("recall step must be between 1e-6 and 1, got {0}")]
    InvalidStep(f64),
}

/// Dataset-wide parameters, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    ntruth: u64,
    ntotal: u64,
    step: f64,
}

impl CurveParams {
    pub fn new(ntruth: u64, ntotal: u64) -> Result<Self, ConfigError> {
        Self::with_step(ntruth, ntotal, DEFAULT_RECALL_STEP)
    }

    pub fn with_step(ntruth: u64, ntotal: u64, step: f64) -> Result<Self, ConfigError> {
        if ntruth == 0 {
            return Err(ConfigError::ZeroTruth);
        }
        if ntotal < ntruth {
            return Err(ConfigError::TotalBelowTruth { ntruth, ntotal });
        }
        if !(MIN_RECALL_STEP..=1.0).contains(&step) {
            return Err(ConfigError::InvalidStep(step));
        }
        Ok(Self {
            ntruth,
            ntotal,
            step,
        })
    }

    /// Total true instances in the dataset
    pub fn ntruth(&self) -> u64 {
        self.ntruth
    }

    /// Total candidate instances (true + false)
    pub fn ntotal(&self) -> u64 {
        self.ntotal
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Counts at the threshold that accepts every candidate
    pub fn accept_all(&self) -> crate::models::Counts {
        crate::models::Counts::new(self.ntruth, self.ntotal - self.ntruth)
    }

    pub fn recall(&self, tp: f64) -> f64 {
        tp / self.ntruth as f64
    }

    /// Interpolation step expressed in true positives
    pub fn tp_step(&self) -> f64 {
        self.step * self.ntruth as f64
    }
}
