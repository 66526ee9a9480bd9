//! Error types of the estimation pipeline.
//!
//! None of these are fatal: acquisition errors skip the fusion step of the
//! current cycle, trim errors reject a single command.

use thiserror::Error;

/// A sample could not be acquired this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// The sample queue stayed empty until the deadline expired.
    #[error("no sample arrived before the deadline")]
    Timeout,
    /// The sensor reported no data.
    #[error("sensor reported no data")]
    NoData,
}

impl AcquisitionError {
    /// Return variant name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionError::Timeout => "Timeout",
            AcquisitionError::NoData => "NoData",
        }
    }
}

/// A trim command could not be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrimError {
    /// A bias was requested but no sample was accumulated.
    #[error("no trim samples were accumulated")]
    InsufficientSamples,
}

/// The quaternion norm collapsed or became NaN and the state was reset to identity.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("quaternion degenerated (norm {norm}), reset to identity")]
pub struct NumericDegeneracy {
    /// The norm observed before the reset.
    pub norm: f32,
}
