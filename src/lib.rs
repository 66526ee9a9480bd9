//! A complementary-filter attitude estimator for small flight controllers.
//!
//! Each cycle of the [`Coordinator`] acquires a frame from the board's sensors,
//! applies the board rotation and calibration, feeds the in-flight accelerometer
//! trim and integrates the gyro rates into an orientation quaternion corrected
//! by the direction of gravity.

// Enable no_std mode.
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod calibration;
pub mod complementary;
pub mod coordinator;
mod error;
pub mod frame;
pub mod gains;
pub mod io;
mod macros;
pub mod mailbox;
pub mod sensors;
pub mod settings;
pub mod time;
pub mod trim;
pub mod types;

pub use crate::calibration::{CalibrationState, FusionGains};
pub use crate::complementary::{Attitude, AttitudeEstimator, AttitudeUpdate};
pub use crate::coordinator::{Coordinator, CycleIo, CycleOutcome};
pub use crate::error::{AcquisitionError, NumericDegeneracy, TrimError};
pub use crate::frame::{RawFrame, SensorFrame, ACCEL_SCALE, GRAV};
pub use crate::gains::{ArmingState, FlightStatus, GainProfile, GainScheduler};
pub use crate::io::{AlarmLevel, AlarmSink, AttitudeSink, SensorSink, SettingsStore};
pub use crate::mailbox::SettingsMailbox;
pub use crate::settings::{AttitudeSettings, TrimFlight};
pub use crate::time::Ticks;
pub use crate::trim::{TrimController, TrimState};
