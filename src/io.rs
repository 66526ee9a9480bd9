//! Outbound interfaces of the estimation cycle.

use crate::complementary::Attitude;
use crate::frame::SensorFrame;
use crate::settings::AttitudeSettings;

/// The severity of the estimator alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmLevel {
    #[default]
    Clear,
    /// A cycle failed; the attitude was not updated.
    Error,
    /// The sensors are not producing data.
    Critical,
}

/// Receives the orientation estimate.
pub trait AttitudeSink {
    fn publish(&mut self, attitude: &Attitude);

    /// Whether the attitude is driven externally, e.g. by a simulator.
    /// Fusion is skipped while this is set.
    fn is_read_only(&self) -> bool {
        false
    }
}

/// Receives the calibrated sensor readings.
pub trait SensorSink {
    fn publish(&mut self, frame: &SensorFrame);

    /// Whether the sensor readings are driven externally.
    /// The adapter is switched to pass-through while this is set.
    fn is_read_only(&self) -> bool {
        false
    }
}

/// Persists settings changed by the estimator.
pub trait SettingsStore {
    fn write(&mut self, settings: &AttitudeSettings);
}

/// Receives the estimator health.
pub trait AlarmSink {
    fn set(&mut self, level: AlarmLevel);
}
