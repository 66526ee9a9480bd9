//! In-flight accelerometer trim.
//!
//! While a trim flight is active and the vehicle is armed with throttle applied,
//! raw accelerometer samples are accumulated. Loading the trim turns the mean
//! into a new accelerometer bias.

use crate::error::TrimError;
use crate::frame::{ACCEL_SCALE, GRAV};
use crate::gains::FlightStatus;
use crate::settings::{AttitudeSettings, TrimFlight};
use crate::types::Vector3;
// Provides the float methods on no_std targets.
#[cfg_attr(any(feature = "std", test), allow(unused_imports))]
use num_traits::Float;

/// Collection stops after this many samples.
pub const MAX_TRIM_SAMPLES: u32 = 65535;

/// The state of the trim session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimState {
    /// No collection is requested.
    #[default]
    Idle,
    /// Samples are accumulated while armed and under power.
    Collecting,
    /// The sample cap was reached; collection stopped.
    Full,
}

/// Learns the accelerometer bias from level flight.
#[derive(Debug, Clone, Default)]
pub struct TrimController {
    state: TrimState,
    accumulator: Vector3<i64>,
    sample_count: u32,
}

impl TrimController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> TrimState {
        self.state
    }

    /// The number of samples accumulated in this session.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Clears the accumulator and begins collecting.
    pub fn start(&mut self) {
        self.accumulator = Vector3::default();
        self.sample_count = 0;
        self.state = TrimState::Collecting;
        log::info!("trim flight started");
    }

    /// Stops collecting. Accumulated samples are kept for a later load.
    pub fn cancel(&mut self) {
        if self.state != TrimState::Idle {
            log::debug!("trim flight stopped after {} samples", self.sample_count);
        }
        self.state = TrimState::Idle;
    }

    /// Accumulates one accelerometer sample, in raw counts, if collecting and under power.
    pub fn accumulate(&mut self, accel: &Vector3<f32>, status: &FlightStatus) {
        if self.state != TrimState::Collecting {
            return;
        }

        if !status.is_armed() || status.throttle <= 0.0 {
            return;
        }

        // Counts are truncated toward zero.
        self.accumulator += accel.map(|v| v as i64);
        self.sample_count += 1;

        if self.sample_count >= MAX_TRIM_SAMPLES {
            self.state = TrimState::Full;
            log::info!("trim flight collected {} samples", self.sample_count);
        }
    }

    /// Calculates the accelerometer bias from the accumulated samples.
    ///
    /// The z axis reads negative gravity when level, so one gravity is added back.
    pub fn bias(&self) -> Result<Vector3<i16>, TrimError> {
        if self.sample_count == 0 {
            return Err(TrimError::InsufficientSamples);
        }

        let count = self.sample_count as f32;
        let mean = self.accumulator.map(|sum| sum as f32 / count);
        let gravity = Vector3::new(0.0, 0.0, GRAV / ACCEL_SCALE);

        Ok((mean + gravity).map(|v| v.round() as i16))
    }

    /// Loads the trim: computes the bias, writes it into a copy of the settings and
    /// resets the session.
    ///
    /// On error the session is left as-is apart from collection being stopped.
    pub fn load(&mut self, settings: &AttitudeSettings) -> Result<AttitudeSettings, TrimError> {
        self.state = TrimState::Idle;
        let bias = self.bias()?;

        self.accumulator = Vector3::default();
        self.sample_count = 0;
        log::info!("trim loaded, accelerometer bias {:?}", bias);

        Ok(AttitudeSettings {
            accel_bias: [bias.x, bias.y, bias.z],
            trim_flight: TrimFlight::Normal,
            ..*settings
        })
    }

    /// Dispatches the trim command of a settings snapshot.
    ///
    /// Returns the settings to write back when a load succeeded.
    pub fn apply_command(
        &mut self,
        settings: &AttitudeSettings,
    ) -> Result<Option<AttitudeSettings>, TrimError> {
        match settings.trim_flight {
            TrimFlight::Start => {
                self.start();
                Ok(None)
            }
            TrimFlight::Load => self.load(settings).map(Some),
            TrimFlight::Normal => {
                self.cancel();
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gains::ArmingState;

    const FLYING: FlightStatus = FlightStatus {
        armed: ArmingState::Armed,
        throttle: 0.5,
    };

    #[test]
    fn test_trim_of_constant_reading() {
        let mut trim = TrimController::new();
        trim.start();

        for _ in 0..10 {
            trim.accumulate(&Vector3::new(100.0, 100.0, 100.0), &FLYING);
        }
        assert_eq!(trim.sample_count(), 10);

        let settings = trim
            .load(&AttitudeSettings {
                trim_flight: TrimFlight::Load,
                ..Default::default()
            })
            .expect("samples were accumulated");

        let gravity_counts = (GRAV / ACCEL_SCALE).round() as i16;
        assert_eq!(settings.accel_bias, [100, 100, 100 + gravity_counts]);
        assert_eq!(settings.accel_bias[2], 350);
        assert_eq!(settings.trim_flight, TrimFlight::Normal);
        assert_eq!(trim.state(), TrimState::Idle);
        assert_eq!(trim.sample_count(), 0);
    }

    #[test]
    fn test_load_without_samples_fails() {
        let mut trim = TrimController::new();
        assert_eq!(
            trim.load(&AttitudeSettings::default()),
            Err(TrimError::InsufficientSamples)
        );

        trim.start();
        assert_eq!(
            trim.load(&AttitudeSettings::default()),
            Err(TrimError::InsufficientSamples)
        );
        assert_eq!(trim.state(), TrimState::Idle);
    }

    #[test]
    fn test_no_accumulation_unless_armed_with_throttle() {
        let mut trim = TrimController::new();
        trim.start();

        let sample = Vector3::new(1.0, 2.0, 3.0);
        trim.accumulate(
            &sample,
            &FlightStatus {
                armed: ArmingState::Arming,
                throttle: 0.5,
            },
        );
        trim.accumulate(
            &sample,
            &FlightStatus {
                armed: ArmingState::Armed,
                throttle: 0.0,
            },
        );
        assert_eq!(trim.sample_count(), 0);
    }

    #[test]
    fn test_idle_does_not_accumulate() {
        let mut trim = TrimController::new();
        trim.accumulate(&Vector3::new(1.0, 2.0, 3.0), &FLYING);
        assert_eq!(trim.sample_count(), 0);
        assert_eq!(trim.state(), TrimState::Idle);
    }

    #[test]
    fn test_collection_stops_at_cap() {
        let mut trim = TrimController::new();
        trim.start();

        for _ in 0..MAX_TRIM_SAMPLES + 10 {
            trim.accumulate(&Vector3::new(-4.0, 4.0, -250.0), &FLYING);
        }
        assert_eq!(trim.state(), TrimState::Full);
        assert_eq!(trim.sample_count(), MAX_TRIM_SAMPLES);

        let bias = trim.bias().expect("samples were accumulated");
        assert_eq!(bias, Vector3::new(-4, 4, 0));
    }

    #[test]
    fn test_load_after_cap() {
        let mut trim = TrimController::new();
        trim.start();

        for _ in 0..MAX_TRIM_SAMPLES {
            trim.accumulate(&Vector3::new(12.0, -7.0, -240.0), &FLYING);
        }
        assert_eq!(trim.state(), TrimState::Full);

        let written = trim
            .apply_command(&AttitudeSettings {
                trim_flight: TrimFlight::Load,
                ..Default::default()
            })
            .expect("samples were accumulated")
            .expect("load writes settings back");

        assert_eq!(written.accel_bias, [12, -7, 10]);
        assert_eq!(written.trim_flight, TrimFlight::Normal);
        assert_eq!(trim.state(), TrimState::Idle);
        assert_eq!(trim.sample_count(), 0);
    }

    #[test]
    fn test_normal_command_stops_but_keeps_samples() {
        let mut trim = TrimController::new();
        assert_eq!(
            trim.apply_command(&AttitudeSettings {
                trim_flight: TrimFlight::Start,
                ..Default::default()
            }),
            Ok(None)
        );
        trim.accumulate(&Vector3::new(2.0, 2.0, -248.0), &FLYING);

        assert_eq!(trim.apply_command(&AttitudeSettings::default()), Ok(None));
        assert_eq!(trim.state(), TrimState::Idle);

        trim.accumulate(&Vector3::new(100.0, 100.0, 100.0), &FLYING);
        assert_eq!(trim.sample_count(), 1);

        let written = trim
            .apply_command(&AttitudeSettings {
                trim_flight: TrimFlight::Load,
                ..Default::default()
            })
            .expect("samples were accumulated")
            .expect("load writes settings back");
        assert_eq!(written.accel_bias, [2, 2, 2]);
    }
}
