//! The estimation cycle.
//!
//! One call to [`Coordinator::run_cycle`] acquires a frame, calibrates it,
//! feeds the trim, runs the complementary filter and publishes the results.

use crate::calibration::CalibrationState;
use crate::complementary::{Attitude, AttitudeEstimator, AttitudeUpdate};
use crate::error::{AcquisitionError, TrimError};
use crate::frame::SensorFrame;
use crate::gains::{FlightStatus, GainScheduler};
use crate::io::{AlarmLevel, AlarmSink, AttitudeSink, SensorSink, SettingsStore};
use crate::mailbox::SettingsMailbox;
use crate::sensors::{Acquired, SensorAdapter};
use crate::settings::AttitudeSettings;
use crate::time::Ticks;
use crate::trim::TrimController;

/// The collaborators of one cycle.
pub struct CycleIo<'a> {
    /// Settings posted since the last cycle.
    pub mailbox: &'a SettingsMailbox,
    /// Receives settings changed by a trim load.
    pub store: &'a mut dyn SettingsStore,
    pub attitude: &'a mut dyn AttitudeSink,
    pub sensors: &'a mut dyn SensorSink,
    pub alarm: &'a mut dyn AlarmSink,
}

/// The result of a cycle that acquired successfully.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// The attitude was updated and published.
    Updated(AttitudeUpdate),
    /// The sensors were published; the attitude is read-only and was left as is.
    SensorsOnly(SensorFrame),
    /// The sensor readings are driven externally; nothing was fused.
    PassThrough,
}

/// Owns the estimator state and runs one cycle per scheduler tick.
pub struct Coordinator<S> {
    sensors: S,
    settings: AttitudeSettings,
    calibration: CalibrationState,
    scheduler: GainScheduler,
    trim: TrimController,
    estimator: AttitudeEstimator,
    ready: bool,
}

impl<S> Coordinator<S>
where
    S: SensorAdapter,
{
    /// Creates the coordinator and applies the initial settings.
    pub fn new(sensors: S, settings: AttitudeSettings) -> Self {
        let calibration = CalibrationState::from_settings(&settings);
        let scheduler = GainScheduler::new(&calibration);

        let mut coordinator = Self {
            sensors,
            settings,
            calibration,
            scheduler,
            trim: TrimController::new(),
            estimator: AttitudeEstimator::new(),
            ready: false,
        };

        if let Err(e) = coordinator.apply_local(&settings) {
            log::warn!("initial trim command rejected: {}", e);
        }

        coordinator
    }

    /// Applies a settings snapshot.
    ///
    /// A successful trim load writes the settings carrying the new accelerometer
    /// bias to `store` and applies them locally.
    pub fn apply_settings(
        &mut self,
        settings: &AttitudeSettings,
        store: &mut dyn SettingsStore,
    ) -> Result<(), TrimError> {
        if let Some(trimmed) = self.apply_local(settings)? {
            store.write(&trimmed);
            self.apply_local(&trimmed)?;
        }
        Ok(())
    }

    fn apply_local(&mut self, settings: &AttitudeSettings) -> Result<Option<AttitudeSettings>, TrimError> {
        self.settings = *settings;
        self.calibration.replace_settings(settings);
        self.sensors.apply_settings(settings);
        self.scheduler.on_settings_replaced(&self.calibration);
        self.trim.apply_command(settings)
    }

    /// Runs one estimation cycle at `now` milliseconds since start-up.
    ///
    /// On error nothing was fused and the estimator state is unchanged.
    pub fn run_cycle(
        &mut self,
        now: Ticks,
        status: &FlightStatus,
        io: CycleIo<'_>,
    ) -> Result<CycleOutcome, AcquisitionError> {
        if let Some(settings) = io.mailbox.take() {
            if let Err(e) = self.apply_settings(&settings, io.store) {
                log::warn!("trim command rejected: {}", e);
            }
        }

        if !self.ready {
            if !self.sensors.is_ready() {
                io.alarm.set(AlarmLevel::Critical);
                return Err(AcquisitionError::NoData);
            }
            log::info!("sensors ready at {} ms", now);
            self.ready = true;
        }

        let gains = *self.scheduler.update(now, status, &self.calibration);

        self.sensors.set_pass_through(io.sensors.is_read_only());

        let raw = match self.sensors.next_frame(self.sensors.default_timeout()) {
            Ok(Acquired::Frame(raw)) => raw,
            Ok(Acquired::PassThrough) => {
                io.alarm.set(AlarmLevel::Clear);
                return Ok(CycleOutcome::PassThrough);
            }
            Err(e) => {
                log::warn!("sensor acquisition failed: {}", e.as_str());
                io.alarm.set(AlarmLevel::Error);
                return Err(e);
            }
        };

        let raw = self.calibration.rotate(raw);
        self.trim.accumulate(&raw.accel, status);
        let frame = self.calibration.correct(&raw, gains.yaw_bias_rate);
        io.sensors.publish(&frame);

        if io.attitude.is_read_only() {
            io.alarm.set(AlarmLevel::Clear);
            return Ok(CycleOutcome::SensorsOnly(frame));
        }

        let update = self.estimator.update(
            now,
            &frame,
            &gains,
            self.calibration.gyro_bias_integral_mut(),
        );
        io.attitude.publish(&update.attitude);
        io.alarm.set(AlarmLevel::Clear);

        Ok(CycleOutcome::Updated(update))
    }

    /// The current orientation estimate.
    pub fn attitude(&self) -> Attitude {
        self.estimator.attitude()
    }

    /// The settings applied last.
    pub fn settings(&self) -> &AttitudeSettings {
        &self.settings
    }

    pub fn calibration(&self) -> &CalibrationState {
        &self.calibration
    }

    pub fn scheduler(&self) -> &GainScheduler {
        &self.scheduler
    }

    pub fn trim(&self) -> &TrimController {
        &self.trim
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    /// Returns the orientation to identity and restarts the gyro bias integral.
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.calibration.reset_gyro_bias();
    }
}
