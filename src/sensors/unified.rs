use crate::error::AcquisitionError;
use crate::frame::{RawFrame, ACCEL_SCALE};
use crate::sensors::queue::SampleQueue;
use crate::sensors::{Acquired, SensorAdapter};
use crate::settings::AttitudeSettings;
use crate::time::Ticks;
use crate::types::{GyroscopeReading, Vector3};

/// The sample period of the unified IMU, in milliseconds.
const SENSOR_PERIOD: Ticks = 4;

/// One sample of a combined accelerometer and gyroscope device, in device counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImuSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub temperature: i16,
}

/// Conversion factors from device counts to physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuScale {
    /// Degrees per second per count.
    pub gyro: f32,
    /// Meters per second squared per count.
    pub accel: f32,
}

impl Default for ImuScale {
    /// ±500 °/s gyro range and ±8 g accelerometer range.
    fn default() -> Self {
        Self {
            gyro: 1.0 / 65.5,
            accel: 9.81 / 4096.0,
        }
    }
}

impl ImuScale {
    /// Converts a die temperature reading to degrees Celsius.
    #[inline]
    pub fn temperature(raw: i16) -> f32 {
        35.0 + (f32::from(raw) + 512.0) / 340.0
    }
}

/// A board with a single IMU delivering accelerometer and gyro samples together.
#[derive(Debug)]
pub struct UnifiedImuAdapter<Q> {
    queue: Q,
    scale: ImuScale,
    pass_through: bool,
}

impl<Q> UnifiedImuAdapter<Q>
where
    Q: SampleQueue<ImuSample>,
{
    pub fn new(queue: Q, scale: ImuScale) -> Self {
        Self {
            queue,
            scale,
            pass_through: false,
        }
    }

    pub fn scale(&self) -> &ImuScale {
        &self.scale
    }

    /// The sample queue, e.g. to feed it from a driver running in the same context.
    pub fn queue_mut(&mut self) -> &mut Q {
        &mut self.queue
    }

    fn convert(&self, sample: &ImuSample) -> RawFrame {
        let [ax, ay, az] = sample.accel.map(f32::from);
        let [gx, gy, gz] = sample.gyro.map(f32::from);

        // The accelerometer is expressed in raw counts so both board variants share the bias path.
        let accel_counts = self.scale.accel / ACCEL_SCALE;

        RawFrame {
            accel: Vector3::new(ax, ay, az) * accel_counts,
            gyro: GyroscopeReading::new(gx, gy, gz) * self.scale.gyro,
            temperature: ImuScale::temperature(sample.temperature),
        }
    }
}

impl<Q> SensorAdapter for UnifiedImuAdapter<Q>
where
    Q: SampleQueue<ImuSample>,
{
    fn default_timeout(&self) -> Ticks {
        SENSOR_PERIOD
    }

    fn next_frame(&mut self, timeout: Ticks) -> Result<Acquired, AcquisitionError> {
        let sample = self.queue.receive(timeout).ok_or(AcquisitionError::NoData)?;

        if self.pass_through {
            return Ok(Acquired::PassThrough);
        }

        Ok(Acquired::Frame(self.convert(&sample)))
    }

    fn set_pass_through(&mut self, enabled: bool) {
        self.pass_through = enabled;
    }

    /// The device streams into its queue on its own; there is no start-up condition to wait for.
    fn is_ready(&self) -> bool {
        true
    }

    fn apply_settings(&mut self, _settings: &AttitudeSettings) {}
}
