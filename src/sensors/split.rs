use crate::error::AcquisitionError;
use crate::frame::RawFrame;
use crate::sensors::queue::{AccelerometerFifo, SampleQueue};
use crate::sensors::{Acquired, SensorAdapter};
use crate::settings::AttitudeSettings;
use crate::time::Ticks;
use crate::types::{GyroscopeReading, Vector3};
use coordinate_frame::{NorthWestUp, SouthEastUp};

/// The ADC code of a gyro axis at rest.
pub const GYRO_NEUTRAL: f32 = 1665.0;

/// The most accelerometer samples consumed in one cycle.
pub const MAX_ACCEL_BURST: usize = 32;

/// The nominal update period of the split-sensor board, in milliseconds.
const UPDATE_PERIOD: Ticks = 25;

/// One conversion of the analog gyro ADC channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GyroAdcSample {
    /// The first ADC channel. Not used as a temperature on this board.
    pub temperature: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A board with analog gyros sampled by the ADC and a digital accelerometer with a FIFO.
///
/// The accelerometer is mounted North-West-Up and the gyros South-East-Up
/// relative to the body frame.
#[derive(Debug)]
pub struct SplitSensorAdapter<G, A> {
    gyro: G,
    accel: A,
    gyro_gain: f32,
    pass_through: bool,
}

impl<G, A> SplitSensorAdapter<G, A>
where
    G: SampleQueue<GyroAdcSample>,
    A: AccelerometerFifo,
{
    /// Creates an adapter using the default gyro gain.
    pub fn new(gyro: G, accel: A) -> Self {
        Self {
            gyro,
            accel,
            gyro_gain: AttitudeSettings::default().gyro_gain,
            pass_through: false,
        }
    }

    /// The gain from gyro ADC codes to degrees per second.
    pub fn gyro_gain(&self) -> f32 {
        self.gyro_gain
    }

    pub fn gyro_queue_mut(&mut self) -> &mut G {
        &mut self.gyro
    }

    pub fn accel_fifo_mut(&mut self) -> &mut A {
        &mut self.accel
    }

    /// Averages a burst of queued accelerometer samples.
    ///
    /// Returns the mean in body axes and the FIFO depth left behind.
    fn read_accel_burst(&mut self) -> Option<(Vector3<f32>, usize)> {
        let mut sum = Vector3::<i32>::default();
        let mut count = 0;
        let mut remaining = 0;

        while count < MAX_ACCEL_BURST {
            let Some((sample, left)) = self.accel.read() else {
                break;
            };
            sum += Vector3::new(sample.x.into(), sample.y.into(), sample.z.into());
            count += 1;
            remaining = left;
            if left == 0 {
                break;
            }
        }

        if count == 0 {
            return None;
        }

        let mean = sum.map(|v| v as f32 / count as f32);
        let body = Vector3::from_ned(NorthWestUp::new(mean.x, mean.y, mean.z).to_ned());
        Some((body, remaining))
    }

    fn gyro_rates(&self, sample: &GyroAdcSample) -> GyroscopeReading<f32> {
        let centered = SouthEastUp::new(
            sample.x - GYRO_NEUTRAL,
            sample.y - GYRO_NEUTRAL,
            sample.z - GYRO_NEUTRAL,
        );
        GyroscopeReading::from(Vector3::from_ned(centered.to_ned()) * self.gyro_gain)
    }
}

impl<G, A> SensorAdapter for SplitSensorAdapter<G, A>
where
    G: SampleQueue<GyroAdcSample>,
    A: AccelerometerFifo,
{
    /// Two nominal update periods.
    fn default_timeout(&self) -> Ticks {
        2 * UPDATE_PERIOD
    }

    fn next_frame(&mut self, timeout: Ticks) -> Result<Acquired, AcquisitionError> {
        let sample = self.gyro.receive(timeout).ok_or(AcquisitionError::Timeout)?;

        if self.pass_through {
            return Ok(Acquired::PassThrough);
        }

        if self.accel.is_empty() {
            return Err(AcquisitionError::NoData);
        }

        let gyro = self.gyro_rates(&sample);
        let (accel, remaining) = self.read_accel_burst().ok_or(AcquisitionError::NoData)?;

        Ok(Acquired::Frame(RawFrame {
            accel,
            gyro,
            temperature: remaining as f32,
        }))
    }

    fn set_pass_through(&mut self, enabled: bool) {
        self.pass_through = enabled;
    }

    fn is_ready(&self) -> bool {
        !self.accel.is_empty()
    }

    fn apply_settings(&mut self, settings: &AttitudeSettings) {
        self.gyro_gain = settings.gyro_gain;
    }
}
