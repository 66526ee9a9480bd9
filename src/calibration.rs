//! Sensor calibration: board rotation, accelerometer bias and the gyro bias integral.

use crate::frame::{RawFrame, SensorFrame, ACCEL_SCALE};
use crate::settings::AttitudeSettings;
use crate::types::{GyroscopeBias, GyroscopeReading, Quaternion, RotationMatrix, Vector3};
// Provides the float methods on no_std targets.
#[cfg_attr(any(feature = "std", test), allow(unused_imports))]
use num_traits::Float;

/// The sample period the accelerometer filter coefficient is derived for, in seconds.
const FILTER_DELTA_T: f32 = 0.0025;

/// Filter time constants below this value disable the accelerometer filter.
const MIN_ACCEL_TAU: f32 = 0.0001;

/// Gains of the complementary filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionGains {
    /// Proportional gain on the gravity error.
    pub kp: f32,
    /// Integral gain on the gravity error.
    pub ki: f32,
    /// Rate of the yaw bias nulling.
    pub yaw_bias_rate: f32,
    /// Smoothing coefficient of the accelerometer low-pass filter.
    pub accel_alpha: f32,
    pub accel_filter_enabled: bool,
}

/// Behavioral switches taken from the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationFlags {
    /// Use leveling gains while the vehicle is arming.
    pub zero_during_arming: bool,
    /// Add the bias integral to the gyro rates.
    pub bias_correct_gyro: bool,
}

/// The calibration applied to every frame.
///
/// Everything except the gyro bias integral is derived from an
/// [`AttitudeSettings`] snapshot and replaced as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationState {
    accel_bias: Vector3<i16>,
    gyro_bias_integral: GyroscopeBias<f32>,
    initial_gyro_bias: GyroscopeBias<f32>,
    rotation: Option<RotationMatrix<f32>>,
    gyro_gain: f32,
    gains: FusionGains,
    flags: CalibrationFlags,
}

impl CalibrationState {
    /// Derives a calibration from a settings snapshot.
    ///
    /// The gyro bias integral starts at the configured initial bias.
    pub fn from_settings(settings: &AttitudeSettings) -> Self {
        let (accel_alpha, accel_filter_enabled) = if settings.accel_tau < MIN_ACCEL_TAU {
            (0.0, false)
        } else {
            ((-FILTER_DELTA_T / settings.accel_tau).exp(), true)
        };

        let rotation = settings.board_rotation_degrees().map(|rpy| {
            RotationMatrix::from(Quaternion::from_roll_pitch_yaw(rpy.x, rpy.y, rpy.z))
        });

        let initial_gyro_bias = settings.initial_gyro_bias();

        Self {
            accel_bias: settings.accel_bias(),
            gyro_bias_integral: initial_gyro_bias,
            initial_gyro_bias,
            rotation,
            gyro_gain: settings.gyro_gain,
            gains: FusionGains {
                kp: settings.accel_kp,
                ki: settings.accel_ki,
                yaw_bias_rate: settings.yaw_bias_rate,
                accel_alpha,
                accel_filter_enabled,
            },
            flags: CalibrationFlags {
                zero_during_arming: settings.zero_during_arming,
                bias_correct_gyro: settings.bias_correct_gyro,
            },
        }
    }

    /// Replaces the calibration with one derived from a new settings snapshot.
    ///
    /// The learned gyro bias integral is kept unless the snapshot configures a
    /// different initial gyro bias, in which case the integral restarts from it.
    pub fn replace_settings(&mut self, settings: &AttitudeSettings) {
        let mut next = Self::from_settings(settings);
        if next.initial_gyro_bias == self.initial_gyro_bias {
            next.gyro_bias_integral = self.gyro_bias_integral;
        }
        *self = next;
    }

    /// Restarts the gyro bias integral from the configured initial bias.
    pub fn reset_gyro_bias(&mut self) {
        self.gyro_bias_integral = self.initial_gyro_bias;
    }

    /// Rotates accelerometer and gyro readings from the board frame into the vehicle frame.
    ///
    /// Without a configured board rotation the frame is returned unchanged.
    pub fn rotate(&self, frame: RawFrame) -> RawFrame {
        let Some(rotation) = &self.rotation else {
            return frame;
        };

        RawFrame {
            accel: rotation.rotate(frame.accel),
            gyro: GyroscopeReading::from(rotation.rotate(Vector3::from(frame.gyro))),
            temperature: frame.temperature,
        }
    }

    /// Removes the accelerometer bias, scales to m/s² and applies the gyro bias integral.
    ///
    /// The yaw component of the integral is nudged towards nulling the yaw rate on
    /// every call, whether or not gyro bias correction is enabled.
    pub fn correct(&mut self, frame: &RawFrame, yaw_bias_rate: f32) -> SensorFrame {
        let bias = self.accel_bias.map(f32::from);
        let accel = (frame.accel - bias) * ACCEL_SCALE;

        let mut gyro = frame.gyro;
        if self.flags.bias_correct_gyro {
            gyro = gyro.corrected_by(&self.gyro_bias_integral);
        }

        self.gyro_bias_integral.omega_z += -gyro.omega_z * yaw_bias_rate;

        SensorFrame {
            accel: accel.into(),
            gyro,
            temperature: frame.temperature,
        }
    }

    /// The accelerometer bias, in raw counts.
    pub fn accel_bias(&self) -> Vector3<i16> {
        self.accel_bias
    }

    /// The current gyro bias integral, in degrees per second.
    pub fn gyro_bias_integral(&self) -> &GyroscopeBias<f32> {
        &self.gyro_bias_integral
    }

    pub(crate) fn gyro_bias_integral_mut(&mut self) -> &mut GyroscopeBias<f32> {
        &mut self.gyro_bias_integral
    }

    /// The board rotation, or `None` if the board is mounted unrotated.
    pub fn rotation(&self) -> Option<&RotationMatrix<f32>> {
        self.rotation.as_ref()
    }

    /// The configured gyroscope ADC gain.
    pub fn gyro_gain(&self) -> f32 {
        self.gyro_gain
    }

    /// The gains configured in the settings.
    pub fn gains(&self) -> &FusionGains {
        &self.gains
    }

    pub fn flags(&self) -> &CalibrationFlags {
        &self.flags
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::from_settings(&AttitudeSettings::default())
    }
}
