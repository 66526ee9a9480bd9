//! The attitude settings record.
//!
//! The record is read once at startup and again whenever the settings
//! transport signals an update. The only value written back by the estimator
//! is the result of a trim "load" command.

use crate::types::{GyroscopeBias, Vector3};

/// The in-flight trim command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrimFlight {
    /// No trim activity requested.
    #[default]
    Normal,
    /// Start (or restart) accumulating accelerometer samples.
    Start,
    /// Compute the accelerometer bias from the accumulated samples.
    Load,
}

/// Attitude estimation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct AttitudeSettings {
    /// Integral gain of the gravity correction.
    pub accel_ki: f32,
    /// Proportional gain of the gravity correction.
    pub accel_kp: f32,
    /// Rate at which the yaw gyro bias is nulled.
    pub yaw_bias_rate: f32,
    /// Scale of the analog gyroscope, in degrees per second per ADC count.
    pub gyro_gain: f32,
    /// Time constant of the accelerometer low-pass filter, in seconds. Zero disables the filter.
    pub accel_tau: f32,
    /// Re-level aggressively while the vehicle is arming.
    pub zero_during_arming: bool,
    /// Add the integral bias term to the published gyro rates.
    pub bias_correct_gyro: bool,
    /// Accelerometer bias, in raw counts.
    pub accel_bias: [i16; 3],
    /// Gyro bias integral to start from, in degrees per second.
    pub initial_gyro_bias: [f32; 3],
    /// Board mounting rotation as roll, pitch, yaw in centi-degrees.
    pub board_rotation: [i16; 3],
    pub trim_flight: TrimFlight,
}

impl AttitudeSettings {
    /// The configured accelerometer bias as a vector.
    pub fn accel_bias(&self) -> Vector3<i16> {
        Vector3::new(self.accel_bias[0], self.accel_bias[1], self.accel_bias[2])
    }

    /// The configured initial gyro bias integral.
    pub fn initial_gyro_bias(&self) -> GyroscopeBias<f32> {
        let [x, y, z] = self.initial_gyro_bias;
        GyroscopeBias::new(x, y, z)
    }

    /// The board rotation as roll, pitch, yaw in degrees,
    /// or `None` if no rotation is configured.
    pub fn board_rotation_degrees(&self) -> Option<Vector3<f32>> {
        if self.board_rotation == [0, 0, 0] {
            return None;
        }

        let [roll, pitch, yaw] = self.board_rotation;
        Some(Vector3::new(roll, pitch, yaw).map(|centi| f32::from(centi) / 100.0))
    }
}

impl Default for AttitudeSettings {
    fn default() -> Self {
        Self {
            accel_ki: 0.0001,
            accel_kp: 0.05,
            yaw_bias_rate: 0.000001,
            gyro_gain: 0.42,
            accel_tau: 0.0,
            zero_during_arming: true,
            bias_correct_gyro: true,
            accel_bias: [0; 3],
            initial_gyro_bias: [0.0; 3],
            board_rotation: [0; 3],
            trim_flight: TrimFlight::Normal,
        }
    }
}
