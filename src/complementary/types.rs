use crate::error::NumericDegeneracy;
use crate::types::{EulerAngles, GyroscopeReading, Quaternion, Vector3};

/// The published attitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    /// The orientation, with `q0 >= 0`.
    pub quaternion: Quaternion<f32>,
    /// Roll, pitch and yaw, in degrees.
    pub angles: EulerAngles<f32>,
}

impl Attitude {
    /// Builds the attitude for a quaternion.
    pub fn from_quaternion(quaternion: Quaternion<f32>) -> Self {
        Self {
            quaternion,
            angles: quaternion.to_euler_angles(),
        }
    }
}

/// The outcome of one filter update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeUpdate {
    /// The attitude after the update.
    pub attitude: Attitude,
    /// The normalized gravity error, or `None` if the correction was skipped.
    pub gravity_error: Option<Vector3<f32>>,
    /// The rates that were integrated, including the proportional correction.
    pub corrected_gyro: GyroscopeReading<f32>,
    /// The integration step, in seconds.
    pub delta_t: f32,
    /// Set if the quaternion degenerated and was reset to identity.
    pub degeneracy: Option<NumericDegeneracy>,
}
