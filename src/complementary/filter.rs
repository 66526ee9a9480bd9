use crate::calibration::FusionGains;
use crate::complementary::types::{Attitude, AttitudeUpdate};
use crate::error::NumericDegeneracy;
use crate::frame::SensorFrame;
use crate::time::{delta_seconds, Ticks};
use crate::types::{GyroscopeBias, GyroscopeReading, Quaternion, Vector3};

/// Vectors shorter than this carry no usable direction.
const MIN_MAGNITUDE: f32 = 1.0e-3;

/// Converts a rate in degrees per second times seconds into a quaternion half-angle increment.
const HALF_DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0 / 2.0;

/// The complementary filter state of one estimator instance.
#[derive(Debug, Clone)]
pub struct AttitudeEstimator {
    q: Quaternion<f32>,
    accel_filtered: Vector3<f32>,
    gravity_filtered: Vector3<f32>,
    last_update: Option<Ticks>,
}

impl AttitudeEstimator {
    /// Initializes a new instance of the [`AttitudeEstimator`] struct at the identity orientation.
    pub fn new() -> Self {
        Self {
            q: Quaternion::identity(),
            accel_filtered: Vector3::default(),
            gravity_filtered: Vector3::default(),
            last_update: None,
        }
    }

    /// The current orientation estimate.
    pub fn quaternion(&self) -> Quaternion<f32> {
        self.q
    }

    /// The current orientation as a publishable attitude.
    pub fn attitude(&self) -> Attitude {
        Attitude::from_quaternion(self.q)
    }

    /// Returns to the identity orientation and clears the filter history.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Performs one filter update at scheduler time `now`.
    ///
    /// The integration step is the time since the previous update.
    ///
    /// ## Arguments
    /// * `now` - The current scheduler time.
    /// * `frame` - The calibrated sensor frame.
    /// * `gains` - The gains in effect for this cycle.
    /// * `gyro_bias` - The gyro bias integral; its x and y components are updated.
    pub fn update(
        &mut self,
        now: Ticks,
        frame: &SensorFrame,
        gains: &FusionGains,
        gyro_bias: &mut GyroscopeBias<f32>,
    ) -> AttitudeUpdate {
        let delta_t = delta_seconds(now, self.last_update);
        self.last_update = Some(now);
        self.step(delta_t, frame, gains, gyro_bias)
    }

    /// Performs one filter update with an explicit integration step, in seconds.
    pub fn step(
        &mut self,
        delta_t: f32,
        frame: &SensorFrame,
        gains: &FusionGains,
        gyro_bias: &mut GyroscopeBias<f32>,
    ) -> AttitudeUpdate {
        let mut gyro = frame.gyro;

        let gravity_error = self.gravity_error(Vector3::from(frame.accel), gains);
        if let Some(error) = gravity_error {
            // The yaw integral is nulled separately during calibration.
            gyro_bias.omega_x += error.x * gains.ki;
            gyro_bias.omega_y += error.y * gains.ki;

            gyro += GyroscopeReading::from(error * (gains.kp / delta_t));
        }

        let predicted = Self::integrate(&self.q, &gyro, delta_t).canonicalized();
        let norm = predicted.norm();
        let mut degeneracy = None;

        if norm < MIN_MAGNITUDE || norm.is_nan() {
            log::warn!("quaternion degenerated (norm {}), resetting to identity", norm);
            self.q = Quaternion::identity();
            degeneracy = Some(NumericDegeneracy { norm });
        } else {
            self.q = predicted.scaled_by_inverse(norm);
        }

        AttitudeUpdate {
            attitude: self.attitude(),
            gravity_error,
            corrected_gyro: gyro,
            delta_t,
            degeneracy,
        }
    }

    /// Calculates the normalized error between the measured and the predicted direction of gravity.
    ///
    /// Both vectors pass through the same low-pass filter so that their delays match.
    /// Returns `None` if either vector is too short to define a direction.
    fn gravity_error(&mut self, accel: Vector3<f32>, gains: &FusionGains) -> Option<Vector3<f32>> {
        Self::low_pass(&mut self.accel_filtered, accel, gains);
        Self::low_pass(&mut self.gravity_filtered, self.q.gravity_in_body(), gains);

        let error = self.accel_filtered.cross(self.gravity_filtered);

        let accel_magnitude = self.accel_filtered.norm();
        let gravity_magnitude = if gains.accel_filter_enabled {
            self.gravity_filtered.norm()
        } else {
            1.0
        };

        if gravity_magnitude > MIN_MAGNITUDE && accel_magnitude > MIN_MAGNITUDE {
            Some(error * (1.0 / (accel_magnitude * gravity_magnitude)))
        } else {
            None
        }
    }

    fn low_pass(filtered: &mut Vector3<f32>, raw: Vector3<f32>, gains: &FusionGains) {
        *filtered = if gains.accel_filter_enabled {
            let alpha = gains.accel_alpha;
            *filtered * alpha + raw * (1.0 - alpha)
        } else {
            raw
        };
    }

    /// Takes one explicit Euler step of the quaternion kinematics for rates in degrees per second.
    fn integrate(q: &Quaternion<f32>, gyro: &GyroscopeReading<f32>, delta_t: f32) -> Quaternion<f32> {
        let (wx, wy, wz) = (gyro.omega_x, gyro.omega_y, gyro.omega_z);
        let scale = delta_t * HALF_DEG_TO_RAD;

        Quaternion::new(
            q.q0 + (-q.q1 * wx - q.q2 * wy - q.q3 * wz) * scale,
            q.q1 + (q.q0 * wx - q.q3 * wy + q.q2 * wz) * scale,
            q.q2 + (q.q3 * wx + q.q0 * wy - q.q1 * wz) * scale,
            q.q3 + (-q.q2 * wx + q.q1 * wy + q.q0 * wz) * scale,
        )
    }
}

impl Default for AttitudeEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccelerometerReading;
    use approx::assert_abs_diff_eq;

    const PLAIN: FusionGains = FusionGains {
        kp: 1.0,
        ki: 0.0,
        yaw_bias_rate: 0.0,
        accel_alpha: 0.0,
        accel_filter_enabled: false,
    };

    fn frame(accel: (f32, f32, f32), gyro: (f32, f32, f32)) -> SensorFrame {
        SensorFrame {
            accel: AccelerometerReading::new(accel.0, accel.1, accel.2),
            gyro: GyroscopeReading::new(gyro.0, gyro.1, gyro.2),
            temperature: 0.0,
        }
    }

    #[test]
    fn test_level_and_still_stays_at_identity() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();

        for tick in 0..100 {
            let update =
                estimator.update(tick * 2, &frame((0.0, 0.0, -9.81), (0.0, 0.0, 0.0)), &PLAIN, &mut bias);
            assert_eq!(update.gravity_error, Some(Vector3::new(0.0, 0.0, 0.0)));
        }

        assert_eq!(estimator.quaternion(), Quaternion::identity());
        assert_eq!(bias, GyroscopeBias::default());
    }

    #[test]
    fn test_norm_and_sign_invariants() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();
        let gains = FusionGains {
            kp: 0.05,
            ki: 0.001,
            yaw_bias_rate: 0.0,
            accel_alpha: 0.9,
            accel_filter_enabled: true,
        };

        for i in 0..2000u32 {
            let t = i as f32 * 0.01;
            let gyro = (
                90.0 * (t * 1.3).sin(),
                -45.0 * (t * 0.7).cos(),
                180.0 * (t * 0.2).sin(),
            );
            let accel = (3.0 * (t * 2.1).sin(), -2.0 * t.cos(), -9.81 + (t * 5.0).sin());
            let update = estimator.update(i * 4, &frame(accel, gyro), &gains, &mut bias);

            let q = update.attitude.quaternion;
            assert_abs_diff_eq!(q.norm(), 1.0, epsilon = 1e-5);
            assert!(q.q0 >= 0.0);
            assert!(update.degeneracy.is_none());
        }
    }

    #[test]
    fn test_zero_quaternion_resets_to_identity() {
        let mut estimator = AttitudeEstimator::new();
        estimator.q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        let mut bias = GyroscopeBias::default();

        let update = estimator.step(0.001, &frame((0.0, 0.0, -9.81), (10.0, 0.0, 0.0)), &PLAIN, &mut bias);

        assert!(update.degeneracy.is_some());
        assert_eq!(estimator.quaternion(), Quaternion::identity());
        assert_eq!(update.attitude.quaternion, Quaternion::identity());
    }

    #[test]
    fn test_nan_quaternion_resets_to_identity() {
        let mut estimator = AttitudeEstimator::new();
        estimator.q = Quaternion::new(f32::NAN, 0.0, 0.0, 0.0);
        let mut bias = GyroscopeBias::default();

        let update = estimator.step(0.001, &frame((0.0, 0.0, -9.81), (0.0, 0.0, 0.0)), &PLAIN, &mut bias);

        assert!(update.degeneracy.is_some());
        assert_eq!(estimator.quaternion(), Quaternion::identity());
    }

    #[test]
    fn test_anti_parallel_gravity_gives_no_correction() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();

        // Predicted gravity is (0, 0, -1); the reading points exactly the other way.
        let update = estimator.step(0.01, &frame((0.0, 0.0, 9.81), (0.0, 0.0, 0.0)), &PLAIN, &mut bias);

        let error = update.gravity_error.expect("both vectors have a direction");
        assert_abs_diff_eq!(error.norm(), 0.0, epsilon = 1e-6);
        assert_eq!(update.corrected_gyro, GyroscopeReading::new(0.0, 0.0, 0.0));
        assert_eq!(estimator.quaternion(), Quaternion::identity());
    }

    #[test]
    fn test_perpendicular_gravity_correction_scales_with_kp() {
        let accel_east = frame((0.0, 9.81, 0.0), (0.0, 0.0, 0.0));

        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();
        let update = estimator.step(0.01, &accel_east, &PLAIN, &mut bias);

        // (0, 1, 0) × (0, 0, -1) = (-1, 0, 0)
        let error = update.gravity_error.expect("both vectors have a direction");
        assert_abs_diff_eq!(error.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(update.corrected_gyro.omega_x, -100.0, epsilon = 1e-3);
        assert_ne!(estimator.quaternion(), Quaternion::identity());

        let half = FusionGains { kp: 0.5, ..PLAIN };
        let mut estimator = AttitudeEstimator::new();
        let update = estimator.step(0.01, &accel_east, &half, &mut bias);
        assert_abs_diff_eq!(update.corrected_gyro.omega_x, -50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_integral_excludes_yaw() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::new(0.0, 0.0, 0.5);
        let gains = FusionGains { ki: 0.1, ..PLAIN };

        estimator.step(0.01, &frame((0.0, 9.81, 0.0), (0.0, 0.0, 0.0)), &gains, &mut bias);

        assert_abs_diff_eq!(bias.omega_x, -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(bias.omega_y, 0.0, epsilon = 1e-6);
        assert_eq!(bias.omega_z, 0.5);
    }

    #[test]
    fn test_free_fall_skips_correction() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();

        let update = estimator.step(0.01, &frame((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)), &PLAIN, &mut bias);
        assert_eq!(update.gravity_error, None);
    }

    #[test]
    fn test_integrates_roll_rate() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();
        let gyro_only = FusionGains { kp: 0.0, ..PLAIN };

        // 90 °/s for one second, in 1 ms steps.
        for _ in 0..1000 {
            estimator.step(0.001, &frame((0.0, 0.0, 0.0), (90.0, 0.0, 0.0)), &gyro_only, &mut bias);
        }

        let angles = estimator.attitude().angles;
        assert_abs_diff_eq!(angles.roll_phi, 90.0, epsilon = 0.1);
        assert_abs_diff_eq!(angles.pitch_theta, 0.0, epsilon = 0.1);
        assert_abs_diff_eq!(angles.yaw_psi, 0.0, epsilon = 0.1);
    }

    #[test]
    fn test_first_update_uses_nominal_step() {
        let mut estimator = AttitudeEstimator::new();
        let mut bias = GyroscopeBias::default();

        let update = estimator.update(5000, &frame((0.0, 0.0, -9.81), (0.0, 0.0, 0.0)), &PLAIN, &mut bias);
        assert_eq!(update.delta_t, 0.001);

        let update = estimator.update(5004, &frame((0.0, 0.0, -9.81), (0.0, 0.0, 0.0)), &PLAIN, &mut bias);
        assert_eq!(update.delta_t, 0.004);
    }
}
