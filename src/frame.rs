//! Per-cycle sensor frames.

use crate::types::{AccelerometerReading, GyroscopeReading, Vector3};

/// The gravitational acceleration, in meters per second squared.
pub const GRAV: f32 = 9.81;

/// The size of one raw accelerometer count, in meters per second squared.
pub const ACCEL_SCALE: f32 = GRAV * 0.004;

/// A frame as produced by a sensor adapter, before bias correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawFrame {
    /// The acceleration in raw counts of [`ACCEL_SCALE`].
    pub accel: Vector3<f32>,
    /// The angular rates, in degrees per second.
    pub gyro: GyroscopeReading<f32>,
    /// The sensor temperature.
    pub temperature: f32,
}

/// A calibrated frame, in body coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorFrame {
    /// The acceleration, in meters per second squared.
    pub accel: AccelerometerReading<f32>,
    /// The angular rates, in degrees per second.
    pub gyro: GyroscopeReading<f32>,
    pub temperature: f32,
}
