use crate::{impl_standard_traits, impl_vector3_conversions};
use uniform_array_derive::UniformArray;

/// A calibrated accelerometer reading in the body frame.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct AccelerometerReading<T> {
    /// The acceleration along the x-axis, in meters per second squared.
    pub x: T,
    /// The acceleration along the y-axis, in meters per second squared.
    pub y: T,
    /// The acceleration along the z-axis, in meters per second squared.
    pub z: T,
}

impl_standard_traits!(AccelerometerReading, T, x, y, z);
impl_vector3_conversions!(AccelerometerReading, x, y, z);
