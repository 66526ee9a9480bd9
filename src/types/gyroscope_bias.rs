use crate::{impl_standard_traits, impl_vector3_conversions};
use uniform_array_derive::UniformArray;

/// The integral gyroscope bias correction term.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct GyroscopeBias<T> {
    /// The correction around the x-axis, in degrees per second.
    pub omega_x: T,
    /// The correction around the y-axis, in degrees per second.
    pub omega_y: T,
    /// The correction around the z-axis, in degrees per second.
    pub omega_z: T,
}

impl_standard_traits!(GyroscopeBias, T, omega_x, omega_y, omega_z);
impl_vector3_conversions!(GyroscopeBias, omega_x, omega_y, omega_z);
