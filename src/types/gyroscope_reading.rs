use crate::{impl_standard_traits, impl_vector3_conversions};
use uniform_array_derive::UniformArray;

/// An angular rate reading in the body frame.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct GyroscopeReading<T> {
    /// The angular rate around the x-axis, in degrees per second.
    pub omega_x: T,
    /// The angular rate around the y-axis, in degrees per second.
    pub omega_y: T,
    /// The angular rate around the z-axis, in degrees per second.
    pub omega_z: T,
}

impl<T> GyroscopeReading<T> {
    /// Adds a bias correction term to every axis.
    #[inline]
    pub fn corrected_by(self, bias: &crate::types::GyroscopeBias<T>) -> Self
    where
        T: Copy + core::ops::Add<Output = T>,
    {
        Self {
            omega_x: self.omega_x + bias.omega_x,
            omega_y: self.omega_y + bias.omega_y,
            omega_z: self.omega_z + bias.omega_z,
        }
    }
}

impl_standard_traits!(GyroscopeReading, T, omega_x, omega_y, omega_z);
impl_vector3_conversions!(GyroscopeReading, omega_x, omega_y, omega_z);
