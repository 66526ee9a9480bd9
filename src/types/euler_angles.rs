use crate::impl_standard_traits;
use uniform_array_derive::UniformArray;

#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct EulerAngles<T> {
    /// The roll angle, in degrees.
    pub roll_phi: T,
    /// The pitch angle, in degrees.
    pub pitch_theta: T,
    /// The yaw angle, in degrees.
    pub yaw_psi: T,
}

impl_standard_traits!(EulerAngles, T, roll_phi, pitch_theta, yaw_psi);
