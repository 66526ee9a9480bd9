use crate::types::{EulerAngles, RotationMatrix, Vector3};
use core::fmt::{Debug, Formatter};
use num_traits::Float;
use uniform_array_derive::UniformArray;

/// An orientation quaternion in scalar-first `(q0, q1, q2, q3)` order.
#[derive(UniformArray, Copy)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct Quaternion<T> {
    /// The scalar part.
    pub q0: T,
    pub q1: T,
    pub q2: T,
    pub q3: T,
}

impl<T> Quaternion<T> {
    /// Initializes a new [`Quaternion`] instance.
    #[inline(always)]
    pub const fn new(q0: T, q1: T, q2: T, q3: T) -> Self {
        Self { q0, q1, q2, q3 }
    }

    /// The identity rotation `(1, 0, 0, 0)`.
    #[inline]
    pub fn identity() -> Self
    where
        T: Float,
    {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Builds the rotation quaternion for roll, pitch and yaw angles given in degrees.
    ///
    /// The result is sign-canonicalized so that `q0 >= 0`.
    pub fn from_roll_pitch_yaw(roll: T, pitch: T, yaw: T) -> Self
    where
        T: Float,
    {
        let two = T::one() + T::one();
        let (sphi, cphi) = (roll.to_radians() / two).sin_cos();
        let (sthe, cthe) = (pitch.to_radians() / two).sin_cos();
        let (spsi, cpsi) = (yaw.to_radians() / two).sin_cos();

        Self::new(
            cphi * cthe * cpsi + sphi * sthe * spsi,
            sphi * cthe * cpsi - cphi * sthe * spsi,
            cphi * sthe * cpsi + sphi * cthe * spsi,
            cphi * cthe * spsi - sphi * sthe * cpsi,
        )
        .canonicalized()
    }

    /// Calculates the squared norm.
    #[inline]
    pub fn norm_sq(&self) -> T
    where
        T: Float,
    {
        self.q0 * self.q0 + self.q1 * self.q1 + self.q2 * self.q2 + self.q3 * self.q3
    }

    /// Calculates the norm.
    #[inline]
    pub fn norm(&self) -> T
    where
        T: Float,
    {
        self.norm_sq().sqrt()
    }

    /// Returns the quaternion divided by `norm`.
    #[inline]
    pub fn scaled_by_inverse(&self, norm: T) -> Self
    where
        T: Float,
    {
        Self::new(self.q0 / norm, self.q1 / norm, self.q2 / norm, self.q3 / norm)
    }

    /// Negates all components if the scalar part is negative.
    ///
    /// `q` and `-q` describe the same rotation; this picks the representative with `q0 >= 0`.
    #[inline]
    pub fn canonicalized(self) -> Self
    where
        T: Float,
    {
        if self.q0 < T::zero() {
            Self::new(-self.q0, -self.q1, -self.q2, -self.q3)
        } else {
            self
        }
    }

    /// The direction of gravity (down) expressed in the body frame.
    pub fn gravity_in_body(&self) -> Vector3<T>
    where
        T: Float,
    {
        let two = T::one() + T::one();
        let q = self;
        Vector3::new(
            -(two * (q.q1 * q.q3 - q.q0 * q.q2)),
            -(two * (q.q2 * q.q3 + q.q0 * q.q1)),
            -(q.q0 * q.q0 - q.q1 * q.q1 - q.q2 * q.q2 + q.q3 * q.q3),
        )
    }

    /// Converts the quaternion into roll, pitch and yaw angles, in degrees.
    pub fn to_euler_angles(&self) -> EulerAngles<T>
    where
        T: Float,
    {
        let r = RotationMatrix::from(*self);
        let r11 = r.rows[0].x;
        let r12 = r.rows[0].y;
        let r13 = r.rows[0].z;
        let r23 = r.rows[1].z;
        let r33 = r.rows[2].z;

        // Clamp against rounding slightly outside the arcsine domain.
        let sin_pitch = (-r13).max(-T::one()).min(T::one());

        EulerAngles::new(
            r23.atan2(r33).to_degrees(),
            sin_pitch.asin().to_degrees(),
            r12.atan2(r11).to_degrees(),
        )
    }
}

impl<T> Clone for Quaternion<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            q0: self.q0.clone(),
            q1: self.q1.clone(),
            q2: self.q2.clone(),
            q3: self.q3.clone(),
        }
    }
}

impl<T> PartialEq for Quaternion<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.q0 == other.q0 && self.q1 == other.q1 && self.q2 == other.q2 && self.q3 == other.q3
    }
}

impl<T> Debug for Quaternion<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Quaternion")
            .field(&self.q0)
            .field(&self.q1)
            .field(&self.q2)
            .field(&self.q3)
            .finish()
    }
}

impl<T> From<Quaternion<T>> for (T, T, T, T) {
    fn from(value: Quaternion<T>) -> Self {
        (value.q0, value.q1, value.q2, value.q3)
    }
}
