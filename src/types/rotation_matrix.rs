use crate::types::{Quaternion, Vector3};
use core::ops::{Add, Mul};
use num_traits::Float;

/// A 3×3 direction cosine matrix, stored row by row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix<T> {
    pub rows: [Vector3<T>; 3],
}

impl<T> RotationMatrix<T> {
    /// Initializes a new [`RotationMatrix`] from its rows.
    #[inline(always)]
    pub const fn new(rows: [Vector3<T>; 3]) -> Self {
        Self { rows }
    }

    /// The identity matrix.
    pub fn identity() -> Self
    where
        T: Float,
    {
        let (o, z) = (T::one(), T::zero());
        Self::new([
            Vector3::new(o, z, z),
            Vector3::new(z, o, z),
            Vector3::new(z, z, o),
        ])
    }

    /// Calculates the matrix-vector product `R · v`.
    #[inline]
    pub fn rotate(&self, vector: Vector3<T>) -> Vector3<T>
    where
        T: Copy + Mul<Output = T> + Add<Output = T>,
    {
        Vector3::new(
            self.rows[0].dot(vector),
            self.rows[1].dot(vector),
            self.rows[2].dot(vector),
        )
    }

    /// Returns the transposed matrix.
    pub fn transposed(&self) -> Self
    where
        T: Copy,
    {
        let r = &self.rows;
        Self::new([
            Vector3::new(r[0].x, r[1].x, r[2].x),
            Vector3::new(r[0].y, r[1].y, r[2].y),
            Vector3::new(r[0].z, r[1].z, r[2].z),
        ])
    }
}

impl<T> From<Quaternion<T>> for RotationMatrix<T>
where
    T: Float,
{
    fn from(q: Quaternion<T>) -> Self {
        let two = T::one() + T::one();
        let q0s = q.q0 * q.q0;
        let q1s = q.q1 * q.q1;
        let q2s = q.q2 * q.q2;
        let q3s = q.q3 * q.q3;

        Self::new([
            Vector3::new(
                q0s + q1s - q2s - q3s,
                two * (q.q1 * q.q2 + q.q0 * q.q3),
                two * (q.q1 * q.q3 - q.q0 * q.q2),
            ),
            Vector3::new(
                two * (q.q1 * q.q2 - q.q0 * q.q3),
                q0s - q1s + q2s - q3s,
                two * (q.q2 * q.q3 + q.q0 * q.q1),
            ),
            Vector3::new(
                two * (q.q1 * q.q3 + q.q0 * q.q2),
                two * (q.q2 * q.q3 - q.q0 * q.q1),
                q0s - q1s - q2s + q3s,
            ),
        ])
    }
}
