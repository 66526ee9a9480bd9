//! Value types shared by the estimation pipeline.

mod accelerometer_reading;
mod euler_angles;
mod gyroscope_bias;
mod gyroscope_reading;
mod quaternion;
mod rotation_matrix;
mod vector3;

pub use crate::types::accelerometer_reading::AccelerometerReading;
pub use crate::types::euler_angles::EulerAngles;
pub use crate::types::gyroscope_bias::GyroscopeBias;
pub use crate::types::gyroscope_reading::GyroscopeReading;
pub use crate::types::quaternion::Quaternion;
pub use crate::types::rotation_matrix::RotationMatrix;
pub use crate::types::vector3::Vector3;
