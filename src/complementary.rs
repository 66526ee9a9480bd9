//! A complementary filter fusing gyroscope rates with the gravity reference of the accelerometer.
//!
//! The gyroscope rates are integrated into an orientation quaternion. The cross product
//! between the measured and the predicted direction of gravity corrects the rates
//! proportionally and feeds an integral gyro bias term.

mod filter;
mod types;

pub use filter::AttitudeEstimator;
pub use types::{Attitude, AttitudeUpdate};
