/// Scheduler time in milliseconds since boot. Wraps around.
pub type Ticks = u32;

/// The integration step used when no usable time delta is available.
pub const NOMINAL_DELTA_T: f32 = 0.001;

/// Calculates the elapsed time in seconds between two scheduler ticks.
///
/// Returns [`NOMINAL_DELTA_T`] on the first call (no previous tick) or when
/// both ticks are equal.
pub fn delta_seconds(now: Ticks, last: Option<Ticks>) -> f32 {
    match last {
        Some(last) if last != now => now.wrapping_sub(last) as f32 / 1000.0,
        _ => NOMINAL_DELTA_T,
    }
}
