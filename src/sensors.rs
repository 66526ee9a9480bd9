//! Acquisition of one raw frame per cycle from the board's sensors.
//!
//! Two board variants are supported:
//!
//! * [`SplitSensorAdapter`]: analog gyros sampled by the ADC and a digital
//!   accelerometer with a hardware FIFO.
//! * [`UnifiedImuAdapter`]: a single IMU delivering both readings in one sample.
//!
//! Both yield a [`RawFrame`] with the accelerometer in raw counts and the gyro
//! rates in degrees per second, in body axes.

mod queue;
mod split;
mod unified;

pub use queue::{AccelSample, AccelerometerFifo, SampleQueue};
pub use split::{GyroAdcSample, SplitSensorAdapter, GYRO_NEUTRAL, MAX_ACCEL_BURST};
pub use unified::{ImuSample, ImuScale, UnifiedImuAdapter};

use crate::error::AcquisitionError;
use crate::frame::RawFrame;
use crate::settings::AttitudeSettings;
use crate::time::Ticks;

/// The board revision fitted with the unified IMU.
pub const UNIFIED_IMU_BOARD_REVISION: u8 = 0x02;

/// The outcome of a successful acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Acquired {
    /// A fresh frame from the sensors.
    Frame(RawFrame),
    /// The sensor outputs are driven externally, e.g. by a simulator.
    /// Nothing was read and fusion is skipped.
    PassThrough,
}

/// A source of one raw frame per cycle.
pub trait SensorAdapter {
    /// The acquisition timeout used by the coordinator, in ticks.
    fn default_timeout(&self) -> Ticks;

    /// Waits at most `timeout` ticks for the next frame.
    fn next_frame(&mut self, timeout: Ticks) -> Result<Acquired, AcquisitionError>;

    /// Enables or disables pass-through; see [`Acquired::PassThrough`].
    fn set_pass_through(&mut self, enabled: bool);

    /// Whether the sensors produce data yet.
    fn is_ready(&self) -> bool;

    /// Takes over the settings relevant to the adapter.
    fn apply_settings(&mut self, settings: &AttitudeSettings);
}

/// The sensor variant of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardVariant {
    Split,
    UnifiedImu,
}

impl BoardVariant {
    /// Determines the variant from the board revision.
    pub fn from_board_revision(revision: u8) -> Self {
        if revision == UNIFIED_IMU_BOARD_REVISION {
            Self::UnifiedImu
        } else {
            Self::Split
        }
    }
}

/// The sensor adapter of the board in use, selected once at start-up.
#[derive(Debug)]
pub enum BoardSensors<G, A, Q> {
    Split(SplitSensorAdapter<G, A>),
    UnifiedImu(UnifiedImuAdapter<Q>),
}

impl<G, A, Q> BoardSensors<G, A, Q>
where
    G: SampleQueue<GyroAdcSample>,
    A: AccelerometerFifo,
    Q: SampleQueue<ImuSample>,
{
    /// Builds the adapter matching the board revision.
    ///
    /// Only the sources of the selected variant are constructed.
    pub fn from_board_revision<S, U>(revision: u8, split: S, unified: U) -> Self
    where
        S: FnOnce() -> SplitSensorAdapter<G, A>,
        U: FnOnce() -> UnifiedImuAdapter<Q>,
    {
        let variant = BoardVariant::from_board_revision(revision);
        log::info!("board revision {:#04x}, using {:?} sensors", revision, variant);

        match variant {
            BoardVariant::Split => Self::Split(split()),
            BoardVariant::UnifiedImu => Self::UnifiedImu(unified()),
        }
    }

    pub fn variant(&self) -> BoardVariant {
        match self {
            Self::Split(_) => BoardVariant::Split,
            Self::UnifiedImu(_) => BoardVariant::UnifiedImu,
        }
    }
}

impl<G, A, Q> SensorAdapter for BoardSensors<G, A, Q>
where
    G: SampleQueue<GyroAdcSample>,
    A: AccelerometerFifo,
    Q: SampleQueue<ImuSample>,
{
    fn default_timeout(&self) -> Ticks {
        match self {
            Self::Split(adapter) => adapter.default_timeout(),
            Self::UnifiedImu(adapter) => adapter.default_timeout(),
        }
    }

    fn next_frame(&mut self, timeout: Ticks) -> Result<Acquired, AcquisitionError> {
        match self {
            Self::Split(adapter) => adapter.next_frame(timeout),
            Self::UnifiedImu(adapter) => adapter.next_frame(timeout),
        }
    }

    fn set_pass_through(&mut self, enabled: bool) {
        match self {
            Self::Split(adapter) => adapter.set_pass_through(enabled),
            Self::UnifiedImu(adapter) => adapter.set_pass_through(enabled),
        }
    }

    fn is_ready(&self) -> bool {
        match self {
            Self::Split(adapter) => adapter.is_ready(),
            Self::UnifiedImu(adapter) => adapter.is_ready(),
        }
    }

    fn apply_settings(&mut self, settings: &AttitudeSettings) {
        match self {
            Self::Split(adapter) => adapter.apply_settings(settings),
            Self::UnifiedImu(adapter) => adapter.apply_settings(settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Deque;

    type Board = BoardSensors<Deque<GyroAdcSample, 2>, Deque<AccelSample, 8>, Deque<ImuSample, 2>>;

    fn board(revision: u8) -> Board {
        BoardSensors::from_board_revision(
            revision,
            || SplitSensorAdapter::new(Deque::new(), Deque::new()),
            || UnifiedImuAdapter::new(Deque::new(), ImuScale::default()),
        )
    }

    #[test]
    fn test_variant_selection() {
        assert_eq!(BoardVariant::from_board_revision(0x01), BoardVariant::Split);
        assert_eq!(BoardVariant::from_board_revision(0x02), BoardVariant::UnifiedImu);
        assert_eq!(BoardVariant::from_board_revision(0x03), BoardVariant::Split);
    }

    #[test]
    fn test_board_delegates_to_variant() {
        let mut split = board(0x01);
        assert_eq!(split.variant(), BoardVariant::Split);
        assert_eq!(split.default_timeout(), 50);
        assert!(!split.is_ready());
        assert_eq!(split.next_frame(50), Err(AcquisitionError::Timeout));

        let mut unified = board(0x02);
        assert_eq!(unified.variant(), BoardVariant::UnifiedImu);
        assert_eq!(unified.default_timeout(), 4);
        assert!(unified.is_ready());
        assert_eq!(unified.next_frame(4), Err(AcquisitionError::NoData));
    }
}
