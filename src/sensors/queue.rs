use crate::time::Ticks;
use heapless::spsc::Consumer;
use heapless::Deque;

/// A source of samples that blocks for at most a bounded time.
pub trait SampleQueue<P> {
    /// Receives the next sample, waiting at most `timeout` ticks.
    ///
    /// Returns `None` if no sample arrived before the deadline.
    fn receive(&mut self, timeout: Ticks) -> Option<P>;
}

/// A non-blocking queue: an empty queue is an expired deadline.
impl<P, const N: usize> SampleQueue<P> for Deque<P, N> {
    fn receive(&mut self, _timeout: Ticks) -> Option<P> {
        self.pop_front()
    }
}

/// The consumer half of a single-producer single-consumer queue, e.g. filled from an ADC interrupt.
impl<'a, P, const N: usize> SampleQueue<P> for Consumer<'a, P, N> {
    fn receive(&mut self, _timeout: Ticks) -> Option<P> {
        self.dequeue()
    }
}

/// One raw accelerometer sample, in device counts and device axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// The hardware FIFO of a digital accelerometer.
pub trait AccelerometerFifo {
    /// The number of samples waiting in the FIFO.
    fn elements(&self) -> usize;

    /// Reads the oldest sample.
    ///
    /// Returns the sample and the number of samples still queued after it,
    /// or `None` if the FIFO is empty.
    fn read(&mut self) -> Option<(AccelSample, usize)>;

    /// Whether the FIFO holds no samples.
    fn is_empty(&self) -> bool {
        self.elements() == 0
    }
}

impl<const N: usize> AccelerometerFifo for Deque<AccelSample, N> {
    fn elements(&self) -> usize {
        self.len()
    }

    fn read(&mut self) -> Option<(AccelSample, usize)> {
        let sample = self.pop_front()?;
        Some((sample, self.len()))
    }
}
