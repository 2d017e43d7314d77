//! Proximity sensor input

use embassy_rp::gpio::Input;
use lumina_core::gesture::Edge;
use lumina_hal::ProximityLine;

/// Electrical edge to wait for next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitFor {
    High,
    Low,
}

/// Last reported logical level of the proximity line
///
/// Edges are reported strictly alternating: after `Rising` the next wait is
/// for the de-asserting edge and vice versa, so a fast pulse can never be
/// folded into a single edge of the wrong polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeTracker {
    asserted: bool,
    inverted: bool,
}

impl EdgeTracker {
    fn new(electrical_high: bool, inverted: bool) -> Self {
        Self {
            asserted: electrical_high != inverted,
            inverted,
        }
    }

    fn next_wait(&self) -> WaitFor {
        // Asserting edge is electrically rising unless the line is inverted
        if !self.asserted != self.inverted {
            WaitFor::High
        } else {
            WaitFor::Low
        }
    }

    fn advance(&mut self) -> Edge {
        self.asserted = !self.asserted;
        if self.asserted {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}

/// Proximity sensor line with configurable polarity
pub struct ProximityInput<'d> {
    input: Input<'d>,
    tracker: EdgeTracker,
}

impl<'d> ProximityInput<'d> {
    pub fn new(input: Input<'d>, inverted: bool) -> Self {
        let tracker = EdgeTracker::new(input.is_high(), inverted);
        Self { input, tracker }
    }

    /// Wait for the next edge
    ///
    /// `Rising` always means "object came into range", regardless of the
    /// electrical polarity.
    pub async fn wait_for_edge(&mut self) -> Edge {
        match self.tracker.next_wait() {
            WaitFor::High => self.input.wait_for_rising_edge().await,
            WaitFor::Low => self.input.wait_for_falling_edge().await,
        }
        self.tracker.advance()
    }
}

impl ProximityLine for ProximityInput<'_> {
    fn is_asserted(&self) -> bool {
        self.input.is_high() != self.tracker.inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_alternate() {
        let mut tracker = EdgeTracker::new(false, false);
        assert_eq!(tracker.next_wait(), WaitFor::High);
        assert_eq!(tracker.advance(), Edge::Rising);
        assert_eq!(tracker.next_wait(), WaitFor::Low);
        assert_eq!(tracker.advance(), Edge::Falling);
        assert_eq!(tracker.next_wait(), WaitFor::High);
    }

    #[test]
    fn test_inverted_line() {
        // Idle high, asserted low
        let mut tracker = EdgeTracker::new(true, true);
        assert_eq!(tracker.next_wait(), WaitFor::Low);
        assert_eq!(tracker.advance(), Edge::Rising);
        assert_eq!(tracker.next_wait(), WaitFor::High);
        assert_eq!(tracker.advance(), Edge::Falling);
    }

    #[test]
    fn test_asserted_at_start_waits_for_release() {
        let mut tracker = EdgeTracker::new(true, false);
        assert_eq!(tracker.next_wait(), WaitFor::Low);
        assert_eq!(tracker.advance(), Edge::Falling);
    }
}
