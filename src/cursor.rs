use std::time::Duration;

use crate::clock::Timestamp;
use crate::schedule::TaskQueue;

pub const DEFAULT_TRAIL_DELAY: Duration = Duration::from_millis(100);
const RING_RADIUS: f64 = 10.0;
const DOT_RADIUS: f64 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How pending trail writes are treated when the pointer moves again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailMode {
    /// Every move lands on the dot `trail_delay` later, replaying the path.
    #[default]
    Trail,
    /// A new move cancels the pending one; the dot lands once the pointer rests.
    Latest,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorConfig {
    pub trail_delay: Duration,
    pub mode: TrailMode,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            trail_delay: DEFAULT_TRAIL_DELAY,
            mode: TrailMode::Trail,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorPositions {
    pub immediate: Point,
    pub delayed: Point,
}

impl CursorPositions {
    pub fn ring_transform(&self) -> String {
        format!(
            "translate({}px, {}px)",
            self.immediate.x - RING_RADIUS,
            self.immediate.y - RING_RADIUS
        )
    }

    pub fn dot_transform(&self) -> String {
        format!(
            "translate({}px, {}px)",
            self.delayed.x - DOT_RADIUS,
            self.delayed.y - DOT_RADIUS
        )
    }
}

/// Page-global pointer follower: one position tracks the pointer, the other
/// trails it.
#[derive(Clone, Debug)]
pub struct CursorTracker {
    config: CursorConfig,
    positions: CursorPositions,
    pending: TaskQueue<Point>,
    disposed: bool,
}

impl CursorTracker {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            positions: CursorPositions::default(),
            pending: TaskQueue::new(),
            disposed: false,
        }
    }

    pub fn pointer_moved(&mut self, now: Timestamp, point: Point) {
        if self.disposed {
            return;
        }
        self.positions.immediate = point;
        if self.config.mode == TrailMode::Latest {
            self.pending.clear();
        }
        self.pending.schedule(now, self.config.trail_delay, point);
    }

    /// Applies every trail write due at `now`. Returns true when the dot moved.
    pub fn advance(&mut self, now: Timestamp) -> bool {
        match self.pending.drain_due(now).pop() {
            Some(point) => {
                self.positions.delayed = point;
                true
            }
            None => false,
        }
    }

    pub fn next_due(&self) -> Option<Timestamp> {
        self.pending.next_due()
    }

    pub fn positions(&self) -> CursorPositions {
        self.positions
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: f64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn immediate_follows_every_move() {
        let mut tracker = CursorTracker::new(CursorConfig::default());

        tracker.pointer_moved(at(0.0), Point::new(10.0, 20.0));
        tracker.pointer_moved(at(5.0), Point::new(30.0, 40.0));

        assert_eq!(tracker.positions().immediate, Point::new(30.0, 40.0));
        assert_eq!(tracker.positions().delayed, Point::default());
    }

    #[test]
    fn delayed_trails_by_the_configured_latency() {
        let mut tracker = CursorTracker::new(CursorConfig::default());
        tracker.pointer_moved(at(0.0), Point::new(1.0, 1.0));
        tracker.pointer_moved(at(40.0), Point::new(2.0, 2.0));
        tracker.pointer_moved(at(80.0), Point::new(3.0, 3.0));

        assert!(!tracker.advance(at(99.0)));
        assert_eq!(tracker.next_due(), Some(at(100.0)));
        assert!(tracker.advance(at(100.0)));
        assert_eq!(tracker.positions().delayed, Point::new(1.0, 1.0));
        // a late tick catches up to the newest due write
        assert!(tracker.advance(at(141.0)));
        assert_eq!(tracker.positions().delayed, Point::new(2.0, 2.0));
        assert!(tracker.advance(at(180.0)));
        assert_eq!(tracker.positions().delayed, Point::new(3.0, 3.0));
        assert_eq!(tracker.next_due(), None);
    }

    #[test]
    fn latest_mode_drops_superseded_writes() {
        let mut tracker = CursorTracker::new(CursorConfig {
            trail_delay: Duration::from_millis(100),
            mode: TrailMode::Latest,
        });
        tracker.pointer_moved(at(0.0), Point::new(1.0, 1.0));
        tracker.pointer_moved(at(50.0), Point::new(2.0, 2.0));

        assert_eq!(tracker.pending(), 1);
        assert!(!tracker.advance(at(100.0)));
        assert!(tracker.advance(at(150.0)));
        assert_eq!(tracker.positions().delayed, Point::new(2.0, 2.0));
    }

    #[test]
    fn offscreen_coordinates_are_kept() {
        let mut tracker = CursorTracker::new(CursorConfig::default());
        tracker.pointer_moved(at(0.0), Point::new(-50.0, 5_000.0));
        tracker.advance(at(100.0));

        let positions = tracker.positions();
        assert_eq!(positions.ring_transform(), "translate(-60px, 4990px)");
        assert_eq!(positions.dot_transform(), "translate(-53px, 4997px)");
    }

    #[test]
    fn dispose_cancels_pending_trail() {
        let mut tracker = CursorTracker::new(CursorConfig::default());
        tracker.pointer_moved(at(0.0), Point::new(9.0, 9.0));

        tracker.dispose();
        tracker.pointer_moved(at(10.0), Point::new(1.0, 1.0));

        assert!(!tracker.advance(at(1_000.0)));
        assert_eq!(tracker.positions().delayed, Point::default());
        assert_eq!(tracker.positions().immediate, Point::new(9.0, 9.0));
    }
}
