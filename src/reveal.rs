//! Scroll-triggered reveals.
//!
//! A [`Revealer`] watches one region of the page. The host feeds it the
//! region's viewport geometry on every scroll; the revealer turns line
//! crossings into play/reverse commands on a staggered timeline and reports
//! the pose of every child at any instant.

use std::time::Duration;

use crate::clock::Timestamp;
use crate::motion::{Lerp, Tween};

/// Element bounds relative to the top of the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub top: f64,
    pub bottom: f64,
    pub viewport_height: f64,
}

impl Geometry {
    pub fn new(top: f64, height: f64, viewport_height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            viewport_height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// A horizontal line across the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportLine {
    /// Fraction of the viewport height from the top, `0.8` for "80%".
    Fraction(f64),
    /// Pixels above the bottom of the viewport, `100.0` for "bottom-=100".
    FromBottom(f64),
    /// Pixels below the top of the viewport.
    FromTop(f64),
}

impl ViewportLine {
    pub fn offset(self, viewport_height: f64) -> f64 {
        match self {
            Self::Fraction(fraction) => viewport_height * fraction,
            Self::FromBottom(pixels) => viewport_height - pixels,
            Self::FromTop(pixels) => pixels,
        }
    }
}

/// "When this edge of the element reaches that line of the viewport."
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub edge: Edge,
    pub line: ViewportLine,
}

impl Threshold {
    pub const fn new(edge: Edge, line: ViewportLine) -> Self {
        Self { edge, line }
    }

    /// True once the edge has scrolled up to or past the line.
    pub fn is_crossed(&self, geometry: &Geometry) -> bool {
        let edge = match self.edge {
            Edge::Top => geometry.top,
            Edge::Bottom => geometry.bottom,
        };
        edge <= self.line.offset(geometry.viewport_height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Reverse,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// "play none none none"
    pub const PLAY_ONCE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::None,
    };

    /// "play none none reverse"
    pub const PLAY_REVERSE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    fn for_crossing(&self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub start: Threshold,
    pub end: Threshold,
    pub actions: ToggleActions,
}

impl ScrollTrigger {
    /// "top 80%" to "bottom 20%".
    pub const fn upper_fifth() -> Self {
        Self {
            start: Threshold::new(Edge::Top, ViewportLine::Fraction(0.8)),
            end: Threshold::new(Edge::Bottom, ViewportLine::Fraction(0.2)),
            actions: ToggleActions::PLAY_REVERSE,
        }
    }

    /// "top bottom-=100" to "bottom top".
    pub const fn near_bottom() -> Self {
        Self {
            start: Threshold::new(Edge::Top, ViewportLine::FromBottom(100.0)),
            end: Threshold::new(Edge::Bottom, ViewportLine::FromTop(0.0)),
            actions: ToggleActions::PLAY_REVERSE,
        }
    }

    pub const fn with_actions(mut self, actions: ToggleActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn zone(&self, geometry: &Geometry) -> Zone {
        if !self.start.is_crossed(geometry) {
            Zone::Before
        } else if self.end.is_crossed(geometry) {
            Zone::After
        } else {
            Zone::Active
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Remembers which zone an element was last seen in and reports the line
/// crossings between observations.
#[derive(Clone, Debug, Default)]
pub struct ZoneTracker {
    last: Option<Zone>,
}

impl ZoneTracker {
    pub fn observe(&mut self, zone: Zone) -> Vec<Crossing> {
        let previous = self.last.replace(zone);
        match (previous.unwrap_or(Zone::Before), zone) {
            (Zone::Before, Zone::Active) => vec![Crossing::Enter],
            (Zone::Before, Zone::After) => vec![Crossing::Enter, Crossing::Leave],
            (Zone::Active, Zone::After) => vec![Crossing::Leave],
            (Zone::After, Zone::Active) => vec![Crossing::EnterBack],
            (Zone::After, Zone::Before) => vec![Crossing::EnterBack, Crossing::LeaveBack],
            (Zone::Active, Zone::Before) => vec![Crossing::LeaveBack],
            _ => Vec::new(),
        }
    }

    pub fn zone(&self) -> Option<Zone> {
        self.last
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Position on a timeline of fixed length, moving in one direction from an
/// anchor until told otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    length: Duration,
    direction: Direction,
    anchor_at: Timestamp,
    anchor_position: Duration,
    moving: bool,
}

impl Playhead {
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            direction: Direction::Backward,
            anchor_at: Timestamp::ZERO,
            anchor_position: Duration::ZERO,
            moving: false,
        }
    }

    pub fn position(&self, now: Timestamp) -> Duration {
        if !self.moving {
            return self.anchor_position;
        }
        let travelled = now.since(self.anchor_at);
        match self.direction {
            Direction::Forward => (self.anchor_position + travelled).min(self.length),
            Direction::Backward => self.anchor_position.saturating_sub(travelled),
        }
    }

    /// Turns the playhead around at its current position.
    pub fn run(&mut self, now: Timestamp, direction: Direction) {
        self.anchor_position = self.position(now);
        self.anchor_at = now;
        self.direction = direction;
        self.moving = true;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_settled(&self, now: Timestamp) -> bool {
        let position = self.position(now);
        match self.direction {
            Direction::Forward => position >= self.length,
            Direction::Backward => position.is_zero(),
        }
    }

    pub fn length(&self) -> Duration {
        self.length
    }
}

/// One tween applied to `children` elements, each starting `stagger` after
/// the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealTimeline<P> {
    pub tween: Tween<P>,
    pub stagger: Duration,
    pub children: usize,
}

impl<P: Lerp> RevealTimeline<P> {
    pub fn new(tween: Tween<P>, stagger: Duration, children: usize) -> Self {
        Self {
            tween,
            stagger,
            children,
        }
    }

    pub fn length(&self) -> Duration {
        let extra = self.children.saturating_sub(1) as u32;
        self.tween.total() + self.stagger * extra
    }

    pub fn child_offset(&self, index: usize) -> Duration {
        self.stagger * index as u32
    }

    pub fn sample(&self, index: usize, position: Duration) -> P {
        self.tween
            .sample(position.saturating_sub(self.child_offset(index)))
    }

    pub fn sample_all(&self, position: Duration) -> Vec<P> {
        (0..self.children)
            .map(|index| self.sample(index, position))
            .collect()
    }

    /// The pose every child holds before the timeline has run.
    pub fn start(&self) -> P {
        self.tween.from.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealTrigger {
    /// Plays once when the owning component mounts.
    Mount,
    Scroll(ScrollTrigger),
}

/// Scoped controller for one reveal: created on mount, disposed on unmount.
#[derive(Clone, Debug)]
pub struct Revealer<P> {
    trigger: RevealTrigger,
    timeline: RevealTimeline<P>,
    zones: ZoneTracker,
    playhead: Playhead,
    plays: u32,
    reverses: u32,
    disposed: bool,
}

impl<P: Lerp> Revealer<P> {
    pub fn new(trigger: RevealTrigger, timeline: RevealTimeline<P>) -> Self {
        let playhead = Playhead::new(timeline.length());
        Self {
            trigger,
            timeline,
            zones: ZoneTracker::default(),
            playhead,
            plays: 0,
            reverses: 0,
            disposed: false,
        }
    }

    pub fn mount(&mut self, now: Timestamp) {
        if self.trigger == RevealTrigger::Mount {
            self.apply(now, ToggleAction::Play);
        }
    }

    /// Feeds new geometry and returns the actions that actually changed the
    /// playhead.
    pub fn observe(&mut self, now: Timestamp, geometry: &Geometry) -> Vec<ToggleAction> {
        let RevealTrigger::Scroll(trigger) = self.trigger else {
            return Vec::new();
        };
        if self.disposed {
            return Vec::new();
        }

        self.zones
            .observe(trigger.zone(geometry))
            .into_iter()
            .map(|crossing| trigger.actions.for_crossing(crossing))
            .filter(|action| self.apply(now, *action))
            .collect()
    }

    fn apply(&mut self, now: Timestamp, action: ToggleAction) -> bool {
        let direction = match action {
            ToggleAction::Play => Direction::Forward,
            ToggleAction::Reverse => Direction::Backward,
            ToggleAction::None => return false,
        };

        // A fresh playhead faces backwards, so reversing an unplayed reveal is a no-op.
        if self.playhead.direction() == direction {
            return false;
        }

        self.playhead.run(now, direction);
        match direction {
            Direction::Forward => self.plays += 1,
            Direction::Backward => self.reverses += 1,
        }
        true
    }

    pub fn progress(&self, now: Timestamp) -> f64 {
        let length = self.playhead.length();
        if length.is_zero() {
            return if self.playhead.direction() == Direction::Forward { 1.0 } else { 0.0 };
        }
        self.playhead.position(now).as_secs_f64() / length.as_secs_f64()
    }

    /// A zero-length timeline has no interior to sample: it shows its end
    /// only while facing forward.
    fn held_at_start(&self) -> bool {
        self.playhead.length().is_zero() && self.playhead.direction() != Direction::Forward
    }

    pub fn poses(&self, now: Timestamp) -> Vec<P> {
        if self.held_at_start() {
            return (0..self.timeline.children)
                .map(|_| self.timeline.start())
                .collect();
        }
        self.timeline.sample_all(self.playhead.position(now))
    }

    pub fn pose(&self, index: usize, now: Timestamp) -> P {
        if self.held_at_start() {
            return self.timeline.start();
        }
        self.timeline.sample(index, self.playhead.position(now))
    }

    pub fn is_settled(&self, now: Timestamp) -> bool {
        self.disposed || self.playhead.is_settled(now)
    }

    pub fn zone(&self) -> Option<Zone> {
        self.zones.zone()
    }

    pub fn plays(&self) -> u32 {
        self.plays
    }

    pub fn reverses(&self) -> u32 {
        self.reverses
    }

    pub fn children(&self) -> usize {
        self.timeline.children
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Anything that reacts to where its element sits in the viewport.
pub trait ScrollDriven {
    fn observe(&mut self, now: Timestamp, geometry: &Geometry) -> Vec<ToggleAction>;
    fn is_settled(&self, now: Timestamp) -> bool;
    fn dispose(&mut self);
}

impl<P: Lerp> ScrollDriven for Revealer<P> {
    fn observe(&mut self, now: Timestamp, geometry: &Geometry) -> Vec<ToggleAction> {
        Revealer::observe(self, now, geometry)
    }

    fn is_settled(&self, now: Timestamp) -> bool {
        Revealer::is_settled(self, now)
    }

    fn dispose(&mut self) {
        Revealer::dispose(self);
    }
}

/// Progress of a "top top" to "bottom top" scrub, used for parallax.
pub fn scrub_progress(geometry: &Geometry) -> f64 {
    let height = geometry.bottom - geometry.top;
    if height <= 0.0 {
        return 0.0;
    }
    (-geometry.top / height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Ease, Pose};

    const VIEWPORT: f64 = 1_000.0;

    fn at(millis: f64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    /// A 400px tall section whose top sits `top` pixels below the viewport top.
    fn section_at(top: f64) -> Geometry {
        Geometry::new(top, 400.0, VIEWPORT)
    }

    fn fade_up(children: usize) -> RevealTimeline<Pose> {
        RevealTimeline::new(
            Tween::new(
                Pose::REST.with_opacity(0.0).with_y(50.0),
                Pose::REST,
                Duration::from_millis(1_000),
            )
            .with_ease(Ease::Power3Out),
            Duration::from_millis(200),
            children,
        )
    }

    fn scroll_revealer(children: usize) -> Revealer<Pose> {
        Revealer::new(
            RevealTrigger::Scroll(ScrollTrigger::upper_fifth()),
            fade_up(children),
        )
    }

    #[test]
    fn thresholds_resolve_viewport_lines() {
        let eighty = Threshold::new(Edge::Top, ViewportLine::Fraction(0.8));
        let near_bottom = Threshold::new(Edge::Top, ViewportLine::FromBottom(100.0));

        assert!(!eighty.is_crossed(&section_at(801.0)));
        assert!(eighty.is_crossed(&section_at(800.0)));
        assert!(!near_bottom.is_crossed(&section_at(901.0)));
        assert!(near_bottom.is_crossed(&section_at(900.0)));
    }

    #[test]
    fn zones_follow_the_section_up_the_viewport() {
        let trigger = ScrollTrigger::upper_fifth();

        assert_eq!(trigger.zone(&section_at(900.0)), Zone::Before);
        assert_eq!(trigger.zone(&section_at(500.0)), Zone::Active);
        // bottom at 150 is above the 20% line
        assert_eq!(trigger.zone(&section_at(-250.0)), Zone::After);
    }

    #[test]
    fn zone_jumps_report_both_crossings() {
        let mut tracker = ZoneTracker::default();

        assert_eq!(tracker.observe(Zone::After), vec![Crossing::Enter, Crossing::Leave]);
        assert_eq!(
            tracker.observe(Zone::Before),
            vec![Crossing::EnterBack, Crossing::LeaveBack]
        );
        assert!(tracker.observe(Zone::Before).is_empty());
    }

    #[test]
    fn children_start_hidden_before_first_trigger() {
        let mut revealer = scroll_revealer(3);

        assert!(revealer.observe(at(0.0), &section_at(950.0)).is_empty());
        for pose in revealer.poses(at(5_000.0)) {
            assert_eq!(pose.opacity, 0.0);
            assert_eq!(pose.y, 50.0);
        }
    }

    #[test]
    fn entering_plays_forward_with_stagger() {
        let mut revealer = scroll_revealer(3);
        revealer.observe(at(0.0), &section_at(950.0));

        let actions = revealer.observe(at(100.0), &section_at(700.0));
        assert_eq!(actions, vec![ToggleAction::Play]);

        let poses = revealer.poses(at(400.0));
        assert!(poses[0].opacity > poses[1].opacity);
        assert!(poses[1].opacity > poses[2].opacity);
        assert_eq!(poses[2].opacity, 0.0);

        // 1s tween + 2 * 200ms stagger
        assert!(!revealer.is_settled(at(1_499.0)));
        assert!(revealer.is_settled(at(1_500.0)));
        assert!(revealer.poses(at(1_500.0)).iter().all(|pose| *pose == Pose::REST));
    }

    #[test]
    fn oscillation_plays_and_reverses_once_per_crossing() {
        let mut revealer = scroll_revealer(2);
        let mut clock = 0.0;

        for _ in 0..3 {
            clock += 2_000.0;
            assert_eq!(revealer.observe(at(clock), &section_at(600.0)), vec![ToggleAction::Play]);
            // scrolling within the zone repeats nothing
            assert!(revealer.observe(at(clock + 10.0), &section_at(550.0)).is_empty());
            clock += 2_000.0;
            assert_eq!(
                revealer.observe(at(clock), &section_at(900.0)),
                vec![ToggleAction::Reverse]
            );
            assert!(revealer.observe(at(clock + 10.0), &section_at(950.0)).is_empty());
        }

        assert_eq!(revealer.plays(), 3);
        assert_eq!(revealer.reverses(), 3);
        assert!(revealer.poses(at(clock + 5_000.0)).iter().all(|pose| pose.opacity == 0.0));
    }

    #[test]
    fn leaving_downwards_does_not_reverse() {
        let mut revealer = scroll_revealer(1);
        revealer.observe(at(0.0), &section_at(600.0));

        assert!(revealer.observe(at(3_000.0), &section_at(-300.0)).is_empty());
        assert!(revealer.observe(at(3_500.0), &section_at(500.0)).is_empty());
        assert_eq!(revealer.poses(at(4_000.0))[0], Pose::REST);
    }

    #[test]
    fn reverse_mid_flight_runs_back_from_current_position() {
        let mut revealer = scroll_revealer(1);
        revealer.observe(at(0.0), &section_at(600.0));
        let halfway = revealer.progress(at(500.0));

        revealer.observe(at(500.0), &section_at(900.0));

        assert!((revealer.progress(at(500.0)) - halfway).abs() < 1e-9);
        assert!(revealer.progress(at(700.0)) < halfway);
        assert!(revealer.is_settled(at(1_000.0)));
        assert_eq!(revealer.progress(at(1_000.0)), 0.0);
    }

    #[test]
    fn first_observation_inside_zone_plays() {
        let mut revealer = scroll_revealer(1);

        assert_eq!(revealer.observe(at(0.0), &section_at(300.0)), vec![ToggleAction::Play]);
    }

    #[test]
    fn play_once_trigger_never_reverses() {
        let trigger = ScrollTrigger::upper_fifth().with_actions(ToggleActions::PLAY_ONCE);
        let mut revealer = Revealer::new(RevealTrigger::Scroll(trigger), fade_up(1));

        revealer.observe(at(0.0), &section_at(600.0));
        assert!(revealer.observe(at(2_000.0), &section_at(900.0)).is_empty());
        assert_eq!(revealer.reverses(), 0);
    }

    #[test]
    fn mount_trigger_plays_on_mount_and_ignores_scroll() {
        let mut revealer = Revealer::new(RevealTrigger::Mount, fade_up(2));

        assert!(revealer.observe(at(0.0), &section_at(300.0)).is_empty());
        revealer.mount(at(0.0));
        assert_eq!(revealer.plays(), 1);
        assert!(revealer.is_settled(at(1_200.0)));
    }

    #[test]
    fn disposed_revealer_stops_reacting() {
        let mut revealer = scroll_revealer(1);
        revealer.dispose();

        assert!(revealer.observe(at(0.0), &section_at(300.0)).is_empty());
        assert!(revealer.is_settled(at(0.0)));
    }

    #[test]
    fn zero_length_timeline_snaps() {
        let timeline = RevealTimeline::new(
            Tween::new(Pose::REST.with_opacity(0.0), Pose::REST, Duration::ZERO),
            Duration::ZERO,
            2,
        );
        let mut revealer = Revealer::new(RevealTrigger::Scroll(ScrollTrigger::upper_fifth()), timeline);
        revealer.observe(at(0.0), &section_at(500.0));

        assert!(revealer.is_settled(at(0.0)));
        assert_eq!(revealer.progress(at(0.0)), 1.0);
        assert_eq!(revealer.poses(at(0.0)), vec![Pose::REST, Pose::REST]);
    }

    #[test]
    fn zero_length_timeline_hides_until_played_and_after_reverse() {
        let hidden = Pose::REST.with_opacity(0.0).with_y(50.0);
        let timeline = RevealTimeline::new(
            Tween::new(hidden, Pose::REST, Duration::ZERO),
            Duration::ZERO,
            2,
        );
        let mut revealer =
            Revealer::new(RevealTrigger::Scroll(ScrollTrigger::upper_fifth()), timeline);

        assert_eq!(revealer.progress(at(0.0)), 0.0);
        assert_eq!(revealer.poses(at(0.0)), vec![hidden, hidden]);
        assert!(revealer.observe(at(0.0), &section_at(950.0)).is_empty());
        assert_eq!(revealer.pose(1, at(10.0)), hidden);

        assert_eq!(revealer.observe(at(20.0), &section_at(500.0)), vec![ToggleAction::Play]);
        assert_eq!(revealer.pose(1, at(20.0)), Pose::REST);

        assert_eq!(revealer.observe(at(40.0), &section_at(950.0)), vec![ToggleAction::Reverse]);
        assert_eq!(revealer.poses(at(40.0)), vec![hidden, hidden]);
        assert_eq!(revealer.progress(at(40.0)), 0.0);
    }

    #[test]
    fn scrub_progress_tracks_hero_scrolling_out() {
        assert_eq!(scrub_progress(&Geometry::new(0.0, 800.0, VIEWPORT)), 0.0);
        assert_eq!(scrub_progress(&Geometry::new(-400.0, 800.0, VIEWPORT)), 0.5);
        assert_eq!(scrub_progress(&Geometry::new(-1_600.0, 800.0, VIEWPORT)), 1.0);
        assert_eq!(scrub_progress(&Geometry::new(200.0, 800.0, VIEWPORT)), 0.0);
    }
}
