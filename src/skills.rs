use std::time::Duration;

use crate::clock::Timestamp;
use crate::content::Skill;
use crate::motion::{Ease, Tween};
use crate::reveal::{
    Geometry, RevealTimeline, RevealTrigger, Revealer, ScrollDriven, ScrollTrigger, ToggleAction,
};

const FILL_DURATION: Duration = Duration::from_millis(1_500);
const FILL_STAGGER: Duration = Duration::from_millis(100);

/// A skill's progress bar. The fill grows from zero to the skill level the
/// first time its track scrolls into view, and shrinks back when the track
/// scrolls back out below the fold.
#[derive(Clone, Debug)]
pub struct SkillBar {
    skill: Skill,
    revealer: Revealer<f64>,
}

impl SkillBar {
    pub fn new(skill: Skill, index: usize, reduced_motion: bool) -> Self {
        let target = f64::from(skill.level.percent());
        let (duration, delay) = if reduced_motion {
            (Duration::ZERO, Duration::ZERO)
        } else {
            (FILL_DURATION, FILL_STAGGER * index as u32)
        };
        let tween = Tween::new(0.0, target, duration)
            .with_delay(delay)
            .with_ease(Ease::Power3Out);

        Self {
            skill,
            revealer: Revealer::new(
                RevealTrigger::Scroll(ScrollTrigger::near_bottom()),
                RevealTimeline::new(tween, Duration::ZERO, 1),
            ),
        }
    }

    pub fn observe(&mut self, now: Timestamp, track: &Geometry) -> Vec<ToggleAction> {
        self.revealer.observe(now, track)
    }

    /// Fill width in percent of the track, never past the skill level.
    pub fn fill_percent(&self, now: Timestamp) -> f64 {
        let target = f64::from(self.skill.level.percent());
        self.revealer.pose(0, now).clamp(0.0, target)
    }

    pub fn fill_css(&self, now: Timestamp) -> String {
        format!("{:.2}%", self.fill_percent(now))
    }

    pub fn is_settled(&self, now: Timestamp) -> bool {
        self.revealer.is_settled(now)
    }

    pub fn skill(&self) -> &Skill {
        &self.skill
    }

    pub fn dispose(&mut self) {
        self.revealer.dispose();
    }
}

impl ScrollDriven for SkillBar {
    fn observe(&mut self, now: Timestamp, geometry: &Geometry) -> Vec<ToggleAction> {
        SkillBar::observe(self, now, geometry)
    }

    fn is_settled(&self, now: Timestamp) -> bool {
        SkillBar::is_settled(self, now)
    }

    fn dispose(&mut self) {
        SkillBar::dispose(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Proficiency, Rgb};

    fn at(millis: f64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn skill(level: u8) -> Skill {
        Skill {
            name: "Rust",
            level: Proficiency::saturating(level),
            icon: "🦀",
            color: Rgb(0xde, 0xa5, 0x84),
        }
    }

    fn track_at(top: f64) -> Geometry {
        Geometry::new(top, 8.0, 1_000.0)
    }

    #[test]
    fn fill_stays_empty_until_track_is_visible() {
        let mut bar = SkillBar::new(skill(85), 0, false);

        assert!(bar.observe(at(0.0), &track_at(1_200.0)).is_empty());
        assert_eq!(bar.fill_percent(at(10_000.0)), 0.0);
    }

    #[test]
    fn fill_grows_to_level_without_overshoot() {
        let mut bar = SkillBar::new(skill(85), 0, false);
        bar.observe(at(0.0), &track_at(1_200.0));
        assert_eq!(bar.observe(at(1_000.0), &track_at(850.0)), vec![ToggleAction::Play]);

        let mut previous = 0.0;
        for step in 0..=40 {
            let width = bar.fill_percent(at(1_000.0 + f64::from(step) * 50.0));
            assert!(width >= previous, "fill shrank at step {step}");
            assert!(width <= 85.0, "fill overshot at step {step}: {width}");
            previous = width;
        }
        assert_eq!(bar.fill_percent(at(2_500.0)), 85.0);
        assert_eq!(bar.fill_css(at(2_500.0)), "85.00%");
        assert!(bar.is_settled(at(2_500.0)));
    }

    #[test]
    fn later_bars_start_later() {
        let mut first = SkillBar::new(skill(90), 0, false);
        let mut fourth = SkillBar::new(skill(90), 3, false);
        first.observe(at(0.0), &track_at(500.0));
        fourth.observe(at(0.0), &track_at(500.0));

        assert!(first.fill_percent(at(200.0)) > 0.0);
        assert_eq!(fourth.fill_percent(at(300.0)), 0.0);
        assert!(fourth.fill_percent(at(400.0)) > 0.0);
    }

    #[test]
    fn scrolling_back_up_empties_the_bar() {
        let mut bar = SkillBar::new(skill(60), 0, false);
        bar.observe(at(0.0), &track_at(500.0));

        assert_eq!(bar.observe(at(2_000.0), &track_at(950.0)), vec![ToggleAction::Reverse]);
        assert_eq!(bar.fill_percent(at(4_000.0)), 0.0);
    }

    #[test]
    fn reduced_motion_fills_instantly() {
        let mut bar = SkillBar::new(skill(70), 4, true);
        bar.observe(at(0.0), &track_at(500.0));

        assert_eq!(bar.fill_percent(at(0.0)), 70.0);
    }

    #[test]
    fn reduced_motion_bar_is_empty_off_screen() {
        let mut bar = SkillBar::new(skill(85), 0, true);

        assert_eq!(bar.fill_percent(at(0.0)), 0.0);
        bar.observe(at(0.0), &track_at(1_200.0));
        assert_eq!(bar.fill_percent(at(10.0)), 0.0);

        bar.observe(at(20.0), &track_at(500.0));
        assert_eq!(bar.fill_percent(at(20.0)), 85.0);

        assert_eq!(bar.observe(at(40.0), &track_at(950.0)), vec![ToggleAction::Reverse]);
        assert_eq!(bar.fill_percent(at(40.0)), 0.0);
    }
}
