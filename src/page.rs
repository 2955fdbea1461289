//! The page's sections, in display order, and the motion each one runs.

use std::time::Duration;

use crate::ambient::{AmbientLayer, AmbientPlan};
use crate::motion::{Ease, Pose, Tween};
use crate::reveal::{RevealTimeline, RevealTrigger, Revealer, ScrollTrigger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Projects,
    Skills,
    Contact,
    Footer,
}

/// A set of sibling elements that enter together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGroup {
    pub name: &'static str,
    pub trigger: RevealTrigger,
    pub from: Pose,
    pub duration: Duration,
    pub delay: Duration,
    pub stagger: Duration,
    pub ease: Ease,
}

impl RevealGroup {
    const fn scroll(name: &'static str, trigger: ScrollTrigger, from: Pose, duration_ms: u64) -> Self {
        Self {
            name,
            trigger: RevealTrigger::Scroll(trigger),
            from,
            duration: Duration::from_millis(duration_ms),
            delay: Duration::ZERO,
            stagger: Duration::ZERO,
            ease: Ease::EaseOut,
        }
    }

    const fn on_mount(name: &'static str, from: Pose, duration_ms: u64) -> Self {
        Self {
            name,
            trigger: RevealTrigger::Mount,
            from,
            duration: Duration::from_millis(duration_ms),
            delay: Duration::ZERO,
            stagger: Duration::ZERO,
            ease: Ease::EaseOut,
        }
    }

    const fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    const fn staggered(mut self, stagger_ms: u64) -> Self {
        self.stagger = Duration::from_millis(stagger_ms);
        self
    }

    const fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn timeline(&self, children: usize, reduced_motion: bool) -> RevealTimeline<Pose> {
        if reduced_motion {
            return RevealTimeline::new(
                Tween::new(self.from, Pose::REST, Duration::ZERO),
                Duration::ZERO,
                children,
            );
        }

        let tween = Tween::new(self.from, Pose::REST, self.duration)
            .with_delay(self.delay)
            .with_ease(self.ease);
        RevealTimeline::new(tween, self.stagger, children)
    }

    pub fn revealer(&self, children: usize, reduced_motion: bool) -> Revealer<Pose> {
        Revealer::new(self.trigger, self.timeline(children, reduced_motion))
    }
}

const FADE_UP_30: Pose = Pose::REST.with_opacity(0.0).with_y(30.0);
const FADE_UP_50: Pose = Pose::REST.with_opacity(0.0).with_y(50.0);

const HERO_REVEALS: &[RevealGroup] = &[
    RevealGroup::on_mount("headline", FADE_UP_50.with_blur(10.0), 800)
        .delayed(300)
        .staggered(300)
        .eased(Ease::Power3Out),
    RevealGroup::on_mount(
        "subtitle",
        Pose::REST.with_opacity(0.0).with_y(20.0).with_scale(0.95).with_blur(5.0),
        1_200,
    )
    .delayed(1_500)
    .eased(Ease::CubicBezier(0.2, 0.65, 0.3, 0.9)),
    RevealGroup::on_mount("underline", Pose::REST.with_scale_x(0.0), 1_000).delayed(2_000),
];

const ABOUT_REVEALS: &[RevealGroup] = &[
    RevealGroup::scroll("text", ScrollTrigger::upper_fifth(), FADE_UP_50, 1_000).staggered(200),
    RevealGroup::scroll(
        "portrait",
        ScrollTrigger::upper_fifth(),
        Pose::REST.with_opacity(0.0).with_y(-50.0),
        1_000,
    ),
];

const PROJECTS_REVEALS: &[RevealGroup] = &[
    RevealGroup::scroll("heading", ScrollTrigger::near_bottom(), FADE_UP_30, 600),
    RevealGroup::scroll("cards", ScrollTrigger::near_bottom(), FADE_UP_50, 800)
        .staggered(100)
        .eased(Ease::Power3Out),
];

const SKILLS_REVEALS: &[RevealGroup] = &[
    RevealGroup::scroll("heading", ScrollTrigger::near_bottom(), FADE_UP_30, 600),
    RevealGroup::scroll("cards", ScrollTrigger::near_bottom(), FADE_UP_50, 800)
        .staggered(100)
        .eased(Ease::Power3Out),
];

const CONTACT_REVEALS: &[RevealGroup] = &[
    RevealGroup::scroll("heading", ScrollTrigger::upper_fifth(), FADE_UP_30, 800),
    RevealGroup::scroll("form", ScrollTrigger::upper_fifth(), FADE_UP_30, 1_000).staggered(200),
];

const FOOTER_REVEALS: &[RevealGroup] = &[RevealGroup::scroll(
    "content",
    ScrollTrigger::near_bottom(),
    FADE_UP_50,
    800,
)
.eased(Ease::Power3Out)];

const HERO_AMBIENT: AmbientPlan =
    AmbientPlan::new(&[AmbientLayer::Floaters { count: 5 }, AmbientLayer::Bob]);
const ABOUT_AMBIENT: AmbientPlan =
    AmbientPlan::new(&[AmbientLayer::Blob, AmbientLayer::Particles { count: 20 }]);
const CONTACT_AMBIENT: AmbientPlan = AmbientPlan::new(&[AmbientLayer::Blob]);
const PORTRAIT_GLOW: AmbientPlan = AmbientPlan::new(&[AmbientLayer::Glow]);

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Hero,
        Self::About,
        Self::Projects,
        Self::Skills,
        Self::Contact,
        Self::Footer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
            Self::Footer => "footer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Hero => "Welcome",
            Self::About => "About Me",
            Self::Projects => "Featured Projects",
            Self::Skills => "My Skills",
            Self::Contact => "Get in Touch",
            Self::Footer => "Footer",
        }
    }

    pub fn reveals(self) -> &'static [RevealGroup] {
        match self {
            Self::Hero => HERO_REVEALS,
            Self::About => ABOUT_REVEALS,
            Self::Projects => PROJECTS_REVEALS,
            Self::Skills => SKILLS_REVEALS,
            Self::Contact => CONTACT_REVEALS,
            Self::Footer => FOOTER_REVEALS,
        }
    }

    pub fn reveal(self, name: &str) -> Option<&'static RevealGroup> {
        self.reveals().iter().find(|group| group.name == name)
    }

    pub fn ambient(self, reduced_motion: bool) -> AmbientPlan {
        if reduced_motion {
            return AmbientPlan::NONE;
        }
        match self {
            Self::Hero => HERO_AMBIENT,
            Self::About => ABOUT_AMBIENT,
            Self::Contact => CONTACT_AMBIENT,
            Self::Projects | Self::Skills | Self::Footer => AmbientPlan::NONE,
        }
    }

    /// Loops drawn behind the section's portrait, if it has one.
    pub fn glow(self, reduced_motion: bool) -> AmbientPlan {
        match self {
            Self::About if !reduced_motion => PORTRAIT_GLOW,
            _ => AmbientPlan::NONE,
        }
    }

    pub fn has_parallax(self) -> bool {
        matches!(self, Self::Hero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sections_render_in_fixed_order() {
        let ids: Vec<_> = Section::ALL.iter().map(|section| section.id()).collect();

        assert_eq!(ids, ["hero", "about", "projects", "skills", "contact", "footer"]);
        assert_eq!(Section::ALL.iter().map(|s| s.id()).collect::<HashSet<_>>().len(), 6);
    }

    #[test]
    fn every_section_reveals_something() {
        for section in Section::ALL {
            assert!(!section.reveals().is_empty(), "{section:?}");
        }
        assert!(Section::Hero
            .reveals()
            .iter()
            .all(|group| group.trigger == RevealTrigger::Mount));
    }

    #[test]
    fn project_cards_follow_the_card_choreography() {
        let cards = Section::Projects.reveal("cards").expect("cards group");
        let timeline = cards.timeline(3, false);

        assert_eq!(cards.trigger, RevealTrigger::Scroll(ScrollTrigger::near_bottom()));
        assert_eq!(timeline.length(), Duration::from_millis(1_000));
        assert_eq!(timeline.sample(0, Duration::ZERO), FADE_UP_50);
    }

    #[test]
    fn reduced_motion_snaps_and_stills() {
        for section in Section::ALL {
            for group in section.reveals() {
                assert_eq!(group.timeline(4, true).length(), Duration::ZERO);
            }
            assert!(section.ambient(true).is_empty());
            assert!(section.glow(true).is_empty());
        }
        assert!(!Section::About.ambient(false).is_empty());
        assert!(!Section::About.glow(false).is_empty());
        assert!(Section::Hero.glow(false).is_empty());
    }
}
