use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::Level;
use serde_json::json;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use super::dom::{self, WindowListener};
use crate::ambient::{AmbientController, AmbientPlan};
use crate::clock::{self, Timestamp};
use crate::config::MotionConfig;
use crate::content::Skill;
use crate::motion::Pose;
use crate::page::Section;
use crate::reveal::{scrub_progress, Revealer, ScrollDriven, ToggleAction};
use crate::skills::SkillBar;
use crate::telemetry::log_event;

/// Resolved motion settings, provided once at the root of the tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionContext {
    pub config: Rc<MotionConfig>,
    pub reduced_motion: bool,
}

impl MotionContext {
    pub fn frame_ms(&self) -> u32 {
        self.config.frame_interval_ms()
    }
}

#[hook]
pub fn use_motion() -> MotionContext {
    use_context::<MotionContext>().unwrap_or_default()
}

#[derive(Clone, Copy, Debug)]
struct RevealLabel {
    section: Section,
    group: &'static str,
}

impl RevealLabel {
    fn log(self, action: ToggleAction) {
        let event = match action {
            ToggleAction::Play => "reveal_played",
            ToggleAction::Reverse => "reveal_reversed",
            ToggleAction::None => return,
        };
        log_event(
            Level::Debug,
            event,
            json!({ "section": self.section.id(), "group": self.group }),
        );
    }
}

struct Driven<D> {
    inner: D,
    painted_settled: bool,
}

/// Keeps a scroll-driven controller fed with geometry and painted every
/// frame until it settles. Dropping it disposes the controller.
struct ScrollBinding<D: ScrollDriven> {
    state: Rc<RefCell<Driven<D>>>,
    _listeners: Vec<WindowListener>,
    _ticker: Interval,
}

impl<D: ScrollDriven> Drop for ScrollBinding<D> {
    fn drop(&mut self) {
        self.state.borrow_mut().inner.dispose();
    }
}

fn bind_scroll_driven<D, F>(
    driven: D,
    trigger: Element,
    frame_ms: u32,
    label: RevealLabel,
    paint: F,
) -> ScrollBinding<D>
where
    D: ScrollDriven + 'static,
    F: Fn(&D, Timestamp) + 'static,
{
    let state = Rc::new(RefCell::new(Driven {
        inner: driven,
        painted_settled: false,
    }));

    let observe = {
        let state = Rc::clone(&state);
        Rc::new(move || {
            let mut driven = state.borrow_mut();
            let actions = driven.inner.observe(clock::now(), &dom::geometry_of(&trigger));
            if !actions.is_empty() {
                driven.painted_settled = false;
            }
            for action in actions {
                label.log(action);
            }
        })
    };
    observe();
    paint(&state.borrow().inner, clock::now());

    let listeners = ["scroll", "resize"]
        .into_iter()
        .filter_map(|event| {
            let observe = Rc::clone(&observe);
            WindowListener::new(event, move |_| observe())
        })
        .collect();

    let ticker = {
        let state = Rc::clone(&state);
        Interval::new(frame_ms, move || {
            let now = clock::now();
            let mut driven = state.borrow_mut();
            let settled = driven.inner.is_settled(now);
            if settled && driven.painted_settled {
                return;
            }
            paint(&driven.inner, now);
            driven.painted_settled = settled;
        })
    };

    ScrollBinding {
        state,
        _listeners: listeners,
        _ticker: ticker,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealScope {
    /// The referenced element itself is the only target.
    Element,
    /// Each child of the referenced element is a staggered target.
    Children,
}

#[hook]
pub fn use_reveal(section: Section, group: &'static str, target: NodeRef, scope: RevealScope) {
    let motion = use_motion();

    use_effect_with((), move |_| {
        let binding = section
            .reveal(group)
            .zip(target.cast::<HtmlElement>())
            .map(|(reveal, element)| {
                let trigger = Element::clone(&element);
                let targets = match scope {
                    RevealScope::Element => vec![element],
                    RevealScope::Children => dom::child_elements(&trigger),
                };
                let mut revealer = reveal.revealer(targets.len(), motion.reduced_motion);
                revealer.mount(clock::now());

                bind_scroll_driven(
                    revealer,
                    trigger,
                    motion.frame_ms(),
                    RevealLabel { section, group },
                    move |revealer: &Revealer<Pose>, now| {
                        for (element, pose) in targets.iter().zip(revealer.poses(now)) {
                            dom::apply_pose(element, &pose);
                        }
                    },
                )
            });

        move || drop(binding)
    });
}

#[hook]
pub fn use_skill_bar(skill: Skill, index: usize, track: NodeRef, fill: NodeRef) {
    let motion = use_motion();

    use_effect_with((), move |_| {
        let binding = track
            .cast::<Element>()
            .zip(fill.cast::<HtmlElement>())
            .map(|(track, fill)| {
                bind_scroll_driven(
                    SkillBar::new(skill, index, motion.reduced_motion),
                    track,
                    motion.frame_ms(),
                    RevealLabel {
                        section: Section::Skills,
                        group: skill.name,
                    },
                    move |bar: &SkillBar, now| dom::set_style(&fill, "width", &bar.fill_css(now)),
                )
            });

        move || drop(binding)
    });
}

fn ambient_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Mounts `plan` for `section` and paints its loops into the children of
/// `layer`, in loop order, every frame.
#[hook]
pub fn use_ambient(
    section: Section,
    plan: AmbientPlan,
    layer: NodeRef,
) -> Rc<RefCell<AmbientController>> {
    let motion = use_motion();
    let controller = use_mut_ref(|| {
        let mut rng = fastrand::Rng::with_seed(ambient_seed());
        AmbientController::mount(clock::now(), &plan, &mut rng)
    });

    {
        let controller = Rc::clone(&controller);
        let frame_ms = motion.frame_ms();
        use_effect_with((), move |_| {
            let ticker = layer
                .cast::<Element>()
                .filter(|_| controller.borrow().is_running())
                .map(|layer| {
                    let elements = dom::child_elements(&layer);
                    let controller = Rc::clone(&controller);
                    Interval::new(frame_ms, move || {
                        let Some(frame) = controller.borrow().frame(clock::now()) else {
                            return;
                        };
                        for (element, pose) in elements.iter().zip(frame) {
                            dom::apply_pose(element, &pose);
                        }
                    })
                });

            move || {
                drop(ticker);
                let mut controller = controller.borrow_mut();
                if controller.is_running() {
                    controller.dispose();
                    log_event(
                        Level::Debug,
                        "ambient_disposed",
                        json!({ "section": section.id(), "loops": controller.loops().len() }),
                    );
                }
            }
        });
    }

    controller
}

/// Scrubs the background of `target` from centre to bottom while it scrolls
/// out of view.
#[hook]
pub fn use_parallax(section: Section, target: NodeRef) {
    let motion = use_motion();

    use_effect_with((), move |_| {
        let listener = target
            .cast::<HtmlElement>()
            .filter(|_| section.has_parallax() && !motion.reduced_motion)
            .and_then(|element| {
                let paint = move || {
                    let progress = scrub_progress(&dom::geometry_of(&element));
                    let position = format!("50% {:.2}%", 50.0 + 50.0 * progress);
                    dom::set_style(&element, "background-position", &position);
                };
                paint();
                WindowListener::new("scroll", move |_| paint())
            });

        move || drop(listener)
    });
}

#[hook]
pub fn use_section_mounted(section: Section) {
    use_effect_with(section, |section| {
        log_event(
            Level::Debug,
            "section_mounted",
            json!({ "section": section.id() }),
        );
        || ()
    });
}
