use std::time::Duration;

use crate::clock::Timestamp;
use crate::motion::{Ease, Looping, Pose, Repeat, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientLayer {
    /// A large blurred shape that slowly grows and spins.
    Blob,
    /// Small dots drifting up and fading in place.
    Particles { count: usize },
    /// Dots wandering around a random anchor.
    Floaters { count: usize },
    /// A single element bobbing up and down, e.g. a scroll hint.
    Bob,
    /// A soft halo turning slowly behind a picture.
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmbientPlan {
    pub layers: &'static [AmbientLayer],
}

impl AmbientPlan {
    pub const NONE: Self = Self { layers: &[] };

    pub const fn new(layers: &'static [AmbientLayer]) -> Self {
        Self { layers }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Where an element sits inside its section, in percent of the section box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopKind {
    Blob,
    Particle,
    Floater,
    Bob,
    Glow,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLoop {
    pub kind: LoopKind,
    pub placement: Option<Placement>,
    pub motion: Looping<Pose>,
    /// One-off entrance whose opacity and scale multiply the loop's.
    pub intro: Option<Tween<Pose>>,
}

impl AmbientLoop {
    fn new(kind: LoopKind, placement: Option<Placement>, motion: Looping<Pose>) -> Self {
        Self {
            kind,
            placement,
            motion,
            intro: None,
        }
    }

    fn with_intro(mut self, intro: Tween<Pose>) -> Self {
        self.intro = Some(intro);
        self
    }

    pub fn pose(&self, elapsed: Duration) -> Pose {
        let pose = self.motion.sample(elapsed);
        match &self.intro {
            Some(intro) => {
                let entrance = intro.sample(elapsed);
                pose.with_opacity(pose.opacity * entrance.opacity)
                    .with_scale(pose.scale * entrance.scale)
            }
            None => pose,
        }
    }
}

fn between(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

fn random_placement(rng: &mut fastrand::Rng) -> Placement {
    Placement {
        left: between(rng, 0.0, 100.0),
        top: between(rng, 0.0, 100.0),
    }
}

fn expand(layer: AmbientLayer, rng: &mut fastrand::Rng, loops: &mut Vec<AmbientLoop>) {
    match layer {
        AmbientLayer::Blob => loops.push(AmbientLoop::new(
            LoopKind::Blob,
            None,
            Looping::new(
                Pose::REST,
                Pose::REST.with_scale(1.2).with_rotate(360.0),
                Duration::from_secs(20),
                Repeat::Restart,
            ),
        )),
        AmbientLayer::Particles { count } => {
            for _ in 0..count {
                let period = between(rng, 3.0, 5.0) / 2.0;
                let delay = between(rng, 0.0, 2.0);
                loops.push(AmbientLoop::new(
                    LoopKind::Particle,
                    Some(random_placement(rng)),
                    Looping::new(
                        Pose::REST.with_opacity(0.3),
                        Pose::REST.with_opacity(0.8).with_y(-20.0),
                        Duration::from_secs_f64(period),
                        Repeat::Yoyo,
                    )
                    .with_delay(Duration::from_secs_f64(delay))
                    .with_ease(Ease::EaseInOut),
                ));
            }
        }
        AmbientLayer::Floaters { count } => {
            for index in 0..count {
                let target = Pose::REST
                    .with_x(between(rng, -20.0, 20.0))
                    .with_y(between(rng, -20.0, 20.0))
                    .with_rotate(between(rng, -5.0, 5.0));
                let period = between(rng, 3.0, 5.0);
                let stagger = Duration::from_millis(200) * index as u32;
                loops.push(
                    AmbientLoop::new(
                        LoopKind::Floater,
                        Some(random_placement(rng)),
                        Looping::new(
                            Pose::REST,
                            target,
                            Duration::from_secs_f64(period),
                            Repeat::Yoyo,
                        )
                        .with_delay(stagger)
                        .with_ease(Ease::SineInOut),
                    )
                    .with_intro(
                        Tween::new(
                            Pose::REST.with_opacity(0.0).with_scale(0.0),
                            Pose::REST,
                            Duration::from_secs(1),
                        )
                        .with_delay(stagger)
                        .with_ease(Ease::EaseOut),
                    ),
                );
            }
        }
        // 0 -> 10 -> 0 over two seconds, so each leg takes one.
        AmbientLayer::Bob => loops.push(AmbientLoop::new(
            LoopKind::Bob,
            None,
            Looping::new(
                Pose::REST,
                Pose::REST.with_y(10.0),
                Duration::from_secs(1),
                Repeat::Yoyo,
            )
            .with_ease(Ease::EaseInOut),
        )),
        AmbientLayer::Glow => {
            let halo = Pose::REST.with_blur(24.0);
            loops.push(AmbientLoop::new(
                LoopKind::Glow,
                None,
                Looping::new(
                    halo,
                    halo.with_rotate(360.0),
                    Duration::from_secs(8),
                    Repeat::Restart,
                ),
            ));
        }
    }
}

/// Owns every decorative loop of one section for the lifetime of its mount.
#[derive(Clone, Debug)]
pub struct AmbientController {
    started_at: Timestamp,
    loops: Vec<AmbientLoop>,
    disposed: bool,
}

impl AmbientController {
    /// Expands `plan` into concrete loops. Every random duration, offset and
    /// placement is drawn from `rng`.
    pub fn mount(now: Timestamp, plan: &AmbientPlan, rng: &mut fastrand::Rng) -> Self {
        let mut loops = Vec::new();
        for layer in plan.layers {
            expand(*layer, rng, &mut loops);
        }

        Self {
            started_at: now,
            loops,
            disposed: false,
        }
    }

    pub fn loops(&self) -> &[AmbientLoop] {
        &self.loops
    }

    pub fn loops_of(&self, kind: LoopKind) -> impl Iterator<Item = (usize, &AmbientLoop)> {
        self.loops
            .iter()
            .enumerate()
            .filter(move |(_, ambient)| ambient.kind == kind)
    }

    /// Current pose of every loop, or `None` once disposed.
    pub fn frame(&self, now: Timestamp) -> Option<Vec<Pose>> {
        if self.disposed {
            return None;
        }
        let elapsed = now.since(self.started_at);
        Some(
            self.loops
                .iter()
                .map(|ambient| ambient.pose(elapsed))
                .collect(),
        )
    }

    pub fn is_running(&self) -> bool {
        !self.disposed && !self.loops.is_empty()
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}
