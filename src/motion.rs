use std::f64::consts::PI;
use std::time::Duration;

/// Easing curves used by the page. Named variants mirror the curves the
/// section choreography was designed with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power3Out,
    SineInOut,
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(a1: f64, a2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_axis_slope(a1: f64, a2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    // Newton first, bisection when the slope flattens out.
    let mut s = t;
    for _ in 0..8 {
        let error = bezier_axis(x1, x2, s) - t;
        if error.abs() < 1e-7 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut low, mut high) = (0.0, 1.0);
    s = t;
    for _ in 0..40 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

pub trait Lerp: Clone {
    fn lerp(&self, to: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// The visual properties an animation can drive on an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub scale_x: f64,
    pub rotate: f64,
    pub blur: f64,
}

impl Pose {
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        scale_x: 1.0,
        rotate: 0.0,
        blur: 0.0,
    };

    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    pub const fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_scale_x(mut self, scale_x: f64) -> Self {
        self.scale_x = scale_x;
        self
    }

    pub const fn with_rotate(mut self, rotate: f64) -> Self {
        self.rotate = rotate;
        self
    }

    pub const fn with_blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4}) scaleX({:.4}) rotate({:.2}deg)",
            self.x, self.y, self.scale, self.scale_x, self.rotate
        )
    }

    pub fn filter(&self) -> String {
        if self.blur <= 0.0 {
            "none".to_string()
        } else {
            format!("blur({:.2}px)", self.blur)
        }
    }

    pub fn css_properties(&self) -> [(&'static str, String); 3] {
        [
            ("opacity", format!("{:.3}", self.opacity.clamp(0.0, 1.0))),
            ("transform", self.transform()),
            ("filter", self.filter()),
        ]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

impl Lerp for Pose {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            opacity: self.opacity.lerp(&to.opacity, t),
            x: self.x.lerp(&to.x, t),
            y: self.y.lerp(&to.y, t),
            scale: self.scale.lerp(&to.scale, t),
            scale_x: self.scale_x.lerp(&to.scale_x, t),
            rotate: self.rotate.lerp(&to.rotate, t),
            blur: self.blur.lerp(&to.blur, t),
        }
    }
}

/// A one-shot interpolation from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<P> {
    pub from: P,
    pub to: P,
    pub duration: Duration,
    pub delay: Duration,
    pub ease: Ease,
}

impl<P: Lerp> Tween<P> {
    pub fn new(from: P, to: P, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            delay: Duration::ZERO,
            ease: Ease::Linear,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    /// Linear progress in `[0, 1]`. A zero-length tween is finished as soon
    /// as its delay has passed.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        ((elapsed - self.delay).as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, elapsed: Duration) -> P {
        self.from.lerp(&self.to, self.ease.apply(self.progress(elapsed)))
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Jump back to `from` at the end of every cycle.
    Restart,
    /// Run forwards then backwards on alternate cycles.
    Yoyo,
}

/// An interpolation that repeats for as long as it is sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct Looping<P> {
    pub from: P,
    pub to: P,
    pub period: Duration,
    pub delay: Duration,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl<P: Lerp> Looping<P> {
    pub fn new(from: P, to: P, period: Duration, repeat: Repeat) -> Self {
        Self {
            from,
            to,
            period,
            delay: Duration::ZERO,
            ease: Ease::Linear,
            repeat,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Completed cycles at `elapsed`.
    pub fn cycles(&self, elapsed: Duration) -> u64 {
        if elapsed < self.delay || self.period.is_zero() {
            return 0;
        }
        ((elapsed - self.delay).as_secs_f64() / self.period.as_secs_f64()).floor() as u64
    }

    pub fn sample(&self, elapsed: Duration) -> P {
        if elapsed < self.delay || self.period.is_zero() {
            return self.from.clone();
        }

        let position = (elapsed - self.delay).as_secs_f64() / self.period.as_secs_f64();
        let cycle = position.floor();
        let mut t = position - cycle;
        if self.repeat == Repeat::Yoyo && (cycle as u64) % 2 == 1 {
            t = 1.0 - t;
        }
        self.from.lerp(&self.to, self.ease.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn eases_pin_their_endpoints() {
        let eases = [
            Ease::Linear,
            Ease::Power3Out,
            Ease::SineInOut,
            Ease::EaseOut,
            Ease::EaseInOut,
            Ease::CubicBezier(0.2, 0.65, 0.3, 0.9),
        ];
        for ease in eases {
            assert!(close(ease.apply(0.0), 0.0), "{ease:?} at 0");
            assert!(close(ease.apply(1.0), 1.0), "{ease:?} at 1");
            assert!(close(ease.apply(-3.0), 0.0), "{ease:?} clamps below");
            assert!(close(ease.apply(4.0), 1.0), "{ease:?} clamps above");
        }
    }

    #[test]
    fn eases_are_monotone() {
        for ease in [Ease::Power3Out, Ease::SineInOut, Ease::EaseOut, Ease::EaseInOut] {
            let mut previous = 0.0;
            for step in 0..=100 {
                let value = ease.apply(f64::from(step) / 100.0);
                assert!(value + 1e-9 >= previous, "{ease:?} dipped at step {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn cubic_bezier_matches_known_midpoint() {
        // ease-in-out is symmetric around the midpoint.
        assert!(close(Ease::EaseInOut.apply(0.5), 0.5));
        assert!(Ease::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn tween_waits_for_its_delay_then_settles() {
        let tween = Tween::new(0.0, 100.0, Duration::from_millis(1_000))
            .with_delay(Duration::from_millis(500));

        assert_eq!(tween.sample(Duration::from_millis(250)), 0.0);
        assert!(close(tween.sample(Duration::from_millis(1_000)), 50.0));
        assert_eq!(tween.sample(Duration::from_millis(5_000)), 100.0);
        assert!(!tween.is_complete(Duration::from_millis(1_499)));
        assert!(tween.is_complete(Duration::from_millis(1_500)));
    }

    #[test]
    fn zero_length_tween_lands_immediately() {
        let tween = Tween::new(Pose::REST.with_opacity(0.0), Pose::REST, Duration::ZERO);

        assert_eq!(tween.sample(Duration::ZERO), Pose::REST);
    }

    #[test]
    fn yoyo_loop_turns_around_each_cycle() {
        let bob = Looping::new(0.0, 10.0, Duration::from_millis(2_000), Repeat::Yoyo);

        assert!(close(bob.sample(Duration::from_millis(1_000)), 5.0));
        assert!(close(bob.sample(Duration::from_millis(2_500)), 7.5));
        assert!(close(bob.sample(Duration::from_millis(4_000)), 0.0));
        assert_eq!(bob.cycles(Duration::from_millis(4_000)), 2);
    }

    #[test]
    fn restart_loop_jumps_back() {
        let spin = Looping::new(0.0, 360.0, Duration::from_secs(20), Repeat::Restart);

        assert!(close(spin.sample(Duration::from_secs(10)), 180.0));
        assert!(close(spin.sample(Duration::from_secs(25)), 90.0));
    }

    #[test]
    fn pose_renders_css() {
        let pose = Pose::REST.with_opacity(0.5).with_y(12.0).with_blur(4.0);
        let [opacity, transform, filter] = pose.css_properties();

        assert_eq!(opacity, ("opacity", "0.500".to_string()));
        assert_eq!(
            transform.1,
            "translate(0.00px, 12.00px) scale(1.0000) scaleX(1.0000) rotate(0.00deg)"
        );
        assert_eq!(filter.1, "blur(4.00px)");
        assert_eq!(Pose::REST.filter(), "none");
    }
}
