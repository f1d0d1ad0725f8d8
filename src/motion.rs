//! Time-based helpers for the cosmetic animations.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

/// Boot screen slide-out.
pub const BOOT_EXIT: Ease = Ease::CubicBezier(0.76, 0.0, 0.24, 1.0);
/// Hero title entrance.
pub const HERO_ENTRANCE: Ease = Ease::CubicBezier(0.22, 1.0, 0.36, 1.0);

/// Class a gallery card receives once it has scrolled into view.
pub const REVEAL_CLASS: &str = "is-visible";
/// The viewport is shrunk by this much before a card counts as visible.
pub const REVEAL_ROOT_MARGIN: &str = "-50px";

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier(x1, y1, x2, y2) => bezier_y_for_x(t, x1, y1, x2, y2),
        }
    }

    pub fn to_css(self) -> String {
        match self {
            Self::Linear => "linear".to_owned(),
            Self::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

fn bezier_y_for_x(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    fn coord(s: f64, p1: f64, p2: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    // x(s) is monotonic for x1, x2 in [0, 1]; bisect for the curve parameter.
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..40 {
        let mid = (lo + hi) / 2.0;
        if coord(mid, x1, x2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    coord((lo + hi) / 2.0, y1, y2)
}

/// Endless linear scroll from 0 to `-distance` every `duration_secs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopTrack {
    pub distance: f64,
    pub duration_secs: f64,
}

impl LoopTrack {
    pub fn new(distance: f64, duration_secs: f64) -> Self {
        Self {
            distance,
            duration_secs,
        }
    }

    /// Horizontal offset at `t` seconds since the track started.
    pub fn offset(&self, t: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        let phase = t.rem_euclid(self.duration_secs) / self.duration_secs;
        -phase * self.distance
    }
}

/// Linear map of `value` from `input` onto `output`, clamped at both ends.
pub fn map_clamped(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 {
        return output.0;
    }
    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * t
}

/// Hero parallax: the first 500px of scroll push the title down by 200px.
pub fn hero_parallax(scroll_y: f64) -> f64 {
    map_clamped(scroll_y, (0.0, 500.0), (0.0, 200.0))
}

/// The hero title's jitter: a short burst, then a pause, forever.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchLoop {
    pub burst_secs: f64,
    pub rest_secs: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchFrame {
    pub x: f64,
    pub opacity: f64,
}

impl Default for GlitchLoop {
    fn default() -> Self {
        Self {
            burst_secs: 0.2,
            rest_secs: 3.0,
        }
    }
}

impl GlitchLoop {
    const XS: [f64; 3] = [-2.0, 2.0, -2.0];
    const OPACITIES: [f64; 3] = [0.2, 0.5, 0.2];

    pub fn sample(&self, t: f64) -> GlitchFrame {
        let cycle = self.burst_secs + self.rest_secs;
        let local = if cycle > 0.0 { t.rem_euclid(cycle) } else { 0.0 };
        if self.burst_secs <= 0.0 || local >= self.burst_secs {
            return GlitchFrame {
                x: Self::XS[2],
                opacity: Self::OPACITIES[2],
            };
        }
        let u = local / self.burst_secs * 2.0;
        let (i, f) = if u < 1.0 { (0, u) } else { (1, u - 1.0) };
        let lerp = |k: &[f64; 3]| k[i] + (k[i + 1] - k[i]) * f;
        GlitchFrame {
            x: lerp(&Self::XS),
            opacity: lerp(&Self::OPACITIES),
        }
    }
}
