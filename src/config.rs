//! Site configuration.
//!
//! Every field has a default matching the shipped site, so an empty JSON object
//! (or no config block at all) yields the reference behavior. The page may embed
//! overrides in `<script id="site-config" type="application/json">`.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{SiteError, SiteResult};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub boot: BootConfig,
    pub particles: ParticleConfig,
    pub marquee: MarqueeConfig,
    /// Fixed RNG seed for boot increments and particle placement. `None` seeds
    /// from the host.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootConfig {
    pub tick_ms: u32,
    pub hold_ms: u32,
    pub min_increment: u8,
    pub max_increment: u8,
    /// Duration of the slide-up exit before the site mounts.
    pub exit_ms: u32,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            tick_ms: 150,
            hold_ms: 800,
            min_increment: 1,
            max_increment: 10,
            exit_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub dust_count: usize,
    /// Full extent of the dust box along x, y, z.
    pub dust_spread: [f32; 3],
    pub dust_radius: f32,
    pub dust_opacity: f32,
    pub palette: Vec<Color>,
    pub star_count: usize,
    pub star_radius: f32,
    pub star_depth: f32,
    pub star_factor: f32,
    pub fog_color: Color,
    pub fog_near: f32,
    pub fog_far: f32,
    pub camera_z: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            dust_count: 20,
            dust_spread: [15.0, 15.0, 10.0],
            dust_radius: 0.02,
            dust_opacity: 0.6,
            palette: vec![
                Color::rgb(139.0 / 255.0, 92.0 / 255.0, 246.0 / 255.0),
                Color::rgb(57.0 / 255.0, 1.0, 20.0 / 255.0),
            ],
            star_count: 3000,
            star_radius: 100.0,
            star_depth: 50.0,
            star_factor: 4.0,
            fog_color: Color::rgb(5.0 / 255.0, 5.0 / 255.0, 5.0 / 255.0),
            fog_near: 5.0,
            fog_far: 20.0,
            camera_z: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarqueeConfig {
    /// Horizontal travel of one loop, in CSS pixels.
    pub distance_px: f64,
    pub words_secs: f64,
    pub ticker_secs: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            distance_px: 1000.0,
            words_secs: 25.0,
            ticker_secs: 30.0,
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> SiteResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SiteResult<()> {
        self.boot.validate()?;

        let p = &self.particles;
        if p.palette.is_empty() {
            return Err(SiteError::config("particles.palette must not be empty"));
        }
        if p.dust_spread.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SiteError::config("particles.dust_spread must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&p.dust_opacity) {
            return Err(SiteError::config("particles.dust_opacity must be in 0..=1"));
        }
        if p.fog_far <= p.fog_near {
            return Err(SiteError::config("particles.fog_far must exceed fog_near"));
        }

        let m = &self.marquee;
        if m.words_secs <= 0.0 || m.ticker_secs <= 0.0 {
            return Err(SiteError::config("marquee durations must be > 0"));
        }
        Ok(())
    }
}

impl BootConfig {
    pub fn increment_range(&self) -> std::ops::RangeInclusive<u8> {
        self.min_increment..=self.max_increment
    }

    pub fn validate(&self) -> SiteResult<()> {
        if self.tick_ms == 0 {
            return Err(SiteError::config("boot.tick_ms must be > 0"));
        }
        // A zero increment would let the counter stall below 100 forever.
        if self.min_increment == 0 {
            return Err(SiteError::config("boot.min_increment must be >= 1"));
        }
        if self.min_increment > self.max_increment {
            return Err(SiteError::config(format!(
                "boot increment range is empty ({}..={})",
                self.min_increment, self.max_increment
            )));
        }
        if self.max_increment > 100 {
            return Err(SiteError::config("boot.max_increment must be <= 100"));
        }
        Ok(())
    }
}
