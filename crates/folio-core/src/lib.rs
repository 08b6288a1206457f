//! Core state machines for the Folio portfolio page effects.
//!
//! Nothing in this crate touches the DOM. Each effect is an explicit component
//! that owns its state and exposes pure transitions; `folio-web` feeds them
//! browser events and applies the results to the page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod anchor;
pub mod binding;
pub mod counter;
pub mod menu;
pub mod nav;
pub mod particles;
pub mod reveal;
pub mod scroll;
pub mod typewriter;

pub use anchor::AnchorTarget;
pub use binding::{BindingSpec, BindingTarget, EventKind};
pub use counter::{CounterAnimation, CounterError, CounterTrigger};
pub use menu::{MenuIcon, MobileMenu};
pub use nav::{NavHighlighter, SectionBounds};
pub use particles::{Link, ParticleField, Point, Rgba, Surface, Viewport, particle_count};
pub use reveal::{IntersectionSample, RevealTracker};
pub use scroll::{BackToTop, NavbarShade};
pub use typewriter::{Phase, Typewriter};

/// Errors raised while validating a [`FolioConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Indicates a configuration value that cannot be used.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    /// The configuration document could not be decoded.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Particle background tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleSettings {
    /// Id of the `<canvas>` the field draws into.
    pub canvas_id: String,
    /// Upper bound on the number of points.
    pub max_particles: usize,
    /// Viewport area (px²) that earns one point.
    pub area_per_particle: f64,
    /// Full width of the velocity range; components fall in `[-spread/2, spread/2)`.
    pub velocity_spread: f64,
    pub radius_min: f64,
    pub radius_spread: f64,
    /// Pairs closer than this are linked.
    pub link_distance: f64,
    /// Opacity of a link between coincident points.
    pub link_alpha: f64,
    pub link_width: f64,
    pub dot_alpha: f64,
    pub color: [u8; 3],
    /// Optional RNG seed for reproducible fields.
    pub seed: Option<u64>,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            canvas_id: "particles".to_string(),
            max_particles: 80,
            area_per_particle: 15_000.0,
            velocity_spread: 0.3,
            radius_min: 0.5,
            radius_spread: 1.5,
            link_distance: 140.0,
            link_alpha: 0.08,
            link_width: 0.5,
            dot_alpha: 0.35,
            color: [0, 212, 255],
            seed: None,
        }
    }
}

/// Scroll-reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealSettings {
    pub selector: String,
    pub visible_class: String,
    /// Visible ratio required before an element is revealed.
    pub threshold: f64,
    /// Distance the trigger region is pulled up from the viewport bottom.
    pub bottom_inset: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            selector: ".reveal".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.12,
            bottom_inset: 60.0,
        }
    }
}

impl RevealSettings {
    /// Root margin string handed to the intersection observer.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_inset)
    }
}

/// Active-section highlighting settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavSettings {
    pub section_selector: String,
    pub link_selector: String,
    pub active_class: String,
    /// Offset added to the scroll position before matching sections.
    pub lookahead: f64,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            section_selector: "section[id]".to_string(),
            link_selector: ".nav-link".to_string(),
            active_class: "active".to_string(),
            lookahead: 200.0,
        }
    }
}

/// Navbar background settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavbarSettings {
    pub navbar_id: String,
    pub threshold: f64,
    pub elevated_class: String,
    pub elevated_background: String,
}

impl Default for NavbarSettings {
    fn default() -> Self {
        Self {
            navbar_id: "navbar".to_string(),
            threshold: 50.0,
            elevated_class: "shadow-lg".to_string(),
            elevated_background: "rgba(11, 15, 26, 0.95)".to_string(),
        }
    }
}

/// Mobile menu element ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MenuSettings {
    pub trigger_id: String,
    pub panel_id: String,
    pub icon_id: String,
    pub hidden_class: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            trigger_id: "menu-btn".to_string(),
            panel_id: "mobile-menu".to_string(),
            icon_id: "menu-icon".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

/// Typewriter cadence and fallback titles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypewriterSettings {
    pub element_id: String,
    /// Attribute holding a JSON array of titles; overrides `titles` when present.
    pub titles_attribute: String,
    pub titles: Vec<String>,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub hold_full_ms: u32,
    pub hold_empty_ms: u32,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            element_id: "typewriter".to_string(),
            titles_attribute: "data-titles".to_string(),
            titles: vec![
                "Software Engineer".to_string(),
                "Backend Developer".to_string(),
                "Systems Tinkerer".to_string(),
            ],
            type_delay_ms: 70,
            delete_delay_ms: 35,
            hold_full_ms: 2_000,
            hold_empty_ms: 400,
        }
    }
}

/// Animated counter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CounterSettings {
    pub selector: String,
    pub target_attribute: String,
    pub threshold: f64,
    pub duration_ms: u32,
    pub suffix: String,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            selector: ".counter".to_string(),
            target_attribute: "data-target".to_string(),
            threshold: 0.5,
            duration_ms: 1_800,
            suffix: "+".to_string(),
        }
    }
}

/// Back-to-top control settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackToTopSettings {
    pub element_id: String,
    pub threshold: f64,
    pub visible_class: String,
}

impl Default for BackToTopSettings {
    fn default() -> Self {
        Self {
            element_id: "back-to-top".to_string(),
            threshold: 500.0,
            visible_class: "visible".to_string(),
        }
    }
}

/// Complete configuration for every page effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolioConfig {
    pub particles: ParticleSettings,
    pub reveal: RevealSettings,
    pub nav: NavSettings,
    pub navbar: NavbarSettings,
    pub menu: MenuSettings,
    /// Selector for in-page links routed through smooth scrolling.
    pub anchor_selector: String,
    pub typewriter: TypewriterSettings,
    pub counters: CounterSettings,
    pub back_to_top: BackToTopSettings,
}

impl FolioConfig {
    /// Decode a JSON document, filling omitted fields with defaults.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(source).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no effect can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let particles = &self.particles;
        if particles.max_particles > 1_000 {
            return Err(ConfigError::Invalid(
                "particles.max_particles must be 1,000 or fewer",
            ));
        }
        if !(particles.area_per_particle.is_finite() && particles.area_per_particle > 0.0) {
            return Err(ConfigError::Invalid(
                "particles.area_per_particle must be positive",
            ));
        }
        if !(particles.link_distance.is_finite() && particles.link_distance > 0.0) {
            return Err(ConfigError::Invalid("particles.link_distance must be positive"));
        }
        if !(0.0..=1.0).contains(&particles.link_alpha) || !(0.0..=1.0).contains(&particles.dot_alpha)
        {
            return Err(ConfigError::Invalid(
                "particle opacities must lie in [0, 1]",
            ));
        }
        let non_negative = |value: f64| value.is_finite() && value >= 0.0;
        if !(non_negative(particles.velocity_spread)
            && non_negative(particles.radius_min)
            && non_negative(particles.radius_spread)
            && non_negative(particles.link_width))
        {
            return Err(ConfigError::Invalid(
                "particle velocity, radius and line width must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold)
            || !(0.0..=1.0).contains(&self.counters.threshold)
        {
            return Err(ConfigError::Invalid(
                "intersection thresholds must lie in [0, 1]",
            ));
        }
        if !non_negative(self.reveal.bottom_inset) {
            return Err(ConfigError::Invalid("reveal.bottom_inset must be non-negative"));
        }
        if !(self.nav.lookahead.is_finite()
            && self.navbar.threshold.is_finite()
            && self.back_to_top.threshold.is_finite())
        {
            return Err(ConfigError::Invalid(
                "scroll offsets and thresholds must be finite",
            ));
        }
        let typewriter = &self.typewriter;
        if typewriter.type_delay_ms == 0 || typewriter.delete_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "typewriter character delays must be non-zero",
            ));
        }
        if self.counters.duration_ms == 0 {
            return Err(ConfigError::Invalid("counters.duration_ms must be non-zero"));
        }
        Ok(())
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            particles: ParticleSettings::default(),
            reveal: RevealSettings::default(),
            nav: NavSettings::default(),
            navbar: NavbarSettings::default(),
            menu: MenuSettings::default(),
            anchor_selector: r##"a[href^="#"]"##.to_string(),
            typewriter: TypewriterSettings::default(),
            counters: CounterSettings::default(),
            back_to_top: BackToTopSettings::default(),
        }
    }
}
