//! Drifting point field drawn behind the page, with proximity links.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::debug;

use crate::ParticleSettings;

/// Dimensions of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Area of the viewport; degenerate dimensions count as zero.
    #[must_use]
    pub fn area(&self) -> f64 {
        let width = if self.width.is_finite() { self.width.max(0.0) } else { 0.0 };
        let height = if self.height.is_finite() { self.height.max(0.0) } else { 0.0 };
        width * height
    }
}

/// Number of points seeded for `viewport`: `min(max, floor(area / area_per_particle))`.
#[must_use]
pub fn particle_count(viewport: Viewport, max: usize, area_per_particle: f64) -> usize {
    if !(area_per_particle.is_finite() && area_per_particle > 0.0) {
        return 0;
    }
    let earned = (viewport.area() / area_per_particle).floor();
    if earned >= max as f64 {
        max
    } else {
        earned as usize
    }
}

/// A single drifting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            radius,
        }
    }

    /// Sample a point uniformly inside `viewport`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        settings: &ParticleSettings,
    ) -> Self {
        let spread = settings.velocity_spread;
        Self {
            x: rng.random::<f64>() * viewport.width,
            y: rng.random::<f64>() * viewport.height,
            vx: (rng.random::<f64>() - 0.5) * spread,
            vy: (rng.random::<f64>() - 0.5) * spread,
            radius: rng.random::<f64>() * settings.radius_spread + settings.radius_min,
        }
    }

    /// Advance one frame and reflect velocity when a coordinate is outside
    /// `[0, dimension]` and still moving away from it.
    ///
    /// Positions are never clamped. A point stranded outside by a shrinking
    /// viewport keeps its inward velocity and drifts back in.
    pub fn step(&mut self, viewport: Viewport) {
        self.x += self.vx;
        self.y += self.vy;
        if (self.x < 0.0 && self.vx < 0.0) || (self.x > viewport.width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.y < 0.0 && self.vy < 0.0) || (self.y > viewport.height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }

    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Colour with straight alpha, rendered in CSS `rgba()` syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub const fn new([r, g, b]: [u8; 3], a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A line to draw between two points of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub alpha: f64,
}

/// Opacity of a link at `distance`, or `None` once the pair is too far apart.
///
/// Decays linearly from `base_alpha` at zero distance to zero at `link_distance`.
#[must_use]
pub fn link_alpha(distance: f64, link_distance: f64, base_alpha: f64) -> Option<f64> {
    if distance < link_distance {
        Some(base_alpha * (1.0 - distance / link_distance))
    } else {
        None
    }
}

/// Drawing operations the field needs from its host.
pub trait Surface {
    type Error;

    /// Wipe the whole drawing area.
    fn clear(&mut self, viewport: Viewport) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba)
    -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgba,
    ) -> Result<(), Self::Error>;
}

/// Owns every point of the background and renders one frame at a time.
#[derive(Debug, Clone)]
pub struct ParticleField {
    points: Vec<Point>,
    viewport: Viewport,
    settings: ParticleSettings,
    frames: u64,
}

impl ParticleField {
    /// Seed a field sized for `viewport`.
    ///
    /// The point count is fixed here; later resizes never reseed.
    pub fn new<R: Rng + ?Sized>(
        viewport: Viewport,
        settings: ParticleSettings,
        rng: &mut R,
    ) -> Self {
        let count = particle_count(viewport, settings.max_particles, settings.area_per_particle);
        let points = (0..count)
            .map(|_| Point::random(rng, viewport, &settings))
            .collect();
        debug!(
            count,
            width = viewport.width,
            height = viewport.height,
            "seeded particle field"
        );
        Self::with_points(viewport, settings, points)
    }

    /// Seed using `settings.seed`, falling back to `entropy` when unset.
    pub fn seeded(viewport: Viewport, settings: ParticleSettings, entropy: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(settings.seed.unwrap_or(entropy));
        Self::new(viewport, settings, &mut rng)
    }

    /// Build a field from explicit points.
    #[must_use]
    pub fn with_points(viewport: Viewport, settings: ParticleSettings, points: Vec<Point>) -> Self {
        Self {
            points,
            viewport,
            settings,
            frames: 0,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Track new surface dimensions. Existing points keep their positions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance every point by one frame.
    pub fn step(&mut self) {
        let viewport = self.viewport;
        for point in &mut self.points {
            point.step(viewport);
        }
    }

    /// Visit every unordered pair closer than the link distance.
    pub fn for_each_link(&self, mut visit: impl FnMut(Link)) {
        let limit = self.settings.link_distance;
        let limit_sq = limit * limit;
        for (i, a) in self.points.iter().enumerate() {
            for (offset, b) in self.points[i + 1..].iter().enumerate() {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                if dx * dx + dy * dy >= limit_sq {
                    continue;
                }
                let distance = (dx * dx + dy * dy).sqrt();
                if let Some(alpha) = link_alpha(distance, limit, self.settings.link_alpha) {
                    visit(Link {
                        from: i,
                        to: i + 1 + offset,
                        distance,
                        alpha,
                    });
                }
            }
        }
    }

    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        self.for_each_link(|link| links.push(link));
        links
    }

    /// Clear the surface, advance and draw every point, then draw the links.
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.viewport)?;

        let viewport = self.viewport;
        let dot = Rgba::new(self.settings.color, self.settings.dot_alpha);
        for point in &mut self.points {
            point.step(viewport);
            surface.fill_circle(point.x, point.y, point.radius, dot)?;
        }

        let mut links = Vec::new();
        self.for_each_link(|link| links.push(link));
        for link in links {
            let a = self.points[link.from];
            let b = self.points[link.to];
            surface.stroke_line(
                (a.x, a.y),
                (b.x, b.y),
                self.settings.link_width,
                Rgba::new(self.settings.color, link.alpha),
            )?;
        }

        self.frames += 1;
        Ok(())
    }
}
