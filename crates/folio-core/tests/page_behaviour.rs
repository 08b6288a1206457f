use std::convert::Infallible;
use std::time::Duration;

use folio_core::typewriter::Cadence;
use folio_core::{
    AnchorTarget, CounterAnimation, FolioConfig, IntersectionSample, NavHighlighter,
    ParticleField, ParticleSettings, Phase, Point, RevealTracker, Rgba, SectionBounds, Surface,
    Typewriter, Viewport, particle_count,
};

#[derive(Default)]
struct LineLog {
    lines: Vec<((f64, f64), (f64, f64), f64)>,
}

impl Surface for LineLog {
    type Error = Infallible;

    fn clear(&mut self, _viewport: Viewport) -> Result<(), Infallible> {
        self.lines.clear();
        Ok(())
    }

    fn fill_circle(&mut self, _x: f64, _y: f64, _r: f64, _color: Rgba) -> Result<(), Infallible> {
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        _width: f64,
        color: Rgba,
    ) -> Result<(), Infallible> {
        self.lines.push((from, to, color.a));
        Ok(())
    }
}

#[test]
fn particle_count_never_exceeds_cap() {
    let settings = ParticleSettings::default();
    for width in (0..=4_000).step_by(250) {
        for height in (0..=3_000).step_by(250) {
            let viewport = Viewport::new(width as f64, height as f64);
            let count = particle_count(viewport, settings.max_particles, settings.area_per_particle);
            let expected = ((width * height) as f64 / 15_000.0).floor().min(80.0) as usize;
            assert_eq!(count, expected, "{width}x{height}");
            assert!(count <= 80);
        }
    }
}

#[test]
fn points_stay_within_one_frame_of_bounds() {
    let viewport = Viewport::new(640.0, 480.0);
    let settings = ParticleSettings {
        seed: Some(0xDEAD_BEEF),
        ..ParticleSettings::default()
    };
    let mut field = ParticleField::seeded(viewport, settings, 0);
    assert_eq!(field.points().len(), 20);

    for _ in 0..20_000 {
        field.step();
        for point in field.points() {
            let slack_x = point.vx.abs() + 1e-9;
            let slack_y = point.vy.abs() + 1e-9;
            assert!(point.x >= -slack_x && point.x <= viewport.width + slack_x);
            assert!(point.y >= -slack_y && point.y <= viewport.height + slack_y);
        }
    }
}

#[test]
fn link_opacity_follows_distance() {
    let settings = ParticleSettings::default();
    let points = vec![
        Point::new(0.0, 0.0, 0.0, 0.0, 1.0),
        Point::new(0.0, 0.0, 0.0, 0.0, 1.0),
        Point::new(139.0, 0.0, 0.0, 0.0, 1.0),
        Point::new(0.0, 140.0, 0.0, 0.0, 1.0),
    ];
    let field = ParticleField::with_points(Viewport::new(1_000.0, 1_000.0), settings, points);

    let links = field.links();
    for link in &links {
        let expected = 0.08 * (1.0 - link.distance / 140.0);
        assert!((link.alpha - expected).abs() < 1e-12);
        assert!(link.alpha > 0.0 && link.alpha <= 0.08);
        assert!(link.distance < 140.0);
    }
    // (0,1) coincident, (0,2) and (1,2) at 139; every pair with point 3 is >= 140 away.
    let pairs: Vec<(usize, usize)> = links.iter().map(|l| (l.from, l.to)).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    assert_eq!(links[0].alpha, 0.08);
}

#[test]
fn rendered_lines_match_link_set() {
    let settings = ParticleSettings {
        seed: Some(7),
        ..ParticleSettings::default()
    };
    let mut field = ParticleField::seeded(Viewport::new(1_200.0, 800.0), settings, 0);
    let mut surface = LineLog::default();
    field.render(&mut surface).expect("infallible");
    assert_eq!(surface.lines.len(), field.links().len());
}

#[test]
fn reveal_is_one_shot() {
    let config = FolioConfig::default();
    let mut tracker = RevealTracker::new(3, config.reveal.threshold);
    assert!(tracker.record(1, IntersectionSample::new(true, 0.5)));
    assert!(!tracker.record(1, IntersectionSample::new(false, 0.0)));
    assert!(!tracker.record(1, IntersectionSample::new(true, 0.5)));
    assert!(tracker.is_revealed(1));
    assert_eq!(tracker.revealed_count(), 1);
}

#[test]
fn nav_marks_section_under_lookahead() {
    let sections = vec![
        SectionBounds::new("a", 0.0, 300.0),
        SectionBounds::new("b", 300.0, 500.0),
    ];
    let mut nav = NavHighlighter::new(FolioConfig::default().nav.lookahead);
    assert_eq!(nav.update(&sections, 0.0), Some("a"));
    assert_eq!(nav.update(&sections, 150.0), Some("b"));
    assert_eq!(nav.active(), Some("b"));
}

#[test]
fn typewriter_timeline_for_two_titles() {
    let mut typewriter = Typewriter::new(["Go", "Rust"], Cadence::default()).expect("titles");
    let mut clock = typewriter.initial_delay();
    assert_eq!(clock, Duration::from_millis(70));

    // Typing "Go": one step per 70ms.
    let wait = typewriter.step();
    assert_eq!(typewriter.text(), "G");
    clock += wait;
    let wait = typewriter.step();
    assert_eq!(typewriter.text(), "Go");
    assert_eq!(clock, Duration::from_millis(140));
    assert_eq!(wait, Duration::from_millis(2_000));
    assert_eq!(typewriter.phase(), Phase::HoldFull);
    clock += wait;

    // Hold ends, then two 35ms deletions.
    let wait = typewriter.step();
    assert_eq!(typewriter.text(), "Go");
    assert_eq!(wait, Duration::from_millis(35));
    clock += wait;
    clock += typewriter.step();
    assert_eq!(typewriter.text(), "G");
    let wait = typewriter.step();
    assert_eq!(typewriter.text(), "");
    assert_eq!(wait, Duration::from_millis(400));
    assert_eq!(clock, Duration::from_millis(140 + 2_000 + 35 + 35));
    clock += wait;

    // Next title starts typing.
    let wait = typewriter.step();
    assert_eq!(typewriter.index(), 1);
    assert_eq!(typewriter.phase(), Phase::Typing);
    clock += wait;
    typewriter.step();
    assert_eq!(typewriter.text(), "R");
    assert_eq!(clock, Duration::from_millis(140 + 2_000 + 70 + 400 + 70));
}

#[test]
fn counter_reaches_target_label() {
    let config = FolioConfig::default();
    let counter = CounterAnimation::from_attribute(
        "150",
        Duration::from_millis(config.counters.duration_ms.into()),
        config.counters.suffix.clone(),
    )
    .expect("numeric target");
    assert_eq!(counter.label_at(Duration::ZERO), "0+");
    assert_eq!(counter.label_at(Duration::from_millis(1_800)), "150+");
}

#[test]
fn missing_anchor_target_is_a_no_op() {
    let ids = ["about", "work"];
    let target = AnchorTarget::from_href("#contact").expect("fragment link");
    let resolved = target.resolve(|id| ids.iter().find(|candidate| **candidate == id));
    assert!(resolved.is_none());
}
