//! Screen-space geometry shared by the raster pass and the hit tester.

use crate::angle::{AngularFrame, Direction};
use crate::chart::{Chart, PlanetName, PlanetPosition};
use crate::rings::{RingId, RingSpec, SCALE_RING, SIGN_RING};
use std::f64::consts::PI;

/// Largest logical edge of the diagram; bigger containers leave a margin.
pub const MAX_LOGICAL_SIZE: f64 = 800.0;
pub const GLYPH_SIZE: f64 = 60.0;
pub const PLANET_HIT_RADIUS: f64 = 26.0;
pub const FALLBACK_MARKER_RADIUS: f64 = 6.0;
pub const HIGHLIGHT_PADDING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The rotating sky frame and the fixed house frame of one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frames {
    pub sky: AngularFrame,
    pub houses: AngularFrame,
}

impl Frames {
    pub fn new(ascendant_deg: f64, direction: Direction) -> Self {
        Self {
            sky: AngularFrame::from_ascendant(ascendant_deg, direction),
            houses: AngularFrame::houses(direction),
        }
    }

    pub fn for_chart(chart: &Chart, direction: Direction) -> Self {
        Self::new(chart.ascendant_deg(), direction)
    }

    pub fn for_ring(&self, ring: RingId) -> &AngularFrame {
        if ring.rotates() {
            &self.sky
        } else {
            &self.houses
        }
    }
}

/// Square diagram fitted into a container, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub center: Point,
    pub size: f64,
}

impl Layout {
    /// `None` for an empty or degenerate container; callers skip the frame.
    pub fn fit(width: f64, height: f64) -> Option<Self> {
        let usable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        usable.then(|| Self {
            center: Point::new(width / 2.0, height / 2.0),
            size: width.min(height).min(MAX_LOGICAL_SIZE),
        })
    }

    pub fn base_radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Marker sizes are tuned for the full 800-unit diagram.
    pub fn scale(&self) -> f64 {
        self.size / MAX_LOGICAL_SIZE
    }

    /// `(inner, outer)` radii of a ring.
    pub fn band(&self, ring: &RingSpec) -> (f64, f64) {
        let base = self.base_radius();
        (base * ring.inner_radius_frac, base * ring.outer_radius_frac)
    }

    pub fn polar(&self, angle: f64, radius: f64) -> Point {
        Point::new(
            self.center.x + radius * angle.cos(),
            self.center.y + radius * angle.sin(),
        )
    }

    /// Planets sit on the middle of the sign ring whatever ring they belong to.
    pub fn planet_orbit(&self) -> f64 {
        let (inner, outer) = self.band(&SIGN_RING);
        (inner + outer) / 2.0
    }

    pub fn tick_radius(&self) -> f64 {
        self.base_radius() * (SCALE_RING.inner_radius_frac - 0.04)
    }

    pub fn wedge(&self, ring: &RingSpec, index: usize, frames: &Frames) -> Wedge {
        let frame = frames.for_ring(ring.id);
        let (inner_radius, outer_radius) = self.band(ring);
        let start_angle = frame.to_screen(ring.segment_start_deg(index));
        let end_angle = frame.to_screen(ring.segment_end_deg(index));
        let mid_deg = ring.segment_mid_deg(index);
        let mid_angle = frame.to_screen(mid_deg);

        let mut label_rotation = mid_angle + PI / 2.0;
        if !ring.id.rotates() && mid_deg > 90.0 && mid_deg < 270.0 {
            label_rotation += PI;
        }

        Wedge {
            ring: ring.id,
            index,
            start_angle,
            end_angle,
            inner_radius,
            outer_radius,
            label_anchor: self.polar(mid_angle, (inner_radius + outer_radius) / 2.0),
            label_rotation,
        }
    }

    pub fn wedges<'a>(
        &'a self,
        ring: &'a RingSpec,
        frames: &'a Frames,
    ) -> impl Iterator<Item = Wedge> + 'a {
        (0..ring.segment_count).map(move |i| self.wedge(ring, i, frames))
    }

    pub fn mark(&self, planet: &PlanetPosition, frames: &Frames) -> PlanetMark {
        let angle = frames.sky.to_screen(planet.degree_longitude);
        PlanetMark {
            name: planet.name.clone(),
            degree_longitude: planet.degree_longitude,
            screen: self.polar(angle, self.planet_orbit()),
            hit_radius: PLANET_HIT_RADIUS * self.scale(),
        }
    }
}

/// One annular segment ready to be filled. Angles are unnormalised screen
/// radians; `start_angle` and `end_angle` may come in either order.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub ring: RingId,
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub label_anchor: Point,
    pub label_rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetMark {
    pub name: PlanetName,
    pub degree_longitude: f64,
    pub screen: Point,
    pub hit_radius: f64,
}

impl PlanetMark {
    pub fn contains(&self, p: Point) -> bool {
        self.screen.distance_to(p) <= self.hit_radius
    }
}

/// Everything a hit test needs from the frame currently on screen. A render
/// builds a new snapshot and replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub frames: Frames,
    pub layout: Layout,
    pub marks: Vec<PlanetMark>,
}

pub fn project(layout: Layout, frames: Frames, planets: &[PlanetPosition]) -> RenderSnapshot {
    RenderSnapshot {
        frames,
        layout,
        marks: planets.iter().map(|p| layout.mark(p, &frames)).collect(),
    }
}
