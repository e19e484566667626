use crate::layout::{Point, RenderSnapshot};
use crate::rings::{RINGS, RingSpec, segment_index_for};
use crate::selection::{PlanetPick, Selection};

/// Polar coordinates of a pointer relative to the diagram centre: distance and
/// raw screen angle in radians.
pub fn polar_of(snapshot: &RenderSnapshot, pointer: Point) -> (f64, f64) {
    let center = snapshot.layout.center;
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    (dx.hypot(dy), dy.atan2(dx))
}

/// Finds what sits under `pointer` in the frame described by `snapshot`.
///
/// Planet markers win over ring fills since they are painted on top. Rings
/// are tested outermost first over half-open `[inner, outer)` bands, so a
/// pointer on a shared edge belongs to the outer ring and to no other. The
/// outermost band also owns its rim, which is the edge of the diagram.
pub fn hit_test(snapshot: &RenderSnapshot, pointer: Point) -> Selection {
    if let Some(mark) = snapshot.marks.iter().find(|m| m.contains(pointer)) {
        return Selection::Planet(PlanetPick {
            name: mark.name.clone(),
            degree_longitude: mark.degree_longitude,
        });
    }

    let (distance, angle) = polar_of(snapshot, pointer);
    RINGS
        .iter()
        .find(|ring| in_band(snapshot, ring, distance))
        .map(|ring| {
            let longitude = snapshot.frames.for_ring(ring.id).to_longitude(angle);
            Selection::RingSegment {
                ring: ring.id,
                index: segment_index_for(longitude, ring),
            }
        })
        .unwrap_or_default()
}

fn in_band(snapshot: &RenderSnapshot, ring: &RingSpec, distance: f64) -> bool {
    let (inner, outer) = snapshot.layout.band(ring);
    let outermost = ring.id == RINGS[0].id;
    distance >= inner && (distance < outer || (outermost && distance <= outer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Direction;
    use crate::chart::{PlanetName, PlanetPosition};
    use crate::layout::{Frames, Layout, project};
    use crate::rings::{RingId, SCALE_RING, SIGN_RING};

    fn sky(asc: f64, direction: Direction, planets: &[PlanetPosition]) -> RenderSnapshot {
        let layout = Layout::fit(800.0, 800.0).unwrap();
        project(layout, Frames::new(asc, direction), planets)
    }

    fn aim(snapshot: &RenderSnapshot, ring: RingId, longitude: f64, radius: f64) -> Point {
        let angle = snapshot.frames.for_ring(ring).to_screen(longitude);
        snapshot.layout.polar(angle, radius)
    }

    fn segment(ring: RingId, index: usize) -> Selection {
        Selection::RingSegment { ring, index }
    }

    #[test]
    fn test_scenario_sun_at_59() {
        let snap = sky(96.0, Direction::Anticlockwise, &[PlanetPosition::new("Sun", 59.0)]);
        let base = snap.layout.base_radius();

        let on_sun = aim(&snap, RingId::Sign, 59.0, snap.layout.planet_orbit());
        assert!(hit_test(&snap, on_sun).is_planet(&PlanetName::new("Sun")));

        let mansion = aim(&snap, RingId::Mansion, 59.0, base * 0.75);
        assert_eq!(hit_test(&snap, mansion), segment(RingId::Mansion, 4));

        let sign = aim(&snap, RingId::Sign, 45.0, base * 0.85);
        assert_eq!(hit_test(&snap, sign), segment(RingId::Sign, 1));
    }

    #[test]
    fn test_planet_beats_ring() {
        let snap = sky(0.0, Direction::Anticlockwise, &[PlanetPosition::new("Mars", 110.6)]);
        let mark = &snap.marks[0];
        let nudged = Point::new(mark.screen.x + mark.hit_radius * 0.5, mark.screen.y);

        let (distance, _) = polar_of(&snap, nudged);
        let (inner, outer) = snap.layout.band(&SIGN_RING);
        assert!(distance >= inner && distance < outer);

        match hit_test(&snap, nudged) {
            Selection::Planet(pick) => assert_eq!(pick.name.as_str(), "Mars"),
            other => panic!("expected planet, got {other:?}"),
        }
    }

    #[test]
    fn test_ring_bands_outer_to_inner() {
        let snap = sky(0.0, Direction::Anticlockwise, &[]);
        let base = snap.layout.base_radius();
        let at = |ring: RingId, frac: f64| hit_test(&snap, aim(&snap, ring, 2.0, base * frac));

        assert_eq!(at(RingId::House, 0.95), segment(RingId::House, 0));
        assert_eq!(at(RingId::Sign, 0.85), segment(RingId::Sign, 0));
        assert_eq!(at(RingId::Mansion, 0.75), segment(RingId::Mansion, 0));
        assert_eq!(at(RingId::Scale, 0.65), segment(RingId::Scale, 0));
        assert_eq!(at(RingId::Scale, 0.3), Selection::None);
        assert_eq!(at(RingId::House, 1.2), Selection::None);
    }

    #[test]
    fn test_shared_edge_goes_outward() {
        let snap = sky(0.0, Direction::Anticlockwise, &[]);
        let edge = snap.layout.band(&SIGN_RING).1;
        let p = Point::new(snap.layout.center.x, snap.layout.center.y - edge);
        assert!(matches!(
            hit_test(&snap, p),
            Selection::RingSegment {
                ring: RingId::House,
                ..
            }
        ));

        let innermost = snap.layout.band(&SCALE_RING).0;
        let p = Point::new(snap.layout.center.x + innermost, snap.layout.center.y);
        assert!(matches!(
            hit_test(&snap, p),
            Selection::RingSegment {
                ring: RingId::Scale,
                ..
            }
        ));
    }

    #[test]
    fn test_diagram_rim_belongs_to_houses() {
        let snap = sky(0.0, Direction::Anticlockwise, &[]);
        let rim = snap.layout.band(RINGS[0]).1;
        assert_eq!(rim, 396.0);

        let on_rim = Point::new(400.0, 400.0 - rim);
        assert_eq!(hit_test(&snap, on_rim), segment(RingId::House, 0));

        let outside = Point::new(400.0, 400.0 - rim - 1e-6);
        assert_eq!(hit_test(&snap, outside), Selection::None);
    }

    #[test]
    fn test_houses_ignore_ascendant() {
        let base = 400.0;
        for asc in [0.0, 96.0, 250.0] {
            let snap = sky(asc, Direction::Anticlockwise, &[]);
            // straight up is the middle of the first house
            let top = Point::new(400.0, 400.0 - base * 0.95);
            assert_eq!(hit_test(&snap, top), segment(RingId::House, 0));
            // straight down is the seventh
            let bottom = Point::new(400.0, 400.0 + base * 0.95);
            assert_eq!(hit_test(&snap, bottom), segment(RingId::House, 6));
        }
    }

    #[test]
    fn test_ascendant_sign_is_at_top() {
        let snap = sky(96.0, Direction::Anticlockwise, &[]);
        let top = Point::new(400.0, 400.0 - 400.0 * 0.85);
        assert_eq!(hit_test(&snap, top), segment(RingId::Sign, 3));
    }

    #[test]
    fn test_render_and_pick_agree_for_every_segment() {
        for direction in [Direction::Anticlockwise, Direction::Clockwise] {
            let snap = sky(137.5, direction, &[]);
            for ring in RINGS {
                for wedge in snap.layout.wedges(ring, &snap.frames) {
                    let mid = (wedge.start_angle + wedge.end_angle) / 2.0;
                    let r = (wedge.inner_radius + wedge.outer_radius) / 2.0;
                    let p = snap.layout.polar(mid, r);
                    assert_eq!(hit_test(&snap, p), segment(ring.id, wedge.index));
                }
            }
        }
    }

    #[test]
    fn test_new_snapshot_replaces_marks() {
        let planets = [PlanetPosition::new("Moon", 208.6)];
        let big = sky(96.0, Direction::Anticlockwise, &planets);
        let old_mark = big.marks[0].screen;

        let small = project(
            Layout::fit(300.0, 300.0).unwrap(),
            Frames::new(96.0, Direction::Anticlockwise),
            &planets,
        );
        assert!(hit_test(&small, old_mark).planet().is_none());
        assert!(hit_test(&small, small.marks[0].screen).planet().is_some());
    }
}
