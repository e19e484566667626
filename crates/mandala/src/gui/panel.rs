//! Text for the details panel beside the diagram.

use std::fmt::Write;
use zodiac::lookup;
use zodiac::rings::{MANSION_RING, RingId, SIGN_RING, segment_index_for};
use zodiac::{Chart, LockState, PlanetPick, Selection};

const PLACEHOLDER: &str = "Hover over the mandala to explore.\nClick to lock a selection.";

pub fn describe(selection: &Selection, chart: &Chart, lock: LockState) -> String {
    let mut text = match selection {
        Selection::None => return PLACEHOLDER.to_string(),
        Selection::Planet(pick) => describe_planet(pick, chart),
        Selection::RingSegment { ring, index } => describe_segment(*ring, *index),
    };
    if lock == LockState::Locked {
        text.push_str("\n\nLocked. Click again to release.");
    }
    text
}

fn describe_planet(pick: &PlanetPick, chart: &Chart) -> String {
    let deg = pick.degree_longitude;
    let sign = lookup::sign_index(deg);
    let mansion = segment_index_for(deg, &MANSION_RING);
    let house = lookup::house_number(deg, chart.ascendant_deg());

    let mut text = String::new();
    let _ = writeln!(text, "{}", pick.name);
    let _ = writeln!(text, "Longitude: {:.2}° ({:.2}° in sign)", deg, deg % 30.0);
    let _ = writeln!(text, "House: {house}");
    let _ = writeln!(
        text,
        "Sign: {} (lord {})",
        SIGN_RING.label(sign),
        lookup::sign_lord(sign)
    );
    let _ = writeln!(text, "Dignity: {}", lookup::dignity(&pick.name, deg));
    let _ = writeln!(
        text,
        "Relation with lord: {}",
        lookup::relation_to_lord(&pick.name, deg)
    );
    let _ = write!(
        text,
        "Mansion: {} (lord {})",
        MANSION_RING.label(mansion),
        lookup::mansion_lord(mansion)
    );

    if let Some((_, karaka)) = lookup::chara_karakas(chart.planets())
        .into_iter()
        .find(|(name, _)| *name == pick.name)
    {
        let _ = write!(text, "\nKaraka: {karaka}");
    }
    text
}

fn describe_segment(ring: RingId, index: usize) -> String {
    let spec = ring.spec();
    let mut text = format!(
        "{}\n{} {} of {}",
        spec.label(index),
        ring_title(ring),
        index + 1,
        spec.segment_count
    );

    match ring {
        RingId::House => {
            if let Some(meaning) = lookup::house_signification(index + 1) {
                let _ = write!(text, "\n\n{meaning}");
            }
        }
        RingId::Sign => {
            let _ = write!(text, "\nLord: {}", lookup::sign_lord(index));
        }
        RingId::Mansion => {
            let _ = write!(text, "\nLord: {}", lookup::mansion_lord(index));
        }
        RingId::Scale => {}
    }

    if let Some(about) = ring_description(ring) {
        let _ = write!(text, "\n\n{about}");
    }
    text
}

fn ring_title(ring: RingId) -> &'static str {
    match ring {
        RingId::House => "House",
        RingId::Sign => "Sign",
        RingId::Mansion => "Nakshatra",
        RingId::Scale => "Raga",
    }
}

fn ring_description(ring: RingId) -> Option<&'static str> {
    match ring {
        RingId::House => None,
        RingId::Sign => Some("Zodiac sign representing a 30° sector of the sky."),
        RingId::Mansion => Some("Lunar mansion representing the Moon's daily motion."),
        RingId::Scale => Some("Fundamental musical scale in Carnatic music system."),
    }
}
