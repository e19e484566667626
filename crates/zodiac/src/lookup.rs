//! Table lookups used to annotate selections: lords, dignities, houses.

use crate::angle::normalize_degree;
use crate::chart::{PlanetName, PlanetPosition};
use crate::rings::{MANSION_RING, SIGN_RING, segment_index_for};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

pub struct GrahaRules {
    pub exalted_sign: usize,
    pub debilitated_sign: usize,
    pub own_signs: &'static [usize],
    pub friends: &'static [Graha],
    pub enemies: &'static [Graha],
}

impl Graha {
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    pub fn rules(self) -> &'static GrahaRules {
        use Graha::*;
        match self {
            Sun => &GrahaRules {
                exalted_sign: 0,
                debilitated_sign: 6,
                own_signs: &[4],
                friends: &[Moon, Mars, Jupiter],
                enemies: &[Venus, Saturn],
            },
            Moon => &GrahaRules {
                exalted_sign: 1,
                debilitated_sign: 7,
                own_signs: &[3],
                friends: &[Sun, Mercury],
                enemies: &[],
            },
            Mars => &GrahaRules {
                exalted_sign: 9,
                debilitated_sign: 3,
                own_signs: &[0, 7],
                friends: &[Sun, Moon, Jupiter],
                enemies: &[Mercury],
            },
            Mercury => &GrahaRules {
                exalted_sign: 5,
                debilitated_sign: 11,
                own_signs: &[2, 5],
                friends: &[Sun, Venus],
                enemies: &[Moon],
            },
            Jupiter => &GrahaRules {
                exalted_sign: 3,
                debilitated_sign: 9,
                own_signs: &[8, 11],
                friends: &[Sun, Moon, Mars],
                enemies: &[Mercury, Venus],
            },
            Venus => &GrahaRules {
                exalted_sign: 11,
                debilitated_sign: 5,
                own_signs: &[1, 6],
                friends: &[Mercury, Saturn],
                enemies: &[Sun, Moon],
            },
            Saturn => &GrahaRules {
                exalted_sign: 6,
                debilitated_sign: 0,
                own_signs: &[9, 10],
                friends: &[Mercury, Venus],
                enemies: &[Sun, Moon, Mars],
            },
            // node placements vary by tradition
            Rahu => &GrahaRules {
                exalted_sign: 1,
                debilitated_sign: 7,
                own_signs: &[],
                friends: &[Mercury, Venus, Saturn],
                enemies: &[Sun, Moon, Mars],
            },
            Ketu => &GrahaRules {
                exalted_sign: 7,
                debilitated_sign: 1,
                own_signs: &[],
                friends: &[Mars, Jupiter],
                enemies: &[Mercury, Venus, Saturn],
            },
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Dignity {
    Exalted,
    Debilitated,
    #[strum(to_string = "Own Sign")]
    OwnSign,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Relation {
    Friend,
    Enemy,
    Neutral,
    #[strum(to_string = "Own Lord")]
    Own,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, StrumDisplay)]
pub enum Karaka {
    #[strum(to_string = "Atmakaraka (AK)")]
    Atma,
    #[strum(to_string = "Amatyakaraka (AmK)")]
    Amatya,
    #[strum(to_string = "Bhratrikaraka (BK)")]
    Bhratri,
    #[strum(to_string = "Matrikaraka (MK)")]
    Matri,
    #[strum(to_string = "Putrakaraka (PK)")]
    Putra,
    #[strum(to_string = "Gnatikaraka (GK)")]
    Gnati,
    #[strum(to_string = "Darakaraka (DK)")]
    Dara,
}

const SIGN_LORDS: [Graha; 12] = [
    Graha::Mars,
    Graha::Venus,
    Graha::Mercury,
    Graha::Moon,
    Graha::Sun,
    Graha::Mercury,
    Graha::Venus,
    Graha::Mars,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Saturn,
    Graha::Jupiter,
];

/// Vimshottari order; repeats three times across the 27 mansions.
const MANSION_LORD_CYCLE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Venus,
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Rahu,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Mercury,
];

const HOUSE_SIGNIFICATIONS: [&str; 12] = [
    "Self, personality, physical body, appearance, health, vitality, general well-being.",
    "Wealth, family, speech, food, accumulated resources, values, early childhood.",
    "Siblings, courage, communication, short travels, skills, efforts, neighbors.",
    "Mother, home, land, property, vehicles, education, inner peace, happiness.",
    "Children, creativity, intelligence, romance, speculation, past life merit.",
    "Enemies, diseases, debts, obstacles, service, daily work, maternal relatives.",
    "Spouse, marriage, partnerships, business relationships, public life.",
    "Longevity, transformation, secrets, inheritance, occult, sudden events, research.",
    "Father, guru, dharma, fortune, higher learning, long journeys, spirituality.",
    "Career, reputation, authority, public image, achievements, government.",
    "Gains, income, friends, elder siblings, desires, networks, aspirations.",
    "Losses, expenses, foreign lands, isolation, moksha, hidden enemies.",
];

pub fn sign_index(longitude_deg: f64) -> usize {
    segment_index_for(longitude_deg, &SIGN_RING)
}

pub fn sign_lord(sign: usize) -> Graha {
    SIGN_LORDS[sign % SIGN_LORDS.len()]
}

pub fn mansion_lord(mansion: usize) -> Graha {
    MANSION_LORD_CYCLE[mansion % MANSION_LORD_CYCLE.len()]
}

pub fn mansion_lord_at(longitude_deg: f64) -> Graha {
    mansion_lord(segment_index_for(longitude_deg, &MANSION_RING))
}

/// Unknown planet names are always neutral.
pub fn dignity(planet: &str, longitude_deg: f64) -> Dignity {
    let Some(rules) = Graha::from_name(planet).map(Graha::rules) else {
        return Dignity::Neutral;
    };
    let sign = sign_index(longitude_deg);
    if sign == rules.exalted_sign {
        Dignity::Exalted
    } else if sign == rules.debilitated_sign {
        Dignity::Debilitated
    } else if rules.own_signs.contains(&sign) {
        Dignity::OwnSign
    } else {
        Dignity::Neutral
    }
}

/// How a planet regards the lord of the sign it occupies.
pub fn relation_to_lord(planet: &str, longitude_deg: f64) -> Relation {
    let Some(graha) = Graha::from_name(planet) else {
        return Relation::Neutral;
    };
    let lord = sign_lord(sign_index(longitude_deg));
    let rules = graha.rules();
    if lord == graha {
        Relation::Own
    } else if rules.friends.contains(&lord) {
        Relation::Friend
    } else if rules.enemies.contains(&lord) {
        Relation::Enemy
    } else {
        Relation::Neutral
    }
}

/// Whole-sign house, 1 through 12: the ascendant's sign is the first house.
pub fn house_number(planet_deg: f64, ascendant_deg: f64) -> usize {
    let asc = sign_index(ascendant_deg);
    let planet = sign_index(planet_deg);
    (planet + 12 - asc) % 12 + 1
}

pub fn house_signification(house: usize) -> Option<&'static str> {
    house
        .checked_sub(1)
        .and_then(|i| HOUSE_SIGNIFICATIONS.get(i))
        .copied()
}

/// Chara karakas: planets ranked by degree within their sign, highest first.
/// The nodes and unknown bodies take no karaka.
pub fn chara_karakas(planets: &[PlanetPosition]) -> Vec<(PlanetName, Karaka)> {
    let mut ranked: Vec<_> = planets
        .iter()
        .filter(|p| Graha::from_name(&p.name).is_some_and(|g| !g.is_node()))
        .map(|p| (p.name.clone(), normalize_degree(p.degree_longitude) % 30.0))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .zip(Karaka::iter())
        .map(|((name, _), karaka)| (name, karaka))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dignity_by_sign() {
        assert_eq!(dignity("Sun", 10.0), Dignity::Exalted);
        assert_eq!(dignity("Sun", 59.0), Dignity::Neutral);
        assert_eq!(dignity("sun", 185.0), Dignity::Debilitated);
        assert_eq!(dignity("Moon", 100.0), Dignity::OwnSign);
        assert_eq!(dignity("Pluto", 10.0), Dignity::Neutral);
        assert_eq!(Dignity::OwnSign.to_string(), "Own Sign");
    }

    #[test]
    fn test_whole_sign_houses() {
        assert_eq!(house_number(59.0, 96.0), 11);
        assert_eq!(house_number(96.0, 96.0), 1);
        assert_eq!(house_number(91.0, 119.0), 1);
        assert_eq!(house_number(85.0, 96.0), 12);
        assert_eq!(house_number(275.0, 96.0), 7);
    }

    #[test]
    fn test_lords() {
        assert_eq!(sign_lord(0), Graha::Mars);
        assert_eq!(sign_lord(11), Graha::Jupiter);
        assert_eq!(mansion_lord(0), Graha::Ketu);
        assert_eq!(mansion_lord(9), Graha::Ketu);
        assert_eq!(mansion_lord(26), Graha::Mercury);
        assert_eq!(mansion_lord_at(59.0), Graha::Mars);
    }

    #[test]
    fn test_relation_to_lord() {
        // Sun in Taurus, ruled by Venus
        assert_eq!(relation_to_lord("Sun", 59.0), Relation::Enemy);
        assert_eq!(relation_to_lord("Mars", 5.0), Relation::Own);
        assert_eq!(relation_to_lord("Moon", 125.0), Relation::Friend);
        assert_eq!(relation_to_lord("Moon", 25.0), Relation::Neutral);
    }

    #[test]
    fn test_house_significations() {
        assert!(house_signification(1).unwrap().starts_with("Self"));
        assert!(house_signification(12).unwrap().starts_with("Losses"));
        assert_eq!(house_signification(0), None);
        assert_eq!(house_signification(13), None);
    }

    #[test]
    fn test_chara_karakas() {
        let planets = vec![
            PlanetPosition::new("Sun", 55.9),
            PlanetPosition::new("Moon", 208.6),
            PlanetPosition::new("Rahu", 197.2),
            PlanetPosition::new("Mars", 110.6),
        ];
        let karakas = chara_karakas(&planets);
        let names: Vec<_> = karakas.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Moon", "Sun", "Mars"]);
        assert_eq!(karakas[0].1, Karaka::Atma);
        assert_eq!(karakas[2].1.to_string(), "Bhratrikaraka (BK)");
    }
}
