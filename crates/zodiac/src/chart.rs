use crate::angle::{AngularFrame, Direction, normalize_degree};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};
use std::collections::HashSet;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct PlanetName(String);

crate::impl_string_newtype!(PlanetName);

impl PlanetName {
    /// Key used to resolve the planet's glyph resource.
    pub fn glyph_key(&self) -> String {
        self.0.to_lowercase()
    }
}

/// A planet on the ecliptic. Unparseable longitudes deserialize to 0 so a
/// half-loaded chart still renders.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub name: PlanetName,
    #[serde(rename = "degree", default)]
    #[serde_as(as = "DefaultOnError")]
    pub degree_longitude: f64,
}

impl PlanetPosition {
    pub fn new(name: impl Into<String>, degree_longitude: f64) -> Self {
        Self {
            name: PlanetName::new(name),
            degree_longitude: normalize_degree(degree_longitude),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("planet '{0}' appears more than once")]
    DuplicatePlanet(PlanetName),
}

/// Ascendant plus planets for one render. Longitudes are normalised on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    ascendant_deg: f64,
    planets: Vec<PlanetPosition>,
}

impl Chart {
    pub fn new(ascendant_deg: f64, planets: Vec<PlanetPosition>) -> Result<Self, ChartError> {
        let mut seen = HashSet::new();
        let planets = planets
            .into_iter()
            .map(|p| {
                if seen.insert(p.name.glyph_key()) {
                    Ok(PlanetPosition::new(p.name.to_string(), p.degree_longitude))
                } else {
                    Err(ChartError::DuplicatePlanet(p.name))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            ascendant_deg: normalize_degree(ascendant_deg),
            planets,
        })
    }

    pub fn ascendant_deg(&self) -> f64 {
        self.ascendant_deg
    }

    pub fn planets(&self) -> &[PlanetPosition] {
        &self.planets
    }

    pub fn planet(&self, name: &str) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn frame(&self, direction: Direction) -> AngularFrame {
        AngularFrame::from_ascendant(self.ascendant_deg, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_normalises_longitudes() {
        let chart = Chart::new(
            456.0,
            vec![
                PlanetPosition::new("Sun", 59.0),
                PlanetPosition {
                    name: PlanetName::new("Moon"),
                    degree_longitude: f64::NAN,
                },
                PlanetPosition {
                    name: PlanetName::new("Mars"),
                    degree_longitude: -10.0,
                },
            ],
        )
        .unwrap();

        assert_eq!(chart.ascendant_deg(), 96.0);
        assert_eq!(chart.planet("moon").unwrap().degree_longitude, 0.0);
        assert_eq!(chart.planet("Mars").unwrap().degree_longitude, 350.0);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = Chart::new(
            0.0,
            vec![PlanetPosition::new("Sun", 1.0), PlanetPosition::new("sun", 2.0)],
        )
        .unwrap_err();
        assert_eq!(err, ChartError::DuplicatePlanet(PlanetName::new("sun")));
    }

    #[test]
    fn test_non_numeric_degree_deserializes_to_zero() {
        let planets: Vec<PlanetPosition> = serde_json::from_str(
            r#"[{"name": "Sun", "degree": "n/a"}, {"name": "Moon"}, {"name": "Mars", "degree": 12.5}]"#,
        )
        .unwrap();

        assert_eq!(planets[0].degree_longitude, 0.0);
        assert_eq!(planets[1].degree_longitude, 0.0);
        assert_eq!(planets[2].degree_longitude, 12.5);
    }

    #[test]
    fn test_empty_chart_is_valid() {
        let chart = Chart::new(10.0, Vec::new()).unwrap();
        assert!(chart.planets().is_empty());
        assert_eq!(chart.frame(Direction::Anticlockwise).rotation_offset_deg, 350.0);
    }
}
