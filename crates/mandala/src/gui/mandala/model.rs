use super::GLYPH_PIXELS;
use crate::config::{ChartKind, Config};
use gdk_pixbuf::Pixbuf;
use std::collections::HashMap;
use std::path::Path;
use zodiac::layout::Frames;
use zodiac::{
    Chart, ChartError, Direction, MandalaEvent, PlanetName, Point, RenderSnapshot,
    SelectionController,
};

/// Everything the draw callback and the pointer handlers share.
pub struct State {
    pub config: Config,
    pub chart_kind: ChartKind,
    pub chart: Chart,
    pub glyphs: HashMap<String, Pixbuf>,
    /// Geometry of the frame currently on screen, replaced by every render.
    pub snapshot: Option<RenderSnapshot>,
    pub selection: SelectionController,
}

impl State {
    pub fn new(config: Config) -> Self {
        let chart_kind = config.active_chart;
        let chart = config.chart(chart_kind).unwrap_or_else(|e| {
            log::warn!("Ignoring {} chart: {}", chart_kind, e);
            Chart::default()
        });

        Self {
            config,
            chart_kind,
            chart,
            glyphs: HashMap::new(),
            snapshot: None,
            selection: SelectionController::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn frames(&self) -> Frames {
        Frames::for_chart(&self.chart, self.direction())
    }

    pub fn planet_names(&self) -> Vec<PlanetName> {
        self.chart.planets().iter().map(|p| p.name.clone()).collect()
    }

    /// Adopts a reloaded config. A chart that fails validation leaves the
    /// whole previous state in place. Loaded glyphs are dropped; the caller
    /// rescans them.
    pub fn apply_config(&mut self, config: Config) -> Result<Vec<MandalaEvent>, ChartError> {
        let chart_kind = config.active_chart;
        let chart = config.chart(chart_kind)?;
        self.config = config;
        self.glyphs.clear();
        Ok(self.swap_chart(chart_kind, chart))
    }

    /// Switches between rasi and navamsa. Without a navamsa table nothing changes.
    pub fn toggle_chart(&mut self) -> Result<Vec<MandalaEvent>, ChartError> {
        if !self.config.has_navamsa() {
            log::info!("No navamsa chart configured; staying on the {} chart", self.chart_kind);
            return Ok(Vec::new());
        }
        let chart_kind = self.chart_kind.toggled();
        let chart = self.config.chart(chart_kind)?;
        Ok(self.swap_chart(chart_kind, chart))
    }

    fn swap_chart(&mut self, chart_kind: ChartKind, chart: Chart) -> Vec<MandalaEvent> {
        self.chart_kind = chart_kind;
        self.chart = chart;
        self.selection.reset()
    }

    pub fn set_glyph(&mut self, planet: &PlanetName, path: &Path) -> bool {
        match Pixbuf::from_file_at_scale(path, GLYPH_PIXELS, GLYPH_PIXELS, true) {
            Ok(pixbuf) => {
                self.glyphs.insert(planet.glyph_key(), pixbuf);
                true
            }
            Err(e) => {
                log::warn!("Failed to load glyph {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Forgets a glyph whose file disappeared. True if one was loaded.
    pub fn drop_glyph(&mut self, planet: &PlanetName) -> bool {
        self.glyphs.remove(&planet.glyph_key()).is_some()
    }

    pub fn glyph(&self, planet: &PlanetName) -> Option<&Pixbuf> {
        self.glyphs.get(&planet.glyph_key())
    }

    pub fn pointer_moved(&mut self, pointer: Point) -> Vec<MandalaEvent> {
        self.selection.pointer_moved(self.snapshot.as_ref(), pointer)
    }

    pub fn pointer_left(&mut self) -> Vec<MandalaEvent> {
        self.selection.pointer_left()
    }

    pub fn clicked(&mut self, pointer: Point) -> Vec<MandalaEvent> {
        self.selection.clicked(self.snapshot.as_ref(), pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use zodiac::{LockState, PlanetPosition};

    fn config() -> Config {
        Config {
            rasi: ChartConfig {
                ascendant: 96.0,
                planets: vec![PlanetPosition::new("Sun", 59.0)],
            },
            navamsa: Some(ChartConfig {
                ascendant: 210.0,
                planets: vec![PlanetPosition::new("Sun", 233.5)],
            }),
            ..Config::default()
        }
    }

    #[test]
    fn test_toggle_chart_swaps_and_unlocks() {
        let mut state = State::new(config());
        state.clicked(Point::new(1.0, 1.0));
        assert_eq!(state.selection.lock_state(), LockState::Locked);

        state.toggle_chart().unwrap();
        assert_eq!(state.chart_kind, ChartKind::Navamsa);
        assert_eq!(state.chart.ascendant_deg(), 210.0);
        assert_eq!(state.selection.lock_state(), LockState::Unlocked);

        state.toggle_chart().unwrap();
        assert_eq!(state.chart.ascendant_deg(), 96.0);
    }

    #[test]
    fn test_toggle_without_navamsa_changes_nothing() {
        let mut state = State::new(Config {
            navamsa: None,
            ..config()
        });
        state.clicked(Point::new(1.0, 1.0));

        assert!(state.toggle_chart().unwrap().is_empty());
        assert_eq!(state.chart_kind, ChartKind::Rasi);
        assert_eq!(state.chart.ascendant_deg(), 96.0);
        assert_eq!(state.selection.lock_state(), LockState::Locked);
    }

    #[test]
    fn test_reload_and_missing_glyph_drop_images() {
        let mut state = State::new(config());
        let sun = PlanetName::new("Sun");
        state
            .glyphs
            .insert(sun.glyph_key(), Pixbuf::new(gdk_pixbuf::Colorspace::Rgb, true, 8, 4, 4).unwrap());
        assert!(state.glyph(&PlanetName::new("SUN")).is_some());

        assert!(state.drop_glyph(&sun));
        assert!(!state.drop_glyph(&sun));
        assert!(state.glyph(&sun).is_none());

        state
            .glyphs
            .insert(sun.glyph_key(), Pixbuf::new(gdk_pixbuf::Colorspace::Rgb, true, 8, 4, 4).unwrap());
        state.apply_config(config()).unwrap();
        assert!(state.glyphs.is_empty());
    }

    #[test]
    fn test_invalid_reload_keeps_previous_chart() {
        let mut state = State::new(config());
        let mut broken = config();
        broken.rasi.planets.push(PlanetPosition::new("SUN", 12.0));
        broken.direction = Direction::Clockwise;

        assert!(state.apply_config(broken).is_err());
        assert_eq!(state.chart.planets().len(), 1);
        assert_eq!(state.direction(), Direction::Anticlockwise);
    }

    #[test]
    fn test_invalid_startup_chart_renders_empty() {
        let mut broken = config();
        broken.rasi.planets.push(PlanetPosition::new("sun", 1.0));
        let state = State::new(broken);
        assert!(state.chart.planets().is_empty());
    }

    #[test]
    fn test_pointer_without_render_selects_nothing() {
        let mut state = State::new(config());
        assert!(state.pointer_moved(Point::new(400.0, 100.0)).is_empty());
        assert!(state.selection.active().is_none());
    }
}
