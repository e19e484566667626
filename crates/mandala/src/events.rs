use zodiac::PlanetName;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
    GlyphFound { planet: PlanetName, path: PathBuf },
    GlyphMissing(PlanetName),
}
