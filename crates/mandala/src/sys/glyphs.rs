use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use zodiac::PlanetName;

const GLYPH_EXTENSIONS: &[&str] = &["png", "svg"];

/// Resolved glyph paths. Misses are not cached so files added later are found.
static GLYPHS: OnceLock<RwLock<HashMap<String, PathBuf>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<String, PathBuf>> {
    GLYPHS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Forgets every resolved glyph, e.g. after the glyph directory changed.
pub fn refresh_cache() {
    cache().write().clear();
}

/// Configured directory first, then `mandala/glyphs` under the XDG data dirs.
pub fn glyph_directories(configured: Option<&Path>) -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs: Vec<PathBuf> = configured.into_iter().map(Path::to_path_buf).collect();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join("mandala/glyphs"));
    }

    dirs.extend(
        xdg.get_data_dirs()
            .into_iter()
            .map(|p| p.join("mandala/glyphs")),
    );
    dirs
}

pub fn find_glyph(dirs: &[PathBuf], planet: &PlanetName) -> Option<PathBuf> {
    let key = planet.glyph_key();
    let cached = cache().read().get(&key).cloned();
    if let Some(path) = cached {
        if path.is_file() {
            return Some(path);
        }
        cache().write().remove(&key);
    }

    let found = dirs.iter().find_map(|dir| {
        GLYPH_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{key}.{ext}")))
            .find(|path| path.is_file())
    })?;
    cache().write().insert(key, found.clone());
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_glyph_in_configured_dir() {
        let dir = std::env::temp_dir().join(format!("mandala-glyphs-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(dir.join("jupiter.svg"), "<svg/>").unwrap();

        let dirs = glyph_directories(Some(dir.as_path()));
        assert_eq!(dirs[0], dir);

        let found = find_glyph(&dirs, &PlanetName::new("Jupiter"));
        assert_eq!(found, Some(dir.join("jupiter.svg")));
        assert_eq!(find_glyph(&dirs, &PlanetName::new("Vulcan")), None);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_glyph_files_added_or_removed_later() {
        let dir = std::env::temp_dir().join(format!("mandala-late-glyphs-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let dirs = vec![dir.clone()];
        let saturn = PlanetName::new("Saturn");

        assert_eq!(find_glyph(&dirs, &saturn), None);

        fs_err::write(dir.join("saturn.png"), "png").unwrap();
        assert_eq!(find_glyph(&dirs, &saturn), Some(dir.join("saturn.png")));

        fs_err::remove_file(dir.join("saturn.png")).unwrap();
        assert_eq!(find_glyph(&dirs, &saturn), None);

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
