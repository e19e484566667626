use crate::events::AppEvent;
use crate::sys::glyphs;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;
use zodiac::PlanetName;

pub fn start_background_services(config_path: PathBuf, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(config_path, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

/// Resolves glyph files off the main thread and reports each planet back.
pub fn scan_glyphs(glyph_dir: Option<PathBuf>, planets: Vec<PlanetName>, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let dirs = glyphs::glyph_directories(glyph_dir.as_deref());
        for planet in planets {
            let event = match glyphs::find_glyph(&dirs, &planet) {
                Some(path) => AppEvent::GlyphFound { planet, path },
                None => AppEvent::GlyphMissing(planet),
            };
            if tx.send_blocking(event).is_err() {
                break;
            }
        }
    });
}
