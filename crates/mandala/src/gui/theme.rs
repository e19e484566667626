use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use zodiac::RingId;

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub background_inner: Srgba<f64>,
    pub background_outer: Srgba<f64>,
    pub house_fill: Srgba<f64>,
    pub house_hover: Srgba<f64>,
    pub sign_fill: Srgba<f64>,
    pub sign_hover: Srgba<f64>,
    pub mansion_fill: Srgba<f64>,
    pub mansion_hover: Srgba<f64>,
    pub scale_fill: Srgba<f64>,
    pub scale_hover: Srgba<f64>,
    pub stroke: Srgba<f64>,
    pub planet_hover: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background_inner: rgba8(228, 177, 11, 0.66),
            background_outer: rgba8(16, 80, 207, 0.14),
            house_fill: rgba8(255, 255, 255, 0.06),
            house_hover: rgba8(255, 255, 255, 0.3),
            sign_fill: rgba8(255, 255, 255, 0.11),
            sign_hover: rgba8(255, 255, 255, 0.4),
            mansion_fill: rgba8(215, 11, 11, 0.2),
            mansion_hover: rgba8(255, 100, 100, 0.5),
            scale_fill: rgba8(225, 9, 9, 0.24),
            scale_hover: rgba8(255, 50, 50, 0.5),
            stroke: rgba8(155, 167, 197, 0.94),
            planet_hover: rgba8(255, 255, 255, 0.4),
            marker: rgba8(255, 215, 0, 1.0),
            text: Srgba::new(0.1, 0.1, 0.1, 1.0),
        }
    }
}

fn rgba8(r: u8, g: u8, b: u8, alpha: f64) -> Srgba<f64> {
    Srgba::new(
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        alpha,
    )
}

impl ThemeColors {
    /// Ring palette is fixed; text and house highlight follow the GTK theme.
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let base = Self::default();
        Self {
            house_hover: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                base.house_hover,
                Some(0.4),
            ),
            text: Self::lookup_color(context, "theme_fg_color", base.text, Some(1.0)),
            ..base
        }
    }

    pub fn fill(&self, ring: RingId) -> Srgba<f64> {
        match ring {
            RingId::House => self.house_fill,
            RingId::Sign => self.sign_fill,
            RingId::Mansion => self.mansion_fill,
            RingId::Scale => self.scale_fill,
        }
    }

    pub fn hover(&self, ring: RingId) -> Srgba<f64> {
        match ring {
            RingId::House => self.house_hover,
            RingId::Sign => self.sign_hover,
            RingId::Mansion => self.mansion_hover,
            RingId::Scale => self.scale_hover,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.mandala-info {
    padding: 12px;
    font-family: monospace;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_is_stronger_than_fill() {
        let colors = ThemeColors::default();
        for ring in [RingId::House, RingId::Sign, RingId::Mansion, RingId::Scale] {
            assert!(colors.hover(ring).alpha > colors.fill(ring).alpha, "{ring}");
        }
    }
}
