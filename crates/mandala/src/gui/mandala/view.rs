use super::model::State;
use super::{
    CAPTION_FONT_SIZE, HOUSE_FONT_SIZE, MANSION_FONT_SIZE, SCALE_FONT_SIZE, SIGN_FONT_SIZE,
    TICK_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::{Context, FontSlant, FontWeight, RadialGradient};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use zodiac::layout::{
    FALLBACK_MARKER_RADIUS, GLYPH_SIZE, HIGHLIGHT_PADDING, Layout, PlanetMark, Point, Wedge,
    project,
};
use zodiac::rings::{RINGS, RingId, RingSpec, SIGN_RING};
use zodiac::{RenderSnapshot, Selection};

/// Lays out the current chart for a `width` x `height` surface, stores the
/// result as the hit-test snapshot and paints it. An empty surface draws
/// nothing and keeps the previous snapshot.
pub fn render(
    cr: &Context,
    state: &mut State,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Some(layout) = Layout::fit(width, height) else {
        log::debug!("Skipping frame for empty surface {}x{}", width, height);
        return Ok(());
    };

    state.snapshot = Some(project(layout, state.frames(), state.chart.planets()));

    let state: &State = state;
    match &state.snapshot {
        Some(snapshot) => Painter {
            cr,
            snapshot,
            state,
            colors,
            active: state.selection.active(),
        }
        .draw(),
        None => Ok(()),
    }
}

struct Painter<'a> {
    cr: &'a Context,
    snapshot: &'a RenderSnapshot,
    state: &'a State,
    colors: &'a ThemeColors,
    active: &'a Selection,
}

impl Painter<'_> {
    fn layout(&self) -> &Layout {
        &self.snapshot.layout
    }

    fn draw(&self) -> Result<(), cairo::Error> {
        self.draw_background()?;
        for ring in RINGS {
            self.draw_ring(ring)?;
        }
        self.draw_degree_ticks()?;
        for mark in &self.snapshot.marks {
            self.draw_planet(mark)?;
        }
        self.draw_titles()
    }

    fn draw_background(&self) -> Result<(), cairo::Error> {
        let layout = self.layout();
        let (c, r) = (layout.center, layout.base_radius());
        let gradient = RadialGradient::new(c.x, c.y, 0.0, c.x, c.y, r);
        add_stop(&gradient, 0.0, self.colors.background_inner);
        add_stop(&gradient, 1.0, self.colors.background_outer);

        self.cr.set_source(&gradient)?;
        self.cr.new_path();
        self.cr.arc(c.x, c.y, r, 0.0, 2.0 * PI);
        self.cr.fill()
    }

    fn draw_ring(&self, ring: &RingSpec) -> Result<(), cairo::Error> {
        let wedges: Vec<Wedge> = self.layout().wedges(ring, &self.snapshot.frames).collect();

        self.cr.set_line_width(line_width(ring.id) * self.layout().scale().max(0.5));
        for wedge in &wedges {
            self.wedge_path(wedge);
            let fill = if self.active.is_segment(ring.id, wedge.index) {
                self.colors.hover(ring.id)
            } else {
                self.colors.fill(ring.id)
            };
            set_color(self.cr, fill);
            self.cr.fill_preserve()?;
            set_color(self.cr, self.colors.stroke);
            self.cr.stroke()?;
        }

        let (size, weight) = font(ring.id);
        set_color(self.cr, self.colors.text);
        self.cr.select_font_face("Sans", FontSlant::Normal, weight);
        self.cr.set_font_size(size * self.layout().scale());
        for wedge in &wedges {
            if let Some(label) = ring.display_label(wedge.index) {
                self.draw_rotated_label(wedge, &label)?;
            }
        }
        Ok(())
    }

    /// Annular sector between the wedge's radii, traced in whichever sense
    /// its boundary angles run.
    fn wedge_path(&self, wedge: &Wedge) {
        let c = self.layout().center;
        let cr = self.cr;
        cr.new_path();
        if wedge.end_angle < wedge.start_angle {
            cr.arc_negative(c.x, c.y, wedge.outer_radius, wedge.start_angle, wedge.end_angle);
            cr.arc(c.x, c.y, wedge.inner_radius, wedge.end_angle, wedge.start_angle);
        } else {
            cr.arc(c.x, c.y, wedge.outer_radius, wedge.start_angle, wedge.end_angle);
            cr.arc_negative(c.x, c.y, wedge.inner_radius, wedge.end_angle, wedge.start_angle);
        }
        cr.close_path();
    }

    fn draw_rotated_label(&self, wedge: &Wedge, text: &str) -> Result<(), cairo::Error> {
        let ext = self.cr.text_extents(text)?;
        self.cr.save()?;
        self.cr.translate(wedge.label_anchor.x, wedge.label_anchor.y);
        self.cr.rotate(wedge.label_rotation);
        self.cr.move_to(
            -ext.width() / 2.0 - ext.x_bearing(),
            -ext.height() / 2.0 - ext.y_bearing(),
        );
        self.cr.show_text(text)?;
        self.cr.restore()
    }

    /// `0°`, `30°`, ... just inside the innermost ring, one per sign boundary.
    fn draw_degree_ticks(&self) -> Result<(), cairo::Error> {
        let layout = self.layout();
        set_color(self.cr, self.colors.text);
        self.cr
            .select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
        self.cr.set_font_size(TICK_FONT_SIZE * layout.scale());

        for index in 0..SIGN_RING.segment_count {
            let deg = SIGN_RING.segment_start_deg(index);
            let angle = self.snapshot.frames.sky.to_screen(deg);
            let at = layout.polar(angle, layout.tick_radius());
            centered_text(self.cr, &format!("{deg:.0}°"), at)?;
        }
        Ok(())
    }

    fn draw_planet(&self, mark: &PlanetMark) -> Result<(), cairo::Error> {
        let scale = self.layout().scale();
        let glyph = GLYPH_SIZE * scale;

        if self.active.is_planet(&mark.name) {
            set_color(self.cr, self.colors.planet_hover);
            self.cr.new_path();
            self.cr.arc(
                mark.screen.x,
                mark.screen.y,
                glyph / 2.0 + HIGHLIGHT_PADDING * scale,
                0.0,
                2.0 * PI,
            );
            self.cr.fill()?;
        }

        match self.state.glyph(&mark.name) {
            Some(pixbuf) => self.draw_glyph(pixbuf, mark.screen, glyph),
            None => {
                set_color(self.cr, self.colors.marker);
                self.cr.new_path();
                self.cr.arc(
                    mark.screen.x,
                    mark.screen.y,
                    FALLBACK_MARKER_RADIUS * scale,
                    0.0,
                    2.0 * PI,
                );
                self.cr.fill()
            }
        }
    }

    fn draw_glyph(&self, pixbuf: &Pixbuf, at: Point, edge: f64) -> Result<(), cairo::Error> {
        let glyph_scale = edge / pixbuf.width().max(pixbuf.height()).max(1) as f64;
        let (gw, gh) = (
            pixbuf.width() as f64 * glyph_scale,
            pixbuf.height() as f64 * glyph_scale,
        );

        self.cr.save()?;
        self.cr.translate(at.x - gw / 2.0, at.y - gh / 2.0);
        self.cr.scale(glyph_scale, glyph_scale);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint()?;
        self.cr.restore()
    }

    fn draw_titles(&self) -> Result<(), cairo::Error> {
        let layout = self.layout();
        let scale = layout.scale();
        let c = layout.center;
        set_color(self.cr, self.colors.text);

        self.cr
            .select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
        self.cr.set_font_size(TITLE_FONT_SIZE * scale);
        centered_text(self.cr, "Mandala", Point::new(c.x, c.y - 12.0 * scale))?;

        self.cr.set_font_size(CAPTION_FONT_SIZE * scale);
        let caption = format!(
            "Asc : {:.0}° ({})",
            self.state.chart.ascendant_deg(),
            self.state.chart_kind
        );
        centered_text(self.cr, &caption, Point::new(c.x, c.y + 14.0 * scale))
    }
}

fn line_width(ring: RingId) -> f64 {
    match ring {
        RingId::House | RingId::Mansion => 1.0,
        RingId::Sign => 1.2,
        RingId::Scale => 0.8,
    }
}

fn font(ring: RingId) -> (f64, FontWeight) {
    match ring {
        RingId::House => (HOUSE_FONT_SIZE, FontWeight::Bold),
        RingId::Sign => (SIGN_FONT_SIZE, FontWeight::Bold),
        RingId::Mansion => (MANSION_FONT_SIZE, FontWeight::Normal),
        RingId::Scale => (SCALE_FONT_SIZE, FontWeight::Normal),
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn add_stop(gradient: &RadialGradient, offset: f64, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    gradient.add_color_stop_rgba(offset, r, g, b, a);
}

fn centered_text(cr: &Context, text: &str, at: Point) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.width() / 2.0 - ext.x_bearing(),
        at.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}
