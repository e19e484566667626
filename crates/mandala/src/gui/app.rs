use crate::config;
use crate::events::AppEvent;
use crate::gui::mandala::{self, State};
use crate::gui::panel;
use crate::gui::theme::{self, ThemeColors};
use crate::sys::{glyphs, runtime};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use zodiac::{MandalaEvent, PlanetName, Point};

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub config_path: PathBuf,
    pub events_tx: async_channel::Sender<AppEvent>,
    pub drawing_area: gtk::DrawingArea,
    pub info: String,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerMove(Point),
    PointerLeave,
    Click(Point),
    ToggleChart,
    ConfigReload,
    GlyphFound { planet: PlanetName, path: PathBuf },
    GlyphMissing(PlanetName),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::GlyphFound { planet, path } => AppMsg::GlyphFound { planet, path },
            AppEvent::GlyphMissing(planet) => AppMsg::GlyphMissing(planet),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        State,
        PathBuf,
        async_channel::Sender<AppEvent>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Mandala"),
            set_default_width: 1120,
            set_default_height: 820,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::n || key == gtk::gdk::Key::N {
                        sender.input(AppMsg::ToggleChart);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: 800,
                    set_content_height: 800,

                    connect_resize => move |_, width, height| {
                        log::debug!("Diagram resized to {}x{}", width, height);
                    },

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerMove(Point::new(x, y)));
                        },
                        connect_leave[sender] => move |_| {
                            sender.input(AppMsg::PointerLeave);
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 1,
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Click(Point::new(x, y)));
                        }
                    }
                },

                gtk::ScrolledWindow {
                    set_width_request: 300,
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    gtk::Label {
                        add_css_class: "mandala-info",
                        set_xalign: 0.0,
                        set_yalign: 0.0,
                        set_wrap: true,
                        #[watch]
                        set_label: &model.info,
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, config_path, events_tx, rx) = init;

        theme::load_css();

        runtime::scan_glyphs(
            state.config.glyph_dir.clone(),
            state.planet_names(),
            events_tx.clone(),
        );

        let info = panel::describe(
            state.selection.active(),
            &state.chart,
            state.selection.lock_state(),
        );

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            config_path,
            events_tx,
            drawing_area: gtk::DrawingArea::default(),
            info,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let mut state = state_draw.borrow_mut();
                if let Err(e) =
                    mandala::render(cr, &mut state, width as f64, height as f64, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerMove(point) => {
                let events = self.state.borrow_mut().pointer_moved(point);
                self.dispatch(events);
            }
            AppMsg::PointerLeave => {
                let events = self.state.borrow_mut().pointer_left();
                self.dispatch(events);
            }
            AppMsg::Click(point) => {
                let events = self.state.borrow_mut().clicked(point);
                log::info!(
                    "Selection {}",
                    self.state.borrow().selection.lock_state()
                );
                self.dispatch(events);
            }
            AppMsg::ToggleChart => {
                let before = self.state.borrow().chart_kind;
                let result = self.state.borrow_mut().toggle_chart();
                match result {
                    Ok(_) if self.state.borrow().chart_kind == before => {}
                    Ok(events) => {
                        log::info!("Showing {} chart", self.state.borrow().chart_kind);
                        self.chart_changed(events);
                    }
                    Err(e) => log::warn!("Cannot switch chart: {}", e),
                }
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    let result = self.state.borrow_mut().apply_config(new_config);
                    match result {
                        Ok(events) => {
                            glyphs::refresh_cache();
                            self.chart_changed(events);
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::warn!("Keeping previous chart, reloaded one is invalid: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::GlyphFound { planet, path } => {
                if self.state.borrow_mut().set_glyph(&planet, &path) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::GlyphMissing(planet) => {
                log::warn!("No glyph found for {}, drawing a plain marker", planet);
                if self.state.borrow_mut().drop_glyph(&planet) {
                    self.drawing_area.queue_draw();
                }
            }
        }
    }
}

impl AppModel {
    /// Forwards controller output to the panel and schedules a redraw.
    fn dispatch(&mut self, events: Vec<MandalaEvent>) {
        if events.is_empty() {
            return;
        }
        for event in &events {
            match event {
                MandalaEvent::PlanetClicked(Some(pick)) => {
                    log::info!("Planet clicked: {} at {:.2}°", pick.name, pick.degree_longitude);
                }
                MandalaEvent::PlanetClicked(None) => {}
                MandalaEvent::HoverChanged(selection) => {
                    log::debug!("Hover changed: {}", selection);
                }
            }
        }
        self.refresh_info();
        self.drawing_area.queue_draw();
    }

    fn chart_changed(&mut self, events: Vec<MandalaEvent>) {
        let (glyph_dir, planets) = {
            let state = self.state.borrow();
            (state.config.glyph_dir.clone(), state.planet_names())
        };
        runtime::scan_glyphs(glyph_dir, planets, self.events_tx.clone());
        self.dispatch(events);
        self.refresh_info();
        self.drawing_area.queue_draw();
    }

    fn refresh_info(&mut self) {
        let state = self.state.borrow();
        self.info = panel::describe(
            state.selection.active(),
            &state.chart,
            state.selection.lock_state(),
        );
    }
}
