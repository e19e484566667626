pub mod app;
pub mod mandala;
pub mod panel;
pub mod theme;
