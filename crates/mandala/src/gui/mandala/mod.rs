pub mod model;
pub mod view;

pub use model::State;
pub use view::render;

/// Edge, in pixels, at which glyph images are decoded.
pub const GLYPH_PIXELS: i32 = 120;

// font sizes at full diagram size
pub const HOUSE_FONT_SIZE: f64 = 12.0;
pub const SIGN_FONT_SIZE: f64 = 14.0;
pub const MANSION_FONT_SIZE: f64 = 9.0;
pub const SCALE_FONT_SIZE: f64 = 7.0;
pub const TICK_FONT_SIZE: f64 = 9.0;
pub const TITLE_FONT_SIZE: f64 = 18.0;
pub const CAPTION_FONT_SIZE: f64 = 14.0;
