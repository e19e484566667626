pub mod glyphs;
pub mod runtime;
