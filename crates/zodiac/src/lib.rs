#[macro_use]
mod macros;

pub mod angle;
pub mod chart;
pub mod hit;
pub mod layout;
pub mod lookup;
pub mod rings;
pub mod selection;

pub use angle::{AngularFrame, Direction};
pub use chart::{Chart, ChartError, PlanetName, PlanetPosition};
pub use hit::hit_test;
pub use layout::{Frames, Layout, Point, RenderSnapshot, project};
pub use rings::{RINGS, RingId, RingSpec};
pub use selection::{LockState, MandalaEvent, PlanetPick, Selection, SelectionController};
