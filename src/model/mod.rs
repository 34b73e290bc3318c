pub mod body;
pub mod catalog;
pub mod comet;
pub mod orrery;
pub mod rings;
pub mod section;
pub mod selection;

pub use body::{BodyID, BodyInfo, BodyKind, BodyRenderState, CelestialBody};
pub use orrery::{FrameInput, Orrery};
pub use section::{Section, SECTION_ORDER};
pub use selection::{Direction, SectionSelection};
