pub mod picking;
pub mod router;
pub mod subscription;
pub mod swipe;

pub use router::{Command, InputEvent, InteractionRouter, NavKey};
pub use subscription::{SelectionBus, Subscription};
