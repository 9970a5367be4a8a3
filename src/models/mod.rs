pub mod control;
pub mod sink;
pub mod song;

pub use control::{AvatarCommand, PlayerAction, RepeatMode};
pub use sink::DisplaySink;
pub use song::ReadOutcome;
