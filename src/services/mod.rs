pub mod control;
pub mod notifier;
pub mod picker;
pub mod pointer;
pub mod song_source;

pub use control::{ControlListener, ControlState};
pub use notifier::ChangeNotifier;
pub use picker::{PathPicker, PromptPicker};
pub use pointer::{resolve_song_path, PathPointer};
pub use song_source::SongFile;

#[cfg(feature = "dialog")]
pub use picker::DialogPicker;
