pub mod avatar;
pub mod osc;

pub use avatar::OscController;
pub use osc::{OscDisplay, OscSender};
