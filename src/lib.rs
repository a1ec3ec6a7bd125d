pub mod composer;
pub mod config;
pub mod driver;
pub mod equalizer;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod loader;
pub mod midi_event;
pub mod piano_roll;
pub mod trace;

pub use error::{Error, Result};
