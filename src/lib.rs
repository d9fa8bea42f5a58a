//! Library exports for the eventcard renderer.
//!
//! Turns event records into social media cards: the source image is fetched
//! or read from disk, composed with a day-colored date banner and the event's
//! text sections, and written as PNG or JPEG. The `eventcard` binary is a thin
//! CLI over [`CardRenderer`]; other tools can share the same configuration
//! types and rendering code.

pub mod card;
pub mod config;
pub mod draw;
pub mod error;
pub mod event;
pub mod output;
pub mod source;

pub use card::{CardFormat, CardRenderer, CardSize, RenderedCard};
pub use config::Config;
pub use error::{CardError, Result};
pub use event::{EventRecord, load_events, parse_events};
