//! Crate `melodeon_core`: modelo de dominio de la biblioteca de Melodeon.

pub mod library;

pub use library::duration::{format_duration, format_duration_secs};
pub use library::sorting::{SortDirection, sort_and_dedupe};
pub use library::track::{TagInfo, TrackRecord};
