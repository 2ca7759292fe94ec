//! Library exports for the doodler drawing engine.
//!
//! A hosting view feeds pointer events and brush changes into
//! [`DoodleEngine`], which records finished strokes in an undo/redo history
//! and keeps a Cairo raster of the committed picture. The replay binary and
//! the schema dumper share the same configuration types.

pub mod config;
pub mod draw;
pub mod engine;
pub mod history;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use engine::DoodleEngine;
