//! Strictly Timetravel - a terminal front end for [`strictly_timeline`].
//!
//! The front end is a thin surface: it turns key presses into
//! [`strictly_timeline::Intent`]s, forwards them to the engine, and
//! redraws from the engine's queries.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod render;
mod tui;

pub use config::{ConfigError, TimeTravelConfig};
pub use render::render_text;
pub use tui::{App, Focus, run_tui};
