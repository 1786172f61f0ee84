#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod templates;
pub mod vars;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
