pub mod alerts;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod models;
pub mod store;
pub mod transitions;

/// ASCII art logo for reef CLI
pub const LOGO: &str = "\
  ┌─┐┌─┐┌─┐┌─┐
  ├┬┘├┤ ├┤ ├┤
  ┴└─└─┘└─┘└  ";
