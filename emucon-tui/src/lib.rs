//! EMUCON console library exports.

pub mod config;
pub mod dialog;
pub mod error;
pub mod events;
pub mod forms;
pub mod keys;
pub mod nav;
pub mod pane;
pub mod persistence;
pub mod resource;
pub mod screen;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
