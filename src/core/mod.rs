pub mod chrome;
pub mod config;
pub mod content;
pub mod hero;
pub mod modal;
pub mod quiz;
pub mod roster;
pub mod timer;
