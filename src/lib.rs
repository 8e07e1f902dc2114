pub mod config;
pub mod effects;
pub mod net;
pub mod profile;
pub mod render;
pub mod theme;
