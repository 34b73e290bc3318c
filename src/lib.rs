pub mod app;
pub mod clock;
pub mod config;
pub mod content;
pub mod gui;
pub mod interaction;
pub mod math;
pub mod model;
pub mod scene;
pub mod texture;
pub mod theme;
