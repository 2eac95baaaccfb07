pub mod controller;
pub mod player;
pub mod settings;
pub mod ui;
