pub mod app;
pub mod board;
pub mod config;
pub mod game;
pub mod logging;
pub mod session;
pub mod timer;
pub mod ui;
