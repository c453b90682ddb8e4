pub mod app;
pub mod braille;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod map;
pub mod province;
pub mod ui;
