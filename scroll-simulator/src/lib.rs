// Scroll Simulator Library

pub mod feed;
pub mod generator;
pub mod input;
pub mod models;
pub mod runner;
pub mod stats;
