//! Redrawer - image to paint-program drawing instructions
//!
//! Loads an image, derives a fixed-plus-accent palette, quantizes the image
//! against it and stores per-color run-length instructions together with a
//! draw order for a replay agent.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
