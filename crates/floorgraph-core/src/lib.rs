//! Core types for floor-plan map extraction and routing.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image codec or detector; it only defines the
//! raster buffer, the integer pixel geometry, and the color legend that the
//! extraction and routing crates agree on.

mod geom;
mod image;
mod legend;
mod logger;

pub use geom::{PixelPos, Rect};
pub use image::{ColorImage, Rgb};
pub use legend::ColorLegend;
pub use logger::init_with_level;
