//! High-level facade for the `floorgraph-*` workspace.
//!
//! This crate turns a color-keyed floor-plan raster into a navigable
//! waypoint graph and computes pixel-accurate routes between two chosen
//! points. The heavy lifting lives in the member crates:
//!
//! - `floorgraph::core`: raster buffer, pixel geometry, color legend.
//! - `floorgraph::extract`: room/door segmentation and attachment.
//! - `floorgraph::route`: waypoint graph and the two-tier A* search.
//!
//! ## Quickstart
//!
//! ```no_run
//! use floorgraph::{load_map, ColorLegend};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = load_map("plan.png", &ColorLegend::default())?;
//! assert!(map.try_insert_point(40, 52));
//! assert!(map.try_insert_point(310, 118));
//! let (path, annotated) = map.compute_path()?;
//! println!("{} pixels", path.len());
//! annotated.save("route.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! Each loaded map owns its raster and graph exclusively; nothing is shared
//! across loads, and the graph is discarded with the [`FloorMap`].

pub use floorgraph_core as core;
pub use floorgraph_extract as extract;
pub use floorgraph_route as route;

pub use floorgraph_core::{ColorImage, ColorLegend, PixelPos, Rect};
pub use floorgraph_extract::ExtractError;
pub use floorgraph_route::{Route, RouteError, RouteParams};

mod map;

pub use map::{FloorMap, LoadError};

#[cfg(feature = "image")]
pub use map::load_map;
