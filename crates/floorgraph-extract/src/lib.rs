//! Map extraction: segment a color-keyed floor-plan raster into rectangular
//! rooms and doors, and attach each door to the rooms whose boundary it
//! touches.
//!
//! The pipeline is contour based: exact-color binarization, border tracing
//! of every component (outer borders and hole borders), then reduction of
//! each traced polygon to an axis-aligned rectangle. A polygon that is not a
//! clean four-corner rectangle aborts the load with
//! [`ExtractError::MalformedGeometry`] instead of producing corrupted
//! bounds.

mod contour;
mod detect;
mod error;
mod rooms;

pub use contour::{trace_contours, Contour, Mask};
pub use detect::{AreaDetector, AreaKind, DetectParams};
pub use error::ExtractError;
pub use rooms::{attach_doors, Room};
