/// Errors produced by map extraction.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// A traced contour could not be reduced to a clean axis-aligned
    /// rectangle. The whole map load is aborted; partial bounds are never
    /// returned.
    #[error("contour with {corners} corner point(s) is not an axis-aligned rectangle")]
    MalformedGeometry { corners: usize },
}
