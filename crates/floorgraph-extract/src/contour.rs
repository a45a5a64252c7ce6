//! Binary-mask border tracing.
//!
//! Components are traced with Moore neighbor following and compressed to
//! their corner points. Holes (background regions fully enclosed by a
//! component) are traced as well, so callers see both outer and inner
//! contours of the mask.

use floorgraph_core::{ColorImage, PixelPos, Rect, Rgb};

use crate::error::ExtractError;

/// Moore neighborhood, clockwise starting east: E, SE, S, SW, W, NW, N, NE.
const MOORE: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Flat binary mask, row-major, one byte per pixel.
#[derive(Clone, Debug)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Binarize an image by exact color match.
    pub fn from_color(image: &ColorImage, target: Rgb) -> Self {
        let data = image
            .pixels()
            .iter()
            .map(|&px| u8::from(px == target))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.data[y * self.width + x] = u8::from(value);
    }

    #[inline]
    fn at(&self, p: PixelPos) -> bool {
        p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.width
            && (p.y as usize) < self.height
            && self.data[p.y as usize * self.width + p.x as usize] != 0
    }
}

/// A traced border polygon, reduced to its corner points in traversal
/// order starting from the top-left-most pixel.
#[derive(Clone, Debug)]
pub struct Contour {
    pub corners: Vec<PixelPos>,
}

impl Contour {
    /// Reduce the polygon to an axis-aligned rectangle.
    ///
    /// The rectangle is derived from the first and third corner points (the
    /// trace of a clean rectangle yields its four vertices in order, so
    /// those two are opposite). Anything that is not exactly a four-corner
    /// axis-aligned polygon is malformed.
    pub fn to_rect(&self) -> Result<Rect, ExtractError> {
        if self.corners.len() != 4 {
            return Err(ExtractError::MalformedGeometry {
                corners: self.corners.len(),
            });
        }
        let rect = Rect::from_corners(self.corners[0], self.corners[2]);
        let mut expected = rect.corners().to_vec();
        for c in &self.corners {
            match expected.iter().position(|e| e == c) {
                Some(i) => {
                    expected.swap_remove(i);
                }
                None => {
                    return Err(ExtractError::MalformedGeometry { corners: 4 });
                }
            }
        }
        Ok(rect)
    }
}

/// Trace the border of every 8-connected component of the mask, plus the
/// border of every hole inside a component. Outer contours come first in
/// raster order of their starting pixel, hole contours after.
pub fn trace_contours(mask: &Mask) -> Vec<Contour> {
    let mut out = Vec::new();

    // Outer borders: 8-connected foreground components.
    let fg = label_components(mask, true);
    for &start in &fg.starts {
        let boundary = trace_boundary(start, |p| mask.at(p));
        out.push(Contour {
            corners: collapse_corners(&boundary),
        });
    }

    // Hole borders: 4-connected background components that never reach the
    // raster border.
    let bg = label_components(mask, false);
    for (i, &start) in bg.starts.iter().enumerate() {
        if bg.touches_border[i] {
            continue;
        }
        let label = i as i32;
        let boundary = trace_boundary(start, |p| bg.label_at(p) == Some(label));
        out.push(Contour {
            corners: collapse_corners(&boundary),
        });
    }

    out
}

struct Labels {
    width: usize,
    height: usize,
    data: Vec<i32>,
    /// Top-left-most pixel of each component, in raster order.
    starts: Vec<PixelPos>,
    touches_border: Vec<bool>,
}

impl Labels {
    fn label_at(&self, p: PixelPos) -> Option<i32> {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width || p.y as usize >= self.height {
            return None;
        }
        let l = self.data[p.y as usize * self.width + p.x as usize];
        (l >= 0).then_some(l)
    }
}

/// Flood-fill labeling. Foreground uses the full Moore neighborhood,
/// background uses 4-connectivity (the usual duality, so holes do not leak
/// diagonally through 8-connected borders).
fn label_components(mask: &Mask, foreground: bool) -> Labels {
    let (w, h) = (mask.width, mask.height);
    let mut labels = Labels {
        width: w,
        height: h,
        data: vec![-1; w * h],
        starts: Vec::new(),
        touches_border: Vec::new(),
    };
    let neighbors: &[(i32, i32)] = if foreground {
        &MOORE
    } else {
        &[(1, 0), (0, 1), (-1, 0), (0, -1)]
    };

    let mut stack = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let p = PixelPos::new(x as i32, y as i32);
            if mask.at(p) != foreground || labels.data[y * w + x] >= 0 {
                continue;
            }

            let label = labels.starts.len() as i32;
            labels.starts.push(p);
            labels.touches_border.push(false);
            labels.data[y * w + x] = label;
            stack.push(p);

            while let Some(q) = stack.pop() {
                if q.x == 0 || q.y == 0 || q.x as usize == w - 1 || q.y as usize == h - 1 {
                    labels.touches_border[label as usize] = true;
                }
                for &(dx, dy) in neighbors {
                    let n = PixelPos::new(q.x + dx, q.y + dy);
                    if n.x < 0 || n.y < 0 || n.x as usize >= w || n.y as usize >= h {
                        continue;
                    }
                    let idx = n.y as usize * w + n.x as usize;
                    if mask.at(n) == foreground && labels.data[idx] < 0 {
                        labels.data[idx] = label;
                        stack.push(n);
                    }
                }
            }
        }
    }

    labels
}

/// Moore boundary following, clockwise, with Jacob's stopping criterion.
///
/// `start` must be the top-left-most pixel of its region so that the
/// initial scan direction is valid.
fn trace_boundary<P: Fn(PixelPos) -> bool>(start: PixelPos, inside: P) -> Vec<PixelPos> {
    // Pretend we arrived at `start` moving east; the neighbor scan then
    // begins at north, which is outside the region for a raster-first pixel.
    let Some(first) = next_step(start, 0, &inside) else {
        return vec![start]; // isolated pixel
    };

    let mut boundary = vec![start];
    let mut state = first;
    loop {
        if state == first && boundary.len() > 1 {
            break;
        }
        boundary.push(state.0);
        // A non-isolated pixel always has a next step: worst case we walk
        // back the way we came.
        state = match next_step(state.0, state.1, &inside) {
            Some(s) => s,
            None => break,
        };
    }
    if boundary.len() > 1 && boundary.last() == boundary.first() {
        boundary.pop();
    }
    boundary
}

/// Scan the Moore neighborhood clockwise, starting 90 degrees
/// counterclockwise from the incoming direction; return the first pixel
/// inside the region together with the direction that reached it.
fn next_step<P: Fn(PixelPos) -> bool>(
    from: PixelPos,
    incoming: usize,
    inside: &P,
) -> Option<(PixelPos, usize)> {
    let mut d = (incoming + 6) % 8;
    for _ in 0..8 {
        let (dx, dy) = MOORE[d];
        let n = PixelPos::new(from.x + dx, from.y + dy);
        if inside(n) {
            return Some((n, d));
        }
        d = (d + 1) % 8;
    }
    None
}

/// Keep only the points where the traversal changes direction.
fn collapse_corners(boundary: &[PixelPos]) -> Vec<PixelPos> {
    let n = boundary.len();
    if n <= 2 {
        let mut pts = boundary.to_vec();
        pts.dedup();
        return pts;
    }

    let step = |a: PixelPos, b: PixelPos| (b.x - a.x, b.y - a.y);
    let mut corners = Vec::new();
    for i in 0..n {
        let prev = boundary[(i + n - 1) % n];
        let next = boundary[(i + 1) % n];
        if step(prev, boundary[i]) != step(boundary[i], next) {
            corners.push(boundary[i]);
        }
    }
    corners
}
