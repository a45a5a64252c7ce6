use floorgraph_core::{ColorImage, ColorLegend, PixelPos};

use crate::error::RouteError;

/// 4-connected step offsets, in the fixed expansion order of the search.
const STEPS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Binarized traversability mask: a pixel is free iff it is free-space
/// white or door-colored (doorways are openings, not obstacles).
#[derive(Clone, Debug)]
pub struct FreeMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl FreeMask {
    pub fn from_image(image: &ColorImage, legend: &ColorLegend) -> Self {
        let data = image
            .pixels()
            .iter()
            .map(|&px| px == ColorLegend::FREE || px == legend.door)
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    #[inline]
    pub fn is_free(&self, p: PixelPos) -> bool {
        p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.width
            && (p.y as usize) < self.height
            && self.data[p.y as usize * self.width + p.x as usize]
    }

    #[inline]
    fn index(&self, p: PixelPos) -> usize {
        p.y as usize * self.width + p.x as usize
    }
}

struct Node {
    parent: Option<usize>,
    position: PixelPos,
    g: i64,
    f: i64,
}

/// Fine A* over the pixel grid, from one waypoint to the next.
///
/// Unit step cost, squared-Euclidean heuristic to the segment endpoint,
/// and the same open-list policy as the coarse stage: linear minimum-`f`
/// scan with first-found tie-break, closed pixels are never re-opened, and
/// an open node at the same pixel with lower-or-equal `g` suppresses the
/// candidate. Every pixel pushed to the open set is painted with the
/// explored overlay color on `canvas`, and the final path is painted with
/// the path overlay color during reconstruction.
pub fn route_pixels(
    mask: &FreeMask,
    from: PixelPos,
    to: PixelPos,
    canvas: &mut ColorImage,
    legend: &ColorLegend,
) -> Result<Vec<PixelPos>, RouteError> {
    let mut nodes = vec![Node {
        parent: None,
        position: from,
        g: 0,
        f: from.squared_distance(to),
    }];
    let mut open: Vec<usize> = vec![0];
    let mut closed = vec![false; mask.width * mask.height];

    while !open.is_empty() {
        let mut best = 0;
        for (i, &node) in open.iter().enumerate().skip(1) {
            if nodes[node].f < nodes[open[best]].f {
                best = i;
            }
        }
        let current = open.remove(best);
        let current_pos = nodes[current].position;
        closed[mask.index(current_pos)] = true;

        if current_pos == to {
            let mut path = Vec::new();
            let mut cursor = Some(current);
            while let Some(n) = cursor {
                canvas.set(nodes[n].position, legend.path);
                path.push(nodes[n].position);
                cursor = nodes[n].parent;
            }
            path.reverse();
            return Ok(path);
        }

        for (dx, dy) in STEPS {
            let next = PixelPos::new(current_pos.x + dx, current_pos.y + dy);
            if !mask.is_free(next) || closed[mask.index(next)] {
                continue;
            }

            let g = nodes[current].g + 1;
            if open
                .iter()
                .any(|&n| nodes[n].position == next && nodes[n].g <= g)
            {
                continue;
            }

            canvas.set(next, legend.explored);
            nodes.push(Node {
                parent: Some(current),
                position: next,
                g,
                f: g + next.squared_distance(to),
            });
            open.push(nodes.len() - 1);
        }
    }

    Err(RouteError::Unroutable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_canvas(w: usize, h: usize) -> (FreeMask, ColorImage) {
        let image = ColorImage::new(w, h, ColorLegend::FREE);
        let mask = FreeMask::from_image(&image, &ColorLegend::default());
        (mask, image)
    }

    fn assert_connected(path: &[PixelPos]) {
        for pair in path.windows(2) {
            let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(d, 1, "pair {pair:?} is not 4-adjacent");
        }
    }

    #[test]
    fn straight_line_has_manhattan_length() {
        let (mask, mut canvas) = open_canvas(20, 10);
        let legend = ColorLegend::default();
        let path = route_pixels(
            &mask,
            PixelPos::new(2, 4),
            PixelPos::new(13, 4),
            &mut canvas,
            &legend,
        )
        .unwrap();
        assert_eq!(path.len() - 1, 11);
        assert_connected(&path);
        assert_eq!(path.first(), Some(&PixelPos::new(2, 4)));
        assert_eq!(path.last(), Some(&PixelPos::new(13, 4)));
    }

    #[test]
    fn path_avoids_walls() {
        let mut image = ColorImage::new(20, 12, ColorLegend::FREE);
        // Vertical wall with a single gap at y = 9.
        for y in 0..12 {
            if y != 9 {
                image.set(PixelPos::new(10, y), ColorLegend::WALL);
            }
        }
        let legend = ColorLegend::default();
        let mask = FreeMask::from_image(&image, &legend);
        let mut canvas = image.clone();

        let path = route_pixels(
            &mask,
            PixelPos::new(4, 2),
            PixelPos::new(16, 2),
            &mut canvas,
            &legend,
        )
        .unwrap();
        assert_connected(&path);
        assert!(path.contains(&PixelPos::new(10, 9)), "must use the gap");
        assert!(path.iter().all(|&p| mask.is_free(p)));
    }

    #[test]
    fn door_pixels_are_traversable() {
        let mut image = ColorImage::new(9, 3, ColorLegend::FREE);
        image.set(PixelPos::new(4, 1), [0, 255, 0]);
        let legend = ColorLegend::default();
        let mask = FreeMask::from_image(&image, &legend);
        assert!(mask.is_free(PixelPos::new(4, 1)));

        let mut canvas = image.clone();
        let path = route_pixels(
            &mask,
            PixelPos::new(1, 1),
            PixelPos::new(7, 1),
            &mut canvas,
            &legend,
        )
        .unwrap();
        assert_eq!(path.len() - 1, 6);
    }

    #[test]
    fn walled_off_target_is_unroutable() {
        let mut image = ColorImage::new(16, 16, ColorLegend::FREE);
        for y in 0..16 {
            image.set(PixelPos::new(8, y), ColorLegend::WALL);
        }
        let legend = ColorLegend::default();
        let mask = FreeMask::from_image(&image, &legend);
        let mut canvas = image.clone();

        let err = route_pixels(
            &mask,
            PixelPos::new(2, 2),
            PixelPos::new(14, 2),
            &mut canvas,
            &legend,
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::Unroutable));
    }

    #[test]
    fn canvas_is_annotated_with_overlay_colors() {
        let (mask, mut canvas) = open_canvas(12, 6);
        let legend = ColorLegend::default();
        let path = route_pixels(
            &mask,
            PixelPos::new(1, 3),
            PixelPos::new(9, 3),
            &mut canvas,
            &legend,
        )
        .unwrap();

        for &p in &path {
            assert_eq!(canvas.get(p), Some(legend.path));
        }
        // At least the off-path neighbors of the start were opened.
        assert!(canvas
            .pixels()
            .iter()
            .any(|&px| px == legend.explored));
    }
}
