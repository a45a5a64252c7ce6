use crate::geom::PixelPos;

/// One RGB pixel value.
pub type Rgb = [u8; 3];

/// Owned row-major RGB raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    width: usize,
    height: usize,
    data: Vec<Rgb>,
}

impl ColorImage {
    /// Create an image filled with a single color.
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Build from a packed `RGBRGB...` byte buffer. Returns `None` when the
    /// buffer length does not match `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, raw: &[u8]) -> Option<Self> {
        if raw.len() != width.checked_mul(height)?.checked_mul(3)? {
            return None;
        }
        let data = raw
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect::<Vec<Rgb>>();
        Some(Self {
            width,
            height,
            data,
        })
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
    pub fn in_bounds(&self, p: PixelPos) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Bounds-checked pixel read.
    #[inline]
    pub fn get(&self, p: PixelPos) -> Option<Rgb> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.data[p.y as usize * self.width + p.x as usize])
    }

    /// Bounds-checked pixel write; writes outside the raster are dropped.
    #[inline]
    pub fn set(&mut self, p: PixelPos, value: Rgb) {
        if self.in_bounds(p) {
            self.data[p.y as usize * self.width + p.x as usize] = value;
        }
    }

    /// Rewrite every pixel of color `from` to `to`, returning the number of
    /// pixels touched.
    pub fn recolor(&mut self, from: Rgb, to: Rgb) -> usize {
        let mut n = 0;
        for px in &mut self.data {
            if *px == from {
                *px = to;
                n += 1;
            }
        }
        n
    }

    /// Flat pixel access in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    /// Pack back into an `RGBRGB...` byte buffer.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for px in &self.data {
            out.extend_from_slice(px);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        let raw = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let img = ColorImage::from_raw(2, 2, &raw).unwrap();
        assert_eq!(img.get(PixelPos::new(1, 0)), Some([4, 5, 6]));
        assert_eq!(img.to_raw(), raw);
    }

    #[test]
    fn from_raw_rejects_bad_length() {
        assert!(ColorImage::from_raw(2, 2, &[0u8; 11]).is_none());
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let img = ColorImage::new(3, 3, [255; 3]);
        assert_eq!(img.get(PixelPos::new(-1, 0)), None);
        assert_eq!(img.get(PixelPos::new(3, 0)), None);
        assert_eq!(img.get(PixelPos::new(0, 3)), None);
    }

    #[test]
    fn recolor_counts_touched_pixels() {
        let mut img = ColorImage::new(4, 1, [255, 0, 0]);
        img.set(PixelPos::new(0, 0), [0, 0, 0]);
        let n = img.recolor([255, 0, 0], [0, 0, 0]);
        assert_eq!(n, 3);
        assert!(img.pixels().iter().all(|p| *p == [0, 0, 0]));
    }
}
