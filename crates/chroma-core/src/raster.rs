/// A dense RGBA8 image, row-major, four bytes per pixel.
/// Every pixel the pipeline writes is fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub const OPAQUE: u8 = 255;

impl Raster {
    /// Create a raster filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = OPAQUE;
        }
        Self { data, width, height }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Write an opaque pixel.
    #[inline]
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], OPAQUE]);
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn same_size(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }

    /// Fill every pixel from a pure per-pixel function, row by row.
    ///
    /// With the `threading` feature rows are filled in parallel; the result is
    /// identical because `f` depends only on its coordinates.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(u32, u32) -> [u8; 3] + Sync,
    {
        let stride = self.stride();
        for_each_row(&mut self.data, stride, |y, row| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let [r, g, b] = f(x as u32, y as u32);
                px.copy_from_slice(&[r, g, b, OPAQUE]);
            }
        });
    }
}

/// Run `f(row_index, row_bytes)` over every `stride`-byte row of `data`.
/// Rows are visited in parallel under the `threading` feature.
pub(crate) fn for_each_row<F>(data: &mut [u8], stride: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    if stride == 0 {
        return;
    }

    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(stride).enumerate().for_each(|(y, row)| f(y, row));
    }
    #[cfg(not(feature = "threading"))]
    {
        data.chunks_mut(stride).enumerate().for_each(|(y, row)| f(y, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_opaque_black() {
        let r = Raster::new(3, 2);
        assert_eq!(r.data.len(), 3 * 2 * 4);
        assert!(r.pixels().all(|px| px == [0, 0, 0, OPAQUE]));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut r = Raster::new(4, 4);
        r.set_rgb(3, 1, [10, 20, 30]);
        assert_eq!(r.get(3, 1), [10, 20, 30, OPAQUE]);
        assert_eq!(r.get(1, 3), [0, 0, 0, OPAQUE]);
        assert_eq!(&r.data[(4 + 3) * 4..(4 + 3) * 4 + 4], &[10, 20, 30, OPAQUE]);
    }

    #[test]
    fn fill_with_visits_every_pixel_once() {
        let mut r = Raster::new(5, 3);
        r.fill_with(|x, y| [x as u8, y as u8, (x + y) as u8]);
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(r.get(x, y), [x as u8, y as u8, (x + y) as u8, OPAQUE]);
            }
        }
    }

    #[test]
    fn same_size_compares_both_axes() {
        assert!(Raster::new(2, 3).same_size(&Raster::new(2, 3)));
        assert!(!Raster::new(2, 3).same_size(&Raster::new(3, 2)));
    }
}
