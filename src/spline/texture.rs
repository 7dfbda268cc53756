//! Spline-map texels: the per-segment payload packed for GPU sampling.
//!
//! The map is `WIDTH` texels wide and one row per segment. Each row holds the
//! segment's four control points in `rgb` (z = 0) and one scalar in `a`:
//!
//! | column | rgb | a                        |
//! |--------|-----|--------------------------|
//! | 0      | P0  | start fraction           |
//! | 1      | P1  | segment length           |
//! | 2      | P2  | total chain length       |
//! | 3      | P3  | total length / length    |

use bytemuck::{Pod, Zeroable};
use kurbo::Point;

use super::lut::{ArclengthLut, SegmentRecord};

/// One RGBA float texel.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Texel {
    /// Red channel (x).
    pub r: f32,
    /// Green channel (y).
    pub g: f32,
    /// Blue channel (z).
    pub b: f32,
    /// Alpha channel (scalar payload).
    pub a: f32,
}

impl Texel {
    /// Create a texel.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn from_point(p: Point, a: f64) -> Self {
        Self::new(p.x as f32, p.y as f32, 0.0, a as f32)
    }

    /// The channels as an array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A row-major `WIDTH × height` texel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineMap {
    height: usize,
    texels: Vec<Texel>,
}

impl SplineMap {
    /// Texels per row.
    pub const WIDTH: usize = 4;

    fn from_segments(segments: &[SegmentRecord]) -> Self {
        let texels = segments
            .iter()
            .flat_map(|seg| {
                let c = seg.curve;
                [
                    Texel::from_point(c.p0, seg.start_fraction),
                    Texel::from_point(c.p1, seg.length),
                    Texel::from_point(c.p2, seg.total_length),
                    Texel::from_point(c.p3, seg.inverse_share()),
                ]
            })
            .collect();
        Self {
            height: segments.len(),
            texels,
        }
    }

    /// Number of rows (segments).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Texel at column `x`, row `y`.
    pub fn texel(&self, x: usize, y: usize) -> Option<Texel> {
        if x >= Self::WIDTH {
            return None;
        }
        self.texels.get(y * Self::WIDTH + x).copied()
    }

    /// The texels of row `y`.
    pub fn row(&self, y: usize) -> Option<&[Texel]> {
        let start = y * Self::WIDTH;
        self.texels.get(start..start + Self::WIDTH)
    }

    /// All texels, row-major.
    #[inline]
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Raw texture bytes (RGBA32F, native byte order).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

impl ArclengthLut {
    /// Pack the per-segment records into a spline map.
    pub fn spline_map(&self) -> SplineMap {
        SplineMap::from_segments(self.segments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::LutOptions;
    use kurbo::CubicBez;

    #[test]
    fn test_texel_layout() {
        let lut = ArclengthLut::from_curves(
            [
                CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)),
                CubicBez::new((3.0, 0.0), (3.0, 1.0), (3.0, 2.0), (3.0, 3.0)),
            ],
            &LutOptions::default(),
        )
        .unwrap();
        let map = lut.spline_map();
        assert_eq!(map.height(), 2);
        assert_eq!(map.texels().len(), 8);

        let row = map.row(1).unwrap();
        assert_eq!(row[0].to_array(), [3.0, 0.0, 0.0, row[0].a]);
        assert!((row[0].a - 0.5).abs() < 1e-6);
        assert!((row[1].a - 3.0).abs() < 1e-5);
        assert!((row[2].a - 6.0).abs() < 1e-5);
        assert!((row[3].a - 2.0).abs() < 1e-5);
        assert_eq!((row[3].r, row[3].g), (3.0, 3.0));

        assert_eq!(map.texel(0, 0).unwrap().a, 0.0);
        assert!(map.texel(4, 0).is_none());
        assert!(map.row(2).is_none());
        assert_eq!(map.as_bytes().len(), 8 * 16);
    }
}
