//! Spline-map output.
//!
//! Two encodings are supported:
//!
//! - CSV: one texel per line as `row,column,r,g,b,a`, preceded by a header
//! - Raw: the RGBA32F texels row-major as little-endian `f32`s, no header

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::spline::SplineMap;

/// Save a spline map as CSV.
pub fn save_csv<P: AsRef<Path>>(map: &SplineMap, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_csv(map, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a spline map as CSV.
pub fn write_csv<W: Write>(map: &SplineMap, writer: &mut W) -> Result<()> {
    writeln!(writer, "row,column,r,g,b,a")?;
    for y in 0..map.height() {
        if let Some(row) = map.row(y) {
            for (x, t) in row.iter().enumerate() {
                writeln!(writer, "{},{},{},{},{},{}", y, x, t.r, t.g, t.b, t.a)?;
            }
        }
    }
    Ok(())
}

/// Save a spline map as raw little-endian floats.
pub fn save_raw<P: AsRef<Path>>(map: &SplineMap, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_raw(map, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a spline map as raw little-endian floats.
pub fn write_raw<W: Write>(map: &SplineMap, writer: &mut W) -> Result<()> {
    for texel in map.texels() {
        for channel in texel.to_array() {
            writer.write_all(&channel.to_le_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::{ArclengthLut, LutOptions};
    use kurbo::CubicBez;

    fn map() -> SplineMap {
        let lut = ArclengthLut::from_curves(
            [CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (4.0, 0.0))],
            &LutOptions::default(),
        )
        .unwrap();
        lut.spline_map()
    }

    #[test]
    fn test_csv() {
        let mut out = Vec::new();
        write_csv(&map(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "row,column,r,g,b,a");
        assert_eq!(lines[1], "0,0,0,0,0,0");
        assert!(lines[4].starts_with("0,3,4,0,0,"));
    }

    #[test]
    fn test_raw() {
        let map = map();
        let mut out = Vec::new();
        write_raw(&map, &mut out).unwrap();
        assert_eq!(out.len(), 4 * 4 * 4);
        // Texel 3 red channel is P3.x.
        let r = f32::from_le_bytes([out[48], out[49], out[50], out[51]]);
        assert_eq!(r, 4.0);
        if cfg!(target_endian = "little") {
            assert_eq!(out.as_slice(), map.as_bytes());
        }
    }
}
