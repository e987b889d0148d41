use crate::ImageError;
use grab_base::Tensor;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Interpolation used by [`resize`]. Neither variant smooths before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeFilter::Nearest => write!(f, "nearest"),
            ResizeFilter::Bilinear => write!(f, "bilinear"),
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "bilinear" => Ok(ResizeFilter::Bilinear),
            other => Err(ImageError::Resize(format!("unknown resize filter '{other}'"))),
        }
    }
}

/// Source sampling positions for one output index along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f64,
}

/// Reflect an out-of-range index about the edge pixel centers (-1 -> 1, n -> n - 2).
fn mirror(index: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = index.rem_euclid(period);
    if m >= n as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

/// Pixel-center aligned source coordinate of output index `dst`.
fn source_coord(dst: usize, n_in: usize, n_out: usize) -> f64 {
    (dst as f64 + 0.5) * (n_in as f64 / n_out as f64) - 0.5
}

fn taps(n_in: usize, n_out: usize, filter: ResizeFilter) -> Vec<Tap> {
    (0..n_out)
        .map(|dst| {
            let src = source_coord(dst, n_in, n_out);
            match filter {
                ResizeFilter::Nearest => {
                    let index = (src.round().max(0.0) as usize).min(n_in - 1);
                    Tap {
                        lo: index,
                        hi: index,
                        frac: 0.0,
                    }
                }
                ResizeFilter::Bilinear => {
                    let floor = src.floor();
                    let base = floor as isize;
                    Tap {
                        lo: mirror(base, n_in),
                        hi: mirror(base + 1, n_in),
                        frac: src - floor,
                    }
                }
            }
        })
        .collect()
}

/// Resize an HWC frame to exactly `(height, width)`, keeping the channel count.
///
/// No anti-aliasing filter is applied, even when downsampling: every output
/// pixel is computed from at most the four source pixels around its mapped
/// center, so high-frequency content aliases instead of blurring.
///
/// # Errors
///
/// Returns `ImageError::Resize` if the target or source has a zero spatial
/// extent, or the source is not rank 3.
pub fn resize(
    frame: &Tensor<f32>,
    height: usize,
    width: usize,
    filter: ResizeFilter,
) -> Result<Tensor<f32>, ImageError> {
    if height == 0 || width == 0 {
        return Err(ImageError::Resize(format!(
            "target size must be non-zero, got {height}x{width}"
        )));
    }
    let (src_h, src_w, channels) = frame
        .dims3()
        .map_err(|_| ImageError::Resize(format!("expected HWC frame, got shape {:?}", frame.shape)))?;
    if src_h == 0 || src_w == 0 {
        return Err(ImageError::Resize(format!(
            "source size must be non-zero, got {src_h}x{src_w}"
        )));
    }

    let rows = taps(src_h, height, filter);
    let cols = taps(src_w, width, filter);
    let pixel = |y: usize, x: usize, ch: usize| frame.data[(y * src_w + x) * channels + ch] as f64;

    let mut data = Vec::with_capacity(height * width * channels);
    for row in &rows {
        for col in &cols {
            for ch in 0..channels {
                let top = pixel(row.lo, col.lo, ch) * (1.0 - col.frac) + pixel(row.lo, col.hi, ch) * col.frac;
                let bottom = pixel(row.hi, col.lo, ch) * (1.0 - col.frac) + pixel(row.hi, col.hi, ch) * col.frac;
                data.push((top * (1.0 - row.frac) + bottom * row.frac) as f32);
            }
        }
    }

    Ok(Tensor::new(vec![height, width, channels], data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_reflects_about_edge_centers() {
        assert_eq!(mirror(-1, 4), 1);
        assert_eq!(mirror(-2, 4), 2);
        assert_eq!(mirror(4, 4), 2);
        assert_eq!(mirror(5, 4), 1);
        assert_eq!(mirror(2, 4), 2);
    }

    #[test]
    fn test_mirror_single_pixel_axis() {
        assert_eq!(mirror(-1, 1), 0);
        assert_eq!(mirror(1, 1), 0);
    }

    #[test]
    fn test_source_coord_is_center_aligned() {
        assert_eq!(source_coord(0, 6, 2), 1.0);
        assert_eq!(source_coord(1, 6, 2), 4.0);
        assert_eq!(source_coord(0, 2, 4), -0.25);
    }

    #[test]
    fn test_bilinear_taps_upsample() {
        let taps = taps(2, 4, ResizeFilter::Bilinear);
        assert_eq!(taps[0], Tap { lo: 1, hi: 0, frac: 0.75 });
        assert_eq!(taps[3], Tap { lo: 1, hi: 0, frac: 0.25 });
    }

    #[test]
    fn test_nearest_taps_clamp() {
        let taps = taps(3, 7, ResizeFilter::Nearest);
        assert!(taps.iter().all(|t| t.lo == t.hi && t.lo < 3 && t.frac == 0.0));
        assert_eq!(taps[0].lo, 0);
        assert_eq!(taps[6].lo, 2);
    }
}
