use crate::foundation::error::{LineboilError, LineboilResult};
use crate::noise::voronoi::noise;

/// Strength and spatial frequency of the boil displacement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Maximum displacement scale in pixels per unit of noise distance.
    pub strength: f32,
    /// Pixel-to-noise-space scale.
    pub freq: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            strength: 4.0,
            freq: 0.04,
        }
    }
}

impl NoiseParams {
    /// Reject non-finite parameters.
    pub fn validate(&self) -> LineboilResult<()> {
        if !self.strength.is_finite() || !self.freq.is_finite() {
            return Err(LineboilError::validation(
                "noise strength and freq must be finite",
            ));
        }
        Ok(())
    }
}

/// Fill `dst` with a noise-displaced resample of `src` at time `t`.
///
/// Both buffers are `width * height` row-major coverage bitmaps. Each destination pixel `(x, y)`
/// samples the source at
/// `(x + noise(x*freq, y*freq, t)*strength, y + noise(y*freq, x*freq, 1.37t)*strength)`,
/// truncated toward zero; samples that land outside the source are written as 0. The second
/// axis swaps its arguments and runs on a different time scale so horizontal and vertical
/// displacement stay decorrelated.
pub fn boil(
    dst: &mut [u8],
    src: &[u8],
    width: usize,
    height: usize,
    t: f32,
    params: NoiseParams,
) -> LineboilResult<()> {
    let len = width
        .checked_mul(height)
        .ok_or_else(|| LineboilError::validation("boil dimensions overflow"))?;
    if src.len() != len || dst.len() != len {
        return Err(LineboilError::validation(format!(
            "boil buffers must be {width}x{height} ({len} bytes), got src={} dst={}",
            src.len(),
            dst.len()
        )));
    }

    let NoiseParams { strength, freq } = params;
    let t_y = t * 1.37;
    for y in 0..height {
        let fy = y as f32;
        let row = &mut dst[y * width..(y + 1) * width];
        for (x, out) in row.iter_mut().enumerate() {
            let fx = x as f32;
            let nx = fx + noise(fx * freq, fy * freq, t) * strength;
            let ny = fy + noise(fy * freq, fx * freq, t_y) * strength;

            let ix = nx as i64;
            let iy = ny as i64;
            *out = if ix >= 0 && iy >= 0 && (ix as usize) < width && (iy as usize) < height {
                src[iy as usize * width + ix as usize]
            } else {
                0
            };
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/noise/boil.rs"]
mod tests;
