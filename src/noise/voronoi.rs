use crate::foundation::math::hash2d;

/// Animated cellular noise: distance from `(x, y)` to the nearest Voronoi seed at time `t`.
///
/// The query point is jittered by `(sin(2.1t), cos(1.7t)) * 0.3`, then compared against one seed
/// per cell of the 3x3 neighbourhood around its lattice cell. Seed offsets come from
/// [`hash2d`], so for fixed inputs the result is bit-identical across runs and platforms.
pub fn noise(x: f32, y: f32, t: f32) -> f32 {
    let px = x + (t * 2.1).sin() * 0.3;
    let py = y + (t * 1.7).cos() * 0.3;

    let xi = px.floor() as i32;
    let yi = py.floor() as i32;

    let mut min_dist = 1e9f32;
    for yy in -1..=1 {
        for xx in -1..=1 {
            let cx_i = xi.wrapping_add(xx);
            let cy_i = yi.wrapping_add(yy);
            let h = hash2d(cx_i, cy_i);
            let fx = (h & 0xFF) as f32 / 255.0;
            let fy = ((h >> 8) & 0xFF) as f32 / 255.0;
            let dx = cx_i as f32 + fx - px;
            let dy = cy_i as f32 + fy - py;
            min_dist = min_dist.min(dx * dx + dy * dy);
        }
    }
    min_dist.sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/noise/voronoi.rs"]
mod tests;
