/// Stable 2D integer hash used to place Voronoi seeds.
///
/// Pure wrapping `u32` arithmetic so the result is identical on every platform.
pub(crate) fn hash2d(x: i32, y: i32) -> u32 {
    let h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263));
    let h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
