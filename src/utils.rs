use ultraviolet::DVec2;

/// 2D vector used throughout the simulation.
pub type Vector2 = DVec2;

/// Rotates `v` by -90 degrees: `(x, y) -> (y, -x)`.
pub fn perpendicular(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Length of `d`, never smaller than `floor`.
pub fn clamped_distance(d: Vector2, floor: f64) -> f64 {
    d.mag().max(floor)
}

/// True if both components are finite.
pub fn is_finite(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
