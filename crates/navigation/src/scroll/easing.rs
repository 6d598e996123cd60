/// Cubic ease-out: fast start, gentle landing.  `t` is clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Offset at progress `t` of a tween from `from` to `to`.
pub fn tween(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * ease_out_cubic(t)
}
