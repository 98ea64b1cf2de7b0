//! Planar vector helpers.
//! Guards against degenerate directions so position state never turns NaN.
use glam::Vec2;

/// Returns the unit vector pointing along `vector`.
///
/// Zero-length and non-finite inputs yield [`Vec2::ZERO`] instead of NaN.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use tether::normalize_or_zero;
/// let unit = normalize_or_zero(Vec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.y - 0.8).abs() < 1e-6);
///
/// assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn normalize_or_zero(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Moves `from` along the direction of `to` by `distance`.
///
/// The step is not clamped: callers decide when the destination counts as
/// reached.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use tether::vector_math::step_toward;
/// let next = step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.5);
/// assert_eq!(next, Vec2::new(0.5, 0.0));
/// ```
#[must_use]
pub fn step_toward(from: Vec2, to: Vec2, distance: f32) -> Vec2 {
    from + normalize_or_zero(to - from) * distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(Vec2::ZERO)]
    #[case::nan(Vec2::new(f32::NAN, 1.0))]
    #[case::infinite(Vec2::new(f32::INFINITY, 0.0))]
    fn degenerate_vectors_normalise_to_zero(#[case] input: Vec2) {
        assert_eq!(normalize_or_zero(input), Vec2::ZERO);
    }

    #[rstest]
    fn stepping_onto_itself_stays_put() {
        let here = Vec2::new(2.0, -3.0);
        assert_eq!(step_toward(here, here, 1.0), here);
    }
}
