//! Easing curves for the spin animation.

/// Cubic ease-out: fast start, slow settle.
///
/// Maps progress in [0, 1] to [0, 1]; inputs outside that range are clamped.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let rest = 1.0 - p;
    1.0 - rest * rest * rest
}

#[cfg(test)]
mod tests {
    use super::ease_out_cubic;

    #[test]
    fn endpoints_are_fixed() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-0.5), 0.0);
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn halfway_is_past_half() {
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn curve_never_decreases() {
        let mut prev = 0.0;
        for step in 0..=1000 {
            let value = ease_out_cubic(step as f64 / 1000.0);
            assert!(value >= prev);
            prev = value;
        }
    }
}
