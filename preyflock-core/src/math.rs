//! Float functions that need `libm` when built without `std`.

#[inline]
pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

#[inline]
pub(crate) fn round(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.round()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::roundf(value)
    }
}

#[inline]
pub(crate) fn powi(base: f32, exponent: i32) -> f32 {
    #[cfg(feature = "std")]
    {
        base.powi(exponent)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::powf(base, exponent as f32)
    }
}

#[inline]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sincosf(angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_goes_up_for_positive_values() {
        assert_eq!(round(0.5), 1.0);
        assert_eq!(round(1.49), 1.0);
        assert_eq!(round(59.0 / 60.0), 1.0);
    }

    #[test]
    fn test_powi_zero_exponent() {
        assert_eq!(powi(0.9, 0), 1.0);
        assert!((powi(0.9, 2) - 0.81).abs() < 1e-6);
    }
}
