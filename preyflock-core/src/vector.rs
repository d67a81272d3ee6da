use core::f32::consts::TAU;

use rand::Rng;

use crate::math;

/// A 2D vector used for position, velocity and steering forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f32 {
        math::sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let mag = self.norm();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Same direction, length `length`. A negative length flips the direction.
    pub fn with_norm(&self, length: f32) -> Self {
        self.normalize() * length
    }

    pub fn limit(&self, max: f32) -> Self {
        let mag = self.norm();
        if mag > max {
            self.normalize() * max
        } else {
            *self
        }
    }

    /// Distance on the disc of radius `world_radius`, where leaving the edge
    /// re-enters from the antipodal side.
    ///
    /// This is the shorter of the straight segment and the path through the
    /// boundary, measured against the exterior image of either point. It
    /// agrees with [`Vector2D::wrap`]: a point and its wrapped form are at
    /// distance zero.
    pub fn distance(&self, other: &Vector2D, world_radius: f32) -> f32 {
        let mut best = (*self - *other).norm();
        if let Some(image) = other.exterior_image(world_radius) {
            best = best.min((*self - image).norm());
        }
        if let Some(image) = self.exterior_image(world_radius) {
            best = best.min((image - *other).norm());
        }
        best
    }

    /// Maps a position outside the disc back inside through the antipodal
    /// edge. Positions inside (or on) the boundary are returned unchanged.
    pub fn wrap(&self, world_radius: f32) -> Self {
        let mut wrapped = *self;
        let mut mag = wrapped.norm();
        while mag > world_radius {
            wrapped = wrapped.with_norm(mag - 2.0 * world_radius);
            mag = wrapped.norm();
        }
        wrapped
    }

    /// Uniformly random direction with length `max_magnitude`.
    pub fn random<R: Rng + ?Sized>(max_magnitude: f32, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let (sin, cos) = math::sin_cos(angle);
        Self::new(cos * max_magnitude, sin * max_magnitude)
    }

    // The point outside the disc that `wrap` sends onto `self`.
    fn exterior_image(&self, world_radius: f32) -> Option<Vector2D> {
        let mag = self.norm();
        if mag > 0.0 {
            Some(self.with_norm(mag - 2.0 * world_radius))
        } else {
            None
        }
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_vector2d_norm() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.norm(), 5.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        let normalized = v.normalize();
        assert!((normalized.norm() - 1.0).abs() < 0.0001);
        assert_eq!(Vector2D::zero().normalize(), Vector2D::zero());
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        let halved = v2 / 2.0;
        assert_eq!(halved, Vector2D::new(1.5, 2.0));

        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));
    }

    #[test]
    fn test_limit_only_shrinks() {
        let long = Vector2D::new(30.0, 40.0).limit(5.0);
        assert!((long.norm() - 5.0).abs() < 1e-5);
        assert!((long.x - 3.0).abs() < 1e-5);

        let short = Vector2D::new(0.3, 0.4);
        assert_eq!(short.limit(5.0), short);
    }

    #[test]
    fn test_wrap_reenters_from_antipode() {
        let wrapped = Vector2D::new(105.0, 0.0).wrap(100.0);
        assert!((wrapped.x + 95.0).abs() < 1e-4);
        assert!(wrapped.y.abs() < 1e-4);

        let inside = Vector2D::new(10.0, -20.0);
        assert_eq!(inside.wrap(100.0), inside);

        let on_edge = Vector2D::new(0.0, 100.0);
        assert_eq!(on_edge.wrap(100.0), on_edge);
    }

    #[test]
    fn test_wrap_handles_large_overshoot() {
        let wrapped = Vector2D::new(0.0, 350.0).wrap(100.0);
        assert!(wrapped.norm() <= 100.0 + 1e-4);
    }

    #[test]
    fn test_distance_through_boundary() {
        let a = Vector2D::new(99.0, 0.0);
        let b = Vector2D::new(-99.0, 0.0);
        assert!((a.distance(&b, 100.0) - 2.0).abs() < 1e-4);
        assert!((b.distance(&a, 100.0) - 2.0).abs() < 1e-4);

        let c = Vector2D::new(10.0, 0.0);
        assert!((a.distance(&c, 100.0) - 89.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance_matches_wrap() {
        let outside = Vector2D::new(70.0, 80.0);
        let wrapped = outside.wrap(100.0);
        // the exterior image of `outside` is where it wraps to
        assert!(outside.distance(&wrapped, 100.0) < 1e-3);

        let other = Vector2D::new(-60.0, -70.0);
        let via_wrapped = other.distance(&wrapped, 100.0);
        let direct_to_image = (other - outside).norm();
        assert!(via_wrapped <= direct_to_image + 1e-3);
    }

    #[test]
    fn test_distance_from_centre_ignores_image() {
        let origin = Vector2D::zero();
        let p = Vector2D::new(0.0, 30.0);
        assert!((origin.distance(&p, 100.0) - 30.0).abs() < 1e-5);
    }

    #[test]
    fn test_random_has_requested_magnitude() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let v = Vector2D::random(0.25, &mut rng);
            assert!((v.norm() - 0.25).abs() < 1e-5);
        }
    }
}
