// Two-component `f32` vector.
//
// `perp()` rotates counter-clockwise by 90 degrees, `(x, y) -> (-y, x)`.
// Applied to a clockwise edge direction this yields the outward normal,
// which is how the path builder derives surface normals from brush edges.

use crate::EPSILON;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A point or direction in the level plane. Y points up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product. Positive when `other` lies
    /// counter-clockwise of `self`.
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise perpendicular, same length.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction. A (near) zero vector stays zero
    /// instead of turning into NaNs.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_of_rightward_edge_points_up() {
        assert_eq!(Vec2::new(1.0, 0.0).perp(), Vec2::UP);
        assert_eq!(Vec2::new(0.0, 1.0).perp(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn cross_sign_follows_rotation() {
        let east = Vec2::new(1.0, 0.0);
        assert!(east.cross(Vec2::UP) > 0.0);
        assert!(Vec2::UP.cross(east) < 0.0);
    }

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        let n = Vec2::new(3.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn operators_compose() {
        let mut v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0) * 2.0 - Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(6.0, 9.0));
        v *= 0.5;
        v += -Vec2::new(1.0, 0.5);
        assert_eq!(v, Vec2::new(2.0, 4.0));
        assert_eq!(Vec2::ZERO.distance_squared(Vec2::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn serde_as_plain_struct() {
        let json = serde_json::to_string(&Vec2::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
        let back: Vec2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vec2::new(1.5, -2.0));
    }
}
