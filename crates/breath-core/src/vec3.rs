use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;

/// Point or direction in world space around the globe.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// +Y, the lattice pole.
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Unit vector in the same direction. Returns `UP` if near-zero magnitude.
    pub fn normalize(self) -> Self {
        let norm = self.norm();
        if norm < EPSILON {
            return Self::UP;
        }
        self * (1.0 / norm)
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).norm_squared()
    }

    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
        assert_eq!(v, Vec3::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn test_normalize_near_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::UP);
    }

    #[test]
    fn test_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_abs_diff_eq!(a.distance(b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.distance_squared(b), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ops() {
        let a = Vec3::new(1.0, -1.0, 2.0);
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Vec3::ZERO);
        assert_eq!(-a, Vec3::new(-1.0, 1.0, -2.0));
        assert_abs_diff_eq!(a.dot(Vec3::UP), -1.0);
    }

    #[test]
    fn test_array_roundtrip() {
        let v = Vec3::from([0.5, -0.25, 2.0]);
        assert_eq!(v.to_array(), [0.5, -0.25, 2.0]);
        assert!(v.is_finite());
        assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
    }
}
