//! Screen-space types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D vector in host screen units (y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_array(arr: [f32; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Linear interpolation from `self` toward `other`
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Visual transform of one particle, relative to its emission anchor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub position: Vec2,
    /// Rotation in degrees, clockwise
    pub rotation_degrees: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation_degrees: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -2.0);
        assert_eq!(a + b, Vec2::new(4.0, 0.0));
        assert_eq!(b - a, Vec2::new(2.0, -4.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_vec2_lerp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, -20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, -10.0));
    }

    #[test]
    fn test_transform_builders() {
        let t = Transform2D::IDENTITY.with_opacity(0.0);
        assert_eq!(t.opacity, 0.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(Transform2D::default(), Transform2D::IDENTITY);
    }

    #[test]
    fn test_transform_serialization() {
        let t = Transform2D {
            position: Vec2::new(2.0, -3.0),
            ..Transform2D::IDENTITY
        };
        let value = toml::Value::try_from(t).unwrap();
        let back: Transform2D = value.try_into().unwrap();
        assert_eq!(t, back);
    }
}
