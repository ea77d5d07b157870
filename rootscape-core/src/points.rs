use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point<T> {
    x: T,
    y: T,
}

/// Point in the logical plane the shader and the roots live in.
pub type UvPoint = Point<f64>;

/// User-adjustable parameter point fed to the shader.
pub type Root = Point<f64>;

/// Point in device pixels of the backing canvas, before rounding.
pub type PixelPoint = Point<f64>;

/// On-screen centre of a handle, in whole device pixels.
pub type HandleCoord = Point<i32>;

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &T {
        &self.x
    }

    pub fn y(&self) -> &T {
        &self.y
    }

    pub fn into_parts(self) -> (T, T) {
        (self.x, self.y)
    }

    pub fn add(&self, other: &Self) -> Self
    where
        T: Add<Output = T> + Clone,
    {
        Self {
            x: self.x.clone() + other.x.clone(),
            y: self.y.clone() + other.y.clone(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self
    where
        T: Sub<Output = T> + Clone,
    {
        Self {
            x: self.x.clone() - other.x.clone(),
            y: self.y.clone() - other.y.clone(),
        }
    }

    pub fn mul_scalar(&self, scalar: &T) -> Self
    where
        T: Mul<Output = T> + Clone,
    {
        Self {
            x: self.x.clone() * scalar.clone(),
            y: self.y.clone() * scalar.clone(),
        }
    }

    pub fn distance_squared(&self, other: &Self) -> T
    where
        T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Clone,
    {
        let delta = self.sub(other);
        delta.x.clone() * delta.x + delta.y.clone() * delta.y
    }
}

impl<T> Point<T>
where
    T: Copy + Into<f64>,
{
    /// Widen an integer point for distance math against fractional points.
    pub fn to_f64(&self) -> Point<f64> {
        Point::new(self.x.into(), self.y.into())
    }
}
