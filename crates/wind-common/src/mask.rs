//! Collaborator traits consumed by the field builder.
//!
//! The map outline, its rasterization, and the geographic projection are
//! owned by external layers. The core only needs two pixel-membership
//! predicates and a point projection, expressed here as object-safe traits
//! with blanket impls for closures so tests can pass plain functions.

use crate::Vec2;

/// Pixel-membership predicate derived from a rendered map boundary.
///
/// Two masks drive a field build: the *field mask* is a generous dilation
/// of the visible region (so particles behave naturally near edges), the
/// *display mask* is the strict visible outline.
pub trait Mask {
    fn contains(&self, x: i32, y: i32) -> bool;
}

impl<F> Mask for F
where
    F: Fn(i32, i32) -> bool,
{
    fn contains(&self, x: i32, y: i32) -> bool {
        self(x, y)
    }
}

/// A mask that admits every pixel.
pub struct FullMask;

impl Mask for FullMask {
    fn contains(&self, _x: i32, _y: i32) -> bool {
        true
    }
}

/// Geographic-to-pixel projection.
pub trait Project {
    fn project(&self, longitude: f64, latitude: f64) -> Vec2;
}

impl<F> Project for F
where
    F: Fn(f64, f64) -> Vec2,
{
    fn project(&self, longitude: f64, latitude: f64) -> Vec2 {
        self(longitude, latitude)
    }
}
