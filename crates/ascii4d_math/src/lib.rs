//! 4D Mathematics for the ASCII tesseract
//!
//! This crate provides the small amount of linear algebra the projection
//! pipeline needs, plus the fixed tesseract geometry.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D vector with x, y, z, w components
//! - [`Matrix`] - Row-major R×C matrix with compile-time checked shapes
//! - [`RotationSet`] - All rotation matrices for one animation angle
//!
//! ## Geometry
//!
//! - [`Tesseract4D`] - The 16 canonical vertices and the 32-edge table
//! - [`Edge`], [`Half`] - Edge table entries and the near/far half selector

mod vec4;
pub mod matrix;
pub mod rotation;
pub mod tesseract;

pub use vec4::Vec4;
pub use matrix::{multiply, Matrix, Mat3, Mat4};
pub use rotation::{RotationPlane, RotationSet, orientation_correction};
pub use tesseract::{Edge, Half, Tesseract4D};
