//! # Primitives
//!
//! Tessellators for marker primitives (cube, sphere, cylinder, triangle list).
//! Every tessellator emits unwelded, flat-shaded, vertex-colored triangles
//! wound counter-clockwise seen from outside.

pub mod cube;
pub mod cylinder;
pub mod sphere;
pub mod triangles;

pub use cube::create_cube;
pub use cylinder::create_cylinder;
pub use sphere::{create_sphere, SphereParams};
pub use triangles::create_triangle_list;
