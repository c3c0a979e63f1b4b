//! Geometric calculations on atomic coordinates.
//!
//! The module provides functions to calculate structural properties such as
//! distances, planar and dihedral angles, as well as local reference frames
//! and their z-y-z Euler decomposition used by the rotatable-bond machinery.

mod matrix;
mod ref_frame;
mod simple_geometric;
mod vec3;

pub use matrix::Matrix3x3;
pub use ref_frame::{create_ref_frame, euler_angles, GIMBAL_EPSILON};
pub use simple_geometric::{dihedral_angle4, distance, distance_squared, planar_angle2, planar_angle3};
pub use vec3::Vec3;
