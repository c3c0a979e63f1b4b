use crate::calc::{Matrix3x3, Vec3};

/// Machine epsilon used to detect the gimbal-lock case while extracting Euler angles
pub const GIMBAL_EPSILON: f64 = f64::EPSILON;

/// Builds a right-handed orthonormal reference frame from three points.
///
/// The local ``z`` axis points from ``mid`` towards ``up``; the local ``x``
/// axis is perpendicular to the plane spanned by the ``mid->up`` and
/// ``mid->side`` vectors; ``y`` completes the right-handed system. The three
/// versors are returned as the columns of a [`Matrix3x3`], i.e. the matrix
/// that rotates the global frame onto the local one.
///
/// The three points must not be collinear and no two of them may coincide;
/// degenerate input produces NaN entries which the caller must treat as a
/// fatal geometry error.
///
/// # Example
/// ```
/// use rotascan_structure::calc::{create_ref_frame, Vec3};
/// let frame = create_ref_frame(&Vec3::from_float(0.0), &Vec3::new(0.0, 0.0, 2.0),
///                              &Vec3::new(1.0, 0.0, 1.0));
/// // --- mid->up along the global z keeps the z versor unchanged
/// assert!((frame.elem(2, 2) - 1.0).abs() < 1e-12);
/// ```
pub fn create_ref_frame(mid: &Vec3, up: &Vec3, side: &Vec3) -> Matrix3x3 {

    let mut tz = up.clone();
    tz -= mid;
    tz.normalize();

    let mut to_side = side.clone();
    to_side -= mid;

    let mut tx = Vec3::cross(&tz, &to_side);
    tx.normalize();

    let ty = Vec3::cross(&tz, &tx);

    return Matrix3x3::from_column_vectors(&tx, &ty, &tz);
}

/// Extracts z-y-z Euler angles from a local reference frame.
///
/// For a frame built by [`create_ref_frame()`] the returned triple
/// ``(alpha, beta, gamma)`` satisfies
/// ``R = R_z(alpha) * R_y(beta) * R_z(gamma)`` where ``R`` is the input
/// matrix rotating the global frame onto the local one.
///
/// When the projection of the local ``z`` versor on the global ``xy`` plane
/// is shorter than the machine epsilon, the decomposition is degenerate;
/// then ``alpha`` is set to zero, ``beta`` to ``0`` or ``pi`` according to
/// the sign of the ``z`` versor's third component, and
/// ``gamma = -atan2(x_y, x_x)``.
pub fn euler_angles(frame: &Matrix3x3) -> (f64, f64, f64) {

    let zx = frame.elem(0, 2);
    let zy = frame.elem(1, 2);
    let zz = frame.elem(2, 2);
    let xy_projection = (zx * zx + zy * zy).sqrt();

    if xy_projection < GIMBAL_EPSILON {
        let beta = if zz > 0.0 { 0.0 } else { std::f64::consts::PI };
        let gamma = -f64::atan2(frame.elem(1, 0), frame.elem(0, 0));
        return (0.0, beta, gamma);
    }

    let alpha = f64::atan2(zy, zx);
    let beta = f64::atan2(xy_projection, zz);
    let gamma = f64::atan2(frame.elem(2, 1), -frame.elem(2, 0));

    return (alpha, beta, gamma);
}
