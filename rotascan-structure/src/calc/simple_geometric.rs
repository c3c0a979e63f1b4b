use crate::calc::Vec3;
use crate::SiteAtom;

/// Calculate the squared distance between two atoms
pub fn distance_squared(ai: &SiteAtom, aj: &SiteAtom) -> f64 {
    ai.pos.distance_square_to(&aj.pos)
}

/// Calculate the distance between two atoms
pub fn distance(ai: &SiteAtom, aj: &SiteAtom) -> f64 { distance_squared(ai, aj).sqrt() }

/// Calculates a planar angle between two vectors in 3D
///
/// The cosine is clamped into ``[-1, 1]``, so parallel and antiparallel
/// vectors yield exactly 0 and pi even when rounding pushes the normalized
/// dot product out of the arccos domain.
pub fn planar_angle2(a: &Vec3, b: &Vec3) -> f64 {
    let v = Vec3::dot(a, b);
    return (v / (a.length() * b.length())).clamp(-1.0, 1.0).acos();
}

/// Calculates a planar angle of the a-b-c triangle in 3D
///
/// The returned angle falls in the ``[0, pi]`` range.
/// ```
/// use rotascan_structure::calc::{planar_angle3, Vec3};
/// let va = Vec3::new(1.0, 0.0, 0.0);
/// let vb = Vec3::from_float(0.0);
/// let vc = Vec3::new(0.0, 1.0, 0.0);
/// assert!((planar_angle3(&va, &vb, &vc).to_degrees() - 90.0) < 0.001);
/// ```
pub fn planar_angle3(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {

    let mut v1: Vec3 = Vec3::clone(a);
    v1 -= b;
    let mut v2: Vec3 = Vec3::clone(c);
    v2 -= b;
    return planar_angle2(&v1, &v2);
}

/// Calculates a dihedral angle defined by the four a-b-c-d points in 3D.
///
/// The angle falls in the ``(-pi, pi]`` range and follows the IUPAC sign
/// convention: it is positive for a right-handed rotation of ``d`` about the
/// ``b-c`` axis when looking from ``b`` towards ``c``.
pub fn dihedral_angle4(a: &Vec3, b: &Vec3, c: &Vec3, d: &Vec3) -> f64 {

    let mut b0 = b.clone(); // b0 = -(b - a)
    b0 -= a;
    b0.opposite();
    let mut b1 = c.clone(); // b1 = c - b
    b1 -= b;
    b1.normalize();
    let mut b2 = d.clone(); // b2 = d - c
    b2 -= c;

    let mut v = b1.clone(); // v is the projection of b0 onto the plane perpendicular to b1
    v *= -Vec3::dot(&b0, &b1);
    v += &b0;

    let mut w = b1.clone(); // w is the projection of b2 onto the plane perpendicular to b1
    w *= -Vec3::dot(&b2, &b1);
    w += &b2;

    let x: f64 = Vec3::dot(&v, &w);
    let y: f64 = Vec3::dot(&Vec3::cross(&b1, &v), &w);

    return f64::atan2(y, x);
}
