use std::collections::HashMap;
use std::f64::consts::PI;
use std::str::FromStr;

use rotascan_chem::ParameterRegistry;
use rotascan_structure::calc::{planar_angle3, Vec3};
use rotascan_structure::{SiteAtom, Structure};

use crate::hybridization::generalized_donor_angle;
use crate::Diagnostics;

/// Elements that may take part in a hydrogen bond
const H_BOND_ELEMENTS: [&str; 3] = ["N", "O", "F"];

/// Everything a pair potential may need besides the two atoms themselves.
///
/// While a rotamer is being scored, atoms moved by the sampled dihedrals have
/// positions that differ from those stored in the structure; the
/// `moved_positions` map carries the overrides so that hydrogen and torsion
/// lookups see the candidate geometry.
pub struct PairContext<'a> {
    pub strctr: &'a Structure,
    pub registry: &'a ParameterRegistry,
    pub hydrogens_present: bool,
    pub moved_positions: Option<&'a HashMap<i32, Vec3>>,
    pub diagnostics: Option<&'a Diagnostics>,
}

impl<'a> PairContext<'a> {

    /// Creates a context with no moved atoms and no diagnostics sink
    pub fn new(strctr: &'a Structure, registry: &'a ParameterRegistry,
               hydrogens_present: bool) -> PairContext<'a> {
        PairContext { strctr, registry, hydrogens_present, moved_positions: None, diagnostics: None }
    }

    /// The current position of an atom: the rotamer override when one
    /// exists, the structure position otherwise
    pub fn position(&self, atom_id: i32) -> Option<Vec3> {
        if let Some(moved) = self.moved_positions {
            if let Some(pos) = moved.get(&atom_id) { return Some(pos.clone()); }
        }
        self.strctr.atom(atom_id).map(|a| a.pos.clone())
    }

    fn count_fallback(&self) {
        if let Some(diagnostics) = self.diagnostics { diagnostics.count_parameter_fallback(); }
    }

    /// The contact distance of an atom pair: the sum of the two van der
    /// Waals radii, scaled by the `r_sigma` coefficient. ``None`` when either
    /// element is unknown; the event is counted as a parameter fallback.
    fn sigma(&self, ai: &SiteAtom, aj: &SiteAtom) -> Option<f64> {
        match (self.registry.vdw_radius(&ai.element), self.registry.vdw_radius(&aj.element)) {
            (Some(ri), Some(rj)) => Some(self.registry.coefficients().r_sigma * (ri + rj)),
            _ => {
                self.count_fallback();
                None
            }
        }
    }
}

/// A pairwise potential evaluates the interaction energy of two atoms.
///
/// Every potential follows the same policy for missing parameters: the
/// affected contribution is zero and the event is counted in the context's
/// diagnostics sink; a potential never fails.
pub trait PairPotential {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64;
}

/// Infinite wall at the contact distance: `+inf` for r below sigma, zero above.
///
/// The infinity propagates through energy sums and makes a clashing rotamer
/// rank last.
pub struct HardSphere;

impl PairPotential for HardSphere {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        let sigma = match ctx.sigma(ai, aj) { Some(s) => s, None => return 0.0 };
        let r2 = ai.pos.distance_square_to(&aj.pos);
        if r2 < sigma * sigma { return f64::INFINITY; }
        return 0.0;
    }
}

/// Finite power-law repulsion inside the contact distance, zero outside.
pub struct SoftSphere;

impl PairPotential for SoftSphere {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        let sigma = match ctx.sigma(ai, aj) { Some(s) => s, None => return 0.0 };
        let r = ai.pos.distance_to(&aj.pos);
        if r > sigma { return 0.0; }
        let coefficients = ctx.registry.coefficients();
        return coefficients.soft_epsilon * (sigma / r).powf(coefficients.soft_exponent);
    }
}

/// The classical 12-6 Lennard-Jones potential.
pub struct LennardJones;

impl PairPotential for LennardJones {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        let sigma = match ctx.sigma(ai, aj) { Some(s) => s, None => return 0.0 };
        let r2 = ai.pos.distance_square_to(&aj.pos);
        let x = sigma * sigma / r2;     // (sigma/r)^2
        let x6 = x * x * x;
        return 4.0 * ctx.registry.coefficients().lj_epsilon * (x6 * x6 - x6);
    }
}

/// Electrostatic interaction of the tabulated per-element partial charges.
///
/// The energy falls off with the squared distance.
pub struct Coulomb;

impl PairPotential for Coulomb {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        let (qi, qj) = match (ctx.registry.partial_charge(&ai.element),
                              ctx.registry.partial_charge(&aj.element)) {
            (Some(qi), Some(qj)) => (qi, qj),
            _ => {
                ctx.count_fallback();
                return 0.0;
            }
        };
        let coefficients = ctx.registry.coefficients();
        let r2 = ai.pos.distance_square_to(&aj.pos);
        return coefficients.coulomb_k * qi * qj / (coefficients.c_epsilon * r2);
    }
}

/// Explicit hydrogen-bond term with a 12-10 radial profile and an angular gate.
///
/// Both orderings of the pair are tried as (donor, acceptor). A donor must be
/// a nitrogen, oxygen or fluorine listed with at least one hydrogen in the
/// residue topology; an acceptor must be one of the same elements. With
/// hydrogens present in the input, every explicit hydrogen of the donor
/// contributes with its concrete geometry; otherwise the donor angle is
/// taken from the hybridization state (109.5 or 120 degrees), reduced by the
/// smallest angle the donor's heavy neighbors make with the acceptor, and
/// the contribution is counted once per expected hydrogen.
///
/// Each contribution is
/// ``h_epsilon * (5 (r_DH/r)^12 - 6 (r_DH/r)^10) * cos(theta)``
/// restricted to orientations with ``cos(theta) <= 0``.
pub struct HBond;

impl HBond {

    fn contribution(r_dh: f64, r: f64, theta: f64, h_epsilon: f64) -> f64 {
        let cos_theta = theta.cos();
        if cos_theta > 0.0 { return 0.0; }
        let x = r_dh / r;
        let x10 = x.powi(10);
        return h_epsilon * (5.0 * x10 * x * x - 6.0 * x10) * cos_theta;
    }

    /// The analytic donor angle for a hypothetical hydrogen: the angle at the
    /// hydrogen of the donor-hydrogen-acceptor triangle with the bond length
    /// `r_dh`, the donor-acceptor distance `r` and the angle `alpha` at the donor.
    fn generalized_theta(alpha: f64, r_dh: f64, r: f64) -> f64 {
        let ha2 = r_dh * r_dh + r * r - 2.0 * r_dh * r * alpha.cos();
        let ha = ha2.sqrt();
        let cos_theta = (r_dh * r_dh + ha2 - r * r) / (2.0 * r_dh * ha);
        return cos_theta.clamp(-1.0, 1.0).acos();
    }

    fn donor_acceptor_energy(&self, donor: &SiteAtom, acceptor: &SiteAtom, ctx: &PairContext) -> f64 {

        let hydrogen_names = match ctx.registry.hydrogen_names(&donor.comp_id, &donor.name) {
            Some(names) if !names.is_empty() => names,
            _ => return 0.0,
        };
        let h_epsilon = ctx.registry.coefficients().h_epsilon;
        let r = donor.pos.distance_to(&acceptor.pos);

        let explicit: Vec<i32> = donor.connections.iter()
            .filter(|&&id| ctx.strctr.atom(id).map(|a| a.is_hydrogen()).unwrap_or(false))
            .cloned().collect();

        if ctx.hydrogens_present && !explicit.is_empty() {
            let mut energy = 0.0;
            for h_id in explicit {
                let h_pos = match ctx.position(h_id) { Some(pos) => pos, None => continue };
                let r_dh = donor.pos.distance_to(&h_pos);
                let theta = planar_angle3(&acceptor.pos, &h_pos, &donor.pos);
                energy += HBond::contribution(r_dh, r, theta, h_epsilon);
            }
            return energy;
        }

        // --- no hydrogens in the input: fall back to the generalized geometry
        let hybridization = donor.hybridization.unwrap_or(rotascan_chem::Hybridization::Sp3);
        let r_dh = match (ctx.registry.covalent_radius(&donor.element, hybridization),
                          ctx.registry.covalent_radius("H", hybridization)) {
            (Some(rd), Some(rh)) => rd + rh,
            _ => {
                ctx.count_fallback();
                return 0.0;
            }
        };
        let mut alpha = generalized_donor_angle(donor);
        let smallest_neighbor_angle = donor.connections.iter()
            .filter_map(|&id| ctx.strctr.atom(id))
            .filter(|neighbor| !neighbor.is_hydrogen())
            .filter_map(|neighbor| ctx.position(neighbor.id))
            .map(|neighbor_pos| planar_angle3(&neighbor_pos, &donor.pos, &acceptor.pos))
            .fold(f64::INFINITY, f64::min);
        if smallest_neighbor_angle.is_finite() {
            alpha = (alpha - smallest_neighbor_angle).max(0.0);
        }
        let theta = HBond::generalized_theta(alpha, r_dh, r);
        return hydrogen_names.len() as f64 * HBond::contribution(r_dh, r, theta, h_epsilon);
    }
}

impl PairPotential for HBond {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        if !H_BOND_ELEMENTS.contains(&ai.element.as_str())
            || !H_BOND_ELEMENTS.contains(&aj.element.as_str()) { return 0.0; }
        return self.donor_acceptor_energy(ai, aj, ctx) + self.donor_acceptor_energy(aj, ai, ctx);
    }
}

/// The default scoring potential: weighted Lennard-Jones, Coulomb and
/// hydrogen-bond terms blended to zero by a cosine taper.
///
/// Below ``cutoff_start * sigma`` the sum is returned unchanged; between the
/// two cutoffs it is multiplied by
/// ``cos(pi (r - c_s sigma) / (2 (c_e - c_s) sigma))``, which is 1 at the
/// lower seam and 0 at the upper one; above ``cutoff_end * sigma`` the
/// energy is exactly zero.
pub struct Composite;

impl PairPotential for Composite {
    fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        let sigma = match ctx.sigma(ai, aj) { Some(s) => s, None => return 0.0 };
        let coefficients = ctx.registry.coefficients();
        let r = ai.pos.distance_to(&aj.pos);
        let taper_from = coefficients.cutoff_start * sigma;
        let taper_to = coefficients.cutoff_end * sigma;
        if r >= taper_to { return 0.0; }

        let sum = coefficients.lj_k * LennardJones.energy(ai, aj, ctx)
            + coefficients.c_k * Coulomb.energy(ai, aj, ctx)
            + coefficients.h_k * HBond.energy(ai, aj, ctx);
        if r <= taper_from { return sum; }

        let blend = (PI * (r - taper_from) / (2.0 * (taper_to - taper_from))).cos();
        return sum * blend;
    }
}

/// How the torsional term treats the dihedral window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TorsionMode {
    /// the plain cosine series over the full circle
    Classical,
    /// nonzero only within one period around the trans orientation
    Windowed,
}

/// Torsional energy of an atom: the cosine term summed over every chain of
/// three consecutive covalent bonds starting at the atom.
///
/// The peak count is fixed at three. In the [`TorsionMode::Windowed`] mode
/// the term is nonzero only for dihedrals within ``[-pi/3, pi/3]``.
// TODO: derive the peak count from the hybridization of the two axis atoms.
pub fn torsion_energy(atom: &SiteAtom, ctx: &PairContext, mode: TorsionMode) -> f64 {

    let coefficients = ctx.registry.coefficients();
    let phase = 3.0;
    let pos_i = match ctx.position(atom.id) { Some(pos) => pos, None => atom.pos.clone() };

    let mut energy = 0.0;
    for &n1 in &atom.connections {
        let a1 = match ctx.strctr.atom(n1) { Some(a) => a, None => continue };
        for &n2 in &a1.connections {
            if n2 == atom.id { continue; }
            let a2 = match ctx.strctr.atom(n2) { Some(a) => a, None => continue };
            for &n3 in &a2.connections {
                if n3 == n1 || n3 == atom.id { continue; }
                let (p1, p2, p3) = match (ctx.position(n1), ctx.position(n2), ctx.position(n3)) {
                    (Some(p1), Some(p2), Some(p3)) => (p1, p2, p3),
                    _ => continue,
                };
                let omega = rotascan_structure::calc::dihedral_angle4(&pos_i, &p1, &p2, &p3);
                match mode {
                    TorsionMode::Classical => {
                        energy += coefficients.t_k * coefficients.t_epsilon / 2.0
                            * (1.0 + (phase * omega).cos());
                    }
                    TorsionMode::Windowed => {
                        if omega.abs() <= PI / phase {
                            energy += coefficients.t_k * coefficients.t_epsilon / 2.0
                                * (1.0 + (phase * omega).cos());
                        }
                    }
                }
            }
        }
    }
    return energy;
}

/// Selects the pairwise potential a sweep scores its rotamers with.
///
/// # Example
/// ```
/// use std::str::FromStr;
/// use rotascan_rotamers::PotentialKind;
/// assert_eq!(PotentialKind::from_str("lennard_jones").unwrap(), PotentialKind::LennardJones);
/// assert!(PotentialKind::from_str("morse").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PotentialKind {
    HardSphere,
    SoftSphere,
    LennardJones,
    Coulomb,
    HBond,
    Composite,
}

impl PotentialKind {

    /// Evaluates the selected potential for a pair of atoms
    pub fn energy(&self, ai: &SiteAtom, aj: &SiteAtom, ctx: &PairContext) -> f64 {
        match self {
            PotentialKind::HardSphere => HardSphere.energy(ai, aj, ctx),
            PotentialKind::SoftSphere => SoftSphere.energy(ai, aj, ctx),
            PotentialKind::LennardJones => LennardJones.energy(ai, aj, ctx),
            PotentialKind::Coulomb => Coulomb.energy(ai, aj, ctx),
            PotentialKind::HBond => HBond.energy(ai, aj, ctx),
            PotentialKind::Composite => Composite.energy(ai, aj, ctx),
        }
    }

    /// Returns true when the bonded torsional term takes part in the score
    pub fn includes_bonded(&self) -> bool { matches!(self, PotentialKind::Composite) }
}

impl FromStr for PotentialKind {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "hard_sphere" => Ok(PotentialKind::HardSphere),
            "soft_sphere" => Ok(PotentialKind::SoftSphere),
            "lennard_jones" => Ok(PotentialKind::LennardJones),
            "coulomb" => Ok(PotentialKind::Coulomb),
            "h_bond" => Ok(PotentialKind::HBond),
            "composite" => Ok(PotentialKind::Composite),
            _ => Err(format!("Unknown potential: {}!", name)),
        }
    }
}
