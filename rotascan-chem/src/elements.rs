use std::fmt;
use std::fmt::{Display, Formatter};

/// Hybridization state of a heavy atom.
///
/// The state decides which covalent radius applies to the atom and, for
/// hydrogen-bond donors, which idealized donor angle is assumed when the
/// hydrogen positions are missing from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hybridization {
    Sp3,
    Sp2,
    Sp,
}

impl Hybridization {
    /// Index of this state in per-element covalent radii tables,
    /// which are ordered ``[sp3, sp2, sp]``
    pub fn radius_index(&self) -> usize {
        match self {
            Hybridization::Sp3 => 0,
            Hybridization::Sp2 => 1,
            Hybridization::Sp => 2,
        }
    }

    /// Idealized angle (in radians) between covalent bonds of an atom in this state.
    ///
    /// # Example
    /// ```
    /// use rotascan_chem::Hybridization;
    /// assert!((Hybridization::Sp2.ideal_bond_angle().to_degrees() - 120.0).abs() < 1e-10);
    /// ```
    pub fn ideal_bond_angle(&self) -> f64 {
        match self {
            Hybridization::Sp3 => 109.5_f64.to_radians(),
            Hybridization::Sp2 => 120.0_f64.to_radians(),
            Hybridization::Sp => std::f64::consts::PI,
        }
    }
}

impl Display for Hybridization {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Hybridization::Sp3 => write!(f, "sp3"),
            Hybridization::Sp2 => write!(f, "sp2"),
            Hybridization::Sp => write!(f, "sp"),
        }
    }
}

/// Chemical properties of an element, as used by bond inference and scoring.
#[derive(Clone, Debug)]
pub struct ElementProperties {
    /// element symbol, e.g. ``"C"``
    pub symbol: String,
    /// van der Waals radius in Angstroms
    pub vdw_radius: f64,
    /// covalent radii in Angstroms, indexed by [`Hybridization::radius_index()`]
    pub covalent_radii: [f64; 3],
    /// partial charge in elementary charge units
    pub partial_charge: f64,
}

impl ElementProperties {

    /// Covalent radius of this element for a given hybridization state
    pub fn covalent_radius(&self, hybridization: Hybridization) -> f64 {
        self.covalent_radii[hybridization.radius_index()]
    }

    /// The largest covalent radius of this element over all hybridization states
    pub fn max_covalent_radius(&self) -> f64 {
        self.covalent_radii.iter().cloned().fold(f64::MIN, f64::max)
    }
}
