use log::debug;

use rotascan_chem::{Hybridization, ParameterRegistry};
use rotascan_structure::{SiteAtom, Structure};

/// Assigns a hybridization state to every heavy atom of a structure.
///
/// The state is inferred from the steric number of the atom: the count of its
/// explicit covalent neighbors plus the hydrogens the residue topology says
/// the atom should carry but which are absent from the input. Per-element
/// rules map the steric number to a state:
///  - carbon: 4 neighbors are sp3, 3 are sp2, 2 are sp;
///  - nitrogen: 4 neighbors are sp3; 3 or 2 are sp2 (amide, guanidinium and
///    ring nitrogens), a single neighbor is sp;
///  - oxygen and sulfur: 2 neighbors are sp3 (hydroxyl, thiol, ether),
///    a single neighbor is sp2 (carbonyl, carboxylate);
///  - anything else defaults to sp3.
///
/// The bond graph must be known before this pass; atoms with no connections
/// keep their hybridization unset.
pub fn assign_hybridization(strctr: &mut Structure, registry: &ParameterRegistry) {

    let steric_numbers: Vec<(i32, usize)> = strctr.atoms().iter()
        .filter(|a| !a.is_pseudo && !a.is_hydrogen() && !a.connections.is_empty())
        .map(|a| (a.id, steric_number(a, strctr, registry)))
        .collect();

    let mut assigned = 0;
    for (atom_id, steric) in steric_numbers {
        let element = strctr.atom(atom_id).unwrap().element.clone();
        let state = match (element.as_str(), steric) {
            ("C", n) if n >= 4 => Hybridization::Sp3,
            ("C", 3) => Hybridization::Sp2,
            ("C", _) => Hybridization::Sp,
            ("N", n) if n >= 4 => Hybridization::Sp3,
            ("N", 3) | ("N", 2) => Hybridization::Sp2,
            ("N", _) => Hybridization::Sp,
            ("O", n) | ("S", n) | ("SE", n) if n >= 2 => Hybridization::Sp3,
            ("O", _) | ("S", _) | ("SE", _) => Hybridization::Sp2,
            _ => Hybridization::Sp3,
        };
        if let Some(atom) = strctr.atom_mut(atom_id) { atom.hybridization = Some(state); }
        assigned += 1;
    }
    debug!("hybridization assigned to {} heavy atoms", assigned);
}

/// The steric number of a heavy atom: its explicit neighbors plus implicit hydrogens.
///
/// A hydrogen listed in the residue topology but absent from both the input
/// and the explicit neighbor list is an implicit one.
fn steric_number(atom: &SiteAtom, strctr: &Structure, registry: &ParameterRegistry) -> usize {
    atom.connections.len() + count_implicit_hydrogens(atom, strctr, registry)
}

/// Counts the hydrogens a heavy atom should carry but which the input lacks.
pub fn count_implicit_hydrogens(atom: &SiteAtom, strctr: &Structure,
                                registry: &ParameterRegistry) -> usize {
    let expected = match registry.hydrogen_names(&atom.comp_id, &atom.name) {
        Some(names) => names.len(),
        None => return 0,
    };
    let explicit = explicit_hydrogens(atom, strctr).len();
    return expected.saturating_sub(explicit);
}

/// Ids of the hydrogen atoms covalently bound to a given atom, in ascending order.
pub fn explicit_hydrogens(atom: &SiteAtom, strctr: &Structure) -> Vec<i32> {
    atom.connections.iter()
        .filter(|&&id| strctr.atom(id).map(|a| a.is_hydrogen()).unwrap_or(false))
        .cloned()
        .collect()
}

/// The idealized donor angle of a heavy atom, decided by its hybridization.
///
/// Used by the hydrogen-bond potential when hydrogen positions are missing
/// from the input: 109.5 degrees for an sp3 donor, 120 degrees for sp2.
pub fn generalized_donor_angle(atom: &SiteAtom) -> f64 {
    match atom.hybridization {
        Some(Hybridization::Sp3) | None => Hybridization::Sp3.ideal_bond_angle(),
        Some(state) => state.ideal_bond_angle(),
    }
}
