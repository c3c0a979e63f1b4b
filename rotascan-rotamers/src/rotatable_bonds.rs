use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;

use rotascan_chem::ParameterRegistry;
use rotascan_structure::atom_filters::{AtomPredicate, IsBackbone};
use rotascan_structure::calc::{create_ref_frame, dihedral_angle4, euler_angles, Vec3};
use rotascan_structure::{ResidueKey, Structure};

use crate::{RotamerError, SymMatrix4};

/// A side-chain atom that moves with at least one rotatable dihedral.
///
/// The transform maps the atom's input position to its rotated position; its
/// variables are the dihedral-angle *changes*, so the all-zero tuple is the
/// identity.
pub struct MovableAtom {
    pub atom_id: i32,
    pub transform: SymMatrix4,
}

/// The compiled rotatable-bond model of a single residue.
///
/// Holds the ordered dihedral names, the current angle values measured from
/// the input coordinates, and one compiled symbolic transform per movable
/// atom.
pub struct RotamerModel {
    pub residue: ResidueKey,
    pub comp_id: String,
    pub chi_names: Vec<String>,
    pub current_angles: Vec<f64>,
    pub movable: Vec<MovableAtom>,
}

/// Builds the symbolic rotation transform for a dihedral defined by atoms ``a-b-c``.
///
/// The transform rotates points around the ``b-c`` axis by the value of the
/// given variable. It is composed as: translate the bond midpoint to the
/// origin, rotate the global frame onto the local bond frame, apply the
/// canonical z-axis rotation with the symbolic angle, then undo the frame
/// rotation and the translation.
pub fn dihedral_rotation_transform(a: &Vec3, b: &Vec3, c: &Vec3, variable: usize) -> SymMatrix4 {

    let mut mid = Vec3::add_s(b, c);
    mid *= 0.5;
    let frame = create_ref_frame(&mid, c, a);
    let (alpha, beta, gamma) = euler_angles(&frame);

    let mut back = mid.clone();
    back.opposite();
    SymMatrix4::mult(&[
        &SymMatrix4::translation(&mid),
        &SymMatrix4::rotation_z(alpha),
        &SymMatrix4::rotation_y(beta),
        &SymMatrix4::rotation_z(gamma),
        &SymMatrix4::rotation_z_var(variable),
        &SymMatrix4::rotation_z(-gamma),
        &SymMatrix4::rotation_y(-beta),
        &SymMatrix4::rotation_z(-alpha),
        &SymMatrix4::translation(&back),
    ])
}

/// Builds the symbolic transform stretching the ``b-c`` bond.
///
/// The transform slides points along the bond axis by the value of the given
/// variable; the composition mirrors [`dihedral_rotation_transform`] with a
/// z-translation in place of the z-rotation.
pub fn bond_stretch_transform(a: &Vec3, b: &Vec3, c: &Vec3, variable: usize) -> SymMatrix4 {

    let mut mid = Vec3::add_s(b, c);
    mid *= 0.5;
    let frame = create_ref_frame(&mid, c, a);
    let (alpha, beta, gamma) = euler_angles(&frame);

    let mut back = mid.clone();
    back.opposite();
    SymMatrix4::mult(&[
        &SymMatrix4::translation(&mid),
        &SymMatrix4::rotation_z(alpha),
        &SymMatrix4::rotation_y(beta),
        &SymMatrix4::rotation_z(gamma),
        &SymMatrix4::translation_z_var(variable),
        &SymMatrix4::rotation_z(-gamma),
        &SymMatrix4::rotation_y(-beta),
        &SymMatrix4::rotation_z(-alpha),
        &SymMatrix4::translation(&back),
    ])
}

/// Builds the symbolic transform bending the ``a-b-c`` angle.
///
/// Two symbolic rotations are inserted in the local bond frame: a bend
/// around the local x axis (`theta`) and a precession around the local z
/// axis (`psi`).
pub fn bond_angle_transform(a: &Vec3, b: &Vec3, c: &Vec3,
                            theta_variable: usize, psi_variable: usize) -> SymMatrix4 {

    let mut mid = Vec3::add_s(b, c);
    mid *= 0.5;
    let frame = create_ref_frame(&mid, c, a);
    let (alpha, beta, gamma) = euler_angles(&frame);

    let mut back = mid.clone();
    back.opposite();
    SymMatrix4::mult(&[
        &SymMatrix4::translation(&mid),
        &SymMatrix4::rotation_z(alpha),
        &SymMatrix4::rotation_y(beta),
        &SymMatrix4::rotation_z(gamma),
        &SymMatrix4::rotation_z_var(psi_variable),
        &SymMatrix4::rotation_x_var(theta_variable),
        &SymMatrix4::rotation_z(-gamma),
        &SymMatrix4::rotation_y(-beta),
        &SymMatrix4::rotation_z(-alpha),
        &SymMatrix4::translation(&back),
    ])
}

/// Compiles the rotatable-bond model of a residue.
///
/// Resolves the residue's dihedral definitions against its atoms, measures
/// the current angle values, derives the set of atoms moved by each dihedral
/// (everything reachable from the distal axis atom without crossing the
/// axis, restricted to the residue) and composes, for every movable atom,
/// the product of the rotation transforms of all dihedrals that move it,
/// outermost first.
///
/// Returns ``Ok(None)`` when the residue type has no rotatable-bond entry or
/// when its side chain is too incomplete to define any dihedral; such
/// residues yield zero rotamers. A zero-length or collinear bond geometry is
/// a fatal [`RotamerError::GeometryDegenerate`].
pub fn build_rotamer_model(strctr: &Structure, registry: &ParameterRegistry,
                           key: &ResidueKey) -> Result<Option<RotamerModel>, RotamerError> {

    let comp_id = match strctr.residue_atoms(key).next() {
        Some(atom) => atom.comp_id.clone(),
        None => return Ok(None),
    };
    let definitions = match registry.chi_definitions(&comp_id) {
        Some(definitions) => definitions,
        None => return Ok(None),
    };

    // --- resolve each dihedral against the residue atoms; an incomplete side
    // --- chain truncates the list at the first unresolvable dihedral
    let mut resolved: Vec<(String, [i32; 4])> = vec![];
    for definition in definitions {
        let ids: Option<Vec<i32>> = definition.atoms.iter()
            .map(|name| strctr.residue_atom(key, name).map(|a| a.id))
            .collect();
        match ids {
            Some(ids) => resolved.push((definition.name.clone(), [ids[0], ids[1], ids[2], ids[3]])),
            None => {
                debug!("residue {} misses atoms of {}; deeper dihedrals are dropped",
                       key, definition.name);
                break;
            }
        }
    }
    if resolved.is_empty() { return Ok(None); }

    let residue_ids: HashSet<i32> = strctr.residue_atoms(key).map(|a| a.id).collect();

    let mut chi_names: Vec<String> = vec![];
    let mut current_angles: Vec<f64> = vec![];
    let mut moved_by: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    let mut transforms: Vec<SymMatrix4> = vec![];

    for (variable, (name, ids)) in resolved.iter().enumerate() {
        let [a, b, c, d] = positions(strctr, ids);
        check_axis_geometry(key, name, &a, &b, &c)?;

        chi_names.push(name.clone());
        current_angles.push(dihedral_angle4(&a, &b, &c, &d));
        transforms.push(dihedral_rotation_transform(&a, &b, &c, variable));

        for atom_id in downstream_atoms(strctr, &residue_ids, ids[1], ids[2]) {
            moved_by.entry(atom_id).or_default().push(variable);
        }
    }

    let movable: Vec<MovableAtom> = moved_by.into_iter()
        .map(|(atom_id, variables)| {
            let factors: Vec<&SymMatrix4> = variables.iter().map(|&v| &transforms[v]).collect();
            MovableAtom { atom_id, transform: SymMatrix4::mult(&factors) }
        })
        .collect();

    debug!("rotamer model for {} ({}): {} dihedrals, {} movable atoms",
           key, comp_id, chi_names.len(), movable.len());

    return Ok(Some(RotamerModel { residue: key.clone(), comp_id, chi_names, current_angles, movable }));
}

/// Atoms moved by a rotation around the ``b-c`` bond: everything reachable
/// from ``c`` without crossing back over ``b``, excluding the axis atoms
/// themselves and anything outside the residue.
///
/// Backbone atoms never move; this keeps the proline ring, whose side chain
/// closes back onto the backbone nitrogen, from dragging the backbone along.
fn downstream_atoms(strctr: &Structure, residue_ids: &HashSet<i32>, b: i32, c: i32) -> Vec<i32> {

    let backbone = IsBackbone;
    let mut visited: BTreeSet<i32> = BTreeSet::new();
    let mut queue: Vec<i32> = vec![c];
    while let Some(current) = queue.pop() {
        let atom = match strctr.atom(current) {
            Some(atom) => atom,
            None => continue,
        };
        for &neighbor in &atom.connections {
            if neighbor == b || neighbor == c { continue; }
            if !residue_ids.contains(&neighbor) { continue; }
            match strctr.atom(neighbor) {
                Some(next) if !backbone.check(next) => {
                    if visited.insert(neighbor) { queue.push(neighbor); }
                }
                _ => {}
            }
        }
    }
    return visited.into_iter().collect();
}

fn positions(strctr: &Structure, ids: &[i32; 4]) -> [Vec3; 4] {
    [strctr.atom(ids[0]).unwrap().pos.clone(),
     strctr.atom(ids[1]).unwrap().pos.clone(),
     strctr.atom(ids[2]).unwrap().pos.clone(),
     strctr.atom(ids[3]).unwrap().pos.clone()]
}

/// Rejects axis geometries for which no local frame exists.
fn check_axis_geometry(key: &ResidueKey, chi_name: &str,
                       a: &Vec3, b: &Vec3, c: &Vec3) -> Result<(), RotamerError> {

    if b.distance_square_to(c) < 1e-12 {
        return Err(RotamerError::GeometryDegenerate {
            residue: format!("{}", key),
            details: format!("zero-length {} axis", chi_name),
        });
    }
    let mut axis = c.clone();
    axis -= b;
    let mut to_side = a.clone();
    to_side -= b;
    if Vec3::cross(&axis, &to_side).length_squared() < 1e-18 {
        return Err(RotamerError::GeometryDegenerate {
            residue: format!("{}", key),
            details: format!("collinear atoms defining {}", chi_name),
        });
    }
    return Ok(());
}
