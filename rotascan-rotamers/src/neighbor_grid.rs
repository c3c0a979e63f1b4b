use std::collections::HashMap;

use log::debug;

use rotascan_chem::ParameterRegistry;
use rotascan_structure::calc::Vec3;
use rotascan_structure::Structure;

use crate::Diagnostics;

/// A uniform spatial hash over atom positions.
///
/// Atoms are binned into cubic cells of a given size; all atoms within a
/// given distance of a query point are guaranteed to be found in the 3x3x3
/// block of cells around it, provided the distance does not exceed the cell
/// size. The grid is built once, then only read.
pub struct NeighborGrid {
    cell_size: f64,
    origin: Vec3,
    cells: HashMap<(i32, i32, i32), Vec<i32>>,
}

impl NeighborGrid {

    /// Bins all non-pseudo atoms of a structure into cells of a given size.
    ///
    /// The grid origin is the minimum corner of the axis-aligned bounding box
    /// of the atoms.
    pub fn new(strctr: &Structure, cell_size: f64) -> NeighborGrid {

        let mut origin = Vec3::new(f64::MAX, f64::MAX, f64::MAX);
        for a in strctr.atoms().iter().filter(|a| !a.is_pseudo) {
            origin.x = origin.x.min(a.pos.x);
            origin.y = origin.y.min(a.pos.y);
            origin.z = origin.z.min(a.pos.z);
        }

        let mut grid = NeighborGrid { cell_size, origin, cells: HashMap::new() };
        for a in strctr.atoms().iter().filter(|a| !a.is_pseudo) {
            let cell = grid.cell_of(&a.pos);
            grid.cells.entry(cell).or_default().push(a.id);
        }
        debug!("{} atoms hashed into {} cells of {:.2} A", strctr.count_atoms(),
               grid.cells.len(), cell_size);

        return grid;
    }

    /// The cell indexes a given point falls into
    pub fn cell_of(&self, pos: &Vec3) -> (i32, i32, i32) {
        (((pos.x - self.origin.x) / self.cell_size).floor() as i32 + 1,
         ((pos.y - self.origin.y) / self.cell_size).floor() as i32 + 1,
         ((pos.z - self.origin.z) / self.cell_size).floor() as i32 + 1)
    }

    /// Ids of all atoms found in the 3x3x3 block of cells around a given point.
    ///
    /// The returned list is sorted, so iteration order does not depend on the
    /// hashing order of the cells.
    pub fn neighbor_candidates(&self, pos: &Vec3) -> Vec<i32> {
        let (cx, cy, cz) = self.cell_of(pos);
        let mut candidates: Vec<i32> = vec![];
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(ids) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        candidates.extend_from_slice(ids);
                    }
                }
            }
        }
        candidates.sort_unstable();
        return candidates;
    }
}

/// Infers the covalent bond graph of a structure from interatomic distances.
///
/// For every atom pair closer than the largest candidate bond length, the
/// observed distance is compared against each candidate length (the sums of
/// the two elements' covalent radii over all hybridization combinations)
/// within the `length_error` tolerance; the first matching candidate
/// establishes a bond. The resulting `connections` lists are symmetric and
/// sorted. Atoms whose element is absent from the registry acquire no bonds
/// and are counted in the diagnostics sink.
pub fn assign_connections(strctr: &mut Structure, registry: &ParameterRegistry,
                          diagnostics: &Diagnostics) {

    let tolerance = registry.coefficients().length_error;
    let grid = NeighborGrid::new(strctr, registry.max_bond_length());

    let mut connections: HashMap<i32, Vec<i32>> = HashMap::new();
    for ai in strctr.atoms().iter().filter(|a| !a.is_pseudo) {
        if registry.element(&ai.element).is_none() {
            diagnostics.count_unknown_element();
            continue;
        }
        for aj_id in grid.neighbor_candidates(&ai.pos) {
            if aj_id == ai.id { continue; }
            let aj = strctr.atom(aj_id).unwrap();
            if registry.element(&aj.element).is_none() { continue; }
            let d2 = ai.pos.distance_square_to(&aj.pos);
            let bonded = registry.bond_length_candidates(&ai.element, &aj.element).iter()
                .any(|&length| {
                    let shortest = (length - tolerance).max(0.0);
                    let longest = length + tolerance;
                    d2 >= shortest * shortest && d2 <= longest * longest
                });
            if bonded {
                connections.entry(ai.id).or_default().push(aj_id);
            }
        }
    }

    // --- symmetrize: i-j implies j-i, whichever direction found the bond first
    let pairs: Vec<(i32, i32)> = connections.iter()
        .flat_map(|(&i, neighbors)| neighbors.iter().map(move |&j| (j, i)))
        .collect();
    for (i, j) in pairs {
        let entry = connections.entry(i).or_default();
        if !entry.contains(&j) { entry.push(j); }
    }

    let mut n_bonds = 0;
    for (id, mut neighbors) in connections {
        neighbors.sort_unstable();
        neighbors.dedup();
        n_bonds += neighbors.len();
        if let Some(atom) = strctr.atom_mut(id) { atom.connections = neighbors; }
    }
    debug!("{} covalent bonds inferred", n_bonds / 2);
}
