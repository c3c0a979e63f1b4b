use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;

use rotascan_chem::ParameterRegistry;
use rotascan_structure::calc::Vec3;
use rotascan_structure::{ResidueKey, SelectionState, SiteAtom, Structure};

use crate::potentials::{PairContext, TorsionMode};
use crate::rotatable_bonds::build_rotamer_model;
use crate::{Diagnostics, PotentialKind, RotamerError};

/// The dihedral values a sweep samples, in radians.
///
/// Every rotatable angle of a residue receives either its own value list or
/// the default one; an angle covered by neither keeps its current value.
///
/// # Example
/// ```
/// use rotascan_rotamers::AngleGrid;
/// use std::f64::consts::PI;
/// let mut grid = AngleGrid::from_step(PI / 2.0);
/// assert_eq!(grid.values_for("chi0").unwrap().len(), 4);
/// grid.set_angle("chi1", vec![0.0, PI]);
/// assert_eq!(grid.values_for("chi1").unwrap(), &vec![0.0, PI]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AngleGrid {
    per_angle: BTreeMap<String, Vec<f64>>,
    default_values: Option<Vec<f64>>,
}

impl AngleGrid {

    /// Creates an empty grid: every angle keeps its current value
    pub fn new() -> AngleGrid { AngleGrid::default() }

    /// Creates a grid that samples every angle at the given values
    pub fn with_default_values(values: Vec<f64>) -> AngleGrid {
        AngleGrid { per_angle: BTreeMap::new(), default_values: Some(values) }
    }

    /// Creates a grid that samples every angle uniformly over the full circle.
    ///
    /// The values are ``0, step, 2 step, ...`` up to (and excluding) a full
    /// turn.
    pub fn from_step(step_radians: f64) -> AngleGrid {
        assert!(step_radians > 0.0, "the angle step must be positive");
        let mut values = vec![];
        let mut angle = 0.0;
        while angle < 2.0 * PI - 1e-9 {
            values.push(angle);
            angle += step_radians;
        }
        return AngleGrid::with_default_values(values);
    }

    /// Assigns an explicit value list to a single named angle
    pub fn set_angle(&mut self, name: &str, values: Vec<f64>) {
        self.per_angle.insert(name.to_string(), values);
    }

    /// The values sampled for a given angle, or ``None`` to keep it unchanged
    pub fn values_for(&self, name: &str) -> Option<&Vec<f64>> {
        self.per_angle.get(name).or(self.default_values.as_ref())
    }
}

/// Settings of a rotamer sweep.
pub struct SweepConfig {
    pub grid: AngleGrid,
    pub potential: PotentialKind,
    /// keep only the best K rotamers; ``None`` keeps all of them
    pub top_rank: Option<usize>,
    /// whether hydrogen atoms are present in the input structure
    pub hydrogens_present: bool,
    /// cooperative cancellation flag, checked between rotamers
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SweepConfig {

    /// Creates a configuration with the given grid and potential, keeping
    /// all rotamers and assuming no hydrogens in the input
    pub fn new(grid: AngleGrid, potential: PotentialKind) -> SweepConfig {
        SweepConfig { grid, potential, top_rank: None, hydrogens_present: false, cancel: None }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(|flag| flag.load(AtomicOrdering::Relaxed)).unwrap_or(false)
    }
}

/// A single side-chain conformation produced by a sweep.
#[derive(Clone, Debug)]
pub struct Rotamer {
    /// the absolute dihedral values this rotamer was generated with
    pub angles: Vec<(String, f64)>,
    /// the changes applied to the current dihedral values
    pub deltas: Vec<f64>,
    /// positions of the moved atoms, keyed by their source atom id
    pub positions: Vec<(i32, Vec3)>,
    pub energy: f64,
    /// 1-based competition rank; equal energies share a rank
    pub rank: u32,
}

/// All rotamers of one residue, sorted from the best to the worst.
pub struct ResidueSweep {
    pub residue: ResidueKey,
    pub comp_id: String,
    pub rotamers: Vec<Rotamer>,
}

impl ResidueSweep {
    fn empty(residue: &ResidueKey, comp_id: &str) -> ResidueSweep {
        ResidueSweep { residue: residue.clone(), comp_id: comp_id.to_string(), rotamers: vec![] }
    }

    /// Counts the rotamers kept by this sweep
    pub fn count_rotamers(&self) -> usize { self.rotamers.len() }
}

/// Iterates the Cartesian product of per-angle value lists as an
/// n-dimensional odometer; the last angle varies fastest.
struct GridIterator {
    sizes: Vec<usize>,
    indexes: Vec<usize>,
    exhausted: bool,
}

impl GridIterator {
    fn new(sizes: Vec<usize>) -> GridIterator {
        let exhausted = sizes.iter().any(|&s| s == 0);
        let indexes = vec![0; sizes.len()];
        GridIterator { sizes, indexes, exhausted }
    }
}

impl Iterator for GridIterator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted { return None; }
        let current = self.indexes.clone();
        // --- advance the odometer
        self.exhausted = true;
        for position in (0..self.indexes.len()).rev() {
            self.indexes[position] += 1;
            if self.indexes[position] < self.sizes[position] {
                self.exhausted = false;
                break;
            }
            self.indexes[position] = 0;
        }
        if self.indexes.is_empty() { self.exhausted = true; }
        return Some(current);
    }
}

/// Sweeps the rotatable dihedrals of a single residue.
///
/// The sweep compiles the residue's rotatable-bond model, rebases every
/// user-supplied angle value against the current value measured from the
/// input (so the all-zero change reproduces the input coordinates exactly),
/// evaluates every combination of the angle grid, scores each candidate
/// against the atoms marked [`SelectionState::Surrounding`] and sorts the
/// result by energy. Ties are broken by the lexicographic order of the
/// angle tuples, then by the generation order.
///
/// A residue type with no rotatable-bond entry yields an empty sweep and a
/// warning, never an error.
pub fn sweep_residue(strctr: &Structure, registry: &ParameterRegistry, key: &ResidueKey,
                     config: &SweepConfig, diagnostics: &Diagnostics)
                     -> Result<ResidueSweep, RotamerError> {

    let comp_id = strctr.residue_atoms(key).next()
        .map(|a| a.comp_id.clone()).unwrap_or_default();
    let model = match build_rotamer_model(strctr, registry, key)? {
        Some(model) => model,
        None => {
            warn!("no rotatable bonds known for residue {} ({}); zero rotamers produced", key, comp_id);
            return Ok(ResidueSweep::empty(key, &comp_id));
        }
    };

    // --- absolute target values per dihedral; a dihedral absent from the
    // --- grid keeps its current value
    let value_lists: Vec<Vec<f64>> = model.chi_names.iter().enumerate()
        .map(|(k, name)| match config.grid.values_for(name) {
            Some(values) => values.clone(),
            None => vec![model.current_angles[k]],
        })
        .collect();

    let surrounding: Vec<&SiteAtom> = strctr.atoms().iter()
        .filter(|a| a.selection == SelectionState::Surrounding && !a.is_pseudo)
        .collect();
    let cutoff_atom = registry.coefficients().cutoff_atom;
    let cutoff_atom_squared = cutoff_atom * cutoff_atom;

    let mut rotamers: Vec<Rotamer> = vec![];
    for combination in GridIterator::new(value_lists.iter().map(|v| v.len()).collect()) {
        if config.is_cancelled() {
            return Err(RotamerError::Cancelled { residue: format!("{}", key) });
        }

        let angles: Vec<(String, f64)> = model.chi_names.iter().cloned()
            .zip(combination.iter().enumerate().map(|(k, &i)| value_lists[k][i]))
            .collect();
        let deltas: Vec<f64> = angles.iter().enumerate()
            .map(|(k, (_, target))| target - model.current_angles[k])
            .collect();

        let positions: Vec<(i32, Vec3)> = model.movable.iter()
            .map(|movable| {
                let source = strctr.atom(movable.atom_id).unwrap();
                (movable.atom_id, movable.transform.apply(&deltas, &source.pos))
            })
            .collect();

        let energy = score_rotamer(strctr, registry, config, diagnostics, &positions,
                                   cutoff_atom_squared, &surrounding);
        rotamers.push(Rotamer { angles, deltas, positions, energy, rank: 0 });
    }

    rank_rotamers(&mut rotamers);
    if let Some(top_rank) = config.top_rank { rotamers.truncate(top_rank); }
    debug!("residue {} ({}): {} rotamer(s) kept", key, model.comp_id, rotamers.len());

    return Ok(ResidueSweep { residue: key.clone(), comp_id: model.comp_id, rotamers });
}

/// Scores one candidate conformation: pair terms against all surrounding
/// atoms within the atom-atom cutoff, plus the bonded torsional term when
/// the selected potential carries one.
fn score_rotamer(strctr: &Structure, registry: &ParameterRegistry, config: &SweepConfig,
                 diagnostics: &Diagnostics, positions: &[(i32, Vec3)],
                 cutoff_atom_squared: f64, surrounding: &[&SiteAtom]) -> f64 {

    let moved: HashMap<i32, Vec3> = positions.iter().cloned().collect();
    let ctx = PairContext {
        strctr, registry,
        hydrogens_present: config.hydrogens_present,
        moved_positions: Some(&moved),
        diagnostics: Some(diagnostics),
    };

    let mut energy = 0.0;
    for (atom_id, new_pos) in positions {
        let mut candidate = strctr.atom(*atom_id).unwrap().clone();
        candidate.pos = new_pos.clone();
        for other in surrounding {
            if candidate.pos.distance_square_to(&other.pos) > cutoff_atom_squared { continue; }
            energy += config.potential.energy(&candidate, other, &ctx);
        }
        if config.potential.includes_bonded() && !candidate.is_hydrogen() {
            energy += crate::potentials::torsion_energy(&candidate, &ctx, TorsionMode::Classical);
        }
    }
    return energy;
}

/// Sorts rotamers from the best to the worst and assigns competition ranks.
///
/// The order is: energy ascending (infinity ranks last), then the
/// lexicographic order of the angle tuples, then the generation order.
/// Rotamers with exactly equal energies share a rank.
fn rank_rotamers(rotamers: &mut Vec<Rotamer>) {

    let mut order: Vec<usize> = (0..rotamers.len()).collect();
    order.sort_by(|&i, &j| {
        let a = &rotamers[i];
        let b = &rotamers[j];
        let by_energy = a.energy.total_cmp(&b.energy);
        if by_energy != Ordering::Equal { return by_energy; }
        for ((_, va), (_, vb)) in a.angles.iter().zip(b.angles.iter()) {
            let by_value = va.total_cmp(vb);
            if by_value != Ordering::Equal { return by_value; }
        }
        return i.cmp(&j);
    });

    let mut sorted: Vec<Rotamer> = order.into_iter().map(|i| rotamers[i].clone()).collect();
    let mut rank = 0;
    let mut previous_energy = f64::NAN;
    for (position, rotamer) in sorted.iter_mut().enumerate() {
        if rotamer.energy.total_cmp(&previous_energy) != Ordering::Equal {
            rank = position as u32 + 1;
            previous_energy = rotamer.energy;
        }
        rotamer.rank = rank;
    }
    *rotamers = sorted;
}

/// Sweeps many residues, optionally in parallel.
///
/// The coefficients are validated before any sampling begins. Each residue
/// is swept independently over the shared, frozen structure; with
/// `parallel` set, residues are distributed over the rayon thread pool with
/// one task per residue. A degenerate-geometry failure aborts only the
/// affected residue and is reported; a cancellation aborts the whole run.
pub fn sweep_residues(strctr: &Structure, registry: &ParameterRegistry, keys: &[ResidueKey],
                      config: &SweepConfig, diagnostics: &Diagnostics, parallel: bool)
                      -> Result<Vec<ResidueSweep>, RotamerError> {

    registry.coefficients().validate()?;

    let results: Vec<Result<ResidueSweep, RotamerError>> = if parallel {
        keys.par_iter()
            .map(|key| sweep_residue(strctr, registry, key, config, diagnostics))
            .collect()
    } else {
        keys.iter()
            .map(|key| sweep_residue(strctr, registry, key, config, diagnostics))
            .collect()
    };

    let mut sweeps: Vec<ResidueSweep> = vec![];
    for result in results {
        match result {
            Ok(sweep) => sweeps.push(sweep),
            Err(RotamerError::GeometryDegenerate { residue, details }) => {
                warn!("sweep of residue {} aborted: {}", residue, details);
            }
            Err(error) => return Err(error),
        }
    }
    return Ok(sweeps);
}

/// Appends the pseudo-atoms of a finished sweep to the structure.
///
/// Rotamers are written from the best to the worst; within one rotamer the
/// moved atoms are written in ascending source-id order. Every pseudo-atom
/// receives the rotamer's energy, rank and angle map.
pub fn apply_sweep(strctr: &mut Structure, sweep: &ResidueSweep) -> Result<(), RotamerError> {
    for rotamer in &sweep.rotamers {
        for (source_id, pos) in &rotamer.positions {
            let new_id = strctr.append_pseudo_atom(*source_id, pos.clone(),
                                                   rotamer.angles.clone())?;
            let pseudo = strctr.atom_mut(new_id).unwrap();
            pseudo.energy = Some(rotamer.energy);
            pseudo.rank = Some(rotamer.rank);
        }
    }
    return Ok(());
}
