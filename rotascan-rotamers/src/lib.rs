//! Samples side-chain rotamers of protein residues.
//!
//! The crate turns a parsed structure into a ranked rotamer library in four
//! passes:
//!  1. [`assign_connections`] rebuilds the covalent bond graph from raw
//!     coordinates with a uniform spatial hash ([`NeighborGrid`]);
//!  2. [`assign_hybridization`] classifies every heavy atom as sp, sp2 or
//!     sp3 from its (explicit and implicit) neighbor count;
//!  3. [`build_rotamer_model`](rotatable_bonds::build_rotamer_model)
//!     expresses each movable side-chain atom as a symbolic affine transform
//!     ([`SymMatrix4`] over [`Expr`]) in the residue's rotatable dihedrals;
//!  4. [`sweep_residue`] evaluates the transforms on an [`AngleGrid`],
//!     scores every candidate with a [`PotentialKind`] against the
//!     surrounding atoms and ranks the results.
//!
//! ```no_run
//! use rotascan_chem::KNOWN_PARAMETERS;
//! use rotascan_cif::read_cif_file;
//! use rotascan_rotamers::{assign_connections, assign_hybridization, apply_sweep,
//!                         sweep_residues, AngleGrid, Diagnostics, PotentialKind, SweepConfig};
//! use rotascan_structure::Structure;
//! use std::f64::consts::PI;
//!
//! let blocks = read_cif_file("2gb1.cif").unwrap();
//! let mut strctr = Structure::from_cif_data(&blocks[0]).unwrap();
//! let registry = &KNOWN_PARAMETERS;
//! let diagnostics = Diagnostics::new();
//! assign_connections(&mut strctr, registry, &diagnostics);
//! assign_hybridization(&mut strctr, registry);
//!
//! let targets = vec![strctr.residue_keys()[0].clone()];
//! strctr.mark_selection_around(&targets, registry.coefficients().cutoff_residue);
//! let config = SweepConfig::new(AngleGrid::from_step(PI / 2.0), PotentialKind::Composite);
//! let sweeps = sweep_residues(&strctr, registry, &targets, &config, &diagnostics, false).unwrap();
//! for sweep in &sweeps { apply_sweep(&mut strctr, sweep).unwrap(); }
//! ```

#![allow(clippy::needless_return)]
mod diagnostics;
mod expression;
mod hybridization;
mod neighbor_grid;
mod potentials;
mod rotamer_errors;
mod sampler;
mod transform;

pub mod rotatable_bonds;

pub use diagnostics::Diagnostics;
pub use expression::Expr;
pub use hybridization::{assign_hybridization, count_implicit_hydrogens, explicit_hydrogens,
                        generalized_donor_angle};
pub use neighbor_grid::{assign_connections, NeighborGrid};
pub use potentials::{torsion_energy, Composite, Coulomb, HBond, HardSphere, LennardJones,
                     PairContext, PairPotential, PotentialKind, SoftSphere, TorsionMode};
pub use rotamer_errors::RotamerError;
pub use sampler::{apply_sweep, sweep_residue, sweep_residues, AngleGrid, ResidueSweep, Rotamer,
                  SweepConfig};
pub use transform::SymMatrix4;
