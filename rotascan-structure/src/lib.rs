//! Atom records, residue keys and geometric calculations for rotamer sampling.
//!
//! # Loading a structure
//! An mmCIF deposit is loaded into a [`Structure`] which stores its
//! [`SiteAtom`]s in ascending-id order:
//!```no_run
//! use rotascan_cif::read_cif_file;
//! use rotascan_structure::Structure;
//! let blocks = read_cif_file("2gb1.cif").unwrap();
//! let strctr = Structure::from_cif_data(&blocks[0]).unwrap();
//!```
//!
//! # Selecting residues and atoms
//! Atoms may be filtered with the predicates of the
//! [`atom_filters`](crate::atom_filters) module or addressed by the
//! [`ResidueKey`] of the residue they belong to.
//!
//! # Structural calculations
//! The [`calc`](crate::calc) module provides functions to calculate
//! structural properties such as distances, planar or dihedral angles,
//! local reference frames and their Euler decomposition.

#![allow(clippy::needless_return)]
mod site_atom;
mod residue_key;
mod selection;
mod structure;
mod structure_errors;
mod assertions;

pub mod atom_filters;
pub mod calc;

pub use residue_key::ResidueKey;
pub use selection::SelectionState;
pub use site_atom::{same_residue_atoms, SiteAtom, ATOM_SITE_ITEMS};
pub use structure::{Structure, LOCAL_ATOM_SITE_ITEMS};
pub use structure_errors::StructureError;
