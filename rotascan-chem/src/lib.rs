//! Chemical parameter tables for side-chain rotamer sampling.
//!
//! The crate provides an immutable [`ParameterRegistry`] which bundles the
//! static chemical knowledge the sampling engine relies on:
//!  - van der Waals radii, covalent radii (by hybridization state) and
//!    partial charges per element,
//!  - candidate covalent bond lengths per element pair,
//!  - rotatable side-chain dihedral definitions per residue type,
//!  - hydrogen atom names per (residue type, heavy atom),
//!  - the force-field [`Coefficients`] with their `KEY=VAL` overrides.
//!
//! The registry is built once, validated, and then only shared by reference:
//! ```
//! use rotascan_chem::{Coefficients, ParameterRegistry};
//! let mut coefficients = Coefficients::default();
//! coefficients.apply_overrides("lj_k=0.5").unwrap();
//! coefficients.validate().unwrap();
//! let registry = ParameterRegistry::with_coefficients(coefficients);
//! assert!(registry.element("C").is_some());
//! ```

mod chem_errors;
mod coefficients;
mod elements;
mod registry;
mod residue_topology;

pub use chem_errors::ParametersError;
pub use coefficients::Coefficients;
pub use elements::{ElementProperties, Hybridization};
pub use registry::{ParameterRegistry, KNOWN_PARAMETERS};
pub use residue_topology::ChiDefinition;
