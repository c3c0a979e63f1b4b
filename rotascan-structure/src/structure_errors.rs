use thiserror::Error;

use rotascan_cif::CifError;

/// Errors that may appear while building or using a [`Structure`](crate::Structure)
#[derive(Debug, Error)]
pub enum StructureError {

    #[error("Error while parsing CIF-formatted input")]
    /// The mmCIF input can't be parsed
    CifParsingError(#[from] CifError),

    #[error("An atom with the id {atom_id} has already been inserted")]
    /// Atom ids must be unique within a structure
    DuplicateAtomId { atom_id: i32 },

    #[error("No atom with the id {atom_id}")]
    /// The requested atom id is not present in the structure
    NoSuchAtom { atom_id: i32 },
}
