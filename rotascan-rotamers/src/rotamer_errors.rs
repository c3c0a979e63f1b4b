use thiserror::Error;

use rotascan_chem::ParametersError;
use rotascan_structure::StructureError;

/// Errors that may appear while building rotamers
#[derive(Debug, Error)]
pub enum RotamerError {

    #[error("Degenerate geometry while processing residue {residue}: {details}")]
    /// Coincident or collinear atoms make a local reference frame undefined;
    /// the whole sweep of the affected residue is aborted
    GeometryDegenerate { residue: String, details: String },

    #[error("The sweep of residue {residue} was cancelled")]
    /// The cooperative cancellation flag was raised between two rotamers
    Cancelled { residue: String },

    #[error("Error while updating the structure")]
    /// Appending pseudo-atoms to the structure failed
    StructureError(#[from] StructureError),

    #[error("Invalid sampling configuration")]
    /// The force-field coefficients or cutoffs are invalid
    ConfigurationError(#[from] ParametersError),
}
