use std::fmt::{Display, Formatter};

/// Role of an atom in a rotamer-sampling run.
///
/// Atoms of the residues being resampled are `Target`; atoms close enough to
/// interact with a target residue are `Surrounding` and contribute to rotamer
/// scores; everything else is `Ignored`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// atom of a residue whose rotamers are being sampled
    Target,
    /// atom close enough to a target residue to contribute to its scores
    Surrounding,
    /// atom excluded from the computation
    #[default]
    Ignored,
}

impl SelectionState {
    /// Single-letter code of this state, as written to the output
    pub fn code(&self) -> char {
        match self {
            SelectionState::Target => 'T',
            SelectionState::Surrounding => 'S',
            SelectionState::Ignored => 'I',
        }
    }
}

impl Display for SelectionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.code()) }
}
