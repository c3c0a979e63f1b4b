use std::fmt;

use crate::SiteAtom;

/// Unique identifier of a residue instance.
///
/// The key combines the sequence number, chain, entity and alt-location ids;
/// two conformers of the same residue (e.g. alt-locations ``A`` and ``B``)
/// get distinct keys.
///
/// # Example
/// ```
/// use rotascan_structure::{ResidueKey, SiteAtom};
/// let row = ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "68", "25.790", "28.757", "29.513", "1"];
/// let atom = SiteAtom::from_cif_row(&row).unwrap();
/// let key = ResidueKey::from_atom(&atom);
/// assert_eq!(key, ResidueKey::new(68, "A", "1", "."));
/// assert_eq!(format!("{}", key), "A:68");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: String,
    pub seq_id: i32,
    pub entity_id: String,
    pub alt_loc: String,
}

impl ResidueKey {
    /// Creates a new [`ResidueKey`] from its properties
    pub fn new(seq_id: i32, chain_id: &str, entity_id: &str, alt_loc: &str) -> ResidueKey {
        ResidueKey {
            chain_id: chain_id.to_string(),
            seq_id,
            entity_id: entity_id.to_string(),
            alt_loc: alt_loc.to_string(),
        }
    }

    /// Creates the [`ResidueKey`] of the residue a given atom belongs to
    pub fn from_atom(atom: &SiteAtom) -> ResidueKey {
        ResidueKey {
            chain_id: atom.chain_id.clone(),
            seq_id: atom.seq_id,
            entity_id: atom.entity_id.clone(),
            alt_loc: atom.alt_loc.clone(),
        }
    }

    /// Returns true if a given atom belongs to the residue identified by this key
    pub fn check(&self, atom: &SiteAtom) -> bool {
        atom.seq_id == self.seq_id && atom.chain_id == self.chain_id
            && atom.entity_id == self.entity_id && atom.alt_loc == self.alt_loc
    }
}

impl fmt::Display for ResidueKey {
    /// Prints a residue key as ``chain:seq`` with the alt-location appended
    /// when it holds a value, e.g. ``A:68`` or ``A:68:B``
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.alt_loc == "." {
            write!(f, "{}:{}", self.chain_id, self.seq_id)
        } else {
            write!(f, "{}:{}:{}", self.chain_id, self.seq_id, self.alt_loc)
        }
    }
}
