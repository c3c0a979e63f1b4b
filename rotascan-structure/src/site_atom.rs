use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use rotascan_cif::{entry_has_value, value_or_default, CifError};
use rotascan_cif::parse_item_or_error;
use rotascan_chem::Hybridization;

use crate::calc::Vec3;
use crate::SelectionState;

/// The ``_atom_site.`` data items consumed from an mmCIF input, in the order
/// expected by [`SiteAtom::from_cif_row`]
pub const ATOM_SITE_ITEMS: [&str; 13] = [
    "group_PDB", "id", "type_symbol", "label_atom_id", "label_alt_id",
    "label_comp_id", "label_asym_id", "label_entity_id", "label_seq_id",
    "Cartn_x", "Cartn_y", "Cartn_z", "pdbx_PDB_model_num",
];

/// Atom record as found in a single row of an ``_atom_site`` loop.
///
/// Besides the fields parsed from an mmCIF file, a [`SiteAtom`] carries the
/// fields computed by this workspace: the covalent `connections`, the
/// `hybridization` state, the selection tag and, for pseudo-atoms generated
/// by the rotamer sampler, the dihedral angles, energy and rank.
///
/// # Example
///```rust
/// use rotascan_structure::SiteAtom;
/// let row = ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "68", "25.790", "28.757", "29.513", "1"];
/// let a = SiteAtom::from_cif_row(&row).unwrap();
/// assert_eq!(a.name, "CA");
/// assert_eq!(a.comp_id, "SER");
/// assert_eq!(a.seq_id, 68);
/// assert!(!a.is_pseudo);
///```
#[derive(Clone, Debug)]
pub struct SiteAtom {
    pub id: i32,
    pub name: String,
    pub element: String,
    pub alt_loc: String,
    pub comp_id: String,
    pub chain_id: String,
    pub entity_id: String,
    pub seq_id: i32,
    pub is_hetero_atom: bool,
    pub pos: Vec3,
    pub model_num: i32,
    /// ids of atoms covalently bound to this one; filled by the bond builder
    pub connections: Vec<i32>,
    /// hybridization state; filled after the bond graph is known
    pub hybridization: Option<Hybridization>,
    pub selection: SelectionState,
    pub selection_group: Option<u32>,
    /// true for an atom synthesized by the rotamer sampler
    pub is_pseudo: bool,
    /// the (angle name, value) pairs a pseudo-atom was generated with
    pub dihedral_angles: Vec<(String, f64)>,
    pub energy: Option<f64>,
    pub rank: Option<u32>,
}

impl SiteAtom {

    /// Returns a default atom.
    ///
    /// By default, an atom is set to the alpha-carbon of a ``SER1`` residue
    /// in chain ``"A"``, located at ``[0, 0, 0]``
    pub fn new() -> SiteAtom {
        SiteAtom {
            id: 1,
            name: String::from("CA"),
            element: String::from("C"),
            alt_loc: String::from("."),
            comp_id: String::from("SER"),
            chain_id: String::from("A"),
            entity_id: String::from("1"),
            seq_id: 1,
            is_hetero_atom: false,
            pos: Vec3::from_float(0.0),
            model_num: 1,
            connections: vec![],
            hybridization: None,
            selection: SelectionState::default(),
            selection_group: None,
            is_pseudo: false,
            dihedral_angles: vec![],
            energy: None,
            rank: None,
        }
    }

    /// Creates a [`SiteAtom`] from a row of ``_atom_site`` values.
    ///
    /// The values must be ordered as in [`ATOM_SITE_ITEMS`]. Absent
    /// ``label_alt_id`` and ``label_entity_id`` entries are replaced with
    /// their documented defaults (``"."`` and ``"?"``).
    pub fn from_cif_row(tokens: &[&str; 13]) -> Result<SiteAtom, CifError> {

        let id = parse_item_or_error!(tokens[1], i32);
        let seq_id = parse_item_or_error!(tokens[8], i32);
        let x = parse_item_or_error!(tokens[9], f64);
        let y = parse_item_or_error!(tokens[10], f64);
        let z = parse_item_or_error!(tokens[11], f64);
        let model_num = if entry_has_value(tokens[12]) { parse_item_or_error!(tokens[12], i32) } else { 1 };

        let mut atom = SiteAtom::new();
        atom.id = id;
        atom.is_hetero_atom = tokens[0] == "HETATM";
        atom.element = tokens[2].to_string();
        atom.name = tokens[3].to_string();
        atom.alt_loc = if entry_has_value(tokens[4]) { tokens[4].to_string() } else { String::from(".") };
        atom.comp_id = tokens[5].to_string();
        atom.chain_id = tokens[6].to_string();
        atom.entity_id = value_or_default(tokens[7], String::from("?"));
        atom.seq_id = seq_id;
        atom.pos = Vec3::new(x, y, z);
        atom.model_num = model_num;

        return Ok(atom);
    }

    /// Serializes the dihedral angles of a pseudo-atom, e.g. ``"chi0=1.04720,chi1=3.14159"``.
    ///
    /// Returns the no-value entry ``"."`` for an atom that carries no angles.
    pub fn dihedral_angles_entry(&self) -> String {
        if self.dihedral_angles.is_empty() { return String::from("."); }
        let parts: Vec<String> = self.dihedral_angles.iter()
            .map(|(name, value)| format!("{}={:.5}", name, value))
            .collect();
        return parts.join(",");
    }

    /// Writes this atom as a row of the augmented ``_atom_site`` output loop.
    ///
    /// The first 13 values repeat the input data items; the remaining ones
    /// are the locally computed selection tag, group, rotamer energy, rank,
    /// dihedral angles and the pseudo-atom flag.
    pub fn to_cif_row(&self) -> Vec<String> {
        let group = if self.is_hetero_atom { "HETATM" } else { "ATOM" };
        let no_value = String::from(".");
        vec![
            group.to_string(),
            self.id.to_string(),
            self.element.clone(),
            self.name.clone(),
            self.alt_loc.clone(),
            self.comp_id.clone(),
            self.chain_id.clone(),
            self.entity_id.clone(),
            self.seq_id.to_string(),
            format!("{:.3}", self.pos.x),
            format!("{:.3}", self.pos.y),
            format!("{:.3}", self.pos.z),
            self.model_num.to_string(),
            self.selection.to_string(),
            self.selection_group.map(|g| g.to_string()).unwrap_or_else(|| no_value.clone()),
            self.energy.map(|e| format!("{:.4}", e)).unwrap_or_else(|| no_value.clone()),
            self.rank.map(|r| r.to_string()).unwrap_or_else(|| no_value.clone()),
            self.dihedral_angles_entry(),
            if self.is_pseudo { String::from("yes") } else { String::from("no") },
        ]
    }

    /// Returns true if this atom is a hydrogen
    pub fn is_hydrogen(&self) -> bool { self.element == "H" || self.element == "D" }
}

impl Default for SiteAtom {
    fn default() -> Self { SiteAtom::new() }
}

impl PartialEq<Self> for SiteAtom {
    /// Two [`SiteAtom`]s are equal when their ids, chains, sequence numbers
    /// and alt-location ids are identical
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.chain_id == other.chain_id
            && self.seq_id == other.seq_id && self.alt_loc == other.alt_loc
    }
}

impl Eq for SiteAtom {}

impl PartialOrd<Self> for SiteAtom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for SiteAtom {
    /// Atoms are ordered by chain, sequence number, alt-location and finally by id
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.chain_id, self.seq_id, &self.alt_loc, self.id)
            .cmp(&(&other.chain_id, other.seq_id, &other.alt_loc, other.id))
    }
}

impl Display for SiteAtom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}:{}{} [{}]",
               self.id, self.name, self.comp_id, self.chain_id, self.seq_id,
               if self.alt_loc == "." { String::new() } else { format!(":{}", self.alt_loc) },
               self.pos)
    }
}

/// Returns `true` if two given atoms belong to the very same residue
pub fn same_residue_atoms(ai: &SiteAtom, aj: &SiteAtom) -> bool {
    ai.seq_id == aj.seq_id && ai.chain_id == aj.chain_id
        && ai.entity_id == aj.entity_id && ai.alt_loc == aj.alt_loc
}
