use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::debug;
use rotascan_cif::{CifData, CifLoop, CifTable};

use crate::calc::Vec3;
use crate::{ResidueKey, SelectionState, SiteAtom, StructureError, ATOM_SITE_ITEMS};

/// The locally computed data items appended to the ``_atom_site`` output loop
pub const LOCAL_ATOM_SITE_ITEMS: [&str; 6] = [
    "_[local]_selection_state", "_[local]_selection_group", "_[local]_rotamer_energy",
    "_[local]_rotamer_rank", "_[local]_dihedral_angles", "_[local]_is_pseudo_atom",
];

/// A biomacromolecular structure composed of [`SiteAtom`] objects.
///
/// Atoms are stored in ascending-id order together with an id lookup table.
/// The struct is filled by a parser, then augmented by the bond builder
/// (which fills `connections` and `hybridization`) and by the rotamer sampler
/// (which appends pseudo-atoms); no writer ever modifies coordinates of
/// pre-existing atoms.
///
/// # Creating a [`Structure`]
/// Typically one gets a [`Structure`] by loading an mmCIF file:
/// ```no_run
/// use rotascan_cif::read_cif_file;
/// use rotascan_structure::Structure;
/// let blocks = read_cif_file("2gb1.cif").unwrap();
/// let strctr = Structure::from_cif_data(&blocks[0]).unwrap();
/// ```
/// or by pushing atoms one by one:
/// ```
/// use rotascan_structure::{SiteAtom, Structure};
/// let mut strctr = Structure::new("1xyz");
/// let row = ["ATOM", "1", "N", "N", ".", "SER", "A", "1", "68", "26.532", "28.200", "28.365", "1"];
/// strctr.push_atom(SiteAtom::from_cif_row(&row).unwrap()).unwrap();
/// assert_eq!(strctr.count_atoms(), 1);
/// ```
pub struct Structure {
    id_code: String,
    atoms: Vec<SiteAtom>,
    id_to_index: HashMap<i32, usize>,
}

impl Structure {

    /// Creates a new, empty [`Structure`] identified by a given code
    pub fn new(id_code: &str) -> Structure {
        Structure { id_code: id_code.to_string(), atoms: vec![], id_to_index: HashMap::new() }
    }

    /// Creates a [`Structure`] by filling it with atoms from an iterator.
    ///
    /// Atoms provided by the iterator are cloned.
    pub fn from_iterator<'a, T>(id_code: &str, iter: T) -> Result<Structure, StructureError>
        where T: Iterator<Item = &'a SiteAtom> {

        let mut strctr = Structure::new(id_code);
        for a in iter { strctr.push_atom(a.clone())?; }
        return Ok(strctr);
    }

    /// Creates a [`Structure`] from a CIF data block.
    ///
    /// Only the atoms of the first model found in the block are loaded;
    /// further models are skipped with a debug message.
    pub fn from_cif_data(cif_data: &CifData) -> Result<Structure, StructureError> {

        let table = CifTable::new(cif_data, "_atom_site.", ATOM_SITE_ITEMS)?;
        let mut strctr = Structure::new(cif_data.name());
        let mut first_model: Option<String> = None;
        let mut skipped = 0;
        for row in table.iter() {
            match &first_model {
                None => { first_model = Some(row[12].to_string()); }
                Some(model) => {
                    if model != row[12] { skipped += 1; continue; }
                }
            }
            strctr.push_atom(SiteAtom::from_cif_row(&row)?)?;
        }
        if skipped > 0 { debug!("{} atoms of further models skipped", skipped); }

        return Ok(strctr);
    }

    /// The identifier code of this structure, e.g. a PDB id
    pub fn id_code(&self) -> &str { &self.id_code }

    /// Inserts a [`SiteAtom`] into this [`Structure`], keeping the ascending-id order.
    ///
    /// The given atom is consumed in the process. Returns an error when an
    /// atom of the same id has already been inserted.
    pub fn push_atom(&mut self, a: SiteAtom) -> Result<(), StructureError> {

        if self.id_to_index.contains_key(&a.id) {
            return Err(StructureError::DuplicateAtomId { atom_id: a.id });
        }
        if self.atoms.last().map(|last| last.id < a.id).unwrap_or(true) {
            self.id_to_index.insert(a.id, self.atoms.len());
            self.atoms.push(a);
        } else {
            // out-of-order insertion: find the position and rebuild the index
            let position = self.atoms.partition_point(|existing| existing.id < a.id);
            self.atoms.insert(position, a);
            self.id_to_index = self.atoms.iter().enumerate().map(|(i, a)| (a.id, i)).collect();
        }
        return Ok(());
    }

    /// Counts atoms of this [`Structure`]
    pub fn count_atoms(&self) -> usize { self.atoms.len() }

    /// Provides read-only access to the atoms, kept in ascending-id order
    pub fn atoms(&self) -> &Vec<SiteAtom> { &self.atoms }

    /// Provides an atom of a given id
    pub fn atom(&self, atom_id: i32) -> Option<&SiteAtom> {
        self.id_to_index.get(&atom_id).map(|&i| &self.atoms[i])
    }

    /// Provides mutable access to an atom of a given id
    pub fn atom_mut(&mut self, atom_id: i32) -> Option<&mut SiteAtom> {
        match self.id_to_index.get(&atom_id) {
            Some(&i) => Some(&mut self.atoms[i]),
            None => None,
        }
    }

    /// Provides an atom of a given residue and name, e.g. the ``"CB"`` atom of a residue
    pub fn residue_atom(&self, key: &ResidueKey, name: &str) -> Option<&SiteAtom> {
        self.atoms.iter().find(|a| key.check(a) && a.name == name && !a.is_pseudo)
    }

    /// The largest atom id seen so far, or 0 for an empty structure
    pub fn max_atom_id(&self) -> i32 {
        self.atoms.last().map(|a| a.id).unwrap_or(0)
    }

    /// Counts residues of this [`Structure`]
    pub fn count_residues(&self) -> usize { self.residue_keys().len() }

    /// Returns the keys of all residues, in the order of their first atom
    pub fn residue_keys(&self) -> Vec<ResidueKey> {
        self.atoms.iter()
            .filter(|a| !a.is_pseudo)
            .map(ResidueKey::from_atom)
            .unique()
            .collect()
    }

    /// Iterates over the atoms of a given residue, pseudo-atoms excluded
    pub fn residue_atoms<'a>(&'a self, key: &'a ResidueKey) -> impl Iterator<Item = &'a SiteAtom> + 'a {
        self.atoms.iter().filter(move |a| key.check(a) && !a.is_pseudo)
    }

    /// Appends a pseudo-atom derived from an existing atom.
    ///
    /// The new atom copies the identity fields of its source (name, element,
    /// residue key), receives the id ``max_atom_id() + 1``, the given
    /// position and dihedral angles, and has its `is_pseudo` flag raised.
    /// Returns the id of the new atom.
    pub fn append_pseudo_atom(&mut self, source_id: i32, pos: Vec3,
                              dihedral_angles: Vec<(String, f64)>) -> Result<i32, StructureError> {

        let source = self.atom(source_id)
            .ok_or(StructureError::NoSuchAtom { atom_id: source_id })?;
        let mut pseudo = source.clone();
        pseudo.id = self.max_atom_id() + 1;
        pseudo.pos = pos;
        pseudo.is_pseudo = true;
        pseudo.dihedral_angles = dihedral_angles;
        pseudo.connections = vec![];
        pseudo.energy = None;
        pseudo.rank = None;
        let new_id = pseudo.id;
        self.push_atom(pseudo)?;
        return Ok(new_id);
    }

    /// Tags every atom with a selection state.
    ///
    /// Atoms listed in `target_ids` become [`SelectionState::Target`], those
    /// in `selected_ids` become [`SelectionState::Surrounding`] and all the
    /// others [`SelectionState::Ignored`]. An atom listed in both becomes a
    /// target.
    pub fn mark_selection(&mut self, target_ids: &[i32], selected_ids: &[i32]) {
        let targets: HashSet<i32> = target_ids.iter().cloned().collect();
        let selected: HashSet<i32> = selected_ids.iter().cloned().collect();
        for a in self.atoms.iter_mut() {
            a.selection = if targets.contains(&a.id) { SelectionState::Target }
                else if selected.contains(&a.id) { SelectionState::Surrounding }
                else { SelectionState::Ignored };
        }
    }

    /// Tags target residues and everything around them.
    ///
    /// Atoms of each residue listed in `targets` are tagged as targets and
    /// assigned a selection group (the 1-based index of their residue on the
    /// `targets` list). Atoms of any other residue that approaches a target
    /// residue closer than `cutoff_residue` are tagged as surrounding and
    /// inherit the group of the first such target; remaining atoms are
    /// ignored.
    pub fn mark_selection_around(&mut self, targets: &[ResidueKey], cutoff_residue: f64) {

        let cutoff_squared = cutoff_residue * cutoff_residue;
        let target_positions: Vec<Vec<Vec3>> = targets.iter()
            .map(|key| self.residue_atoms(key).map(|a| a.pos.clone()).collect())
            .collect();

        let mut target_ids: Vec<i32> = vec![];
        let mut groups: HashMap<i32, u32> = HashMap::new();
        let mut selected_ids: Vec<i32> = vec![];

        for a in &self.atoms {
            if a.is_pseudo { continue; }
            if let Some(which) = targets.iter().position(|key| key.check(a)) {
                target_ids.push(a.id);
                groups.insert(a.id, which as u32 + 1);
                continue;
            }
            for (which, positions) in target_positions.iter().enumerate() {
                if positions.iter().any(|p| p.distance_square_to(&a.pos) <= cutoff_squared) {
                    selected_ids.push(a.id);
                    groups.insert(a.id, which as u32 + 1);
                    break;
                }
            }
        }

        self.mark_selection(&target_ids, &selected_ids);
        for a in self.atoms.iter_mut() {
            a.selection_group = groups.get(&a.id).cloned();
        }
    }

    /// Writes this structure as a CIF data block with the augmented ``_atom_site`` loop.
    pub fn to_cif(&self) -> CifData {

        let mut columns: Vec<String> = ATOM_SITE_ITEMS.iter()
            .map(|item| format!("_atom_site.{}", item)).collect();
        columns.extend(LOCAL_ATOM_SITE_ITEMS.iter().map(|item| item.to_string()));
        let column_refs: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();

        let mut atom_site = CifLoop::new(&column_refs);
        for a in &self.atoms { atom_site.add_data_row(a.to_cif_row()); }

        let mut block = CifData::new(&self.id_code);
        block.add_loop(atom_site);
        return block;
    }
}
