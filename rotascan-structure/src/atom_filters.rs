//! Allows processing atoms of a [`Structure`](crate::Structure) with iterators.
//!
//! An [`AtomPredicate`] defines a [`check()`](AtomPredicate::check()) method
//! that returns true if a given predicate is satisfied; such predicates
//! combine naturally with the standard iterator tools:
//! ```
//! use rotascan_structure::{SiteAtom, Structure};
//! use rotascan_structure::atom_filters::{AtomPredicate, ByElement};
//! let mut strctr = Structure::new("1xyz");
//! let rows = [
//!     ["ATOM", "1", "N", "N", ".", "SER", "A", "1", "68", "26.532", "28.200", "28.365", "1"],
//!     ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "68", "25.790", "28.757", "29.513", "1"],
//! ];
//! for row in &rows { strctr.push_atom(SiteAtom::from_cif_row(row).unwrap()).unwrap(); }
//! let carbon = ByElement::new("C");
//! assert_eq!(strctr.atoms().iter().filter(|a| carbon.check(a)).count(), 1);
//! ```
//!
//! Besides the named predicates, the module provides an [`AttributeSelector`]
//! that filters atoms with `include` / `exclude` maps from attribute names to
//! allowed values, and projects selected atoms onto requested attributes.

use std::collections::{BTreeMap, HashMap};

use crate::{ResidueKey, SelectionState, SiteAtom, Structure};

/// A handy filter to process atoms of a [`Structure`](crate::Structure) with iterators.
pub trait AtomPredicate {
    fn check(&self, a: &SiteAtom) -> bool;
}

/// Returns `true` if an atom belongs to a certain chain.
pub struct ByChain { chain_id: String }

impl ByChain {
    pub fn new(code: &str) -> Self { ByChain { chain_id: String::from(code) } }
}

impl AtomPredicate for ByChain {
    fn check(&self, a: &SiteAtom) -> bool { a.chain_id == self.chain_id }
}

/// Returns `true` if an atom belongs to a certain residue.
pub struct ByResidue { key: ResidueKey }

impl ByResidue {
    pub fn new(key: ResidueKey) -> ByResidue { ByResidue { key } }
}

impl AtomPredicate for ByResidue {
    fn check(&self, a: &SiteAtom) -> bool { self.key.check(a) }
}

/// Returns `true` if an atom is of a certain chemical element.
pub struct ByElement { element: String }

impl ByElement {
    pub fn new(element: &str) -> ByElement { ByElement { element: element.to_string() } }
}

impl AtomPredicate for ByElement {
    fn check(&self, a: &SiteAtom) -> bool { a.element == self.element }
}

/// Returns `true` if an atom is a hydrogen (or deuterium).
pub struct IsHydrogen;

impl AtomPredicate for IsHydrogen {
    fn check(&self, a: &SiteAtom) -> bool { a.is_hydrogen() }
}

/// Returns `true` for heavy (i.e. non-hydrogen) atoms.
pub struct IsHeavy;

impl AtomPredicate for IsHeavy {
    fn check(&self, a: &SiteAtom) -> bool { !a.is_hydrogen() }
}

/// Returns `true` if an atom belongs to a protein backbone.
pub struct IsBackbone;

impl AtomPredicate for IsBackbone {
    fn check(&self, a: &SiteAtom) -> bool {
        a.name == "CA" || a.name == "C" || a.name == "N" || a.name == "O" || a.name == "OXT"
    }
}

/// Returns `true` if an atom belongs to an amino acid side chain.
pub struct IsSideChain;

impl AtomPredicate for IsSideChain {
    fn check(&self, a: &SiteAtom) -> bool { !IsBackbone.check(a) && !a.is_hydrogen() }
}

/// Returns `true` for pseudo-atoms generated by the rotamer sampler.
pub struct IsPseudo;

impl AtomPredicate for IsPseudo {
    fn check(&self, a: &SiteAtom) -> bool { a.is_pseudo }
}

/// Returns `true` for atoms tagged with a given selection state.
pub struct BySelection { state: SelectionState }

impl BySelection {
    pub fn new(state: SelectionState) -> BySelection { BySelection { state } }
}

impl AtomPredicate for BySelection {
    fn check(&self, a: &SiteAtom) -> bool { a.selection == self.state }
}

/// Provides the value of a named attribute of an atom, rendered as a string.
///
/// Returns ``None`` for an unknown attribute name.
pub fn atom_attribute(a: &SiteAtom, attribute: &str) -> Option<String> {
    match attribute {
        "id" => Some(a.id.to_string()),
        "name" => Some(a.name.clone()),
        "element" => Some(a.element.clone()),
        "alt_loc" => Some(a.alt_loc.clone()),
        "comp_id" => Some(a.comp_id.clone()),
        "chain_id" => Some(a.chain_id.clone()),
        "entity_id" => Some(a.entity_id.clone()),
        "seq_id" => Some(a.seq_id.to_string()),
        "model_num" => Some(a.model_num.to_string()),
        "selection" => Some(a.selection.to_string()),
        "is_pseudo" => Some(if a.is_pseudo { "yes".to_string() } else { "no".to_string() }),
        _ => None,
    }
}

/// Filters atoms by maps from attribute names to allowed values.
///
/// An atom passes the `include` map iff, for every listed attribute, the
/// atom's value is among the allowed ones; it passes the `exclude` map iff
/// none of the listed attributes matches. An unknown attribute name never
/// matches.
///
/// # Example
/// ```
/// use rotascan_structure::{SiteAtom, Structure};
/// use rotascan_structure::atom_filters::{AtomPredicate, AttributeSelector};
/// # let mut strctr = Structure::new("1xyz");
/// # let rows = [
/// #     ["ATOM", "1", "N", "N", ".", "SER", "A", "1", "68", "26.532", "28.200", "28.365", "1"],
/// #     ["ATOM", "2", "C", "CA", ".", "SER", "A", "1", "68", "25.790", "28.757", "29.513", "1"],
/// #     ["ATOM", "3", "C", "CA", ".", "GLY", "A", "1", "69", "25.155", "27.554", "29.987", "1"],
/// # ];
/// # for row in &rows { strctr.push_atom(SiteAtom::from_cif_row(row).unwrap()).unwrap(); }
/// let selector = AttributeSelector::new()
///     .include("comp_id", &["SER"])
///     .exclude("name", &["N"]);
/// let selected: Vec<_> = strctr.atoms().iter().filter(|a| selector.check(a)).collect();
/// assert_eq!(selected.len(), 1);
/// assert_eq!(selected[0].name, "CA");
/// ```
#[derive(Default)]
pub struct AttributeSelector {
    included: HashMap<String, Vec<String>>,
    excluded: HashMap<String, Vec<String>>,
}

impl AttributeSelector {

    /// Creates a selector that accepts every atom
    pub fn new() -> AttributeSelector { AttributeSelector::default() }

    /// Requires an attribute to hold one of the allowed values
    pub fn include(mut self, attribute: &str, allowed: &[&str]) -> Self {
        self.included.insert(attribute.to_string(), allowed.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Rejects atoms whose attribute holds one of the listed values
    pub fn exclude(mut self, attribute: &str, rejected: &[&str]) -> Self {
        self.excluded.insert(attribute.to_string(), rejected.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Projects atoms accepted by this selector onto the requested attributes.
    ///
    /// Rows are produced in the ascending atom-id order the structure
    /// maintains; unknown attribute names yield the no-value entry ``"."``.
    pub fn project(&self, strctr: &Structure, attributes: &[&str]) -> Vec<Vec<String>> {
        strctr.atoms().iter()
            .filter(|a| self.check(a))
            .map(|a| attributes.iter()
                .map(|attr| atom_attribute(a, attr).unwrap_or_else(|| String::from(".")))
                .collect())
            .collect()
    }

    /// Groups the ids of accepted atoms by the value of an attribute.
    ///
    /// Returns a sorted map from the attribute value to the ascending id
    /// list of the atoms holding it.
    pub fn group(&self, strctr: &Structure, attribute: &str) -> BTreeMap<String, Vec<i32>> {
        let mut groups: BTreeMap<String, Vec<i32>> = BTreeMap::new();
        for a in strctr.atoms().iter().filter(|a| self.check(a)) {
            let value = atom_attribute(a, attribute).unwrap_or_else(|| String::from("."));
            groups.entry(value).or_default().push(a.id);
        }
        return groups;
    }
}

impl AtomPredicate for AttributeSelector {
    fn check(&self, a: &SiteAtom) -> bool {
        for (attribute, allowed) in &self.included {
            match atom_attribute(a, attribute) {
                Some(value) => { if !allowed.contains(&value) { return false; } }
                None => return false,
            }
        }
        for (attribute, rejected) in &self.excluded {
            if let Some(value) = atom_attribute(a, attribute) {
                if rejected.contains(&value) { return false; }
            }
        }
        return true;
    }
}
