use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;

use crate::{ChiDefinition, Coefficients, ElementProperties, Hybridization};
use crate::residue_topology::{ELEMENT_PROPERTIES, HYDROGEN_NAMES, ROTATABLE_BONDS};

/// A process-wide default registry, built from the compiled-in tables.
///
/// Computations always take a ``&ParameterRegistry`` argument; this instance
/// is a convenience for callers that need no overrides.
pub static KNOWN_PARAMETERS: Lazy<ParameterRegistry> = Lazy::new(ParameterRegistry::new);

/// Immutable chemical parameter tables.
///
/// The registry bundles everything the sampling engine looks up: element
/// properties (van der Waals and covalent radii, partial charges), candidate
/// covalent bond lengths, rotatable side-chain dihedrals and hydrogen names
/// per residue type, and the force-field [`Coefficients`]. It is constructed
/// once, before any sampling, and only shared immutably afterwards.
///
/// # Example
/// ```
/// use rotascan_chem::ParameterRegistry;
/// let registry = ParameterRegistry::new();
/// assert_eq!(registry.chi_definitions("ARG").unwrap().len(), 4);
/// assert!(registry.chi_definitions("ALA").is_none());
/// assert!((registry.vdw_radius("C").unwrap() - 1.7).abs() < 1e-10);
/// ```
pub struct ParameterRegistry {
    elements: HashMap<String, ElementProperties>,
    rotatable_bonds: HashMap<String, Vec<ChiDefinition>>,
    hydrogen_names: HashMap<String, HashMap<String, Vec<String>>>,
    coefficients: Coefficients,
    max_bond_length: f64,
}

impl ParameterRegistry {

    /// Creates a registry from the compiled-in tables and default coefficients.
    pub fn new() -> ParameterRegistry {
        ParameterRegistry::with_coefficients(Coefficients::default())
    }

    /// Creates a registry from the compiled-in tables and given coefficients.
    pub fn with_coefficients(coefficients: Coefficients) -> ParameterRegistry {

        let mut elements: HashMap<String, ElementProperties> = HashMap::new();
        for line in ELEMENT_PROPERTIES.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let radii = [tokens[2].parse().unwrap(), tokens[3].parse().unwrap(), tokens[4].parse().unwrap()];
            elements.insert(tokens[0].to_string(), ElementProperties {
                symbol: tokens[0].to_string(),
                vdw_radius: tokens[1].parse().unwrap(),
                covalent_radii: radii,
                partial_charge: tokens[5].parse().unwrap(),
            });
        }

        let mut rotatable_bonds: HashMap<String, Vec<ChiDefinition>> = HashMap::new();
        for line in ROTATABLE_BONDS.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let chi = ChiDefinition {
                name: tokens[1].to_string(),
                atoms: [tokens[2].to_string(), tokens[3].to_string(),
                        tokens[4].to_string(), tokens[5].to_string()],
            };
            rotatable_bonds.entry(tokens[0].to_string()).or_default().push(chi);
        }

        let mut hydrogen_names: HashMap<String, HashMap<String, Vec<String>>> = HashMap::new();
        for line in HYDROGEN_NAMES.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let hydrogens = tokens[2..].iter().map(|t| t.to_string()).collect();
            hydrogen_names.entry(tokens[0].to_string()).or_default()
                .insert(tokens[1].to_string(), hydrogens);
        }

        let max_radius = elements.values().map(|e| e.max_covalent_radius()).fold(f64::MIN, f64::max);
        let max_bond_length = 2.0 * max_radius + coefficients.length_error;

        debug!("parameter tables loaded: {} elements, {} residue types with rotatable bonds",
               elements.len(), rotatable_bonds.len());

        ParameterRegistry { elements, rotatable_bonds, hydrogen_names, coefficients, max_bond_length }
    }

    /// Provides the properties of an element, or ``None`` for an element
    /// absent from the tables
    pub fn element(&self, symbol: &str) -> Option<&ElementProperties> { self.elements.get(symbol) }

    /// Van der Waals radius of an element
    pub fn vdw_radius(&self, symbol: &str) -> Option<f64> {
        self.elements.get(symbol).map(|e| e.vdw_radius)
    }

    /// Partial charge of an element
    pub fn partial_charge(&self, symbol: &str) -> Option<f64> {
        self.elements.get(symbol).map(|e| e.partial_charge)
    }

    /// Covalent radius of an element in a given hybridization state
    pub fn covalent_radius(&self, symbol: &str, hybridization: Hybridization) -> Option<f64> {
        self.elements.get(symbol).map(|e| e.covalent_radius(hybridization))
    }

    /// Candidate covalent bond lengths between two elements.
    ///
    /// The candidates are sums of the two elements' covalent radii over all
    /// hybridization combinations; an observed interatomic distance that falls
    /// within `length_error` of any candidate is accepted as a covalent bond.
    /// Returns an empty vector when either element is unknown.
    ///
    /// # Example
    /// ```
    /// use rotascan_chem::ParameterRegistry;
    /// let registry = ParameterRegistry::new();
    /// let candidates = registry.bond_length_candidates("C", "C");
    /// assert_eq!(candidates.len(), 9);
    /// // --- a single C-C bond of 1.50 A is among the candidates
    /// assert!(candidates.iter().any(|&l| (l - 1.50).abs() < 1e-10));
    /// ```
    pub fn bond_length_candidates(&self, symbol_i: &str, symbol_j: &str) -> Vec<f64> {
        let (ei, ej) = match (self.elements.get(symbol_i), self.elements.get(symbol_j)) {
            (Some(ei), Some(ej)) => (ei, ej),
            _ => return vec![],
        };
        let mut candidates = Vec::with_capacity(9);
        for ri in &ei.covalent_radii {
            for rj in &ej.covalent_radii {
                candidates.push(ri + rj);
            }
        }
        return candidates;
    }

    /// The largest candidate covalent bond length over all element pairs,
    /// including the length tolerance.
    ///
    /// Used by the neighbor grid as its cell size.
    pub fn max_bond_length(&self) -> f64 { self.max_bond_length }

    /// Rotatable side-chain dihedrals of a residue type, in χ order.
    ///
    /// Returns ``None`` for residue types with no rotatable side-chain bonds.
    pub fn chi_definitions(&self, comp_id: &str) -> Option<&Vec<ChiDefinition>> {
        self.rotatable_bonds.get(comp_id)
    }

    /// Names of hydrogens expected on a given heavy atom of a residue type
    pub fn hydrogen_names(&self, comp_id: &str, heavy_atom: &str) -> Option<&Vec<String>> {
        self.hydrogen_names.get(comp_id).and_then(|by_atom| by_atom.get(heavy_atom))
    }

    /// Returns true if a heavy atom of a residue type carries at least one hydrogen
    pub fn is_protonated(&self, comp_id: &str, heavy_atom: &str) -> bool {
        self.hydrogen_names(comp_id, heavy_atom).map(|h| !h.is_empty()).unwrap_or(false)
    }

    /// The force-field coefficients of this registry
    pub fn coefficients(&self) -> &Coefficients { &self.coefficients }

    /// Counts the elements known to this registry
    pub fn count_elements(&self) -> usize { self.elements.len() }
}

impl Default for ParameterRegistry {
    fn default() -> Self { ParameterRegistry::new() }
}
