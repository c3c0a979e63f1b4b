use crate::ParametersError;

/// Force-field coefficients and distance cutoffs used while scoring rotamers.
///
/// A default set is compiled in; individual values may be overridden from a
/// ``KEY=VAL[,KEY=VAL...]`` string as accepted by the command line:
///
/// ```
/// use rotascan_chem::Coefficients;
/// let mut coefficients = Coefficients::default();
/// coefficients.apply_overrides("lj_epsilon=2.5, cutoff_atom=8.0").unwrap();
/// assert_eq!(coefficients.lj_epsilon, 2.5);
/// assert_eq!(coefficients.cutoff_atom, 8.0);
/// assert!(coefficients.apply_overrides("no_such_key=1.0").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Coefficients {
    /// weight of the Lennard-Jones term in the composite potential
    pub lj_k: f64,
    /// weight of the Coulomb term in the composite potential
    pub c_k: f64,
    /// weight of the hydrogen-bond term in the composite potential
    pub h_k: f64,
    /// weight of the torsional term
    pub t_k: f64,
    /// Lennard-Jones well depth
    pub lj_epsilon: f64,
    /// relative permittivity dividing the Coulomb term
    pub c_epsilon: f64,
    /// hydrogen-bond well depth
    pub h_epsilon: f64,
    /// torsional barrier height
    pub t_epsilon: f64,
    /// soft-sphere energy at contact
    pub soft_epsilon: f64,
    /// soft-sphere repulsion exponent
    pub soft_exponent: f64,
    /// scale factor applied to the van der Waals sigma of an atom pair
    pub r_sigma: f64,
    /// electrostatic constant, in kcal*A/(mol*e^2)
    pub coulomb_k: f64,
    /// atom-atom distance cutoff for including a surrounding atom in the score, in Angstroms
    pub cutoff_atom: f64,
    /// residue-residue distance cutoff for marking surrounding residues, in Angstroms
    pub cutoff_residue: f64,
    /// the cosine taper of the composite potential starts at ``cutoff_start * sigma``
    pub cutoff_start: f64,
    /// the composite potential reaches zero at ``cutoff_end * sigma``
    pub cutoff_end: f64,
    /// tolerance around a candidate covalent bond length, in Angstroms
    pub length_error: f64,
}

impl Default for Coefficients {
    fn default() -> Coefficients {
        Coefficients {
            lj_k: 1.0,
            c_k: 1.0,
            h_k: 1.0,
            t_k: 1.0,
            lj_epsilon: 1.0,
            c_epsilon: 1.0,
            h_epsilon: 1.0,
            t_epsilon: 1.0,
            soft_epsilon: 1.0,
            soft_exponent: 12.0,
            r_sigma: 1.0,
            coulomb_k: 332.0,
            cutoff_atom: 6.5,
            cutoff_residue: 22.0,
            cutoff_start: 2.5,
            cutoff_end: 5.0,
            length_error: 0.1,
        }
    }
}

impl Coefficients {

    /// Overrides selected coefficients from a ``KEY=VAL[,KEY=VAL...]`` string.
    ///
    /// Unknown keys and unparseable values are reported as errors before any
    /// sampling may begin; the struct is modified even when a later entry of
    /// the list turns out to be broken.
    pub fn apply_overrides(&mut self, overrides: &str) -> Result<(), ParametersError> {
        for entry in overrides.split(',') {
            let entry = entry.trim();
            if entry.is_empty() { continue; }
            let (key, value) = entry.split_once('=')
                .ok_or(ParametersError::MalformedOverride { entry: entry.to_string() })?;
            let (key, value) = (key.trim(), value.trim());
            let parsed: f64 = value.parse().map_err(|_| ParametersError::BadParameterValue {
                key: key.to_string(), value: value.to_string(),
            })?;
            match key {
                "lj_k" => self.lj_k = parsed,
                "c_k" => self.c_k = parsed,
                "h_k" => self.h_k = parsed,
                "t_k" => self.t_k = parsed,
                "lj_epsilon" => self.lj_epsilon = parsed,
                "c_epsilon" => self.c_epsilon = parsed,
                "h_epsilon" => self.h_epsilon = parsed,
                "t_epsilon" => self.t_epsilon = parsed,
                "soft_epsilon" => self.soft_epsilon = parsed,
                "soft_exponent" => self.soft_exponent = parsed,
                "r_sigma" => self.r_sigma = parsed,
                "coulomb_k" => self.coulomb_k = parsed,
                "cutoff_atom" => self.cutoff_atom = parsed,
                "cutoff_residue" => self.cutoff_residue = parsed,
                "cutoff_start" => self.cutoff_start = parsed,
                "cutoff_end" => self.cutoff_end = parsed,
                "length_error" => self.length_error = parsed,
                _ => return Err(ParametersError::UnknownParameter { key: key.to_string() }),
            }
        }
        return Ok(());
    }

    /// Checks that the distance cutoffs make sense.
    ///
    /// The taper window must satisfy ``0 < cutoff_start < cutoff_end`` and
    /// both absolute cutoffs must be positive; a violation is a configuration
    /// error that must stop a run before any output is produced.
    pub fn validate(&self) -> Result<(), ParametersError> {
        if self.cutoff_start <= 0.0 || self.cutoff_start >= self.cutoff_end {
            return Err(ParametersError::NonMonotoneCutoffs {
                start: self.cutoff_start, end: self.cutoff_end,
            });
        }
        if self.cutoff_atom <= 0.0 {
            return Err(ParametersError::NonPositiveCutoff {
                name: "cutoff_atom".to_string(), value: self.cutoff_atom,
            });
        }
        if self.cutoff_residue <= 0.0 {
            return Err(ParametersError::NonPositiveCutoff {
                name: "cutoff_residue".to_string(), value: self.cutoff_residue,
            });
        }
        return Ok(());
    }
}
