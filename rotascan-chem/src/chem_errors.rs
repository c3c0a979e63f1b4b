use thiserror::Error;

/// Errors that may appear while configuring the parameter tables
#[derive(Debug, Error)]
pub enum ParametersError {

    #[error("Unknown parameter key: {key}")]
    /// A `KEY=VAL` override names a key that is not a force-field coefficient
    UnknownParameter { key: String },

    #[error("Can't parse '{value}' as the value of parameter {key}")]
    /// A `KEY=VAL` override holds a value that can't be parsed as a number
    BadParameterValue { key: String, value: String },

    #[error("Malformed parameter override: '{entry}'; expected KEY=VAL")]
    /// A `KEY=VAL` override is missing the `=` separator
    MalformedOverride { entry: String },

    #[error("Distance cutoffs must satisfy 0 < start < end; got start={start}, end={end}")]
    /// The cosine-taper cutoffs are negative or non-monotone
    NonMonotoneCutoffs { start: f64, end: f64 },

    #[error("The {name} cutoff must be positive; got {value}")]
    /// A distance cutoff is zero or negative
    NonPositiveCutoff { name: String, value: f64 },
}
