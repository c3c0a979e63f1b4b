use thiserror::Error;

/// Errors that may appear while using the rotascan-cif crate
#[derive(Debug, Error)]
pub enum CifError {

    #[error("General I/O error occurred while reading a CIF file")]
    /// I/O error occurred while reading a CIF file
    Io(#[from] std::io::Error),

    #[error("Data key of a loop block not found in CIF input: {item_key}")]
    /// A loop block misses a mandatory column identified by the key: `item_key`
    MissingCifLoopKey { item_key: String },

    #[error("Can't parse '{item}' as {type_name}; the data row was: {details}")]
    /// A CIF data item can't be parsed into the requested type
    ItemParsingError { item: String, type_name: String, details: String },

    #[error("CIF input contains no data block")]
    /// A CIF input must contain at least one `data_` block
    NoDataBlock,

    #[error("A loop_ data row holds {found} values while {expected} columns were declared")]
    /// A row of a loop block doesn't match the declared columns
    MisshapenLoopRow { expected: usize, found: usize },
}
