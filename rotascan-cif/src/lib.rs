//! Reads and writes data in the CIF format.
//!
//! This crate handles the mmCIF subset consumed and produced by the rotascan
//! workspace: `data_` blocks holding name-value items and `loop_` blocks with
//! tabulated data, most importantly the `_atom_site.` table of a
//! crystallographic deposit.
//!
//! # Example CIF-formatted input:
//! ``` text
//! data_some_name
//! _name_1            value_1
//! _name_2            value_2
//!
//! loop_
//! _first_column
//! _second_column
//! 'value A' 1
//! 'value B' 2
//! ```
//!
//! The block above, loaded as a [CifData] struct, holds two key-value entries
//! followed by a single [CifLoop] with two columns and two rows.

mod cif_errors;
mod cif_table;

pub use cif_errors::*;
pub use cif_table::*;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

use flate2::read::GzDecoder;
use log::debug;

/// Opens a file for buffered reading, transparently decompressing gzip.
///
/// Files whose name ends with `.gz` are decompressed on the fly; any other
/// file is read as plain text.
pub fn open_file(file_path: &str) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(file_path)?;
    if file_path.ends_with(".gz") {
        return Ok(Box::new(BufReader::new(GzDecoder::new(file))));
    }
    return Ok(Box::new(BufReader::new(file)));
}

/// Creates a `Write` object for a given file name.
///
/// An empty name or the name ``"stdout"`` connects the writer to the
/// standard output stream.
pub fn out_writer(out_fname: &str) -> io::Result<Box<dyn io::Write>> {
    match out_fname {
        "" | "stdout" => Ok(Box::new(io::stdout())),
        _ => Ok(Box::new(File::create(out_fname)?)),
    }
}

/// Returns true if a given file is in CIF format.
///
/// This function simply tests whether the first data line of a given file
/// starts with ``data_``; when the file can't be open returns an I/O error.
pub fn is_cif_file(file_path: &str) -> io::Result<bool> {
    let reader = open_file(file_path)?;
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() && !line.starts_with('#') {
            return Ok(line.trim().starts_with("data_"));
        }
    }
    return Ok(false);
}

/// Returns true if a CIF entry holds an actual value.
///
/// The CIF format uses ``"."`` for *inapplicable* and ``"?"`` for *unknown*
/// entries; both are treated as missing values.
///
/// # Example
/// ```
/// use rotascan_cif::entry_has_value;
/// assert!(entry_has_value("SER"));
/// assert!(!entry_has_value("."));
/// assert!(!entry_has_value("?"));
/// ```
pub fn entry_has_value(entry: &str) -> bool { entry != "." && entry != "?" }

/// Returns a CIF entry parsed into a given type, or a default when the entry holds no value.
pub fn value_or_default<T: FromStr + Clone>(entry: &str, default: T) -> T {
    if !entry_has_value(entry) { return default; }
    return entry.parse::<T>().unwrap_or(default);
}

/// Parses a data item into a given type or returns an [`ItemParsingError`](CifError::ItemParsingError)
///
/// # Example
/// ```
/// use rotascan_cif::CifError;
/// use rotascan_cif::parse_item_or_error;
/// fn test_macro(token: &str) -> Result<i32, CifError> {
///     let value = parse_item_or_error!(token, i32);
///     return Ok(value);
/// }
/// assert!(test_macro("1").is_ok());
/// assert!(test_macro("one").is_err());
/// ```
#[macro_export]
macro_rules! parse_item_or_error {
    ($token:expr, $type:ty) => {
        match $token.parse::<$type>() {
            Ok(val) => val,
            Err(_) => return Err($crate::CifError::ItemParsingError {
                item: $token.to_string(), type_name: stringify!($type).to_string(), details: "".to_string(),
            }),
        }
    };
}

/// Splits a CIF data line into values.
///
/// Values may be quoted with single or double quotes; a ``#`` character that
/// starts a token begins a comment which extends to the end of the line.
///
/// # Example
/// ```
/// use rotascan_cif::split_cif_line;
/// let tokens = split_cif_line("'value A' 1 # a comment");
/// assert_eq!(tokens, vec!["value A".to_string(), "1".to_string()]);
/// ```
pub fn split_cif_line(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = vec![];
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() { chars.next(); continue; }
        if c == '#' { break; }
        if c == '\'' || c == '"' {
            let quote = c;
            chars.next();
            let mut token = String::new();
            while let Some(&cc) = chars.peek() {
                chars.next();
                if cc == quote { break; }
                token.push(cc);
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&cc) = chars.peek() {
                if cc.is_whitespace() { break; }
                token.push(cc);
                chars.next();
            }
            tokens.push(token);
        }
    }
    return tokens;
}

/// Represents a single `loop_` block of a CIF file.
///
/// # Example
///
/// The following example shows how to build a [CifLoop] using its API:
/// ```
/// use rotascan_cif::CifLoop;
/// // --- create an empty data loop with four columns
/// let mut data_loop = CifLoop::new(&["_atom_site.label_atom_id", "_atom_site.Cartn_x",
///         "_atom_site.Cartn_y", "_atom_site.Cartn_z"]);
/// // --- append two rows of values
/// data_loop.add_data_row(vec!["O1", "4.154", "5.699", "3.026"].iter().map(|&s| s.to_string()).collect());
/// data_loop.add_data_row(vec!["C2", "5.630", "5.087", "3.246"].iter().map(|&s| s.to_string()).collect());
/// assert_eq!(data_loop.count_rows(), 2);
/// assert_eq!(data_loop.column_index("_atom_site.Cartn_z"), Some(3));
/// ```
pub struct CifLoop {
    column_names: Vec<String>,
    data_rows: Vec<Vec<String>>,
}

impl CifLoop {

    /// Creates an empty loop block with given columns.
    pub fn new(data_item_names: &[&str]) -> CifLoop {
        let cols: Vec<_> = data_item_names.iter().map(|e| e.to_string()).collect();
        return CifLoop { column_names: cols, data_rows: vec![] };
    }

    /// Adds a new column to this loop block.
    ///
    /// Adding columns is possible only before any data is inserted; once any
    /// data row has been inserted, this method will panic.
    pub fn add_column(&mut self, column_name: &str) {
        if !self.data_rows.is_empty() {
            panic!("Attempted column insertion for a loop block that already contains data rows!");
        }
        self.column_names.push(column_name.to_string());
    }

    /// Adds a new row of data.
    pub fn add_data_row(&mut self, row: Vec<String>) {
        self.data_rows.push(row);
    }

    /// Non-mutable iterator over rows of this loop block.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<String>> { self.data_rows.iter() }

    /// Non-mutable iterator over names assigned to the columns of this loop.
    pub fn column_names(&self) -> impl Iterator<Item = &String> { self.column_names.iter() }

    /// Counts rows of data stored by this loop
    pub fn count_rows(&self) -> usize { self.data_rows.len() }

    /// Counts columns (i.e. data items) stored by this loop
    pub fn count_columns(&self) -> usize { self.column_names.len() }

    /// Index of a column which holds values for a data item given its name
    pub fn column_index(&self, data_name: &str) -> Option<usize> {
        self.column_names.iter().position(|r| r == data_name)
    }

    /// Returns true if any column name contains a given substring
    pub fn column_name_contains(&self, substring: &str) -> bool {
        return self.column_names.iter().any(|name| name.contains(substring));
    }
}

impl Display for CifLoop {
    /// Writes a [`CifLoop`](CifLoop) block in the CIF format.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "loop_")?;
        for column in &self.column_names { writeln!(f, "{}", column)?; }
        for row in &self.data_rows {
            let quoted: Vec<String> = row.iter()
                .map(|v| if v.contains(' ') || v.is_empty() { format!("'{}'", v) } else { v.clone() })
                .collect();
            writeln!(f, "{}", quoted.join(" "))?;
        }
        Ok(())
    }
}

/// Represents a single `data_` block of a CIF file.
///
/// A single data block may contain entries given as key-value pairs as well
/// as loop blocks.
pub struct CifData {
    name: String,
    data_items: HashMap<String, String>,
    loops: Vec<CifLoop>,
}

impl CifData {

    /// Creates an empty data block of a given name.
    pub fn new(name: &str) -> CifData {
        CifData { name: name.to_string(), data_items: HashMap::new(), loops: vec![] }
    }

    /// Name of this data block, i.e. the part of its header following the ``data_`` prefix
    pub fn name(&self) -> &str { &self.name }

    /// Stores a key-value data item in this block
    pub fn add_item(&mut self, key: &str, value: String) {
        self.data_items.insert(key.to_string(), value);
    }

    /// Returns a data item parsed into a requested type.
    ///
    /// Returns ``None`` when the key is missing or the value can't be parsed.
    pub fn get_item<T: FromStr>(&self, key: &str) -> Option<T> {
        self.data_items.get(key).and_then(|v| v.parse::<T>().ok())
    }

    /// Appends a loop block to this data block
    pub fn add_loop(&mut self, a_loop: CifLoop) { self.loops.push(a_loop); }

    /// Non-mutable iterator over the loop blocks of this data block
    pub fn loop_blocks(&self) -> impl Iterator<Item = &CifLoop> { self.loops.iter() }

    /// Returns the first loop block which holds a column of a given name
    pub fn first_loop(&self, column_name: &str) -> Option<&CifLoop> {
        self.loops.iter().find(|l| l.column_index(column_name).is_some())
    }

    /// Counts the key-value items of this data block
    pub fn count_items(&self) -> usize { self.data_items.len() }
}

impl Display for CifData {
    /// Writes this block and all its loops in the CIF format.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "data_{}", self.name)?;
        let mut keys: Vec<&String> = self.data_items.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(f, "{}   {}", key, self.data_items[key])?;
        }
        writeln!(f, "#")?;
        for a_loop in &self.loops {
            write!(f, "{}", a_loop)?;
            writeln!(f, "#")?;
        }
        Ok(())
    }
}

/// Reads CIF-formatted data from a buffer.
///
/// # Example
/// ```
/// use std::io::BufReader;
/// use rotascan_cif::read_cif_buffer;
/// let cif_block = "data_loop_example
/// loop_
/// _atom_site.label_atom_id
/// _atom_site.Cartn_x
/// O1 4.154
/// C2 5.630
/// ";
/// let data_blocks = read_cif_buffer(&mut BufReader::new(cif_block.as_bytes())).unwrap();
/// assert_eq!(data_blocks.len(), 1);
/// assert_eq!(data_blocks[0].name(), "loop_example");
/// let a_loop = data_blocks[0].loop_blocks().next().unwrap();
/// assert_eq!(a_loop.count_rows(), 2);
/// ```
pub fn read_cif_buffer<R: BufRead>(reader: &mut R) -> Result<Vec<CifData>, CifError> {

    let mut blocks: Vec<CifData> = vec![];
    let mut current_loop: Option<CifLoop> = None;
    let mut in_loop_header = false;
    let mut pending_key: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            if let Some(l) = current_loop.take() {
                if let Some(block) = blocks.last_mut() { block.add_loop(l); }
            }
            in_loop_header = false;
            continue;
        }

        if let Some(name) = trimmed.strip_prefix("data_") {
            if let Some(l) = current_loop.take() {
                if let Some(block) = blocks.last_mut() { block.add_loop(l); }
            }
            in_loop_header = false;
            blocks.push(CifData::new(name));
            continue;
        }

        if trimmed == "loop_" {
            if let Some(l) = current_loop.take() {
                if let Some(block) = blocks.last_mut() { block.add_loop(l); }
            }
            current_loop = Some(CifLoop::new(&[]));
            in_loop_header = true;
            continue;
        }

        if blocks.is_empty() { return Err(CifError::NoDataBlock); }

        // --- a multiline value opened with a semicolon closes the pending key-value item
        if let Some(stripped) = trimmed.strip_prefix(';') {
            if let Some(key) = pending_key.take() {
                blocks.last_mut().unwrap().add_item(&key, stripped.to_string());
            }
            continue;
        }

        if trimmed.starts_with('_') {
            if in_loop_header {
                let the_loop = current_loop.as_mut().unwrap();
                the_loop.add_column(trimmed.split_whitespace().next().unwrap());
                continue;
            }
            // --- an ordinary key-value item; the value may arrive in the next line
            let tokens = split_cif_line(trimmed);
            if tokens.len() >= 2 {
                blocks.last_mut().unwrap().add_item(&tokens[0], tokens[1..].join(" "));
            } else {
                pending_key = Some(tokens[0].clone());
            }
            continue;
        }

        if let Some(the_loop) = current_loop.as_mut() {
            in_loop_header = false;
            let values = split_cif_line(trimmed);
            if values.len() != the_loop.count_columns() {
                return Err(CifError::MisshapenLoopRow {
                    expected: the_loop.count_columns(), found: values.len(),
                });
            }
            the_loop.add_data_row(values);
            continue;
        }

        // --- a bare value closing a pending key-value item
        if let Some(key) = pending_key.take() {
            let tokens = split_cif_line(trimmed);
            blocks.last_mut().unwrap().add_item(&key, tokens.join(" "));
        }
    }

    if let Some(l) = current_loop.take() {
        if let Some(block) = blocks.last_mut() { block.add_loop(l); }
    }
    if blocks.is_empty() { return Err(CifError::NoDataBlock); }

    debug!("{} data block(s) loaded from a CIF input", blocks.len());

    return Ok(blocks);
}

/// Reads CIF-formatted data from a file, which may be gzipped.
pub fn read_cif_file(file_path: &str) -> Result<Vec<CifData>, CifError> {
    let mut reader = open_file(file_path)?;
    return read_cif_buffer(&mut reader);
}
