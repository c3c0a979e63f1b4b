use crate::{CifData, CifError, CifLoop};

/// Provides a columnar view of a [`CifLoop`](crate::CifLoop) block.
///
/// A [`CifTable`] locates the loop block holding a given category (e.g.
/// ``"_atom_site."``) and maps the requested data items to column indexes, so
/// rows can be iterated as fixed-size string arrays in the requested order.
///
/// # Example
/// ```
/// use std::io::BufReader;
/// use rotascan_cif::{read_cif_buffer, CifTable};
/// let cif_block = "data_example
/// loop_
/// _atom_site.id
/// _atom_site.Cartn_x
/// _atom_site.Cartn_y
/// 1 4.154 5.699
/// 2 5.630 5.087
/// ";
/// let data_blocks = read_cif_buffer(&mut BufReader::new(cif_block.as_bytes())).unwrap();
/// let table = CifTable::new(&data_blocks[0], "_atom_site.", ["Cartn_x", "id"]).unwrap();
/// let rows: Vec<[&str; 2]> = table.iter().collect();
/// assert_eq!(rows[0], ["4.154", "1"]);
/// assert_eq!(rows[1], ["5.630", "2"]);
/// ```
pub struct CifTable<'a, const N: usize> {
    data_loop: &'a CifLoop,
    columns: [usize; N],
}

impl<'a, const N: usize> CifTable<'a, N> {

    /// Creates a table view for a given category and data item names.
    ///
    /// Each of the `item_names` may be given with or without the category
    /// prefix. Returns [`CifError::MissingCifLoopKey`] when the category or
    /// any of the items can't be found in the data block.
    pub fn new(cif_data: &'a CifData, category: &str, item_names: [&str; N]) -> Result<CifTable<'a, N>, CifError> {

        let first_key = format!("{}{}", category, item_names[0].trim_start_matches(category));
        let data_loop = cif_data.first_loop(&first_key)
            .ok_or(CifError::MissingCifLoopKey { item_key: first_key })?;

        let mut columns = [0usize; N];
        for (i, name) in item_names.iter().enumerate() {
            let full_name = format!("{}{}", category, name.trim_start_matches(category));
            columns[i] = data_loop.column_index(&full_name)
                .ok_or(CifError::MissingCifLoopKey { item_key: full_name })?;
        }

        return Ok(CifTable { data_loop, columns });
    }

    /// Iterates over the rows of this table.
    ///
    /// Values are provided in the order the data items were requested from
    /// the [`new()`](CifTable::new) method, not in the file order.
    pub fn iter(&self) -> impl Iterator<Item = [&'a str; N]> + '_ {
        self.data_loop.rows().map(move |row| {
            let mut out = [""; N];
            for (i, &col) in self.columns.iter().enumerate() { out[i] = row[col].as_str(); }
            out
        })
    }

    /// Counts the data rows of this table
    pub fn count_rows(&self) -> usize { self.data_loop.count_rows() }
}
