use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{InvalidCellError, Result};

/// One CSV row: its readings, or the first cell that is not a number.
pub type Row = std::result::Result<Vec<f64>, InvalidCellError>;

/// Rows of readings read from a CSV file with a header line.
///
/// A bad cell only spoils its own row. Malformed CSV (bad UTF-8, broken
/// quoting) still fails the whole read.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

fn parse_row(index: usize, record: &csv::StringRecord) -> Row {
    record
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            cell.parse::<f64>().map_err(|_| InvalidCellError {
                row: index + 1,
                column: column + 1,
                value: cell.to_string(),
            })
        })
        .collect()
}

impl InputTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            rows.push(parse_row(i, &record));
        }
        Ok(InputTable { headers, rows })
    }

    /// Reorders columns into `names` order when the header is a permutation of
    /// them. Returns false, leaving columns positional, otherwise.
    pub fn align_to(&mut self, names: &[String]) -> bool {
        if self.headers.len() != names.len() {
            return false;
        }
        let order: Option<Vec<usize>> = names
            .iter()
            .map(|name| self.headers.iter().position(|h| h == name))
            .collect();
        let Some(order) = order else {
            return false;
        };
        let mut seen = order.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != order.len() {
            return false;
        }

        for row in self.rows.iter_mut().flatten() {
            if row.len() == order.len() {
                let reordered: Vec<f64> = order.iter().map(|&i| row[i]).collect();
                *row = reordered;
            }
        }
        self.headers = names.to_vec();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_rows_of_floats() {
        let table = InputTable::from_reader("pm1_0,pm10\n1.5, 2\n3,4\n".as_bytes()).unwrap();
        assert_eq!(table.headers, names(&["pm1_0", "pm10"]));
        assert_eq!(table.rows, vec![Ok(vec![1.5, 2.0]), Ok(vec![3.0, 4.0])]);
    }

    #[test]
    fn unparsable_cell_spoils_only_its_row() {
        let table = InputTable::from_reader("a,b\n1,2\n3,x\n5,6\n".as_bytes()).unwrap();
        assert_eq!(
            table.rows,
            vec![
                Ok(vec![1.0, 2.0]),
                Err(InvalidCellError {
                    row: 2,
                    column: 2,
                    value: "x".to_string()
                }),
                Ok(vec![5.0, 6.0]),
            ]
        );
    }

    #[test]
    fn align_reorders_permuted_header() {
        let mut table =
            InputTable::from_reader("pm10,temperature,pm1_0\n10,25,1\n".as_bytes()).unwrap();
        assert!(table.align_to(&names(&["pm1_0", "pm10", "temperature"])));
        assert_eq!(table.rows, vec![Ok(vec![1.0, 10.0, 25.0])]);
    }

    #[test]
    fn align_keeps_positional_on_unknown_header() {
        let mut table = InputTable::from_reader("a,b\n1,2\n".as_bytes()).unwrap();
        assert!(!table.align_to(&names(&["pm1_0", "pm10"])));
        assert_eq!(table.rows, vec![Ok(vec![1.0, 2.0])]);
    }
}
