use crate::error::{ProcessingError, Result};
use crate::models::Coordinate;
use crate::utils::constants::{ADDRESS_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN};
use crate::utils::coordinates::{coerce_coordinate, format_coordinate};

/// One data row: the raw cells in column order plus the coerced coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRow {
    cells: Vec<String>,
    coordinate: Coordinate,
}

impl CoordinateRow {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Cells joined for log output
    pub fn display(&self, delimiter: char) -> String {
        self.cells.join(&delimiter.to_string())
    }
}

/// An ordered table of coordinate rows sharing one header.
///
/// Column order is preserved exactly; the latitude and longitude columns are
/// located once and their cells kept in step with the coerced values.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    headers: Vec<String>,
    latitude_col: usize,
    longitude_col: usize,
    address_col: Option<usize>,
    rows: Vec<CoordinateRow>,
}

impl CoordinateTable {
    /// Build a table from a header and raw records.
    ///
    /// Headers are matched exactly (case-sensitive, no trimming); callers that
    /// want tolerant headers trim them first. Short records are padded with
    /// empty cells.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let (latitude_col, longitude_col) =
            match (position(LATITUDE_COLUMN), position(LONGITUDE_COLUMN)) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    return Err(ProcessingError::Schema {
                        found: headers.clone(),
                    })
                }
            };
        let address_col = position(ADDRESS_COLUMN);

        let width = headers.len();
        let mut rows = Vec::with_capacity(records.len());
        for (index, mut cells) in records.into_iter().enumerate() {
            if cells.len() > width {
                return Err(ProcessingError::RowWidth {
                    row: index + 1,
                    found: cells.len(),
                    expected: width,
                });
            }
            cells.resize(width, String::new());

            let coordinate = Coordinate::new(
                coerce_coordinate(&cells[latitude_col]),
                coerce_coordinate(&cells[longitude_col]),
            );
            rows.push(CoordinateRow { cells, coordinate });
        }

        Ok(Self {
            headers,
            latitude_col,
            longitude_col,
            address_col,
            rows,
        })
    }

    /// Replace the latitude/longitude cells with their coerced numeric form
    pub fn normalize_coordinates(&mut self) {
        for row in &mut self.rows {
            row.cells[self.latitude_col] = format_coordinate(row.coordinate.latitude);
            row.cells[self.longitude_col] = format_coordinate(row.coordinate.longitude);
        }
    }

    /// Append an empty `Address` column unless one is already present
    pub fn ensure_address_column(&mut self) -> usize {
        if let Some(col) = self.address_col {
            return col;
        }

        self.headers.push(ADDRESS_COLUMN.to_string());
        for row in &mut self.rows {
            row.cells.push(String::new());
        }
        let col = self.headers.len() - 1;
        self.address_col = Some(col);
        col
    }

    /// Store an address for a row, adding the column first if needed
    pub fn set_address(&mut self, index: usize, address: &str) {
        let col = self.ensure_address_column();
        if let Some(row) = self.rows.get_mut(index) {
            row.cells[col] = address.to_string();
        }
    }

    /// Address of a row; `None` when the column is absent or the cell is empty
    pub fn address(&self, index: usize) -> Option<&str> {
        let col = self.address_col?;
        self.rows
            .get(index)
            .map(|row| row.cells[col].as_str())
            .filter(|cell| !cell.is_empty())
    }

    /// Text to show for a row's coordinates: the coerced number, else the trimmed raw cell
    pub fn coordinate_text(&self, index: usize) -> (String, String) {
        let Some(row) = self.rows.get(index) else {
            return (String::new(), String::new());
        };
        let show = |value: Option<f64>, col: usize| match value {
            Some(v) => v.to_string(),
            None => row.cells[col].trim().to_string(),
        };
        (
            show(row.coordinate.latitude, self.latitude_col),
            show(row.coordinate.longitude, self.longitude_col),
        )
    }

    /// Rows failing the range check, with their zero-based index
    pub fn invalid_rows(&self) -> impl Iterator<Item = (usize, &CoordinateRow)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.coordinate.is_valid())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[CoordinateRow] {
        &self.rows
    }

    pub fn has_address_column(&self) -> bool {
        self.address_col.is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
