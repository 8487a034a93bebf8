use crate::models::CoordinateTable;
use crate::utils::constants::SUMMARY_ROW_LIMIT;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidityReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub non_numeric_rows: usize,
    pub out_of_range_rows: usize,
    pub invalid: Vec<InvalidRow>,
}

/// A row kept in the table despite failing the range check
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRow {
    /// One-based data row number (the header is not counted)
    pub row_number: usize,
    pub contents: String,
    pub reason: String,
}

impl ValidityReport {
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// One line per invalid row, suitable for warning output
    pub fn invalid_lines(&self) -> Vec<String> {
        self.invalid
            .iter()
            .map(|row| format!("row {}: {} ({})", row.row_number, row.contents, row.reason))
            .collect()
    }
}

/// Applies the latitude/longitude range check to every row of a table
pub struct ValidityChecker {
    display_delimiter: char,
}

impl ValidityChecker {
    pub fn new() -> Self {
        Self {
            display_delimiter: ',',
        }
    }

    pub fn with_display_delimiter(mut self, delimiter: char) -> Self {
        self.display_delimiter = delimiter;
        self
    }

    /// Check every row; never removes anything from the table
    pub fn check(&self, table: &CoordinateTable) -> ValidityReport {
        let mut report = ValidityReport {
            total_rows: table.len(),
            ..Default::default()
        };

        for (index, row) in table.rows().iter().enumerate() {
            let coordinate = row.coordinate();
            match coordinate.problem() {
                None => report.valid_rows += 1,
                Some(reason) => {
                    if coordinate.is_numeric() {
                        report.out_of_range_rows += 1;
                    } else {
                        report.non_numeric_rows += 1;
                    }
                    report.invalid.push(InvalidRow {
                        row_number: index + 1,
                        contents: row.display(self.display_delimiter),
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &ValidityReport) -> String {
        let percent = |count: usize| {
            if report.total_rows == 0 {
                0.0
            } else {
                100.0 * count as f64 / report.total_rows as f64
            }
        };

        let mut summary = String::new();
        summary.push_str("=== Coordinate Validity Report ===\n");
        summary.push_str(&format!("Total Rows: {}\n", report.total_rows));
        summary.push_str(&format!(
            "Valid Rows: {} ({:.1}%)\n",
            report.valid_rows,
            percent(report.valid_rows)
        ));
        summary.push_str(&format!(
            "Out of Range: {} ({:.1}%)\n",
            report.out_of_range_rows,
            percent(report.out_of_range_rows)
        ));
        summary.push_str(&format!(
            "Not Numeric: {} ({:.1}%)\n",
            report.non_numeric_rows,
            percent(report.non_numeric_rows)
        ));

        if !report.invalid.is_empty() {
            summary.push_str(&format!(
                "\nFirst {} Invalid Rows (kept in output):\n",
                SUMMARY_ROW_LIMIT.min(report.invalid.len())
            ));
            for row in report.invalid.iter().take(SUMMARY_ROW_LIMIT) {
                summary.push_str(&format!(
                    "  Row {}: {} ({})\n",
                    row.row_number, row.contents, row.reason
                ));
            }
        }

        summary
    }
}

impl Default for ValidityChecker {
    fn default() -> Self {
        Self::new()
    }
}
