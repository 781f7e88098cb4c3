use std::io::Read;

use cart_core::{CartRepository, RepositoryError, Town};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading shipping rate data.
#[derive(Debug, Error, PartialEq)]
pub enum ShippingRateLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {0}: town name is empty")]
    EmptyTownName(usize),

    #[error("Row {0}: shipping fee {1} is negative")]
    NegativeFee(usize, Decimal),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ShippingRateLoaderError {
    fn from(err: csv::Error) -> Self {
        ShippingRateLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the shipping rates CSV file.
///
/// - `town`: The town name as shown in the checkout town picker
/// - `fee`: The flat delivery fee for that town in pesos
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShippingRateRecord {
    pub town: String,
    pub fee: Decimal,
}

/// Loader for shipping rate data from CSV files.
///
/// This loader reads CSV data and writes it into the database via the
/// `CartRepository` trait, allowing it to work with any database backend.
///
/// Town names are matched by exact name, so loading is idempotent: a town
/// already present simply gets its fee replaced. When the same town appears
/// on several rows, the last row wins.
pub struct ShippingRateLoader;

impl ShippingRateLoader {
    /// Parse shipping rate records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ShippingRateRecord>, ShippingRateLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ShippingRateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load shipping rate records into the database.
    ///
    /// Every record is validated before anything is written, so a bad row
    /// leaves the towns table untouched. Row numbers in errors are 1-based
    /// and count data rows, not the header.
    ///
    /// Town names are stored trimmed; fees of zero are accepted (a town
    /// with free delivery), negative fees are not.
    pub async fn load<R: CartRepository>(
        repo: &R,
        records: &[ShippingRateRecord],
    ) -> Result<usize, ShippingRateLoaderError> {
        for (i, record) in records.iter().enumerate() {
            let row = i + 1;
            if record.town.trim().is_empty() {
                return Err(ShippingRateLoaderError::EmptyTownName(row));
            }
            if record.fee < Decimal::ZERO {
                return Err(ShippingRateLoaderError::NegativeFee(row, record.fee));
            }
        }

        let mut written = 0;
        for record in records {
            let town = Town {
                name: record.town.trim().to_string(),
                fee: record.fee,
            };
            repo.upsert_town(&town).await?;
            written += 1;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"town,fee
Tubigon,50
Calape,100
Loon,75.25
Clarin,120
Inabanga,150
"#;

    #[test]
    fn test_parse_csv_single_rate() {
        let csv = "town,fee\nTubigon,50";

        let records = ShippingRateLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            ShippingRateRecord {
                town: "Tubigon".to_string(),
                fee: dec!(50),
            }
        );
    }

    #[test]
    fn test_parse_csv_fractional_fee() {
        let csv = "town,fee\nLoon,75.25";

        let records = ShippingRateLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].fee, dec!(75.25));
    }

    #[test]
    fn test_parse_csv_all_rows() {
        let records = ShippingRateLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 5);

        let towns: Vec<&str> = records.iter().map(|r| r.town.as_str()).collect();
        assert_eq!(towns, vec!["Tubigon", "Calape", "Loon", "Clarin", "Inabanga"]);
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "town\nTubigon";

        let result = ShippingRateLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let ShippingRateLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "town,fee\nTubigon,cheap";

        let result = ShippingRateLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for invalid decimal");
        let ShippingRateLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("invalid"),
            "Expected 'invalid' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "town,fee\n";

        let records = ShippingRateLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }
}
