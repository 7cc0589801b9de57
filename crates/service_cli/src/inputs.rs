//! Market data ingestion
//!
//! Reads observed call prices from a CSV file with the header
//! `Expiration,StockPrice,StrikePrice,CallPrice`. A missing or empty file, or
//! any other header, rejects the whole file. Individual rows that fail to
//! parse are skipped with a warning in both `tracing` and the error log.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::error_log::ErrorLog;
use crate::{CliError, Result};

/// Required header row
pub const EXPECTED_HEADER: [&str; 4] = ["Expiration", "StockPrice", "StrikePrice", "CallPrice"];

/// Calendar days per year used to convert `Expiration`
pub const DAYS_PER_YEAR: f64 = 365.0;

/// One observed option quote
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketQuote {
    /// Days to expiry
    pub expiration: f64,
    /// Spot price of the underlying
    pub stock_price: f64,
    /// Strike price
    pub strike_price: f64,
    /// Observed call price
    pub call_price: f64,
}

impl MarketQuote {
    /// Time to expiry in years
    pub fn time_to_expiration(&self) -> f64 {
        self.expiration / DAYS_PER_YEAR
    }

    fn check(&self) -> std::result::Result<(), String> {
        let fields = [
            ("Expiration", self.expiration),
            ("StockPrice", self.stock_price),
            ("StrikePrice", self.strike_price),
            ("CallPrice", self.call_price),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some((name, value)) => Err(format!("{} = {} is not a non-negative number", name, value)),
            None => Ok(()),
        }
    }
}

/// Loads every well-formed quote from `path`.
///
/// # Errors
/// - `CliError::FileNotFound` if the file does not exist
/// - `CliError::MarketData` for an empty file, a wrong header, or a file
///   without a single usable row
pub fn read_market_data(path: &Path, error_log: &ErrorLog) -> Result<Vec<MarketQuote>> {
    let result = load(path, error_log);
    if let Err(e) = &result {
        error_log.record_error("Error reading market data", e);
    }
    result
}

fn load(path: &Path, error_log: &ErrorLog) -> Result<Vec<MarketQuote>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(CliError::MarketData(format!(
            "File is empty: {}",
            path.display()
        )));
    }
    if headers.iter().ne(EXPECTED_HEADER.iter().copied()) {
        return Err(CliError::MarketData(format!(
            "Invalid header format in file: {} (expected {})",
            path.display(),
            EXPECTED_HEADER.join(",")
        )));
    }

    let mut quotes = Vec::new();
    let mut skipped = 0_usize;
    for (index, row) in reader.deserialize::<MarketQuote>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let parsed = row
            .map_err(|e| e.to_string())
            .and_then(|quote| quote.check().map(|()| quote));

        match parsed {
            Ok(quote) => quotes.push(quote),
            Err(reason) => {
                skipped += 1;
                warn!(line, %reason, "Skipping invalid market data row");
                error_log.record(&format!("Skipping invalid row at line {}: {}", line, reason));
            }
        }
    }

    if quotes.is_empty() {
        return Err(CliError::MarketData(format!(
            "No valid rows in file: {}",
            path.display()
        )));
    }

    info!(rows = quotes.len(), skipped, "Market data loaded");
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("quotes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_valid_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let path = write_csv(
            &dir,
            "Expiration,StockPrice,StrikePrice,CallPrice\n365,100.0,100,10.45\n182, 100.0 ,110,2.1\n",
        );

        let quotes = read_market_data(&path, &log).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(
            quotes[0],
            MarketQuote {
                expiration: 365.0,
                stock_price: 100.0,
                strike_price: 100.0,
                call_price: 10.45,
            }
        );
        assert_eq!(quotes[0].time_to_expiration(), 1.0);
        assert_eq!(quotes[1].strike_price, 110.0);
        assert!(!log.path().exists());
    }

    #[test]
    fn test_skips_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let path = write_csv(
            &dir,
            "Expiration,StockPrice,StrikePrice,CallPrice\n\
             365,100,100,10.45\n\
             abc,100,100,10.0\n\
             30,100\n\
             30,100,-5,1.0\n\
             90,100,95,7.5\n",
        );

        let quotes = read_market_data(&path, &log).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].expiration, 90.0);

        let logged = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(logged.lines().count(), 3);
        assert!(logged.contains("line 3"));
        assert!(logged.contains("StrikePrice = -5"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let err = read_market_data(&dir.path().join("absent.csv"), &log).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
        assert!(std::fs::read_to_string(log.path())
            .unwrap()
            .contains("File not found"));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let path = write_csv(&dir, "");
        let err = read_market_data(&path, &log).unwrap_err();
        assert!(err.to_string().contains("File is empty"));
    }

    #[test]
    fn test_wrong_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let path = write_csv(&dir, "Expiry,Spot,Strike,Price\n365,100,100,10\n");
        let err = read_market_data(&path, &log).unwrap_err();
        assert!(err.to_string().contains("Invalid header format"));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let path = write_csv(&dir, "Expiration,StockPrice,StrikePrice,CallPrice\n");
        let err = read_market_data(&path, &log).unwrap_err();
        assert!(err.to_string().contains("No valid rows"));
    }
}
