//! Scenario inputs: opening balances, instrument rows, and the yield grid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use banksim_books::Side;
use banksim_core::Date;
use banksim_curves::ParYieldQuote;

use crate::error::{SimError, SimResult};

/// A yield curve tenor expressed in whole months.
///
/// Parses both the compact form ("1M", "10Y") and the treasury
/// publication form ("1 Mo", "10 Yr").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    months: u32,
}

impl Tenor {
    /// A tenor of `months` months.
    #[must_use]
    pub fn from_months(months: u32) -> Self {
        Self { months }
    }

    /// A tenor of `years` years.
    #[must_use]
    pub fn from_years(years: u32) -> Self {
        Self { months: years * 12 }
    }

    /// Tenor length in months.
    #[must_use]
    pub fn months(&self) -> u32 {
        self.months
    }

    /// The maturity date this tenor implies from `start`.
    ///
    /// # Errors
    ///
    /// Propagates date arithmetic errors.
    pub fn maturity_from(&self, start: Date) -> SimResult<Date> {
        Ok(start.add_months(self.months as i32)?)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months % 12 == 0 {
            write!(f, "{} Yr", self.months / 12)
        } else {
            write!(f, "{} Mo", self.months)
        }
    }
}

impl FromStr for Tenor {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| SimError::scenario(format!("tenor '{text}' has no unit")))?;
        let (number, unit) = text.split_at(split);

        let count: u32 = number
            .parse()
            .map_err(|_| SimError::scenario(format!("tenor '{text}' has no leading count")))?;
        if count == 0 {
            return Err(SimError::scenario(format!("tenor '{text}' is zero")));
        }

        match unit.trim().to_ascii_lowercase().as_str() {
            "m" | "mo" | "month" | "months" => Ok(Tenor::from_months(count)),
            "y" | "yr" | "year" | "years" => Ok(Tenor::from_years(count)),
            other => Err(SimError::scenario(format!("unknown tenor unit '{other}'"))),
        }
    }
}

/// A dated grid of par treasury yields, one column per tenor.
///
/// Mirrors the daily treasury par yield publication: a `Date` column
/// followed by tenor columns with rates in percent.
#[derive(Debug, Clone)]
pub struct YieldGrid {
    tenors: Vec<Tenor>,
    rows: BTreeMap<Date, Vec<f64>>,
}

impl YieldGrid {
    /// Creates an empty grid with the given tenor columns.
    #[must_use]
    pub fn new(tenors: Vec<Tenor>) -> Self {
        Self {
            tenors,
            rows: BTreeMap::new(),
        }
    }

    /// Reads a grid from CSV.
    ///
    /// The header row is `Date` followed by tenor labels; data rows hold
    /// an ISO date and rates in percent. Malformed rows are skipped with
    /// a warning rather than failing the whole load, matching how the
    /// published files occasionally carry blank or partial rows.
    ///
    /// # Errors
    ///
    /// Returns a scenario error if the header is unusable or the reader
    /// fails outright.
    pub fn from_csv_reader<R: Read>(reader: R) -> SimResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.len() < 2 {
            return Err(SimError::scenario(
                "yield grid needs a date column and at least one tenor column",
            ));
        }
        let tenors: Vec<Tenor> = headers
            .iter()
            .skip(1)
            .map(str::parse)
            .collect::<SimResult<_>>()?;

        let mut grid = Self::new(tenors);
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            match grid.parse_row(&record) {
                Ok((date, rates)) => {
                    grid.rows.insert(date, rates);
                }
                Err(e) => {
                    log::warn!("skipping yield grid row {}: {e}", line + 2);
                }
            }
        }

        if grid.rows.is_empty() {
            return Err(SimError::scenario("yield grid has no usable rows"));
        }
        Ok(grid)
    }

    /// Reads a grid from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns a scenario error if the file cannot be opened or parsed.
    pub fn from_csv_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| SimError::scenario(format!("cannot open yield grid: {e}")))?;
        Self::from_csv_reader(file)
    }

    fn parse_row(&self, record: &csv::StringRecord) -> SimResult<(Date, Vec<f64>)> {
        if record.len() != self.tenors.len() + 1 {
            return Err(SimError::scenario(format!(
                "expected {} fields, got {}",
                self.tenors.len() + 1,
                record.len()
            )));
        }
        let date = Date::parse(record.get(0).unwrap_or_default())?;
        let mut rates = Vec::with_capacity(self.tenors.len());
        for field in record.iter().skip(1) {
            let pct: f64 = field
                .parse()
                .map_err(|_| SimError::scenario(format!("unparseable rate '{field}'")))?;
            rates.push(pct / 100.0);
        }
        Ok((date, rates))
    }

    /// Inserts a row of decimal rates (not percent).
    ///
    /// # Errors
    ///
    /// Returns a scenario error on a column count mismatch.
    pub fn insert_row(&mut self, date: Date, rates: Vec<f64>) -> SimResult<()> {
        if rates.len() != self.tenors.len() {
            return Err(SimError::scenario(format!(
                "expected {} rates, got {}",
                self.tenors.len(),
                rates.len()
            )));
        }
        self.rows.insert(date, rates);
        Ok(())
    }

    /// The tenor columns.
    #[must_use]
    pub fn tenors(&self) -> &[Tenor] {
        &self.tenors
    }

    /// Number of dated rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First dated row.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.rows.keys().next().copied()
    }

    /// Last dated row.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.rows.keys().next_back().copied()
    }

    /// The most recent row at or before `date`.
    ///
    /// Yields publish on business days only, so a weekend simulation
    /// date reads Friday's row.
    #[must_use]
    pub fn rates_on_or_before(&self, date: Date) -> Option<(Date, &[f64])> {
        self.rows
            .range(..=date)
            .next_back()
            .map(|(d, rates)| (*d, rates.as_slice()))
    }

    /// Par yield quotes for bootstrapping as of `date`.
    ///
    /// Maturities are the tenor offsets from `date` itself, not from the
    /// row's publication date.
    ///
    /// # Errors
    ///
    /// Returns a scenario error if no row exists at or before `date`.
    pub fn quotes_for(&self, date: Date) -> SimResult<Vec<ParYieldQuote>> {
        let (_, rates) = self.rates_on_or_before(date).ok_or_else(|| {
            SimError::scenario(format!("no yield data on or before {date}"))
        })?;

        self.tenors
            .iter()
            .zip(rates)
            .map(|(tenor, &rate)| Ok(ParYieldQuote::new(tenor.maturity_from(date)?, rate)))
            .collect()
    }
}

/// Reads typed instrument rows from CSV, skipping rows that fail to
/// deserialize the way the yield grid skips malformed rows.
fn instrument_rows_from_csv<T, R>(reader: R, what: &str) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.deserialize().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("skipping {what} row {}: {e}", line + 2),
        }
    }
    rows
}

/// An amortizing loan row in a scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanRow {
    /// Original principal.
    pub principal: f64,
    /// Annual rate as a decimal.
    pub rate: f64,
    /// Term in months from the scenario start.
    pub term_months: u32,
}

impl LoanRow {
    /// Reads loan rows from CSV with a `principal,rate,term_months`
    /// header. Unusable rows are skipped with a warning.
    pub fn from_csv_reader<R: Read>(reader: R) -> Vec<Self> {
        instrument_rows_from_csv(reader, "loan")
    }
}

/// A treasury position row in a scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BondRow {
    /// Face value.
    pub face_value: f64,
    /// Annual coupon rate as a decimal.
    pub coupon_rate: f64,
    /// Maturity date.
    pub maturity: Date,
    /// Long or short.
    pub side: Side,
}

impl BondRow {
    /// Reads treasury position rows from CSV with a
    /// `face_value,coupon_rate,maturity,side` header. Unusable rows are
    /// skipped with a warning.
    pub fn from_csv_reader<R: Read>(reader: R) -> Vec<Self> {
        instrument_rows_from_csv(reader, "treasury")
    }
}

/// The full input to a simulation.
///
/// The scalar fields correspond to the scenario's meta sheet; the row
/// vectors to its instrument sheets. Treasury positions land on the
/// trading book, loans and deposits on the banking book.
#[derive(Debug, Clone)]
pub struct ScenarioData {
    /// First simulation date.
    pub start_date: Date,
    /// Common equity scalar.
    pub common_equity: f64,
    /// Opening cash, held on the banking book.
    pub banking_cash: f64,
    /// Non-interest bearing demand deposits.
    pub demand_deposits: f64,
    /// The dated yield grid driving curve rebuilds.
    pub yields: YieldGrid,
    /// Mortgage rows (banking book).
    pub mortgages: Vec<LoanRow>,
    /// C&I loan rows (banking book).
    pub ci_loans: Vec<LoanRow>,
    /// Treasury note rows (trading book).
    pub treasury_notes: Vec<BondRow>,
    /// Treasury bond rows (trading book).
    pub treasury_bonds: Vec<BondRow>,
}

impl ScenarioData {
    /// Creates a scenario with the given start date and yield grid and
    /// no positions.
    #[must_use]
    pub fn new(start_date: Date, yields: YieldGrid) -> Self {
        Self {
            start_date,
            common_equity: 0.0,
            banking_cash: 0.0,
            demand_deposits: 0.0,
            yields,
            mortgages: Vec::new(),
            ci_loans: Vec::new(),
            treasury_notes: Vec::new(),
            treasury_bonds: Vec::new(),
        }
    }

    /// Checks the scenario is internally usable.
    ///
    /// # Errors
    ///
    /// Returns a scenario error if the yield grid cannot serve the start
    /// date.
    pub fn validate(&self) -> SimResult<()> {
        if self.yields.rates_on_or_before(self.start_date).is_none() {
            return Err(SimError::scenario(format!(
                "yield grid starts after the scenario start date {}",
                self.start_date
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_tenor_parsing_both_forms() {
        assert_eq!("1M".parse::<Tenor>().unwrap(), Tenor::from_months(1));
        assert_eq!("3 Mo".parse::<Tenor>().unwrap(), Tenor::from_months(3));
        assert_eq!("10 Yr".parse::<Tenor>().unwrap(), Tenor::from_years(10));
        assert_eq!("30Y".parse::<Tenor>().unwrap(), Tenor::from_months(360));
        assert!("banana".parse::<Tenor>().is_err());
        assert!("0M".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_tenor_display_round_trips() {
        assert_eq!(Tenor::from_months(6).to_string(), "6 Mo");
        assert_eq!(Tenor::from_years(10).to_string(), "10 Yr");
        assert_eq!("10 Yr".parse::<Tenor>().unwrap().to_string(), "10 Yr");
    }

    #[test]
    fn test_grid_from_csv() {
        let csv = "\
Date,1 Mo,3 Mo,1 Yr,10 Yr
2023-03-01,4.50,4.60,4.70,3.85
2023-03-02,4.51,4.61,4.71,3.86
";
        let grid = YieldGrid::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.tenors().len(), 4);

        let (date, rates) = grid.rates_on_or_before(d(2023, 3, 1)).unwrap();
        assert_eq!(date, d(2023, 3, 1));
        assert!((rates[0] - 0.045).abs() < 1e-12);
    }

    #[test]
    fn test_grid_skips_malformed_rows() {
        let csv = "\
Date,1 Mo,3 Mo
2023-03-01,4.50,4.60
not-a-date,4.50,4.60
2023-03-02,4.51,
2023-03-03,4.52,4.62
";
        let grid = YieldGrid::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_weekend_reads_friday_row() {
        let csv = "\
Date,1 Mo,3 Mo
2023-03-03,4.50,4.60
2023-03-06,4.55,4.65
";
        let grid = YieldGrid::from_csv_reader(csv.as_bytes()).unwrap();
        // Saturday falls back to Friday's publication
        let (date, _) = grid.rates_on_or_before(d(2023, 3, 4)).unwrap();
        assert_eq!(date, d(2023, 3, 3));
        assert!(grid.rates_on_or_before(d(2023, 3, 2)).is_none());
    }

    #[test]
    fn test_quotes_maturities_follow_query_date() {
        let csv = "\
Date,1 Mo,1 Yr
2023-03-01,4.50,4.70
";
        let grid = YieldGrid::from_csv_reader(csv.as_bytes()).unwrap();
        let quotes = grid.quotes_for(d(2023, 3, 10)).unwrap();
        assert_eq!(quotes[0].maturity, d(2023, 4, 10));
        assert_eq!(quotes[1].maturity, d(2024, 3, 10));
        assert!((quotes[1].rate - 0.047).abs() < 1e-12);
    }

    #[test]
    fn test_loan_rows_from_csv() {
        let csv = "\
principal,rate,term_months
250000,0.065,360
not-a-number,0.05,120
80000,0.07,60
";
        let rows = LoanRow::from_csv_reader(csv.as_bytes());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].principal, 250_000.0);
        assert_eq!(rows[1].term_months, 60);
    }

    #[test]
    fn test_bond_rows_from_csv() {
        let csv = "\
face_value,coupon_rate,maturity,side
1000000,0.04,2028-03-01,Long
500000,0.045,2033-03-01,Short
";
        let rows = BondRow::from_csv_reader(csv.as_bytes());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].maturity, d(2028, 3, 1));
        assert_eq!(rows[0].side, Side::Long);
        assert_eq!(rows[1].side, Side::Short);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let csv = "Date,1 Mo\ngarbage,row\n";
        assert!(YieldGrid::from_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_scenario_validation() {
        let mut grid = YieldGrid::new(vec![Tenor::from_months(1)]);
        grid.insert_row(d(2023, 3, 1), vec![0.045]).unwrap();
        let scenario = ScenarioData::new(d(2023, 2, 1), grid);
        assert!(scenario.validate().is_err());
    }
}
