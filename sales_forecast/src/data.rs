//! Monthly sales history and the sale ledger it is aggregated from

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Aggregate sales for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// Calendar month, 1 (January) to 12 (December)
    #[serde(rename = "mes")]
    pub month: u32,
    /// Sum of sale totals for the month
    #[serde(rename = "total_ventas")]
    pub total: f64,
}

impl MonthlySales {
    pub fn new(month: u32, total: f64) -> Self {
        Self { month, total }
    }
}

/// A numeric field as a data store hands it over.
///
/// Aggregates commonly come back as decimal strings rather than numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawNumber {
    /// Numeric value, if the field holds one
    pub fn coerce(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok(),
            RawNumber::Missing => None,
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<u32> for RawNumber {
    fn from(value: u32) -> Self {
        RawNumber::Number(f64::from(value))
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// Loosely-typed monthly row, before validation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMonthlySales {
    #[serde(default)]
    pub mes: RawNumber,
    #[serde(default)]
    pub total_ventas: RawNumber,
}

impl RawMonthlySales {
    pub fn new(mes: impl Into<RawNumber>, total_ventas: impl Into<RawNumber>) -> Self {
        Self {
            mes: mes.into(),
            total_ventas: total_ventas.into(),
        }
    }
}

impl From<MonthlySales> for RawMonthlySales {
    fn from(sales: MonthlySales) -> Self {
        Self::new(sales.month, sales.total)
    }
}

/// Validated history: months in 1..=12, chronological within a span of less
/// than a year (December may be followed by January), totals finite and
/// non-negative
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SalesHistory {
    entries: Vec<MonthlySales>,
}

impl SalesHistory {
    /// Validate already-typed monthly totals
    pub fn new(entries: Vec<MonthlySales>) -> Result<Self> {
        for (idx, entry) in entries.iter().enumerate() {
            check_month(idx + 1, f64::from(entry.month))?;
            check_total(idx + 1, entry.total)?;
        }
        check_chronological(&entries)?;

        Ok(Self { entries })
    }

    /// Coerce and validate raw rows from a data source
    pub fn from_raw(rows: Vec<RawMonthlySales>) -> Result<Self> {
        let mut entries = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;

            let month = row
                .mes
                .coerce()
                .ok_or_else(|| ForecastError::invalid(row_number, "month is not numeric"))?;
            let month = check_month(row_number, month)?;

            let total = row
                .total_ventas
                .coerce()
                .ok_or_else(|| ForecastError::invalid(row_number, "total is not numeric"))?;
            check_total(row_number, total)?;

            entries.push(MonthlySales { month, total });
        }
        check_chronological(&entries)?;

        Ok(Self { entries })
    }

    /// Totals in sequence order
    pub fn totals(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.total).collect()
    }

    pub fn last(&self) -> Option<&MonthlySales> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlySales> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[MonthlySales] {
        &self.entries
    }

    pub fn into_inner(self) -> Vec<MonthlySales> {
        self.entries
    }

    /// Months with no observation between the first and last entry
    pub fn calendar_gaps(&self) -> Vec<u32> {
        self.entries
            .windows(2)
            .flat_map(|pair| {
                let start = pair[0].month;
                let step = months_between(start, pair[1].month);
                (1..step).map(move |k| (start + k - 1) % 12 + 1)
            })
            .collect()
    }
}

fn check_month(row: usize, month: f64) -> Result<u32> {
    if month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
        return Err(ForecastError::invalid(
            row,
            format!("month {} is not a calendar month (1-12)", month),
        ));
    }
    Ok(month as u32)
}

fn check_total(row: usize, total: f64) -> Result<()> {
    if !total.is_finite() || total < 0.0 {
        return Err(ForecastError::invalid(
            row,
            format!("total {} must be a finite non-negative amount", total),
        ));
    }
    Ok(())
}

/// Forward distance in months from `from` to `to`, 0 when equal
fn months_between(from: u32, to: u32) -> u32 {
    (to + 12 - from) % 12
}

fn check_chronological(entries: &[MonthlySales]) -> Result<()> {
    let mut span = 0;
    for (idx, pair) in entries.windows(2).enumerate() {
        let step = months_between(pair[0].month, pair[1].month);
        span += step;
        if step == 0 || span > 11 {
            return Err(ForecastError::invalid(
                idx + 2,
                format!(
                    "month {} does not follow month {} (history must be chronological and span less than a year)",
                    pair[1].month, pair[0].month
                ),
            ));
        }
    }
    Ok(())
}

/// One sale as recorded in the `venta` ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub fecha: NaiveDate,
    pub total: f64,
}

impl SaleRecord {
    pub fn new(fecha: NaiveDate, total: f64) -> Self {
        Self {
            id: None,
            fecha,
            total,
        }
    }
}

/// Sum sales per `(year, month)` and keep the latest `limit` months, oldest
/// first.
///
/// Only months within the twelve months ending at the most recent sale are
/// eligible, so each calendar month appears at most once.
pub fn monthly_totals(records: &[SaleRecord], limit: usize) -> Vec<MonthlySales> {
    let mut by_period: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in records {
        *by_period
            .entry((record.fecha.year(), record.fecha.month()))
            .or_insert(0.0) += record.total;
    }

    let Some(&(last_year, last_month)) = by_period.keys().next_back() else {
        return Vec::new();
    };
    let latest = period_index(last_year, last_month);

    let recent: Vec<((i32, u32), f64)> = by_period
        .into_iter()
        .filter(|&((year, month), _)| latest - period_index(year, month) < 12)
        .collect();

    let skip = recent.len().saturating_sub(limit);
    recent
        .into_iter()
        .skip(skip)
        .map(|((_, month), total)| MonthlySales { month, total })
        .collect()
}

fn period_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

/// In-memory sale ledger
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    records: Vec<SaleRecord>,
}

impl SalesLedger {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    /// Load a ledger from a CSV file with an `id,fecha,total` header
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a ledger from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for (idx, row) in csv_reader.deserialize::<SaleRecord>().enumerate() {
            let record = row?;
            check_total(idx + 1, record.total)?;
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn push(&mut self, record: SaleRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn monthly_totals(&self, limit: usize) -> Vec<MonthlySales> {
        monthly_totals(&self.records, limit)
    }
}
