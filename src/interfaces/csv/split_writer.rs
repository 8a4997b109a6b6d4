use crate::domain::split::{Allocation, AllocationKind, SplitResult};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SplitRow<'a> {
    label: &'a str,
    amount: Decimal,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    label: &'a str,
    amount: Decimal,
    kind: AllocationKind,
}

/// Renders a [`SplitResult`] for display.
///
/// Amounts are rounded to `precision` places here and nowhere else.
pub struct SplitWriter<W: Write> {
    sink: W,
    precision: u32,
}

impl<W: Write> SplitWriter<W> {
    pub fn new(sink: W, precision: u32) -> Self {
        Self { sink, precision }
    }

    fn rounded(&self, allocation: &Allocation) -> Decimal {
        allocation.amount.rounded(self.precision)
    }

    /// Writes `label,amount` rows. The header is written even for an empty split.
    pub fn write_csv(&mut self, split: &SplitResult) -> Result<()> {
        let precision = self.precision;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut self.sink);
        writer.write_record(["label", "amount"])?;
        for allocation in split.allocations() {
            writer.serialize(SplitRow {
                label: &allocation.label,
                amount: allocation.amount.rounded(precision),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes a JSON array of `{label, amount, kind}` objects.
    pub fn write_json(&mut self, split: &SplitResult) -> Result<()> {
        let rows: Vec<JsonRow<'_>> = split
            .allocations()
            .iter()
            .map(|allocation| JsonRow {
                label: &allocation.label,
                amount: self.rounded(allocation),
                kind: allocation.kind,
            })
            .collect();
        serde_json::to_writer_pretty(&mut self.sink, &rows).map_err(std::io::Error::from)?;
        writeln!(self.sink)?;
        Ok(())
    }
}
