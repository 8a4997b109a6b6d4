use crate::domain::rule::PayoutRule;
use crate::error::{Result, SplitError};
use std::io::Read;

/// Reads payout rules from a CSV source.
///
/// Expects the header `id,recipient_id,recipient_name,type,value,role_label`.
/// Whitespace around fields is trimmed.
pub struct RuleReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RuleReader<R> {
    /// Creates a new `RuleReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rules.
    pub fn rules(self) -> impl Iterator<Item = Result<PayoutRule>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(SplitError::from))
    }

    /// Reads every rule in declared order, failing on the first malformed row.
    pub fn read_all(self) -> Result<Vec<PayoutRule>> {
        self.rules().collect()
    }
}
