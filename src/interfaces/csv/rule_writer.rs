use crate::domain::rule::PayoutRule;
use crate::error::Result;
use std::io::Write;

/// Writes payout rules in the same CSV layout [`super::rule_reader::RuleReader`] reads.
pub struct RuleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RuleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_rules(&mut self, rules: &[PayoutRule]) -> Result<()> {
        for rule in rules {
            self.writer.serialize(rule)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
