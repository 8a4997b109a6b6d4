pub mod rule_reader;
pub mod rule_writer;
pub mod split_writer;
