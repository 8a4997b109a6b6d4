#![allow(dead_code)]

use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: [&str; 6] = [
    "id",
    "recipient_id",
    "recipient_name",
    "type",
    "value",
    "role_label",
];

/// Writes the given rows under the rules header into a temp file.
pub fn rules_file(rows: &[[&str; 6]]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut wtr = csv::Writer::from_path(file.path()).unwrap();
    wtr.write_record(HEADER).unwrap();
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
    file
}

/// Generates `rows` rules: a handful of flat rates and small percentages.
pub fn generate_rules_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    let mut rng = rand::thread_rng();
    for i in 1..=rows {
        let (kind, value) = if i % 10 == 0 {
            ("FLAT_RATE", format!("{}.{:02}", rng.gen_range(0..50), rng.gen_range(0..100)))
        } else {
            ("PERCENTAGE", format!("0.000{}", rng.gen_range(0..5)))
        };
        wtr.write_record([
            format!("r{i}").as_str(),
            format!("m{}", i % 500).as_str(),
            format!("Member {i}").as_str(),
            kind,
            value.as_str(),
            "Crew",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
