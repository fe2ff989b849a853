use std::{
    fs::{self, File},
    io::{Read, Write},
    path::Path,
};

use anyhow::Context;
use log::info;

use crate::record_set::{Cell, RecordSet};

pub fn write_records<W: Write>(records: &RecordSet, writer: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(records.columns())?;
    for row in records.rows() {
        writer.write_record(row.iter().map(Cell::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a headed CSV; empty fields become missing and numeric fields numbers.
pub fn read_records<R: Read>(reader: R) -> anyhow::Result<RecordSet> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let mut records = RecordSet::new(columns);
    for result in reader.records() {
        let record = result?;
        records.push_row(record.iter().map(Cell::parse).collect())?;
    }
    Ok(records)
}

pub fn write_csv(records: &RecordSet, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_records(records, file).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Saved {} rows to {}", records.len(), path.display());
    Ok(())
}

pub fn read_csv(path: impl AsRef<Path>) -> anyhow::Result<RecordSet> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_records(file).with_context(|| format!("failed to read {}", path.display()))
}
