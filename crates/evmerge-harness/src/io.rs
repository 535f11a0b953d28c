//! JSON files for workloads and index sequences.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use evmerge_types::Workload;

use crate::error::HarnessResult;

pub fn read_workload(path: &Path) -> HarnessResult<Workload> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_workload(path: &Path, workload: &Workload) -> HarnessResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, workload)?;
    writer.flush()?;
    Ok(())
}

pub fn read_indices(path: &Path) -> HarnessResult<Vec<usize>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_indices(path: &Path, indices: &[usize]) -> HarnessResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, indices)?;
    writer.flush()?;
    Ok(())
}
