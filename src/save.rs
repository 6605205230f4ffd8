//! Persistence for the mattered-day store.
//!
//! The host owns the real save pipeline; these helpers cover the standalone
//! case of scribing the store to a JSON file and reading it back.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::ecs::resources::MatteredDayStore;

/// Write the store as a single JSON document.
pub fn write_store(store: &MatteredDayStore, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, store)?;
    writer.flush()
}

/// Read a store written by [`write_store`].
pub fn read_store(path: &Path) -> io::Result<MatteredDayStore> {
    let reader = BufReader::new(File::open(path)?);
    let store = serde_json::from_reader(reader)?;
    Ok(store)
}
