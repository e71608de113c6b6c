//! Destinations for generated units. Each unit arrives in one call, so a
//! family's file is never left half written by another family.
use std::io::{self, Write};
use std::path::PathBuf;

use log::info;

use crate::family::GeneratedUnit;

pub trait Sink {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()>;
}

/// Writes `<dir>/<file_name>`, creating the directory on first use.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Sink for DirSink {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&unit.file_name);
        std::fs::write(&path, &unit.source)?;
        info!("wrote {} ({} bytes)", path.display(), unit.source.len());
        Ok(())
    }
}

/// Streams every unit to a writer, each preceded by a banner naming its file.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()> {
        let mut text = format!("// ---- {} ----\n", unit.file_name);
        text.push_str(&unit.source);
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}

/// Keeps units in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub units: Vec<GeneratedUnit>,
}

impl Sink for MemorySink {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()> {
        self.units.push(unit.clone());
        Ok(())
    }
}
