//! Batch generation over several family tables.
//!
//! Families are independent: each one is parsed, rendered and written on its
//! own, strictly one after another. A malformed family is reported and the
//! run moves on, so one bad table never hides errors in the next.
use log::{error, info};

use crate::codegen::Backend;
use crate::family::{self, EmitError};
use crate::sink::Sink;
use crate::tables::FamilyTable;

#[derive(Debug)]
pub struct FamilyFailure {
    pub family: String,
    pub error: EmitError,
}

#[derive(Debug, Default)]
pub struct Report {
    /// File names of units handed to the sink, in generation order.
    pub written: Vec<String>,
    pub failures: Vec<FamilyFailure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn run(tables: &[FamilyTable], backend: &dyn Backend, sink: &mut dyn Sink) -> Report {
    let mut report = Report::default();
    for table in tables {
        match family::emit(backend, &table.family, &table.rules, sink) {
            Ok(unit) => {
                info!("{}: {} variants → {}", table.family, table.rules.len(), unit.file_name);
                report.written.push(unit.file_name);
            }
            Err(error) => {
                error!("{}: {error}", table.family);
                report.failures.push(FamilyFailure { family: table.family.clone(), error });
            }
        }
    }
    report
}
