//! CLI: grammar tables → (C# | Rust) visitor hierarchies
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;

use astgen::codegen::{Backend, CSharpBackend, RustBackend, Target};
use astgen::driver::{self, Report};
use astgen::sink::{DirSink, Sink, WriterSink};
use astgen::tables::{self, FamilyTable};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate visitor-pattern AST hierarchies from family grammar tables
///
/// With no subcommand, generates the built-in Lox `Expr` and `Stmt` families
/// as C# into the current directory.
#[derive(Parser, Debug)]
#[command(name = "astgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// more logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit C# abstract classes with a nested IVisitor<R> interface
    Csharp(CSharpOut),
    /// emit a Rust visitor trait, base enum and one struct per variant
    Rust(RustOut),
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// JSON grammar files (`{"Expr": ["Binary : Expr left, ..."]}`); literal
    /// paths or quoted glob patterns. Built-in Lox tables if omitted.
    #[arg(long, short, num_args = 1..)]
    grammar: Vec<String>,

    /// output directory, one file per family
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// print every unit to stdout instead of writing files
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// debugging: print the parsed command line and exit
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CSharpOut {
    #[command(flatten)]
    output: OutputSettings,

    /// namespace wrapping every generated class
    #[arg(long, default_value = "cslox")]
    namespace: String,
}

#[derive(clap::Parser, Debug)]
struct RustOut {
    #[command(flatten)]
    output: OutputSettings,

    /// derives attached to the base enum and every variant struct
    #[arg(long, value_delimiter = ',', default_value = "Debug,Clone,PartialEq")]
    derive: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OutputSettings {
    fn load_tables(&self, target: Target) -> Result<Vec<FamilyTable>> {
        if self.grammar.is_empty() {
            return Ok(tables::builtin(target));
        }
        let source_paths = self.grammar_paths()?;

        // one unit per family name, so a family defined twice would overwrite itself
        let mut families = IndexMap::<String, FamilyTable>::new();
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read grammar file {}", source_path.display()))?;
            let parsed = tables::parse_grammar_json(&source)
                .map_err(|error| anyhow!("{}: {error}", source_path.display()))?;
            for table in parsed {
                if families.contains_key(&table.family) {
                    bail!("family `{}` is defined more than once ({})", table.family, source_path.display());
                }
                families.insert(table.family.clone(), table);
            }
        }
        Ok(families.into_values().collect())
    }

    /// Every `--grammar` entry goes through `glob`; a literal path matches
    /// itself when it exists.
    fn grammar_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for pattern in &self.grammar {
            let mut matched = glob::glob(pattern)
                .with_context(|| format!("invalid grammar path pattern `{pattern}`"))?
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("failed to expand `{pattern}`"))?;
            if matched.is_empty() {
                bail!("no grammar file matches `{pattern}`");
            }
            // glob order is filesystem order; sort so family order is stable
            matched.sort();
            paths.append(&mut matched);
        }
        Ok(paths)
    }

    fn generate(&self, target: Target, backend: &dyn Backend) -> Result<Report> {
        let tables = self.load_tables(target)?;
        let mut sink: Box<dyn Sink> = if self.stdout {
            Box::new(WriterSink::new(std::io::stdout().lock()))
        } else {
            Box::new(DirSink::new(&self.out_dir))
        };
        Ok(driver::run(&tables, backend, sink.as_mut()))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn run(&self) -> Result<Report> {
        let report = match &self.cmd {
            None => OutputSettings::default().generate(Target::CSharp, &CSharpBackend::default())?,
            Some(Command::Csharp(target)) if target.output.no_op => return self.no_op(),
            Some(Command::Rust(target)) if target.output.no_op => return self.no_op(),
            Some(Command::Csharp(target)) => {
                let backend = CSharpBackend::new(&target.namespace);
                target.output.generate(Target::CSharp, &backend)?
            }
            Some(Command::Rust(target)) => {
                let backend = RustBackend::with_derives(target.derive.iter().map(|d| d.trim()));
                target.output.generate(Target::Rust, &backend)?
            }
        };
        print_summary(&report);
        Ok(report)
    }

    fn no_op(&self) -> Result<Report> {
        eprintln!("{self:#?}");
        Ok(Report::default())
    }
}

/// Settings of a bare `astgen` invocation.
impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            grammar: Vec::new(),
            out_dir: PathBuf::from("."),
            stdout: false,
            no_op: false,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn print_summary(report: &Report) {
    for file_name in &report.written {
        eprintln!("{} {file_name}", "✅".green());
    }
    for failure in &report.failures {
        eprintln!("{} {}: {}", "❌".red(), failure.family.bold(), failure.error);
    }
}
