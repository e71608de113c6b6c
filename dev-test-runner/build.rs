//! Generates the built-in Lox families with the Rust backend so the tests in
//! this crate compile and dispatch through real generated code.
use std::path::PathBuf;

use astgen::codegen::Target;
use astgen::sink::DirSink;

fn main() {
    println!("cargo:rerun-if-changed=../src");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let backend = Target::Rust.default_backend();
    let mut sink = DirSink::new(&out_dir);
    let report = astgen::driver::run(&astgen::tables::builtin(Target::Rust), backend.as_ref(), &mut sink);
    if let Some(failure) = report.failures.first() {
        panic!("failed to generate {}: {}", failure.family, failure.error);
    }
}
