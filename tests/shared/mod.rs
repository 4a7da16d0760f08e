#![allow(dead_code)]

use omegasl::{CompileArgs, CompiledUnit};

pub const TEST_FILE_NAME: &str = "test.omegasl";

/// Compile a string with the default arguments
#[track_caller]
pub fn compile_str(source: &str) -> CompiledUnit {
    let _ = env_logger::builder().is_test(true).try_init();

    // Add a newline to the end of every test string so errors at the end have a line to print
    let source = source.to_string() + "\n";
    match omegasl::compile(CompileArgs::new(TEST_FILE_NAME, &source)) {
        Ok(unit) => unit,
        Err(err) => panic!("{}", err),
    }
}

/// Check a string fails to compile and return the rendered error
#[track_caller]
pub fn compile_fail(source: &str) -> String {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = source.to_string() + "\n";
    match omegasl::compile(CompileArgs::new(TEST_FILE_NAME, &source)) {
        Ok(unit) => panic!("expected compile to fail but it produced {:?}", unit.library),
        Err(err) => err.to_string(),
    }
}

/// Check a string fails to compile with an error message containing the given text
#[track_caller]
pub fn check_fail_message(source: &str, expected: &str) {
    let message = compile_fail(source);
    assert!(
        message.contains(expected),
        "\n{}\nexpected the error to contain: {}",
        message,
        expected
    );
}
