#![allow(dead_code)]

use omegasl_ast::Decl;
use omegasl_sem::SemContext;
use omegasl_text::*;

/// Turn a string into declarations for a test
#[track_caller]
fn parse_from_str(source: &str) -> (Vec<Decl>, SourceManager) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut source_manager = SourceManager::new();

    // Add a newline to the end of every test string so errors at the end have a line to print
    let file_id = source_manager.add_file(
        FileName("sem_test.omegasl".to_string()),
        source.to_string() + "\n",
    );

    let tokens = match omegasl_lexer::lex(file_id, &source_manager) {
        Ok(tokens) => tokens,
        Err(err) => panic!("{}{:?}", err.display(&source_manager), err),
    };

    let decls = match omegasl_parser::parse(&tokens) {
        Ok(decls) => decls,
        Err(err) => panic!("{}", err.display(&source_manager)),
    };

    (decls, source_manager)
}

/// Check a source passes and return what it declared
#[track_caller]
pub fn check_context(source: &str) -> SemContext {
    let (decls, source_manager) = parse_from_str(source);

    match omegasl_sem::analyze(&decls, omegasl_ast::Builtins::global()) {
        Ok(context) => context,
        Err(err) => panic!("{}", err.display(&source_manager)),
    }
}

#[track_caller]
pub fn check_types(source: &str) {
    check_context(source);
}

#[track_caller]
pub fn check_fail(source: &str) {
    let (decls, _) = parse_from_str(source);

    if omegasl_sem::analyze(&decls, omegasl_ast::Builtins::global()).is_ok() {
        panic!("Expected semantic check to fail: {}", source)
    }
}

#[track_caller]
pub fn check_fail_message(source: &str, expected_message: &str) {
    let (decls, source_manager) = parse_from_str(source);

    match omegasl_sem::analyze(&decls, omegasl_ast::Builtins::global()) {
        Ok(_) => panic!("Expected semantic check to fail: {}", source),
        Err(err) => {
            let error_print = err.display(&source_manager).to_string();
            assert_eq!(
                error_print,
                expected_message,
                "\n{2}\n{0}{2}\n{1}",
                error_print,
                expected_message,
                "-".repeat(80)
            );
        }
    }
}
