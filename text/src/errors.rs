use crate::*;

/// Trait to be implemented by the error type of each compilation stage
pub trait CompileError {
    fn print(&self, w: &mut MessagePrinter) -> std::fmt::Result;
}

/// Formatter for printing compile errors with source references
pub struct MessagePrinter<'s, 'f> {
    source_manager: &'s SourceManager,
    formatter: &'s mut std::fmt::Formatter<'f>,
}

/// Diagnostic severity
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Severity {
    Error,
    Note,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Note => write!(f, "note"),
        }
    }
}

impl<'s, 'f> MessagePrinter<'s, 'f> {
    /// Write a single diagnostic line followed by the offending source line if it is known
    pub fn write_message(
        &mut self,
        write: &dyn Fn(&mut std::fmt::Formatter) -> std::fmt::Result,
        loc: SourceLocation,
        severity: Severity,
    ) -> std::fmt::Result {
        if loc == SourceLocation::UNKNOWN {
            write!(self.formatter, "{}: ", severity)?;
            write(self.formatter)?;
            return writeln!(self.formatter);
        }

        let file_location = self.source_manager.get_file_location(loc);
        write!(self.formatter, "{}: {}: ", file_location, severity)?;
        write(self.formatter)?;
        writeln!(self.formatter)?;

        self.source_manager
            .write_source_for_error(self.formatter, Some(loc))
    }
}

/// Extension trait for [CompileError]
pub trait CompileErrorExt {
    /// Return a type that can be used with [Display][std::fmt::Display]
    fn display<'p>(&'p self, source_manager: &'p SourceManager) -> CompileErrorPrinter<'p>;

    /// Render the full diagnostic into a string
    fn to_text(&self, source_manager: &SourceManager) -> String {
        format!("{}", self.display(source_manager))
    }
}

impl<T: CompileError + Sized> CompileErrorExt for T {
    fn display<'p>(&'p self, source_manager: &'p SourceManager) -> CompileErrorPrinter<'p> {
        CompileErrorPrinter {
            error: self,
            source_manager,
        }
    }
}

/// Helper type that allows errors to be printed with [Display][std::fmt::Display]
pub struct CompileErrorPrinter<'p> {
    error: &'p dyn CompileError,
    source_manager: &'p SourceManager,
}

impl<'a> std::fmt::Display for CompileErrorPrinter<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut message_printer = MessagePrinter {
            source_manager: self.source_manager,
            formatter: f,
        };
        self.error.print(&mut message_printer)
    }
}
