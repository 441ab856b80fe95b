//! Line feeder
//!
//!     [Parser] owns one lexer and one assembler for the lifetime of a single parse. Feed it
//!     the physical lines of a decoded text in order, then call [Parser::finish]. A lexical
//!     error is returned to the caller, who decides whether to stop ([Parser::abandon]) or
//!     to note it and keep feeding ([Parser::record_error]).

use super::assembler::Assembler;
use super::{fixup, ParseObserver, Parsed};
use crate::gedcom::config::GedcomConfig;
use crate::gedcom::diagnostics::{Diagnostic, DiagnosticSeverity};
use crate::gedcom::error::LexError;
use crate::gedcom::lexing::{Lexer, Newline, PhysicalLines};
use log::info;

#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    assembler: Assembler,
    lines: usize,
    past_header: bool,
}

impl Parser {
    /// `newline` is the file's line terminator, used to join `CONT` lines.
    pub fn new(config: &GedcomConfig, newline: Newline) -> Self {
        Self {
            lexer: Lexer::new(config.lexer),
            assembler: Assembler::new(config.records.clone(), newline),
            lines: 0,
            past_header: false,
        }
    }

    /// Parse a whole decoded text, stopping at the first lexical error.
    pub fn parse_str(config: &GedcomConfig, source: &str) -> Parsed {
        let mut parser = Parser::new(config, Newline::detect(source));
        for line in PhysicalLines::new(source, parser.newline()) {
            if let Err(error) = parser.feed_line(line.text, line.number, &mut ()) {
                return parser.abandon(error);
            }
        }
        parser.finish()
    }

    /// Lex one physical line and hand the token to the assembler.
    pub fn feed_line(
        &mut self,
        line: &str,
        number: usize,
        observer: &mut dyn ParseObserver,
    ) -> Result<(), LexError> {
        self.lines = number;
        match self.lexer.lex_line(line, number) {
            Ok(Some(token)) => {
                if token.level == 0 && !token.is_tag("HEAD") {
                    self.past_header = true;
                }
                observer.tag_found(&token);
                self.assembler.consume(&token);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(error) => {
                observer.parse_error(&error);
                Err(error)
            }
        }
    }

    pub fn newline(&self) -> Newline {
        self.assembler.state().scope.newline
    }

    /// The header's `CHAR` value, once the line has been read.
    pub fn declared_charset(&self) -> Option<&str> {
        self.assembler.state().scope.declared_charset.as_deref()
    }

    /// Whether a level 0 line other than `HEAD` has been read, so no `CHAR` line can follow.
    pub fn past_header(&self) -> bool {
        self.past_header
    }

    /// Keep a skipped line as an error diagnostic and carry on.
    pub fn record_error(&mut self, error: &LexError) {
        self.assembler.state_mut().scope.diagnostics.push(
            Diagnostic::new(
                error.line,
                DiagnosticSeverity::Error,
                format!("line skipped: {}", error),
            )
            .with_code("lexical-error"),
        );
    }

    /// Close what is still open, run the fix-up pass and hand over the result.
    pub fn finish(self) -> Parsed {
        self.complete(None)
    }

    /// Stop after a lexical error. The records read so far are kept and fixed up.
    pub fn abandon(self, error: LexError) -> Parsed {
        self.complete(Some(error))
    }

    fn complete(mut self, error: Option<LexError>) -> Parsed {
        self.assembler.close_all();
        let mut state = self.assembler.into_state();
        fixup::run(&mut state.scope);
        info!(
            "event=parse_done lines={} records={} diagnostics={} failed={}",
            self.lines,
            state.scope.database.len(),
            state.scope.diagnostics.len(),
            error.is_some()
        );
        Parsed {
            database: state.scope.database,
            diagnostics: state.scope.diagnostics.into_vec(),
            error,
            charset: None,
        }
    }
}
