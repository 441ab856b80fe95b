//! File level entry point
//!
//!     [GedcomReader] reads one GEDCOM input into a [Parsed] result: the whole input is
//!     buffered, sniffed, decoded, split into physical lines and fed to a
//!     [Parser](super::Parser).
//!
//! Charset Restart
//!
//!     Decoding starts with the charset sniffed from the raw bytes. When the header's
//!     `CHAR` line names a different charset, the input has no byte order mark, contains
//!     bytes outside ASCII, and `reader.restart_on_charset_change` is set, the parse is
//!     thrown away and run again from the buffer with the declared charset. This happens
//!     at most once per read.
//!
//! Lexical Errors
//!
//!     With `reader.stop_on_error` (the default) the first line that cannot be lexed ends the
//!     read: the result carries the error and the records read so far. Otherwise the line
//!     is skipped, recorded as a `lexical-error` diagnostic, and the read goes on.

use super::config::{GedcomConfig, Loader};
use super::encoding::{Charset, DefaultTranscoder, Transcoder};
use super::error::{LexError, ReadError};
use super::lexing::{Newline, PhysicalLines};
use super::parsing::{ParseObserver, Parsed, Parser};
use super::token::LineToken;
use log::info;
use std::fs;
use std::path::Path;

/// DOS end-of-file marker some producers still append.
const EOF_MARKER: u8 = 0x1A;

/// Reads exactly one input; every `read_*` method consumes the reader.
pub struct GedcomReader<'a> {
    config: GedcomConfig,
    observer: Option<&'a mut dyn ParseObserver>,
    transcoder: Box<dyn Transcoder + 'a>,
}

enum Pass {
    Done(Parsed),
    Restart(Charset),
}

impl<'a> GedcomReader<'a> {
    pub fn new(config: GedcomConfig) -> Self {
        Self {
            config,
            observer: None,
            transcoder: Box::new(DefaultTranscoder),
        }
    }

    /// A reader configured by `loader`, failing with [ReadError::Config] when the layers do
    /// not build.
    pub fn from_loader(loader: Loader) -> Result<Self, ReadError> {
        Ok(Self::new(loader.build()?))
    }

    /// A reader configured by a TOML file layered over the defaults.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        Self::from_loader(Loader::new().layer_file(path, true))
    }

    pub fn with_observer(mut self, observer: &'a mut dyn ParseObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_transcoder(mut self, transcoder: impl Transcoder + 'a) -> Self {
        self.transcoder = Box::new(transcoder);
        self
    }

    pub fn read(self, path: impl AsRef<Path>) -> Result<Parsed, ReadError> {
        let path = path.as_ref();
        info!("event=read_start path={}", path.display());
        let bytes = fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_bytes(&bytes)
    }

    pub fn read_bytes(mut self, bytes: &[u8]) -> Result<Parsed, ReadError> {
        let bytes = match bytes {
            [rest @ .., EOF_MARKER] => rest,
            _ => bytes,
        };
        let sniffed = self.transcoder.sniff(bytes);
        let body = &bytes[sniffed.bom..];
        let mut silent = ();
        let observer: &mut dyn ParseObserver = match self.observer.take() {
            Some(observer) => observer,
            None => &mut silent,
        };
        let mut charset = sniffed.charset;
        let mut may_restart = self.config.reader.restart_on_charset_change
            && sniffed.bom == 0
            && !bytes.is_ascii();

        loop {
            let text = self.transcoder.decode(body, charset);
            match run(&self.config, &text, charset, may_restart, &mut *observer) {
                Pass::Done(mut parsed) => {
                    parsed.charset = Some(charset);
                    return Ok(parsed);
                }
                Pass::Restart(declared) => {
                    info!(
                        "event=charset_restart sniffed={} declared={}",
                        charset, declared
                    );
                    charset = declared;
                    may_restart = false;
                }
            }
        }
    }

    /// Read text that is already decoded. The header's `CHAR` line is recorded but never
    /// triggers a restart.
    pub fn read_str(mut self, source: &str) -> Result<Parsed, ReadError> {
        self.config.reader.restart_on_charset_change = false;
        self.read_bytes(source.as_bytes())
    }
}

/// Notifications sent while the charset may still change, delivered once it cannot.
#[derive(Default)]
struct HeldBack {
    events: Vec<Held>,
}

enum Held {
    Tag(LineToken),
    Error(LexError),
    Progress(u8),
}

impl ParseObserver for HeldBack {
    fn tag_found(&mut self, token: &LineToken) {
        self.events.push(Held::Tag(token.clone()));
    }

    fn parse_error(&mut self, error: &LexError) {
        self.events.push(Held::Error(error.clone()));
    }

    fn progress(&mut self, percent: u8) {
        self.events.push(Held::Progress(percent));
    }
}

impl HeldBack {
    fn release(&mut self, observer: &mut dyn ParseObserver) {
        for event in self.events.drain(..) {
            match event {
                Held::Tag(token) => observer.tag_found(&token),
                Held::Error(error) => observer.parse_error(&error),
                Held::Progress(percent) => observer.progress(percent),
            }
        }
    }
}

/// One pass over decoded text.
///
/// Until the header has declared its charset (or closed without one) notifications are
/// held back, so a pass that ends in a restart sends the observer nothing.
fn run(
    config: &GedcomConfig,
    text: &str,
    decoded_as: Charset,
    may_restart: bool,
    observer: &mut dyn ParseObserver,
) -> Pass {
    let newline = Newline::detect(text);
    let mut parser = Parser::new(config, newline);
    let total = text.len().max(1);
    let mut reported = None;
    let mut charset_checked = !may_restart;
    let mut held = HeldBack::default();

    for line in PhysicalLines::new(text, newline) {
        let fed = if charset_checked {
            parser.feed_line(line.text, line.number, &mut *observer)
        } else {
            parser.feed_line(line.text, line.number, &mut held)
        };

        if !charset_checked {
            if let Some(declared) = parser.declared_charset() {
                charset_checked = true;
                if let Some(declared) = Charset::from_declared(declared) {
                    if declared != decoded_as && !declared.is_wide() {
                        return Pass::Restart(declared);
                    }
                }
            } else if parser.past_header() {
                charset_checked = true;
            }
            if charset_checked {
                held.release(&mut *observer);
            }
        }

        if let Err(error) = fed {
            if config.reader.stop_on_error {
                held.release(&mut *observer);
                return Pass::Done(parser.abandon(error));
            }
            parser.record_error(&error);
        }

        let percent = (line.end * 100 / total).min(100) as u8;
        if reported != Some(percent) {
            reported = Some(percent);
            if charset_checked {
                observer.progress(percent);
            } else {
                held.progress(percent);
            }
        }
    }
    held.release(&mut *observer);
    if reported != Some(100) {
        observer.progress(100);
    }
    Pass::Done(parser.finish())
}
