//! Configuration loader.
//!
//! Reader settings come in three groups: `lexer` (which deviations from the line grammar are
//! tolerated), `reader` (charset restart and what a lexical error does to the read) and
//! `records` (names the parse invents). `defaults/gedcom.default.toml` is compiled in and is
//! the base layer of every [`Loader`]; [`GedcomConfig::default`] gives the same values.

use crate::gedcom::lexing::LexOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/gedcom.default.toml");

/// Top-level configuration for one reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GedcomConfig {
    pub lexer: LexOptions,
    pub reader: ReaderOptions,
    pub records: RecordOptions,
}

impl GedcomConfig {
    /// The defaults with every lexer relaxation turned off.
    pub fn strict() -> Self {
        Self {
            lexer: LexOptions::strict(),
            ..Self::default()
        }
    }
}

/// File level behavior of [GedcomReader](crate::gedcom::GedcomReader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
    pub restart_on_charset_change: bool,
    pub stop_on_error: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            restart_on_charset_change: true,
            stop_on_error: true,
        }
    }
}

/// Knobs of the assembler and the fix-up pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOptions {
    pub placeholder_source_title: String,
    pub generated_xref_prefix: String,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            placeholder_source_title: "Source".to_string(),
            generated_xref_prefix: "X".to_string(),
        }
    }
}

/// Builds a [GedcomConfig] from TOML layers over the embedded defaults.
///
/// Layers apply in the order they are added and win key by key, so a file that only sets
/// `[reader] stop_on_error` keeps every other default.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(toml_text(DEFAULT_TOML)),
        }
    }

    /// Add a TOML file. A missing file is an error only when `required` is set.
    pub fn layer_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add TOML text held in memory, such as a `[lexer]` table kept next to a project.
    pub fn layer_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(toml_text(toml));
        self
    }

    /// Set one dotted key, `("records.generated_xref_prefix", "GEN")`.
    pub fn set<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<GedcomConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_text(text: &str) -> File<config::FileSourceString, FileFormat> {
    File::from_str(text, FileFormat::Toml)
}

/// The embedded defaults, deserialized.
pub fn load_defaults() -> Result<GedcomConfig, ConfigError> {
    Loader::new().build()
}
