//! Testing utilities
//!
//! # Reader Testing Guidelines
//!
//! Tests of the reader use two tools together:
//!
//! 1. **[Samples]** for GEDCOM input
//! 2. **[assert_db](fn@assert_db)** for checking what ended up in the database
//!
//! ## Rule 1: Prefer Samples for Whole Files
//!
//! GEDCOM is whitespace and terminator sensitive. A sample written inline in a Rust string
//! easily loses a trailing space or a CR, and then the test checks something other than
//! what it claims. Files under `samples/` are kept byte exact, and a change in the reader
//! that affects them shows up in every test using them.
//!
//! ```rust-example
//! use crate::gedcom::testing::Samples;
//!
//! let parsed = Samples::parse("scenario-a")?;
//! ```
//!
//! Short inline fragments remain fine for unit tests of a single handler or lexer rule.
//!
//! ## Rule 2: Use assert_db for Record Checks
//!
//! ```rust-example
//! use crate::gedcom::testing::assert_db;
//!
//! assert_db(&parsed.database)
//!     .record_count(4)
//!     .individual("I1", |person| {
//!         person.name("John /Doe/").sex(Sex::Male).child_in("F1")
//!     })
//!     .family("F1", |family| family.husband("I2").children(&["I1"]));
//! ```
//!
//! Failures name the record and the field that differed.

mod samples;
mod testing_assertions;

pub use samples::{SampleError, Samples};
pub use testing_assertions::{assert_db, DatabaseAssertion, FamilyAssertion, IndividualAssertion};
