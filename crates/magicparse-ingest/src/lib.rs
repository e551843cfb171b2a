//! Raw row production for magicparse.
//!
//! This crate turns input bytes into a lazy sequence of [`RawRow`]s:
//!
//! - **Decoding**: resolve an encoding label and decode bytes with `encoding_rs`
//! - **Delimited rows**: quoted, delimiter-separated records read with the `csv` crate
//! - **Fixed-width rows**: one row per line, sliced later by character offset
//!
//! The [`RowSource`] trait is the seam schemas consume, so custom file types
//! only need to implement it.
//!
//! # Example
//!
//! ```
//! use magicparse_ingest::{DelimitedSource, RawRow, RowSource, decode, resolve_encoding};
//!
//! let encoding = resolve_encoding("utf-8").unwrap();
//! let text = decode(b"name,age\nJos\xc3\xa9,42\n", encoding);
//!
//! let source = DelimitedSource::new(b',', true);
//! let rows: Vec<RawRow> = source.rows(&text).collect();
//!
//! assert_eq!(rows, vec![RawRow::Cells(vec!["José".into(), "42".into()])]);
//! ```

mod encoding;
mod row;
mod source;

pub use encoding::{decode, resolve_encoding};
pub use row::RawRow;
pub use source::{DelimitedSource, FixedWidthSource, RowSource};

pub use encoding_rs::Encoding;
