//! Internationalization (i18n) module for Leafscan.
//!
//! This module provides the static localization table and translation map helpers.
//!
//! # Overview
//!
//! - **Static Table**: A compile-time list of `(key, English, Tagalog)` rows in declared order.
//!   Both languages carry the exact same key set by construction.
//! - **Translation Maps**: Keyed maps built from the table or from a live translation batch.
//! - **Translation Lookup**: `translate_with_fallback` resolves a key against the active map,
//!   then English, then returns the key itself.
//!
//! # Live Translation
//!
//! Live translation sends the English column, in declared order, to a translator and zips the
//! results back onto the keys with [`assemble_translations`]. An incomplete batch never produces
//! a partial map; the caller falls back to [`static_translations`] instead.

mod table;
pub mod translations;

pub use table::{STATIC_TABLE, TableRow, english_rows, static_text, static_translations};
pub use translations::{TranslationMap, assemble_translations, translate, translate_with_fallback};
