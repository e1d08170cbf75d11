//! # farscope
//!
//! Load, summarize, and map yearly traffic-fatality report files.
//!
//! Report files are delimited text named `accident_<year>.csv.bz2`, one row
//! per reported vehicle/person entry. This crate reads them into polars
//! frames, tabulates monthly accident counts across years, and renders the
//! accident locations of one state as a scatter map.
//!
//! ## Modules
//!
//! - [`error`] - Typed failure kinds
//! - [`files`] - Report filenames and data-directory discovery
//! - [`load`] - Reading report files into frames, per-year batch loading
//! - [`summary`] - Monthly accident counts pivoted by year
//! - [`plot`] - State scatter maps

pub mod error;
pub mod files;
pub mod load;
pub mod plot;
pub mod summary;

pub use error::{Error, Result};
