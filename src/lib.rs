//! GPX track conversion to tabular rows, with optional stopover detection.
//!
//! Trackpoints are read from a GPX file ([`parsers`]), optionally collapsed
//! into stopovers ([`processor`]) and written as CSV or JSON ([`outputs`]).

pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod parsers;
pub mod processor;

pub use error::{ConvertError, Result};
