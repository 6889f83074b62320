//! This module handles conversion from iCal feeds to internal representations
//!
//! It is a wrapper around a third-party parsing library, so that the rest of the crate
//! never has to deal with raw iCal properties.

mod parser;
pub(crate) use parser::parse_candidates;
