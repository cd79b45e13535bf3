//! Password grid generator for the eight-boss stage select.
//!
//! `entities` holds the data, `compute` the pure encoder, decoder and session
//! transitions. Terminal rendering lives in the binary.

pub mod compute;
pub mod entities;
pub mod error;
