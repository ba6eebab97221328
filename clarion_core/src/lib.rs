//! Core of `clarion`.
//! See the `clarion` crate for the full documentation.
#![deny(missing_docs)]
mod api;
mod codec;
mod constant;
mod error;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use codec::*;
pub use error::*;
pub use model::*;
pub use parser::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
