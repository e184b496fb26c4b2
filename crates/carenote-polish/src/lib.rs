//! carenote-polish
//!
//! Optional AI rewrite of a composed note via the Bedrock Converse API.
//! A failed or unconfigured polish never loses the original text.

pub mod bedrock;
pub mod error;
pub mod polish;
