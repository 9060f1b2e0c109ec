//! Core types for corate
//!
//! This crate defines the foundational types shared by every layer:
//! - Id: dense integer identifier issued by the interner
//! - TokenKind: type tag recorded alongside each interned token
//! - EventKind: interaction event taxonomy with its engagement weight scale
//! - Interaction / Recommendation: the engine's input and output records
//! - Error: error type hierarchy
//! - Config structs: validated construction parameters for each component

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{DiscountConfig, DitherConfig, InternerConfig, ItemCfConfig, RecommenderConfig};
pub use error::{Error, Result};
pub use types::{EventKind, Id, Interaction, Recommendation, TokenKind};
