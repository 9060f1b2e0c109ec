//! Shared types for corate
//!
//! This module defines the records that flow between the interner, the
//! engines, and the rerankers:
//! - Id: dense integer identifier issued by the interner
//! - TokenKind: type tag stored alongside each interned token
//! - EventKind: interaction taxonomy and its engagement weight scale
//! - Interaction: one user/item event as seen by an engine
//! - Recommendation: one scored entry of a recommendation list

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dense integer identifier issued by the interner.
///
/// Ids are allocated from a strictly monotonic counter and never reused.
/// At the store boundary they travel as decimal strings.
pub type Id = u64;

// ============================================================================
// TokenKind
// ============================================================================

/// Type tag recorded for each interned token.
///
/// The interner stores one of eight value categories next to every id so
/// that a token can be reported back with the category it was interned
/// under. Codes are stable small integers and part of the stored format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenKind {
    /// Absent / unit value
    Null = 1,
    /// Boolean
    Bool = 2,
    /// Numeric value
    Number = 3,
    /// UTF-8 text (the default for plain string tokens)
    Text = 4,
    /// Raw bytes
    Bytes = 5,
    /// Sequence value
    Array = 6,
    /// Keyed structure
    Object = 7,
    /// Anything the caller treats as uninterpreted
    Opaque = 8,
}

impl TokenKind {
    /// The stored code for this kind
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a stored code, `None` if out of range
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TokenKind::Null),
            2 => Some(TokenKind::Bool),
            3 => Some(TokenKind::Number),
            4 => Some(TokenKind::Text),
            5 => Some(TokenKind::Bytes),
            6 => Some(TokenKind::Array),
            7 => Some(TokenKind::Object),
            8 => Some(TokenKind::Opaque),
            _ => None,
        }
    }

    /// Lowercase name, used in logs
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Null => "null",
            TokenKind::Bool => "bool",
            TokenKind::Number => "number",
            TokenKind::Text => "text",
            TokenKind::Bytes => "bytes",
            TokenKind::Array => "array",
            TokenKind::Object => "object",
            TokenKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// EventKind
// ============================================================================

/// Interaction event taxonomy.
///
/// The default weight scale is monotone in engagement; the update protocol
/// relies on that ordering (a weaker event never overrides a stronger one).
/// Impressions carry zero weight and are inert for similarity maintenance —
/// only the discounting reranker is interested in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The item was shown to the user
    Impression,
    /// The user opened the item
    View,
    /// The user clicked through
    Click,
    /// The user added the item to their cart
    AddToCart,
    /// The user bought the item
    Purchase,
}

impl EventKind {
    /// Engagement weight used when the caller does not supply one
    pub fn default_weight(self) -> f64 {
        match self {
            EventKind::Impression => 0.0,
            EventKind::View => 1.0,
            EventKind::Click => 2.0,
            EventKind::AddToCart => 3.0,
            EventKind::Purchase => 5.0,
        }
    }

    /// Impressions never touch engine state
    pub fn is_impression(self) -> bool {
        matches!(self, EventKind::Impression)
    }

    /// Wire name of this event
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Impression => "impression",
            EventKind::View => "view",
            EventKind::Click => "click",
            EventKind::AddToCart => "add_to_cart",
            EventKind::Purchase => "purchase",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EventKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "impression" => Ok(EventKind::Impression),
            "view" => Ok(EventKind::View),
            "click" => Ok(EventKind::Click),
            "add_to_cart" => Ok(EventKind::AddToCart),
            "purchase" | "buy" => Ok(EventKind::Purchase),
            other => Err(crate::error::Error::invalid_config(format!(
                "unknown event kind: {other}"
            ))),
        }
    }
}

// ============================================================================
// Interaction / Recommendation
// ============================================================================

/// One user/item event, as handed to an engine.
///
/// The user id travels separately; engines receive `(user, &Interaction)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Item-interner id of the item
    pub item: Id,
    /// Event taxonomy entry
    pub kind: EventKind,
    /// Engagement weight; defaults to `kind.default_weight()`
    pub weight: f64,
}

impl Interaction {
    /// Build an interaction carrying the kind's default weight
    pub fn new(item: Id, kind: EventKind) -> Self {
        Interaction {
            item,
            kind,
            weight: kind.default_weight(),
        }
    }

    /// Builder: override the weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// One entry of a recommendation list.
///
/// Scores are non-negative and, after normalization, sum to 1 across the
/// list within floating-point tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Item-interner id of the recommended item
    pub item: Id,
    /// Normalized predicted score
    pub score: f64,
}

impl Recommendation {
    /// Build a recommendation entry
    pub fn new(item: Id, score: f64) -> Self {
        Recommendation { item, score }
    }
}
