//! Content-based engine stub
//!
//! Concrete null implementation of the engine contract. It records nothing
//! and recommends nothing; it exists so the orchestrator's fan-out runs
//! over more than one engine until a real content-based scorer lands.

use crate::Engine;
use corate_core::{Id, Interaction, Recommendation, Result};

/// Null content-based engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentEngine;

impl ContentEngine {
    /// Create the stub
    pub fn new() -> Self {
        ContentEngine
    }
}

impl Engine for ContentEngine {
    fn name(&self) -> &str {
        "content"
    }

    fn record(&self, _user: Id, _interaction: &Interaction) -> Result<()> {
        Ok(())
    }

    fn recommend(&self, _user: Id, _limit: usize) -> Result<Vec<Recommendation>> {
        Ok(Vec::new())
    }
}
