//! Ordered card population.
//!
//! A card is filled by a list of steps, each resolving one selector inside
//! the card and writing to what it finds. The driver stops at the first
//! required selector that resolves to nothing; everything written before
//! that point stays written.

use tracing::debug;

use crate::dom::{NodeId, RenderTarget, Selector, SelectorError};

/// How a step resolves its selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// First match; a miss aborts the card
    Required,
    /// First match; a miss skips only this step
    Optional,
    /// Every match, possibly none
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Text(String),
    Attribute(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct CardStep {
    pub selector: Selector,
    pub lookup: Lookup,
    pub writes: Vec<Write>,
}

impl CardStep {
    pub fn new(selector: &str, lookup: Lookup, writes: Vec<Write>) -> Result<Self, SelectorError> {
        Ok(Self {
            selector: Selector::parse(selector)?,
            lookup,
            writes,
        })
    }

    pub fn required(selector: &str, writes: Vec<Write>) -> Result<Self, SelectorError> {
        Self::new(selector, Lookup::Required, writes)
    }

    pub fn optional(selector: &str, writes: Vec<Write>) -> Result<Self, SelectorError> {
        Self::new(selector, Lookup::Optional, writes)
    }

    pub fn all(selector: &str, writes: Vec<Write>) -> Result<Self, SelectorError> {
        Self::new(selector, Lookup::All, writes)
    }
}

/// Outcome of populating one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReport {
    pub completed: usize,
    pub total: usize,
    /// Selector of the required anchor that was missing
    pub aborted_at: Option<String>,
}

impl CardReport {
    pub fn is_complete(&self) -> bool {
        self.aborted_at.is_none()
    }
}

fn apply_writes<T: RenderTarget + ?Sized>(target: &mut T, node: NodeId, writes: &[Write]) {
    for write in writes {
        match write {
            Write::Text(text) => target.set_text(node, text),
            Write::Attribute(name, value) => target.set_attribute(node, name, value),
        }
    }
}

/// Runs `steps` in order inside `scope`
pub fn apply_steps<T: RenderTarget + ?Sized>(
    target: &mut T,
    scope: NodeId,
    steps: &[CardStep],
) -> CardReport {
    let total = steps.len();

    for (completed, step) in steps.iter().enumerate() {
        match step.lookup {
            Lookup::All => {
                for node in target.query_all(scope, &step.selector) {
                    apply_writes(target, node, &step.writes);
                }
            }
            Lookup::Optional => {
                if let Some(node) = target.query(scope, &step.selector) {
                    apply_writes(target, node, &step.writes);
                }
            }
            Lookup::Required => {
                let Some(node) = target.query(scope, &step.selector) else {
                    debug!(selector = %step.selector, completed, total, "Card anchor missing");
                    return CardReport {
                        completed,
                        total,
                        aborted_at: Some(step.selector.to_string()),
                    };
                };
                apply_writes(target, node, &step.writes);
            }
        }
    }

    CardReport {
        completed: total,
        total,
        aborted_at: None,
    }
}
