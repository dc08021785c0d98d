//! Doc comment association.
//!
//! A declaration owns the run of doc tag lines directly above it. The run is
//! collected while scanning forward and applied bottom-up, so when a tag is
//! repeated the topmost occurrence is the one that sticks.

use crate::lexer::DocTag;
use crate::model::SignatureEntry;

/// Contiguous doc tags seen since the last non-doc line.
#[derive(Debug, Default)]
pub struct DocRun<'a> {
    tags: Vec<DocTag<'a>>,
}

impl<'a> DocRun<'a> {
    pub fn push(&mut self, tag: DocTag<'a>) {
        self.tags.push(tag);
    }

    /// Any non-doc line breaks the association.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Applies the run to `entry`, walking from the line nearest the declaration upward.
    pub fn apply(&self, entry: &mut SignatureEntry) {
        for tag in self.tags.iter().rev() {
            match tag {
                DocTag::Brief(text) => entry.brief_comment = text.to_string(),
                DocTag::Return(text) => entry.return_comment = text.to_string(),
                DocTag::Param { name, text } => {
                    if let Some(param) = entry.parameter_mut(name) {
                        param.comment = text.to_string();
                    }
                }
                DocTag::Other => {}
            }
        }
    }
}
