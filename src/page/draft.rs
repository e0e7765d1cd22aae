//! Page drafts and validated pages

use serde::{Deserialize, Serialize};

use super::sequence::{ContentSequence, StreamChild, TemplateBinding};
use crate::core::block::BlockError;
use crate::core::field::StructValue;

/// Unvalidated page as submitted by the editing surface or read from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Vec<StreamChild>,
}

impl PageDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            content: Vec::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Append a block to the content sequence
    pub fn with_block(mut self, kind: impl Into<String>, value: StructValue) -> Self {
        self.content.push(StreamChild::new(kind, value));
        self
    }
}

/// Page whose scalar fields and content sequence passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub content: ContentSequence,
}

impl Page {
    /// Draft holding this page's persisted form
    pub fn to_draft(&self) -> PageDraft {
        PageDraft {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            content: self.content.to_stream(),
        }
    }

    /// Typed blocks with their templates, in render order
    pub fn template_bindings(&self) -> Result<Vec<TemplateBinding<'_>>, BlockError> {
        self.content.template_bindings()
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
