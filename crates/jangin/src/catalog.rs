// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Built-in module catalog and layout presets.
//!
//! The catalog is the fixed list of reusable prompt fragments a session can
//! toggle into its configuration. It is supplied at session start and is
//! read-only afterwards; compilation iterates it in catalog order so that
//! output is stable regardless of selection order.

use serde::{Deserialize, Serialize};

/// A reusable prompt fragment offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalModule {
    /// Stable unique identifier.
    pub id: String,
    /// Display name, used as the section heading.
    pub name: String,
    /// The functional-description line of the compiled block.
    pub prompt: String,
}

impl FunctionalModule {
    /// Create a new catalog entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}

/// An ordered, read-only collection of [`FunctionalModule`]s.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    modules: Vec<FunctionalModule>,
}

impl Catalog {
    /// Create a catalog from an explicit module list.
    pub fn new(modules: Vec<FunctionalModule>) -> Self {
        Self { modules }
    }

    /// The built-in catalog of nine standard modules.
    pub fn builtin() -> Self {
        Self::new(vec![
            FunctionalModule::new(
                "md_io",
                "Markdown import/export",
                "Include import and export of Markdown files, with syntax highlighting.",
            ),
            FunctionalModule::new(
                "multi_model",
                "Multi-model configuration",
                "Implement a configuration provider that switches between different AI models.",
            ),
            FunctionalModule::new(
                "preview",
                "Live preview",
                "Enable real-time rendering of generated content in a side preview pane.",
            ),
            FunctionalModule::new(
                "pdf_import",
                "PDF import",
                "Integrate PDF parsing to extract text content for processing.",
            ),
            FunctionalModule::new(
                "pdf_export",
                "PDF export",
                "Provide high-quality PDF generation for analysis reports and summaries.",
            ),
            FunctionalModule::new(
                "analysis",
                "Analysis reports",
                "Add a module that uses AI reasoning to produce structured analysis reports from input data.",
            ),
            FunctionalModule::new(
                "crawler",
                "Web crawler",
                "Accept a website URL and crawl it to gather live information for analysis.",
            ),
            FunctionalModule::new(
                "cors_fix",
                "CORS proxying",
                "Implement a server-side proxy to resolve cross-origin request failures from the frontend.",
            ),
            FunctionalModule::new(
                "loading_win",
                "Progress window",
                "Include a detailed progress bar and loading-state dialog for long-running AI operations.",
            ),
        ])
    }

    /// Modules in catalog order.
    pub fn modules(&self) -> &[FunctionalModule] {
        &self.modules
    }

    /// Look up a module by id.
    pub fn get(&self, id: &str) -> Option<&FunctionalModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Whether the catalog contains the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// The four built-in information-architecture presets.
///
/// Each maps to a fixed template sentence a session can seed its layout
/// description with; the text remains freely editable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Three columns: navigation, main content, auxiliary detail.
    ThreeColumn,
    /// Vertical stack: header, scrollable body, footer.
    Stacked,
    /// Two panes: controls on the left, live output on the right.
    SplitPane,
    /// Collapsible sidebar with a wide dashboard content area.
    SidebarContent,
}

impl LayoutKind {
    /// All presets, in display order.
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::ThreeColumn,
        LayoutKind::Stacked,
        LayoutKind::SplitPane,
        LayoutKind::SidebarContent,
    ];

    /// The template sentence for this preset.
    pub fn template(&self) -> &'static str {
        match self {
            Self::ThreeColumn => {
                "Implement a three-column layout. The left column is for navigation, the middle \
                 column is the main content area, and the right column holds auxiliary widgets \
                 and details. Use responsive widths (e.g. 20%/60%/20%)."
            }
            Self::Stacked => {
                "Implement a vertically stacked layout. The top is a fixed or sticky \
                 header/navigation, the middle is scrollable body content, and the bottom is a \
                 full-featured footer."
            }
            Self::SplitPane => {
                "Implement a modern two-pane interface. The left pane contains controls and \
                 inputs; the right pane provides a live preview or output display. The standard \
                 ratio is 40/60."
            }
            Self::SidebarContent => {
                "Implement a classic admin-style layout with a collapsible sidebar on the left \
                 and an open dashboard content area on the right. Make sure the sidebar toggle \
                 transition is smooth."
            }
        }
    }
}
