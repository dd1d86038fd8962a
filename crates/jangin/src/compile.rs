// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Deterministic prompt compilation.
//!
//! [`compile`] maps a [`PromptConfig`] snapshot to the canonical markdown
//! document. It is total and pure: no side effects, no failure mode, and
//! structurally equal inputs always produce byte-identical output. Unset
//! free-text sections compile to fixed placeholder sentences so the
//! document is well-formed even for an empty config.

use crate::catalog::Catalog;
use crate::config::{EntryKind, PromptConfig};

/// Placeholder emitted when no project definition has been written.
pub const PROJECT_PLACEHOLDER: &str = "No project definition provided yet.";

/// Placeholder emitted when no layout description has been written.
pub const LAYOUT_PLACEHOLDER: &str = "Standard flexible layout.";

/// Default execution steps emitted when the config defines none.
pub const DEFAULT_STEPS: &str = "1. Analyze the requirements\n\
                                 2. Build the core architecture\n\
                                 3. Implement the feature modules\n\
                                 4. Optimize and test";

const AI_PLACEHOLDER: &str = "[to be completed by AI]";

/// Compile a configuration into the canonical prompt document.
///
/// Selected catalog modules render in catalog order (not selection order)
/// so output is stable; ids with no catalog entry are silently skipped.
/// Step entries are numbered 1-based among step entries only.
pub fn compile(catalog: &Catalog, config: &PromptConfig) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(8);

    sections.push("# System role: AI software architect".to_string());

    sections.push(format!(
        "## Project definition\n{}",
        or_placeholder(&config.project_definition, PROJECT_PLACEHOLDER)
    ));

    sections.push(format!(
        "## Information architecture and layout\n{}",
        or_placeholder(&config.ia_prompt, LAYOUT_PLACEHOLDER)
    ));

    for module in catalog.modules() {
        if config.is_selected(&module.id) {
            sections.push(module_block(&module.name, &module.prompt));
        }
    }

    for entry in config.entries_of(EntryKind::Module) {
        sections.push(module_block(&entry.title, &entry.content));
    }

    let steps: Vec<String> = config
        .entries_of(EntryKind::Step)
        .enumerate()
        .map(|(i, entry)| format!("{}. **{}**: {}", i + 1, entry.title, entry.content))
        .collect();
    let steps = if steps.is_empty() {
        DEFAULT_STEPS.to_string()
    } else {
        steps.join("\n")
    };
    sections.push(format!("## Execution steps\n{}", steps));

    sections.push(
        "## General instructions\n\
         1. Strictly follow the architecture defined above.\n\
         2. Implement every feature module with high-quality code.\n\
         3. Keep the UI responsive and visually consistent.\n\
         4. Provide a clear and maintainable file structure."
            .to_string(),
    );

    sections.join("\n\n").trim().to_string()
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}

/// The four-line block shape shared by catalog and custom modules.
fn module_block(name: &str, description: &str) -> String {
    format!(
        "## {name}\n\
         - Functional description: {description}\n\
         - Rendering optimization: {AI_PLACEHOLDER}\n\
         - Style optimization: {AI_PLACEHOLDER}\n\
         - Performance optimization: {AI_PLACEHOLDER}"
    )
}
