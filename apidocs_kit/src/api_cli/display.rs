//! Terminal formatting of rendered content.

use colored::Colorize;
use docs_core::catalog::SchemaDetail;
use docs_core::picker::{PickerStatus, ResourcePicker};
use docs_core::{ContentVariant, NavigationState, RenderedDoc, ResourcePage, Section, SectionPage};
use std::fmt::Write;

const INDENT: &str = "    ";

/// The section menu, marking the active section.
pub fn sections(nav: &NavigationState) -> String {
    let mut out = String::new();
    for section in Section::ALL {
        let marker = if section == nav.section() { "*" } else { " " };
        let _ = writeln!(out, "{} {:<18} {}", marker, section.key().bold(), section.menu_name());
    }
    out.trim_end().to_string()
}

pub fn content(variant: &ContentVariant) -> String {
    if let Some(page) = variant.section_page() {
        return section_page(page);
    }
    match (variant.resource_page(), variant.load_error()) {
        (Some(page), _) => resource_page(page),
        (None, Some(error)) => format!(
            "{} {}\n{}",
            "failed to load:".red(),
            error,
            "retry with `refresh`".dimmed()
        ),
        (None, None) => "Nothing to show: the selected resource is not in the current catalog."
            .dimmed()
            .to_string(),
    }
}

fn section_page(page: &SectionPage) -> String {
    let mut out = format!("{}\n", page.title.bold().underline());
    for doc in &page.docs {
        write_doc(&mut out, doc);
    }

    if let Some(kind) = page.section.resource_kind() {
        let _ = writeln!(out, "\n{}", format!("{} ({})", kind.label(), page.resources.len()).bold());
        if let Some(error) = &page.load_error {
            let _ = writeln!(out, "{}{} {}", INDENT, "failed to load:".red(), error);
            let _ = writeln!(
                out,
                "{}{}",
                INDENT,
                format!("retry with `refresh` or `go {}`", page.section.key()).dimmed()
            );
        } else if page.resources.is_empty() {
            let _ = writeln!(out, "{}{}", INDENT, "none found".dimmed());
        }
        for entry in &page.resources {
            let _ = writeln!(out, "{}{}", INDENT, entry.name);
        }
    }
    out.trim_end().to_string()
}

fn resource_page(page: &ResourcePage) -> String {
    let mut out = format!(
        "{} {}\n",
        page.entry.name.bold().underline(),
        format!("({})", page.kind.label()).dimmed()
    );
    if let Some(schema) = &page.schema {
        write_schema(&mut out, schema);
    }
    for doc in &page.docs {
        write_doc(&mut out, doc);
    }
    out.trim_end().to_string()
}

fn write_schema(out: &mut String, schema: &SchemaDetail) {
    if let Some(description) = &schema.description {
        let _ = writeln!(out, "{}", description);
    }
    for column in &schema.columns {
        let format = column.format.as_deref().unwrap_or("unknown");
        let required = if column.required { "required" } else { "optional" };
        let _ = writeln!(out, "{}{} {} {}", INDENT, column.name.bold(), format.cyan(), required.dimmed());
    }
    for parameter in &schema.parameters {
        let format = parameter.format.as_deref().unwrap_or("unknown");
        let _ = writeln!(out, "{}{} {}", INDENT, parameter.name.bold(), format.cyan());
    }
}

fn write_doc(out: &mut String, doc: &RenderedDoc) {
    let _ = writeln!(out, "\n{}", format!("## {}", doc.title).cyan().bold());
    if let Some(description) = &doc.description {
        let _ = writeln!(out, "{}", description);
    }
    if let Some(url) = &doc.docs_url {
        let _ = writeln!(out, "{}", url.blue().underline());
    }
    for snippet in doc.snippets.iter().filter(|snippet| !(snippet.is_placeholder && doc.description.is_some())) {
        if let Some(title) = &snippet.title {
            let _ = writeln!(out, "\n{}{}", INDENT, title.yellow());
        }
        if snippet.is_placeholder {
            let _ = writeln!(out, "{}{}", INDENT, snippet.source.dimmed());
            continue;
        }
        for line in snippet.source.lines() {
            let _ = writeln!(out, "{}{}", INDENT, line.green());
        }
    }
}

/// The picker's results and fetch status.
pub fn picker(picker: &ResourcePicker) -> String {
    let mut out = String::new();
    let query = picker.query().debounced_query().unwrap_or("*");
    let status = match picker.status() {
        PickerStatus::LoadingMore => " (loading more)",
        PickerStatus::Empty => " (no matches)",
        PickerStatus::Idle | PickerStatus::Searching if picker.is_loading() => " (loading)",
        PickerStatus::Idle | PickerStatus::Searching => "",
    };
    let _ = writeln!(out, "{}{}", format!("{} matching '{}'", picker.category(), query).bold(), status);
    for entry in picker.items() {
        let _ = writeln!(out, "{}{}", INDENT, entry.name);
    }
    if picker.has_more() {
        let _ = writeln!(out, "{}", "more results: type `more`".dimmed());
    }
    if let Some(e) = picker.last_error() {
        let _ = writeln!(out, "{} {}", "fetch failed:".red(), e);
    }
    out.trim_end().to_string()
}
