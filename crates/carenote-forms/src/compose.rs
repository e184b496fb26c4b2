//! Note assembly.
//!
//! [`compose`] walks a schema's fragments in order, renders each against the
//! FieldGroup and derived values, joins the non-empty ones with a space, and
//! normalizes the result.

use carenote_core::models::field_group::FieldGroup;

use crate::derived::DerivedFieldSet;
use crate::schema::{FormSchema, LIST_ITEMS, Rule};

/// Assemble the note text. Pure; missing optional inputs are simply omitted.
pub fn compose(schema: &FormSchema, fields: &FieldGroup, derived: &DerivedFieldSet) -> String {
    let lookup = |name: &str| -> Option<String> {
        if derived.contains(name) {
            derived.get(name).map(str::to_string)
        } else {
            fields.filled(name).map(str::to_string)
        }
    };

    let parts: Vec<String> = schema
        .rules()
        .iter()
        .filter_map(|rule| render(rule, fields, &lookup))
        .filter(|part| !part.trim().is_empty())
        .collect();

    normalize(&parts.join(" "))
}

fn render<F>(rule: &Rule, fields: &FieldGroup, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match rule {
        Rule::Boilerplate(text) => Some(text.clone()),
        Rule::Labeled { label, field } => {
            let value = lookup(field)?;
            Some(format!("{label}: {}", ensure_terminal(&capitalize_first(&value))))
        }
        Rule::Template(template) => template.render(lookup),
        Rule::Enumerated {
            field,
            checkbox,
            cases,
        } => {
            let value = if *checkbox {
                if fields.is_checked(field) { "true" } else { "false" }
            } else {
                fields.filled(field)?
            };
            cases
                .iter()
                .find(|(case, _)| case == value)
                .and_then(|(_, clause)| clause.render(lookup))
        }
        Rule::List {
            field,
            template,
            separator,
        } => {
            let items: Vec<&str> = fields
                .filled(field)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            if items.is_empty() {
                return None;
            }
            let joined = items.join(separator);
            template.render(|name| {
                if name == LIST_ITEMS {
                    Some(joined.clone())
                } else {
                    lookup(name)
                }
            })
        }
    }
}

/// Collapse whitespace runs to one space, drop spaces before a period,
/// collapse repeated periods, drop a period right after `?` or `!`, and trim.
/// Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if c == '.' {
            pending_space = false;
            if !out.ends_with(['.', '?', '!']) {
                out.push('.');
            }
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }

    out
}

/// Upper-case the first character when it is a lowercase letter.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => value.to_string(),
    }
}

/// Append a period unless the text already ends in `.`, `!` or `?`.
pub fn ensure_terminal(value: &str) -> String {
    let trimmed = value.trim_end();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}
