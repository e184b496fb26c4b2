//! Declarative form schemas.
//!
//! A schema is an ordered list of field definitions, derived day counters,
//! and note fragments. Every reference a fragment or counter makes is
//! checked in [`FormSchemaBuilder::build`], so a schema that exists is one
//! the composer can always render.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use carenote_core::models::field_group::FieldGroup;

use crate::error::FormError;
use crate::template::Template;

/// Slot name a list fragment's template uses for the joined items.
pub const LIST_ITEMS: &str = "items";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Text,
    Date,
    Select,
    Checkbox,
    Multiline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One input slot of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FieldDef {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            default: String::new(),
            options: Vec::new(),
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Multiline)
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// A select whose options are given as `(value, label)` pairs.
    pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let mut def = Self::new(name, label, FieldKind::Select);
        def.options = options
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect();
        def
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default = value.to_string();
        self
    }
}

/// How a derived day counter is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Counter {
    /// A treatment course with a required start and an optional end date.
    Course { start: String, end: Option<String> },
    /// A fixed-length window counted from `start` and clamped to `days`.
    Window { start: String, days: u32 },
}

impl Counter {
    pub fn course(start: &str, end: Option<&str>) -> Self {
        Counter::Course {
            start: start.to_string(),
            end: end.map(str::to_string),
        }
    }

    pub fn window(start: &str, days: u32) -> Self {
        Counter::Window {
            start: start.to_string(),
            days,
        }
    }

    fn date_fields(&self) -> Vec<&str> {
        match self {
            Counter::Course { start, end } => {
                let mut fields = vec![start.as_str()];
                if let Some(end) = end {
                    fields.push(end.as_str());
                }
                fields
            }
            Counter::Window { start, .. } => vec![start.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DerivedDef {
    pub name: String,
    pub counter: Counter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCase {
    pub value: String,
    pub clause: String,
}

/// One optional (or boilerplate) sentence of a note, in declaration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Fragment {
    /// Always rendered, verbatim.
    Boilerplate { text: String },
    /// `"{label}: {Value}."` when the field is filled.
    Labeled { label: String, field: String },
    /// A template; dropped when any required slot is empty.
    Template { template: String },
    /// A canned clause per field value. Unmapped values render nothing.
    Enumerated { field: String, cases: Vec<EnumCase> },
    /// One item per non-empty line of a multiline field, joined into `{items}`.
    List {
        field: String,
        template: String,
        separator: String,
    },
}

impl Fragment {
    pub fn boilerplate(text: &str) -> Self {
        Fragment::Boilerplate {
            text: text.to_string(),
        }
    }

    pub fn labeled(label: &str, field: &str) -> Self {
        Fragment::Labeled {
            label: label.to_string(),
            field: field.to_string(),
        }
    }

    pub fn template(template: &str) -> Self {
        Fragment::Template {
            template: template.to_string(),
        }
    }

    pub fn enumerated(field: &str, cases: &[(&str, &str)]) -> Self {
        Fragment::Enumerated {
            field: field.to_string(),
            cases: cases
                .iter()
                .map(|(value, clause)| EnumCase {
                    value: value.to_string(),
                    clause: clause.to_string(),
                })
                .collect(),
        }
    }

    pub fn list(field: &str, template: &str, separator: &str) -> Self {
        Fragment::List {
            field: field.to_string(),
            template: template.to_string(),
            separator: separator.to_string(),
        }
    }
}

/// A fragment after its templates were parsed and its references checked.
#[derive(Debug, Clone)]
pub(crate) enum Rule {
    Boilerplate(String),
    Labeled {
        label: String,
        field: String,
    },
    Template(Template),
    Enumerated {
        field: String,
        checkbox: bool,
        cases: Vec<(String, Template)>,
    },
    List {
        field: String,
        template: Template,
        separator: String,
    },
}

/// A registered form: fields, counters and fragments, all cross-checked.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    id: String,
    name: String,
    fields: Vec<FieldDef>,
    derived: Vec<DerivedDef>,
    fragments: Vec<Fragment>,
    #[serde(skip)]
    rules: Vec<Rule>,
}

impl FormSchema {
    pub fn builder(id: &str, name: &str) -> FormSchemaBuilder {
        FormSchemaBuilder {
            id: id.to_string(),
            name: name.to_string(),
            fields: Vec::new(),
            derived: Vec::new(),
            fragments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn derived(&self) -> &[DerivedDef] {
        &self.derived
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub(crate) fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// A fresh FieldGroup holding every field's default value.
    pub fn defaults(&self) -> FieldGroup {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }
}

pub struct FormSchemaBuilder {
    id: String,
    name: String,
    fields: Vec<FieldDef>,
    derived: Vec<DerivedDef>,
    fragments: Vec<Fragment>,
}

impl FormSchemaBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn derived(mut self, name: &str, counter: Counter) -> Self {
        self.derived.push(DerivedDef {
            name: name.to_string(),
            counter,
        });
        self
    }

    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Check every reference and compile the fragments.
    pub fn build(self) -> Result<FormSchema, FormError> {
        let form = self.id.clone();

        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField {
                    form,
                    field: field.name.clone(),
                });
            }
        }

        for def in &self.derived {
            for date_field in def.counter.date_fields() {
                match self.fields.iter().find(|f| f.name == date_field) {
                    Some(f) if f.kind == FieldKind::Date => {}
                    Some(_) => {
                        return Err(FormError::NotADateField {
                            form,
                            counter: def.name.clone(),
                            field: date_field.to_string(),
                        });
                    }
                    None => {
                        return Err(FormError::InvalidCounter {
                            form,
                            counter: def.name.clone(),
                            reason: format!("references undefined field '{date_field}'"),
                        });
                    }
                }
            }
            if let Counter::Window { days: 0, .. } = def.counter {
                return Err(FormError::InvalidCounter {
                    form,
                    counter: def.name.clone(),
                    reason: "window must span at least one day".to_string(),
                });
            }
            if !names.insert(def.name.as_str()) {
                return Err(FormError::DuplicateField {
                    form,
                    field: def.name.clone(),
                });
            }
        }

        let mut rules = Vec::with_capacity(self.fragments.len());
        for (index, fragment) in self.fragments.iter().enumerate() {
            let ctx = CompileContext {
                form: &form,
                index,
                names: &names,
                fields: &self.fields,
            };
            rules.push(ctx.compile(fragment)?);
        }

        tracing::debug!(
            form = %self.id,
            fields = self.fields.len(),
            fragments = rules.len(),
            "form schema registered"
        );

        Ok(FormSchema {
            id: self.id,
            name: self.name,
            fields: self.fields,
            derived: self.derived,
            fragments: self.fragments,
            rules,
        })
    }
}

struct CompileContext<'a> {
    form: &'a str,
    index: usize,
    names: &'a HashSet<&'a str>,
    fields: &'a [FieldDef],
}

impl CompileContext<'_> {
    fn compile(&self, fragment: &Fragment) -> Result<Rule, FormError> {
        match fragment {
            Fragment::Boilerplate { text } => Ok(Rule::Boilerplate(text.clone())),
            Fragment::Labeled { label, field } => {
                self.check_name(field)?;
                Ok(Rule::Labeled {
                    label: label.clone(),
                    field: field.clone(),
                })
            }
            Fragment::Template { template } => {
                let template = self.parse(template, &[])?;
                Ok(Rule::Template(template))
            }
            Fragment::Enumerated { field, cases } => {
                let def = self.field_def(field)?;
                let mut compiled = Vec::with_capacity(cases.len());
                for case in cases {
                    let possible = match def.kind {
                        FieldKind::Select => def.options.iter().any(|o| o.value == case.value),
                        FieldKind::Checkbox => case.value == "true" || case.value == "false",
                        _ => true,
                    };
                    if !possible {
                        return Err(FormError::UnknownOption {
                            form: self.form.to_string(),
                            index: self.index,
                            field: field.clone(),
                            value: case.value.clone(),
                        });
                    }
                    compiled.push((case.value.clone(), self.parse(&case.clause, &[])?));
                }
                Ok(Rule::Enumerated {
                    field: field.clone(),
                    checkbox: def.kind == FieldKind::Checkbox,
                    cases: compiled,
                })
            }
            Fragment::List {
                field,
                template,
                separator,
            } => {
                self.field_def(field)?;
                let template = self.parse(template, &[LIST_ITEMS])?;
                if !template.placeholders().any(|p| p.name == LIST_ITEMS) {
                    return Err(self.malformed(format!(
                        "list template \"{}\" has no {{{LIST_ITEMS}}} slot",
                        template.source()
                    )));
                }
                Ok(Rule::List {
                    field: field.clone(),
                    template,
                    separator: separator.clone(),
                })
            }
        }
    }

    fn parse(&self, source: &str, reserved: &[&str]) -> Result<Template, FormError> {
        let template = Template::parse(source).map_err(|reason| self.malformed(reason))?;
        for placeholder in template.placeholders() {
            if !reserved.contains(&placeholder.name.as_str()) {
                self.check_name(&placeholder.name)?;
            }
        }
        Ok(template)
    }

    fn check_name(&self, name: &str) -> Result<(), FormError> {
        if self.names.contains(name) {
            Ok(())
        } else {
            Err(self.unknown(name))
        }
    }

    fn field_def(&self, name: &str) -> Result<&FieldDef, FormError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, name: &str) -> FormError {
        FormError::UnknownReference {
            form: self.form.to_string(),
            index: self.index,
            name: name.to_string(),
        }
    }

    fn malformed(&self, reason: String) -> FormError {
        FormError::MalformedTemplate {
            form: self.form.to_string(),
            index: self.index,
            reason,
        }
    }
}
