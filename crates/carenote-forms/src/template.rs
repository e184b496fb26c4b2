//! Fragment templates.
//!
//! A template is literal text with `{name}` and `{name?}` slots. A plain slot
//! is required: if its value is absent the whole template renders to nothing.
//! A `?` slot is optional and renders empty when absent.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Text(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| format!("unclosed '{{' in \"{source}\""))?;
            let inner = &after[..close];
            let (name, optional) = match inner.strip_suffix('?') {
                Some(name) => (name, true),
                None => (inner, false),
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(format!("invalid placeholder '{{{inner}}}' in \"{source}\""));
            }
            segments.push(Segment::Slot(Placeholder {
                name: name.to_string(),
                optional,
            }));
            rest = &after[close + 1..];
        }

        if rest.contains('}') {
            return Err(format!("stray '}}' in \"{source}\""));
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(p) => Some(p),
            Segment::Text(_) => None,
        })
    }

    /// Fill the slots. Returns `None` when a required slot has no value.
    pub fn render<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(p) => match lookup(&p.name) {
                    Some(value) => out.push_str(&value),
                    None if p.optional => {}
                    None => return None,
                },
            }
        }
        Some(out)
    }
}
