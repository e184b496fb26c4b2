//! Full-text search over the loaded KB sections.
//!
//! The index lives in RAM and is rebuilt from a snapshot's `SearchDoc`s; it
//! is never persisted.

use serde::Serialize;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{self, STORED, STRING, Schema, TEXT, Value};
use tantivy::{Index, IndexReader, IndexWriter, TantivyDocument};

use carenote_core::models::kb::SearchDoc;

use crate::error::KbError;

/// Field names used in the KB search index.
pub mod field {
    pub const ID: &str = "id";
    pub const SOURCE_ID: &str = "source_id";
    pub const SECTION_ID: &str = "section_id";
    pub const DOC_TYPE: &str = "doc_type";
    pub const TITLE: &str = "title";
    pub const HEADING: &str = "heading";
    pub const TEXT: &str = "text";
    pub const TAGS: &str = "tags";
}

const WRITER_MEMORY_BYTES: usize = 15_000_000;

pub fn build_schema() -> Schema {
    let mut builder = Schema::builder();

    builder.add_text_field(field::ID, STRING | STORED);
    builder.add_text_field(field::SOURCE_ID, STRING | STORED);
    builder.add_text_field(field::SECTION_ID, STRING | STORED);
    builder.add_text_field(field::DOC_TYPE, STRING | STORED);

    builder.add_text_field(field::TITLE, TEXT | STORED);
    builder.add_text_field(field::HEADING, TEXT | STORED);
    builder.add_text_field(field::TEXT, TEXT);
    builder.add_text_field(field::TAGS, TEXT);

    builder.build()
}

/// # Panics
///
/// Panics if `name` is not in the schema. Only called with the constants in
/// [`field`].
fn get_field(schema: &Schema, name: &str) -> schema::Field {
    schema
        .get_field(name)
        .unwrap_or_else(|_| panic!("field '{name}' not found in schema"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub source_id: String,
    pub section_id: String,
    pub doc_type: String,
    pub title: String,
    pub heading: String,
    pub score: f32,
}

pub struct KbSearch {
    index: Index,
    reader: IndexReader,
    len: usize,
}

impl KbSearch {
    pub fn build(docs: &[SearchDoc]) -> Result<Self, KbError> {
        let schema = build_schema();
        let index = Index::create_in_ram(schema.clone());
        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BYTES)?;

        let id = get_field(&schema, field::ID);
        let source_id = get_field(&schema, field::SOURCE_ID);
        let section_id = get_field(&schema, field::SECTION_ID);
        let doc_type = get_field(&schema, field::DOC_TYPE);
        let title = get_field(&schema, field::TITLE);
        let heading = get_field(&schema, field::HEADING);
        let text = get_field(&schema, field::TEXT);
        let tags = get_field(&schema, field::TAGS);

        for doc in docs {
            let mut document = TantivyDocument::default();
            document.add_text(id, &doc.id);
            document.add_text(source_id, &doc.source_id);
            document.add_text(section_id, &doc.section_id);
            document.add_text(doc_type, &doc.doc_type);
            document.add_text(title, &doc.title);
            document.add_text(heading, &doc.heading);
            document.add_text(text, &doc.text);
            for tag in &doc.tags {
                document.add_text(tags, tag);
            }
            writer.add_document(document)?;
        }
        writer.commit()?;

        let reader = index.reader()?;
        tracing::debug!(docs = docs.len(), "KB search index built");

        Ok(Self {
            index,
            reader,
            len: docs.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ranked hits across title, heading, text and tags.
    pub fn search(&self, query_text: &str, limit: usize) -> Result<Vec<SearchHit>, KbError> {
        if query_text.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let schema = self.index.schema();

        let title = get_field(&schema, field::TITLE);
        let heading = get_field(&schema, field::HEADING);
        let text = get_field(&schema, field::TEXT);
        let tags = get_field(&schema, field::TAGS);

        let query_parser = QueryParser::for_index(&self.index, vec![title, heading, text, tags]);
        let query = query_parser
            .parse_query(query_text)
            .map_err(|e| KbError::QueryParse(e.to_string()))?;

        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;

        let id = get_field(&schema, field::ID);
        let source_id = get_field(&schema, field::SOURCE_ID);
        let section_id = get_field(&schema, field::SECTION_ID);
        let doc_type = get_field(&schema, field::DOC_TYPE);

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc = searcher.doc::<TantivyDocument>(address)?;
            let text_of = |field| {
                doc.get_first(field)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            };

            hits.push(SearchHit {
                id: text_of(id),
                source_id: text_of(source_id),
                section_id: text_of(section_id),
                doc_type: text_of(doc_type),
                title: text_of(title),
                heading: text_of(heading),
                score,
            });
        }

        Ok(hits)
    }
}
