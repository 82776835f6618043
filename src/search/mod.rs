//! Tantivy-based search index module.
//!
//! Backs the `search` query parameter of the list endpoints. Each searchable
//! entity becomes one document tagged with its collection.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tokio::sync::RwLock;

use crate::db::Collection;
use crate::errors::AppError;
use crate::models::{Activity, Team, User, Workout};

/// Title matches outrank body matches.
const BOOST_TITLE: f32 = 2.0;
const BOOST_BODY: f32 = 1.0;

/// Text extracted from an entity for indexing.
#[derive(Debug, Clone)]
pub struct SearchDoc {
    pub collection: Collection,
    pub id: String,
    pub title: String,
    pub body: String,
}

/// An entity that can be found through the `search` parameter.
pub trait Searchable {
    fn search_doc(&self) -> SearchDoc;
}

impl Searchable for User {
    fn search_doc(&self) -> SearchDoc {
        SearchDoc {
            collection: Collection::Users,
            id: self.id.clone(),
            title: self.name.clone(),
            body: self.email.clone(),
        }
    }
}

impl Searchable for Team {
    fn search_doc(&self) -> SearchDoc {
        SearchDoc {
            collection: Collection::Teams,
            id: self.id.clone(),
            title: self.name.clone(),
            body: self.description.clone(),
        }
    }
}

impl Searchable for Activity {
    fn search_doc(&self) -> SearchDoc {
        SearchDoc {
            collection: Collection::Activities,
            id: self.id.clone(),
            title: self.user_name.clone(),
            body: self.activity_type.clone(),
        }
    }
}

impl Searchable for Workout {
    fn search_doc(&self) -> SearchDoc {
        SearchDoc {
            collection: Collection::Workouts,
            id: self.id.clone(),
            title: self.name.clone(),
            body: self.description.clone(),
        }
    }
}

/// Search index schema fields.
struct SearchFields {
    collection: Field,
    entity_id: Field,
    title: Field,
    body: Field,
}

/// Tantivy search index over all searchable collections.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Arc<RwLock<IndexWriter>>,
    fields: SearchFields,
}

impl SearchIndex {
    /// Create or open a search index at the specified path.
    pub fn open(index_path: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(index_path)
            .map_err(|e| AppError::Search(format!("Failed to create index directory: {}", e)))?;

        let mut schema_builder = Schema::builder();
        let collection = schema_builder.add_text_field("collection", STRING);
        let entity_id = schema_builder.add_text_field("entity_id", STRING | STORED);
        let title = schema_builder.add_text_field("title", TEXT);
        let body = schema_builder.add_text_field("body", TEXT);
        let schema = schema_builder.build();

        let fields = SearchFields {
            collection,
            entity_id,
            title,
            body,
        };

        let index = Index::open_in_dir(index_path)
            .or_else(|_| Index::create_in_dir(index_path, schema.clone()))
            .map_err(|e| AppError::Search(format!("Failed to open/create index: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| AppError::Search(format!("Failed to create reader: {}", e)))?;

        let writer = index
            .writer(50_000_000) // 50MB buffer
            .map_err(|e| AppError::Search(format!("Failed to create writer: {}", e)))?;

        Ok(Self {
            index,
            reader,
            writer: Arc::new(RwLock::new(writer)),
            fields,
        })
    }

    /// Replace the whole index with the given documents.
    pub async fn rebuild(&self, docs: &[SearchDoc]) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_all_documents()?;
        for search_doc in docs {
            writer.add_document(self.create_document(search_doc))?;
        }
        writer.commit()?;

        self.reader.reload()?;

        tracing::info!("Search index rebuilt with {} documents", docs.len());
        Ok(())
    }

    /// Index or re-index a single entity.
    pub async fn index(&self, search_doc: &SearchDoc) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_term(Term::from_field_text(self.fields.entity_id, &search_doc.id));
        writer.add_document(self.create_document(search_doc))?;
        writer.commit()?;

        self.reader.reload()?;
        Ok(())
    }

    /// Remove an entity from the index.
    pub async fn remove(&self, entity_id: &str) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_term(Term::from_field_text(self.fields.entity_id, entity_id));
        writer.commit()?;

        self.reader.reload()?;
        Ok(())
    }

    /// Ids of the entities in `collection` matching every term of the query.
    ///
    /// Terms may match in different fields, so `tony marvel` finds a user
    /// named Tony with a marvel.com address.
    pub fn matching_ids(
        &self,
        collection: Collection,
        query_str: &str,
    ) -> Result<HashSet<String>, AppError> {
        let terms = plain_terms(query_str);
        if terms.is_empty() {
            return Ok(HashSet::new());
        }

        let searcher = self.reader.searcher();
        let num_docs = searcher.num_docs() as usize;
        if num_docs == 0 {
            return Ok(HashSet::new());
        }

        // Each term must hit the title or the body.
        let mut parser =
            QueryParser::for_index(&self.index, vec![self.fields.title, self.fields.body]);
        parser.set_conjunction_by_default();
        parser.set_field_boost(self.fields.title, BOOST_TITLE);
        parser.set_field_boost(self.fields.body, BOOST_BODY);
        let text_query = parser
            .parse_query(&terms)
            .map_err(|e| AppError::BadRequest(format!("Invalid search query: {}", e)))?;

        let collection_query = TermQuery::new(
            Term::from_field_text(self.fields.collection, collection.name()),
            IndexRecordOption::Basic,
        );

        let combined = BooleanQuery::new(vec![
            (Occur::Must, Box::new(collection_query) as Box<dyn Query>),
            (Occur::Must, text_query),
        ]);

        let top_docs = searcher
            .search(&combined, &TopDocs::with_limit(num_docs))
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        Ok(top_docs
            .into_iter()
            .filter_map(|(_score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address).ok()?;
                Some(doc.get_first(self.fields.entity_id)?.as_str()?.to_string())
            })
            .collect())
    }

    fn create_document(&self, search_doc: &SearchDoc) -> TantivyDocument {
        doc!(
            self.fields.collection => search_doc.collection.name().to_string(),
            self.fields.entity_id => search_doc.id.clone(),
            self.fields.title => search_doc.title.clone(),
            self.fields.body => search_doc.body.clone()
        )
    }
}

/// Reduce user input to lowercase words separated by spaces.
///
/// Matches how the default tokenizer splits indexed text, and leaves nothing
/// the query parser would read as syntax (`field:`, `+`, `-`, `AND`, quotes).
fn plain_terms(query_str: &str) -> String {
    query_str
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
