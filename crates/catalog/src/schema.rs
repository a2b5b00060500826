//! Domain shapes exchanged with the catalog service and the RPC layer.
//!
//! Every value crossing a network boundary goes through [`Schema::parse`] or
//! [`Schema::parse_list`]; nothing is trusted by cast alone.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use serde_path_to_error::Segment;
use thiserror::Error;
use utoipa::ToSchema;

/// Identifier assigned to a book by the catalog service.
pub type BookId = u64;

/// Identifier of a legacy tag record.
pub type TagId = u64;

/// Author embedded by value inside a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub name: String,
    pub age: u32,
    pub retired: bool,
}

/// A catalog record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned, immutable after creation
    pub id: BookId,
    pub title: String,
    pub thumbnail_url: String,
    pub number_page: u32,
    pub detail: String,
    /// Ordered free-text labels; duplicates are allowed
    pub category: Vec<String>,
    pub author: Author,
}

impl Book {
    /// Split a book into its id and the mutable fields.
    pub fn into_parts(self) -> (BookId, BookForm) {
        let form = BookForm {
            title: self.title,
            thumbnail_url: self.thumbnail_url,
            number_page: self.number_page,
            detail: self.detail,
            category: self.category,
            author: self.author,
        };
        (self.id, form)
    }
}

/// Create/update payload: a [`Book`] without its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title: String,
    pub thumbnail_url: String,
    pub number_page: u32,
    pub detail: String,
    pub category: Vec<String>,
    pub author: Author,
}

impl BookForm {
    /// Reconstitute a full book from this form and an id.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            thumbnail_url: self.thumbnail_url,
            number_page: self.number_page,
            detail: self.detail,
            category: self.category,
            author: self.author,
        }
    }
}

/// Lookup key for a single book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    pub book_id: BookId,
}

impl BookQuery {
    pub const fn new(book_id: BookId) -> Self {
        Self { book_id }
    }
}

/// Legacy tag record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Legacy, read-only photo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub album_id: u64,
    pub id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListTagsInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateTagInput {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagQuery {
    pub id: TagId,
}

/// A payload did not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Location of the violation, `$` for the payload root
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Single validation entry point for every domain shape.
pub trait Schema: Sized {
    /// Validate an untyped JSON payload.
    fn parse(raw: &Value) -> Result<Self, ValidationError>;

    /// Validate a JSON array, reporting the first invalid element.
    fn parse_list(raw: &Value) -> Result<Vec<Self>, ValidationError> {
        let items = raw
            .as_array()
            .ok_or_else(|| ValidationError::new("$", format!("expected array, got {}", kind(raw))))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Self::parse(item).map_err(|e| {
                    let rest = e.path.trim_start_matches('$');
                    ValidationError::new(format!("$[{index}]{rest}"), e.message)
                })
            })
            .collect()
    }
}

impl<T: DeserializeOwned> Schema for T {
    fn parse(raw: &Value) -> Result<Self, ValidationError> {
        serde_path_to_error::deserialize(raw).map_err(|e| {
            let path = json_path(e.path());
            ValidationError::new(path, e.into_inner().to_string())
        })
    }
}

/// Render a deserializer path as `$.author.retired` or `$.category[1]`.
fn json_path(path: &serde_path_to_error::Path) -> String {
    path.iter().fold(String::from("$"), |mut out, segment| {
        match segment {
            Segment::Seq { index } => out.push_str(&format!("[{index}]")),
            Segment::Map { key } => {
                out.push('.');
                out.push_str(key);
            }
            Segment::Enum { variant } => {
                out.push('.');
                out.push_str(variant);
            }
            Segment::Unknown => out.push_str(".?"),
        }
        out
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// OpenAPI component schemas for every domain shape, keyed by type name.
pub fn openapi_components() -> Value {
    let components = utoipa::openapi::ComponentsBuilder::new()
        .schema_from::<Author>()
        .schema_from::<Book>()
        .schema_from::<BookForm>()
        .schema_from::<BookQuery>()
        .schema_from::<Tag>()
        .schema_from::<Photo>()
        .schema_from::<ListTagsInput>()
        .schema_from::<CreateTagInput>()
        .schema_from::<TagQuery>()
        .build();

    serde_json::to_value(components.schemas).unwrap_or_else(|_| Value::Object(Default::default()))
}
