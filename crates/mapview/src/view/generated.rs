use super::ViewKey;
use mapview_core::{stmt, Schema};

use std::fmt;

/// A query view, created once per key and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedView {
    key: ViewKey,
    body: ViewBody,

    /// Printed form of `body`, kept for diagnostics
    text: String,

    origin: Origin,
}

/// The view expression, either as a tree or as opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    Query(stmt::Query),
    Text(String),
}

/// Where a view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Authored by the user in the mapping
    UserDefined,

    /// Synthesized from a foreign-key association
    ForeignKey,

    /// Adopted from a pre-generated artifact
    PreGenerated,

    /// Produced by the view generator at runtime
    Runtime,
}

impl GeneratedView {
    pub fn new(schema: &Schema, key: impl Into<ViewKey>, body: ViewBody, origin: Origin) -> Self {
        let text = match &body {
            ViewBody::Query(query) => query.to_text(schema),
            ViewBody::Text(text) => text.clone(),
        };

        Self {
            key: key.into(),
            body,
            text,
            origin,
        }
    }

    pub fn key(&self) -> ViewKey {
        self.key
    }

    pub fn body(&self) -> &ViewBody {
        &self.body
    }

    /// The expression tree, when the view was built as one.
    pub fn query(&self) -> Option<&stmt::Query> {
        match &self.body {
            ViewBody::Query(query) => Some(query),
            ViewBody::Text(_) => None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

impl fmt::Display for GeneratedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<stmt::Query> for ViewBody {
    fn from(value: stmt::Query) -> Self {
        Self::Query(value)
    }
}

impl From<String> for ViewBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ViewBody {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
