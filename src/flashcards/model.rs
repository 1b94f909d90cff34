use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One card: a prompt on the front and its answer on the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Unique within a collection; keys card instances across updates
    pub id: String,
    pub front: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_image: Option<String>,
    /// Accepted for compatibility; no face displays it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_title: Option<String>,
    pub back: String,
}

impl Flashcard {
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            front_image: None,
            back_title: None,
            back: back.into(),
        }
    }

    pub fn with_front_image(mut self, uri: impl Into<String>) -> Self {
        self.front_image = Some(uri.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcards: Option<Vec<Flashcard>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `{ "props": { "flashcards": [...] } }` wrapper the preview is fed
/// with. Keys the preview doesn't know about are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureComponent {
    #[serde(default)]
    pub props: StructureProps,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StructureComponent {
    pub fn new(flashcards: Vec<Flashcard>) -> Self {
        Self {
            props: StructureProps {
                flashcards: Some(flashcards),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The collection, empty when absent.
    pub fn flashcards(&self) -> &[Flashcard] {
        self.props.flashcards.as_deref().unwrap_or_default()
    }
}
