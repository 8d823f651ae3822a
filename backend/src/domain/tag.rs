//! Tag reference data model.
//!
//! Tags are admin-curated reference rows. Name, slug, and colour are each
//! unique in storage; the constructors enforce the character-level rules.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the tag constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptySlug,
    SlugTooLong { max: usize },
    SlugInvalidCharacters,
    InvalidColor,
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "tag name must not be empty"),
            Self::NameTooLong { max } => write!(f, "tag name must be at most {max} characters"),
            Self::EmptySlug => write!(f, "tag slug must not be empty"),
            Self::SlugTooLong { max } => write!(f, "tag slug must be at most {max} characters"),
            Self::SlugInvalidCharacters => write!(
                f,
                "tag slug may only contain letters, digits, hyphens, and underscores",
            ),
            Self::InvalidColor => write!(f, "tag colour must be a #RGB or #RRGGBB hex code"),
        }
    }
}

impl std::error::Error for TagValidationError {}

/// Stable tag identifier backed by a BIGSERIAL column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct TagId(i64);

impl TagId {
    /// Wrap a raw database identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum accepted tag name length.
pub const TAG_NAME_MAX: usize = 200;
/// Maximum accepted slug length.
pub const TAG_SLUG_MAX: usize = 50;

static SLUG_RE: OnceLock<Regex> = OnceLock::new();
static COLOR_RE: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        Regex::new("^[-a-zA-Z0-9_]+$")
            .unwrap_or_else(|error| panic!("slug regex failed to compile: {error}"))
    })
}

fn color_regex() -> &'static Regex {
    COLOR_RE.get_or_init(|| {
        Regex::new("^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$")
            .unwrap_or_else(|error| panic!("colour regex failed to compile: {error}"))
    })
}

/// URL-safe tag identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagSlug(String);

impl TagSlug {
    /// Validate and construct a [`TagSlug`].
    pub fn new(slug: impl Into<String>) -> Result<Self, TagValidationError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(TagValidationError::EmptySlug);
        }
        if slug.chars().count() > TAG_SLUG_MAX {
            return Err(TagValidationError::SlugTooLong { max: TAG_SLUG_MAX });
        }
        if !slug_regex().is_match(&slug) {
            return Err(TagValidationError::SlugInvalidCharacters);
        }
        Ok(Self(slug))
    }
}

impl AsRef<str> for TagSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TagSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TagSlug> for String {
    fn from(value: TagSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for TagSlug {
    type Error = TagValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display colour as a `#RGB` or `#RRGGBB` hex code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagColor(String);

impl TagColor {
    /// Validate and construct a [`TagColor`].
    pub fn new(color: impl Into<String>) -> Result<Self, TagValidationError> {
        let color = color.into();
        if !color_regex().is_match(&color) {
            return Err(TagValidationError::InvalidColor);
        }
        Ok(Self(color))
    }
}

impl AsRef<str> for TagColor {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TagColor> for String {
    fn from(value: TagColor) -> Self {
        value.0
    }
}

impl TryFrom<String> for TagColor {
    type Error = TagValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Recipe tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    #[schema(value_type = i64, example = 1)]
    id: TagId,
    #[schema(example = "breakfast")]
    name: String,
    #[schema(value_type = String, example = "breakfast")]
    slug: TagSlug,
    #[schema(value_type = String, example = "#49B64E")]
    color: TagColor,
}

impl Tag {
    /// Build a [`Tag`] from validated components.
    pub fn new(
        id: TagId,
        name: impl Into<String>,
        slug: TagSlug,
        color: TagColor,
    ) -> Result<Self, TagValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TagValidationError::EmptyName);
        }
        if name.chars().count() > TAG_NAME_MAX {
            return Err(TagValidationError::NameTooLong { max: TAG_NAME_MAX });
        }
        Ok(Self {
            id,
            name,
            slug,
            color,
        })
    }

    /// Stable tag identifier.
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL-safe identifier.
    pub fn slug(&self) -> &TagSlug {
        &self.slug
    }

    /// Display colour.
    pub fn color(&self) -> &TagColor {
        &self.color
    }
}
