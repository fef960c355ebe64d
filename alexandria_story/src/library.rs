// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TOML-backed story library.

use std::rc::Rc;

use serde::Deserialize;

use crate::color::{ColorError, parse_css};
use crate::{StoryData, StoryTag};

/// Errors produced while loading a [`StoryLibrary`].
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// The document is not valid TOML or does not match the schema.
    #[error("failed to parse story library: {0}")]
    Parse(#[from] toml::de::Error),
    /// A tag color string could not be parsed.
    #[error("tag `{tag}`: {source}")]
    InvalidColor {
        /// Name of the offending tag.
        tag: String,
        /// Underlying parse failure.
        source: ColorError,
    },
    /// A story references a tag that is not declared.
    #[error("story `{story}` references unknown tag `{tag}`")]
    UnknownTag {
        /// Id of the referencing story.
        story: String,
        /// The missing tag name.
        tag: String,
    },
    /// Two tags share a name.
    #[error("duplicate tag `{0}`")]
    DuplicateTag(String),
    /// Two stories share an id.
    #[error("duplicate story id `{0}`")]
    DuplicateStory(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLibrary {
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(default)]
    stories: Vec<RawStory>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTag {
    name: String,
    icon: Option<String>,
    color: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStory {
    id: String,
    title: Option<String>,
    short_content: Option<String>,
    long_content: Option<String>,
    icon: Option<String>,
    image: Option<String>,
    narrative_tag: Option<String>,
    #[serde(default)]
    matching_tags: Vec<String>,
}

/// A set of tags and the stories that use them, in declaration order.
///
/// Stories are handed out as `Rc<StoryData>` so that several cards can show the
/// same entry without copying it.
#[derive(Clone, Debug, Default)]
pub struct StoryLibrary {
    tags: Vec<StoryTag>,
    stories: Vec<Rc<StoryData>>,
}

impl StoryLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a library document.
    ///
    /// Tag references are resolved by name; every referenced tag must be
    /// declared in the same document.
    pub fn from_toml_str(text: &str) -> Result<Self, StoryError> {
        let raw: RawLibrary = toml::from_str(text)?;
        let mut library = Self::new();

        for tag in raw.tags {
            let color = match tag.color {
                Some(text) => parse_css(&text).map_err(|source| StoryError::InvalidColor {
                    tag: tag.name.clone(),
                    source,
                })?,
                None => StoryTag::default().color,
            };
            library.add_tag(StoryTag {
                name: tag.name,
                icon: tag.icon,
                color,
            })?;
        }

        for raw in raw.stories {
            let lookup = |name: &str| {
                library
                    .tag(name)
                    .cloned()
                    .ok_or_else(|| StoryError::UnknownTag {
                        story: raw.id.clone(),
                        tag: name.into(),
                    })
            };
            let narrative_tag = raw.narrative_tag.as_deref().map(&lookup).transpose()?;
            let matching_tags = raw
                .matching_tags
                .iter()
                .map(|name| lookup(name.as_str()))
                .collect::<Result<Vec<_>, _>>()?;

            let mut story = StoryData::new(raw.id.clone());
            if let Some(title) = raw.title {
                story.title = title;
            }
            if let Some(short) = raw.short_content {
                story.short_content = short;
            }
            if let Some(long) = raw.long_content {
                story.long_content = long;
            }
            story.icon = raw.icon;
            story.image = raw.image;
            story.narrative_tag = narrative_tag;
            story.matching_tags = matching_tags;
            library.add_story(story)?;
        }

        Ok(library)
    }

    /// Adds a tag. Names must be unique.
    pub fn add_tag(&mut self, tag: StoryTag) -> Result<(), StoryError> {
        if self.tag(&tag.name).is_some() {
            return Err(StoryError::DuplicateTag(tag.name));
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Adds a story, returning the shared handle to it. Ids must be unique.
    pub fn add_story(&mut self, story: StoryData) -> Result<Rc<StoryData>, StoryError> {
        if self.story(&story.id).is_some() {
            return Err(StoryError::DuplicateStory(story.id));
        }
        let story = Rc::new(story);
        self.stories.push(Rc::clone(&story));
        Ok(story)
    }

    /// Looks up a tag by name.
    pub fn tag(&self, name: &str) -> Option<&StoryTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Looks up a story by id.
    pub fn story(&self, id: &str) -> Option<Rc<StoryData>> {
        self.stories.iter().find(|s| s.id == id).cloned()
    }

    /// All tags in declaration order.
    pub fn tags(&self) -> &[StoryTag] {
        &self.tags
    }

    /// All stories in declaration order.
    pub fn stories(&self) -> impl Iterator<Item = &Rc<StoryData>> + '_ {
        self.stories.iter()
    }

    /// Stories carrying `tag`, either as narrative tag or as a matching tag.
    pub fn stories_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Rc<StoryData>> {
        self.stories.iter().filter(move |s| s.has_tag(tag))
    }
}
