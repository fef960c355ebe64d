// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alexandria Story: resource schema for story cards.
//!
//! This crate holds the plain data records a story card displays: a
//! [`StoryData`] entry (title, summary, long-form content, artwork paths, tags)
//! and the [`StoryTag`]s it references. It knows nothing about cards, links, or
//! input; the canvas crate treats a story as opaque display data.
//!
//! Stories are usually authored in TOML and loaded into a [`StoryLibrary`]:
//!
//! ```rust
//! use alexandria_story::StoryLibrary;
//!
//! let library = StoryLibrary::from_toml_str(r##"
//!     [[tags]]
//!     name = "Omen"
//!     color = "#8B0000"
//!
//!     [[stories]]
//!     id = "opening"
//!     title = "The Library Burns"
//!     short_content = "Smoke over the harbor."
//!     narrative_tag = "Omen"
//! "##).unwrap();
//!
//! let story = library.story("opening").unwrap();
//! assert_eq!(story.title, "The Library Burns");
//! assert_eq!(story.narrative_tag.as_ref().map(|t| t.name.as_str()), Some("Omen"));
//! ```
//!
//! Fields left out of a table fall back to the same defaults a freshly created
//! record has (see [`StoryData::new`] and [`StoryTag::default`]).

mod color;
mod library;

pub use color::{ColorError, format_hex, parse_css};
pub use library::{StoryError, StoryLibrary};

use peniko::Color;

/// A label attached to stories, with an optional icon and a display color.
#[derive(Clone, Debug)]
pub struct StoryTag {
    /// Display name; also the key stories use to reference the tag.
    pub name: String,
    /// Path of the tag icon asset, if any.
    pub icon: Option<String>,
    /// Tint used when the tag is drawn.
    pub color: Color,
}

impl Default for StoryTag {
    fn default() -> Self {
        Self {
            name: "New Tag".into(),
            icon: None,
            color: Color::from_rgba8(255, 255, 255, 255),
        }
    }
}

/// One story entry: the narrative payload behind a card.
#[derive(Clone, Debug)]
pub struct StoryData {
    /// Library key.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Summary shown on the timeline card.
    pub short_content: String,
    /// Full text shown in the library view.
    pub long_content: String,
    /// Timeline icon asset path.
    pub icon: Option<String>,
    /// Library image asset path.
    pub image: Option<String>,
    /// The tag describing what this story is about.
    pub narrative_tag: Option<StoryTag>,
    /// Tags this story pairs well with.
    pub matching_tags: Vec<StoryTag>,
}

impl StoryData {
    /// Creates a story with the given id and default texts.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "New Story".into(),
            short_content: "Summary of story content to appear on timeline".into(),
            long_content: "Full story content to appear in library".into(),
            icon: None,
            image: None,
            narrative_tag: None,
            matching_tags: Vec::new(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the timeline summary.
    #[must_use]
    pub fn with_short_content(mut self, short: impl Into<String>) -> Self {
        self.short_content = short.into();
        self
    }

    /// Returns true if `tag` is this story's narrative tag or one of its matching tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.narrative_tag.iter().any(|t| t.name == tag)
            || self.matching_tags.iter().any(|t| t.name == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_story_uses_default_texts() {
        let story = StoryData::new("a");
        assert_eq!(story.title, "New Story");
        assert!(story.short_content.starts_with("Summary"));
        assert!(story.long_content.starts_with("Full story"));
        assert!(story.narrative_tag.is_none());
    }

    #[test]
    fn has_tag_checks_narrative_and_matching() {
        let mut story = StoryData::new("a");
        story.narrative_tag = Some(StoryTag {
            name: "Omen".into(),
            ..StoryTag::default()
        });
        story.matching_tags.push(StoryTag {
            name: "Fire".into(),
            ..StoryTag::default()
        });
        assert!(story.has_tag("Omen"));
        assert!(story.has_tag("Fire"));
        assert!(!story.has_tag("Water"));
    }

    #[test]
    fn default_tag_is_white() {
        let rgba = StoryTag::default().color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 255, 255, 255));
    }
}
