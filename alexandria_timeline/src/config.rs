// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TOML board layouts.

use alexandria_canvas::LinkStyle;
use alexandria_story::{ColorError, parse_css};
use kurbo::{Point, Size};
use peniko::Color;
use serde::Deserialize;

use crate::template::CardTemplate;

/// Errors produced while loading or populating a board.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// The document is not valid TOML or does not match the schema.
    #[error("failed to parse board config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A color string under `[links]` could not be parsed.
    #[error("links.{field}: {source}")]
    InvalidColor {
        /// Key of the offending entry.
        field: &'static str,
        /// Underlying parse failure.
        source: ColorError,
    },
    /// A size under `[template]` or the link thickness is not positive.
    #[error("{field} must be positive")]
    NonPositive {
        /// Key of the offending entry.
        field: &'static str,
    },
    /// A card references a story missing from the library.
    #[error("card `{card}` references unknown story `{story}`")]
    UnknownStory {
        /// Name of the card.
        card: String,
        /// The missing story id.
        story: String,
    },
}

/// One card to place on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct CardSpec {
    /// Debug name of the card.
    pub name: String,
    /// Global position of the card's top-left corner.
    pub position: Point,
    /// Id of the story to bind, if any.
    pub story: Option<String>,
}

impl CardSpec {
    /// A card with no story.
    pub fn new(name: impl Into<String>, position: impl Into<Point>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            story: None,
        }
    }
}

/// A complete board description: link style, card template, and cards.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// Style of transient and committed link lines.
    pub links: LinkStyle,
    /// Layout shared by every card.
    pub template: CardTemplate,
    /// Cards in spawn order.
    pub cards: Vec<CardSpec>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            links: LinkStyle::default(),
            template: CardTemplate::default(),
            cards: default_cards(),
        }
    }
}

fn default_cards() -> Vec<CardSpec> {
    vec![
        CardSpec::new("Beginning", (100.0, 100.0)),
        CardSpec::new("Ending", (400.0, 100.0)),
    ]
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBoard {
    #[serde(default)]
    links: RawLinks,
    #[serde(default)]
    template: RawTemplate,
    cards: Option<Vec<RawCard>>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLinks {
    thickness: Option<f64>,
    active_color: Option<String>,
    permanent_color: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemplate {
    size: Option<[f64; 2]>,
    handle_size: Option<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCard {
    name: String,
    position: [f64; 2],
    story: Option<String>,
}

impl BoardConfig {
    /// Parses a board document. Missing sections keep their defaults; a
    /// missing `cards` list yields the stock two-card board.
    pub fn from_toml_str(text: &str) -> Result<Self, TimelineError> {
        let raw: RawBoard = toml::from_str(text)?;
        let mut config = Self::default();

        if let Some(thickness) = raw.links.thickness {
            config.links.thickness = positive("links.thickness", thickness)?;
        }
        if let Some(text) = raw.links.active_color {
            config.links.active_color = color("active_color", &text)?;
        }
        if let Some(text) = raw.links.permanent_color {
            config.links.permanent_color = color("permanent_color", &text)?;
        }

        if let Some(size) = raw.template.size {
            config.template.size = size_of("template.size", size)?;
        }
        if let Some(size) = raw.template.handle_size {
            config.template.handle_size = size_of("template.handle_size", size)?;
        }

        if let Some(cards) = raw.cards {
            config.cards = cards
                .into_iter()
                .map(|card| CardSpec {
                    name: card.name,
                    position: Point::new(card.position[0], card.position[1]),
                    story: card.story,
                })
                .collect();
        }
        Ok(config)
    }
}

fn color(field: &'static str, text: &str) -> Result<Color, TimelineError> {
    parse_css(text).map_err(|source| TimelineError::InvalidColor { field, source })
}

fn positive(field: &'static str, value: f64) -> Result<f64, TimelineError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(TimelineError::NonPositive { field })
    }
}

fn size_of(field: &'static str, [w, h]: [f64; 2]) -> Result<Size, TimelineError> {
    Ok(Size::new(positive(field, w)?, positive(field, h)?))
}
