// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alexandria Timeline: spawning story cards onto a canvas.
//!
//! A [`Timeline`] stamps out cards from a [`CardTemplate`], binds them to
//! stories from an [`alexandria_story::StoryLibrary`], and registers them with
//! an [`alexandria_canvas::ConnectionManager`]. A [`BoardConfig`] describes a
//! whole board in TOML; without one, the stock board has two cards named
//! "Beginning" and "Ending".
//!
//! ```rust
//! use alexandria_canvas::{ConnectionManager, HeadlessRenderer};
//! use alexandria_story::StoryLibrary;
//! use alexandria_timeline::{BoardConfig, Timeline};
//!
//! let config = BoardConfig::default();
//! let mut manager = ConnectionManager::with_style(HeadlessRenderer::new(), config.links);
//! let timeline = Timeline::new(config.template);
//! let ids = timeline
//!     .populate(&mut manager, &config, &StoryLibrary::new())
//!     .unwrap();
//!
//! let names: Vec<_> = ids.iter().map(|&id| manager.card(id).unwrap().name()).collect();
//! assert_eq!(names, ["Beginning", "Ending"]);
//! ```

mod config;
mod template;

pub use config::{BoardConfig, CardSpec, TimelineError};
pub use template::CardTemplate;

use std::rc::Rc;

use alexandria_canvas::{CardId, ConnectionManager, LineRenderer};
use alexandria_story::{StoryData, StoryLibrary};
use kurbo::Point;

/// Spawns cards that share one layout.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    template: CardTemplate,
}

impl Timeline {
    /// Creates a timeline stamping cards from `template`.
    pub fn new(template: CardTemplate) -> Self {
        Self { template }
    }

    /// The card layout in use.
    pub fn template(&self) -> &CardTemplate {
        &self.template
    }

    /// Instantiates a card at `position`, binds `story`, and registers it.
    pub fn spawn_card<R: LineRenderer>(
        &self,
        manager: &mut ConnectionManager<R>,
        position: Point,
        name: &str,
        story: Option<Rc<StoryData>>,
    ) -> CardId {
        let mut card = self.template.instantiate(name).at(position);
        card.initialize(story);
        let id = manager.register_card(card);
        tracing::debug!(card = name, x = position.x, y = position.y, "spawned card");
        id
    }

    /// Spawns every card of `config`, resolving story ids against `library`.
    ///
    /// Story references are checked before any card is spawned, so an error
    /// leaves `manager` untouched.
    pub fn populate<R: LineRenderer>(
        &self,
        manager: &mut ConnectionManager<R>,
        config: &BoardConfig,
        library: &StoryLibrary,
    ) -> Result<Vec<CardId>, TimelineError> {
        let stories = config
            .cards
            .iter()
            .map(|spec| match &spec.story {
                Some(id) => library
                    .story(id)
                    .map(Some)
                    .ok_or_else(|| TimelineError::UnknownStory {
                        card: spec.name.clone(),
                        story: id.clone(),
                    }),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ids = config
            .cards
            .iter()
            .zip(stories)
            .map(|(spec, story)| self.spawn_card(manager, spec.position, &spec.name, story))
            .collect::<Vec<_>>();
        tracing::info!(cards = ids.len(), "board populated");
        Ok(ids)
    }
}
