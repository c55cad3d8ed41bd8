//! Scenario replay
//!
//! Builds a headless carousel from a [`Scenario`] and pushes each event
//! through a [`ListenerRegistry`] along the path a browser-like host would
//! use.

use anyhow::{Context, Result};
use carousel_animation::TrackPresenter;
use carousel_core::{pair_thumbnails, NavigationController};
use carousel_platform::{
    InputBindings, InputEvent, Key, ListenerRegistry, MouseButton, MouseEvent, Target, TouchEvent,
};
use std::fmt;
use tracing::debug;

use crate::scenario::{Scenario, ScenarioEvent};

const TRACK_PATH: [Target; 3] = [Target::Track, Target::Document, Target::Window];
const DOCUMENT_PATH: [Target; 2] = [Target::Document, Target::Window];

/// Carousel state after one event
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub length: usize,
    pub offset: f32,
    pub dragging: bool,
    pub thumbnail: Option<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {}/{} offset {:.1}px", self.index, self.length, self.offset)?;
        if let Some(thumbnail) = &self.thumbnail {
            write!(f, " thumbnail {}", thumbnail)?;
        }
        if self.dragging {
            write!(f, " (dragging)")?;
        }
        Ok(())
    }
}

/// A carousel wired to a registry, ready to receive scenario events
pub struct Replay {
    bindings: InputBindings<TrackPresenter>,
    registry: ListenerRegistry,
    thumbnails: Vec<String>,
    frame_seconds: f32,
}

impl Replay {
    /// Attach a carousel built from `scenario` and load its items
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let thumbnails = pair_thumbnails(&scenario.items, &scenario.thumbnails);
        let presenter = TrackPresenter::new(scenario.layout.into());
        let controller = NavigationController::new(scenario.carousel.clone(), presenter);

        let bindings = InputBindings::new(controller);
        let mut registry = ListenerRegistry::new();
        bindings
            .attach(&mut registry)
            .context("Failed to attach carousel")?;
        bindings.load(&mut registry, scenario.items.len());

        Ok(Self {
            bindings,
            registry,
            thumbnails,
            frame_seconds: scenario.frame,
        })
    }

    /// Apply one event
    pub fn step(&mut self, event: &ScenarioEvent) -> Result<Frame> {
        match event {
            ScenarioEvent::Key { key } => {
                let event = InputEvent::key_pressed(Key::from_identifier(key));
                self.registry.dispatch(&[Target::Window], &event);
            }
            ScenarioEvent::Press { x } => {
                let press = MouseEvent::ButtonPressed {
                    button: MouseButton::Left,
                    x: *x,
                    y: 0.0,
                };
                self.registry.dispatch(&TRACK_PATH, &InputEvent::Mouse(press));
            }
            ScenarioEvent::Move { x } => {
                let moved = MouseEvent::Moved { x: *x, y: 0.0 };
                self.registry.dispatch(&DOCUMENT_PATH, &InputEvent::Mouse(moved));
            }
            ScenarioEvent::Release { x } => {
                let release = MouseEvent::ButtonReleased {
                    button: MouseButton::Left,
                    x: *x,
                    y: 0.0,
                };
                self.registry.dispatch(&DOCUMENT_PATH, &InputEvent::Mouse(release));
            }
            ScenarioEvent::TouchStart { id, x } => {
                let touch = TouchEvent::Started { id: *id, x: *x, y: 0.0 };
                self.registry.dispatch(&TRACK_PATH, &InputEvent::Touch(touch));
            }
            ScenarioEvent::TouchMove { id, x } => {
                let touch = TouchEvent::Moved { id: *id, x: *x, y: 0.0 };
                self.registry.dispatch(&DOCUMENT_PATH, &InputEvent::Touch(touch));
            }
            ScenarioEvent::TouchEnd { id, x } => {
                let touch = TouchEvent::Ended { id: *id, x: *x, y: 0.0 };
                self.registry.dispatch(&DOCUMENT_PATH, &InputEvent::Touch(touch));
            }
            ScenarioEvent::TouchCancel { id } => {
                let touch = TouchEvent::Cancelled { id: *id };
                self.registry.dispatch(&DOCUMENT_PATH, &InputEvent::Touch(touch));
            }
            ScenarioEvent::Thumbnail { index } => {
                let path = [Target::Thumbnail(*index), Target::Document, Target::Window];
                self.registry.dispatch(&path, &InputEvent::Click);
            }
            ScenarioEvent::Attribute { name, value } => {
                self.bindings
                    .set_attribute_str(&mut self.registry, name, value.as_deref())
                    .with_context(|| format!("Failed to set attribute '{}'", name))?;
            }
            ScenarioEvent::Load { items } => {
                self.thumbnails = (0..*items).map(|i| format!("item-{}", i)).collect();
                self.bindings.load(&mut self.registry, *items);
            }
            ScenarioEvent::Tick { frames } => {
                let dt = self.frame_seconds;
                self.bindings.with_controller(|c| {
                    let track = c.presenter_mut();
                    for _ in 0..*frames {
                        track.tick(dt);
                    }
                });
            }
            ScenarioEvent::Detach => {
                self.bindings
                    .detach(&mut self.registry)
                    .context("Failed to detach carousel")?;
            }
        }

        let frame = self.frame();
        debug!(?event, listeners = self.registry.len(), "replayed");
        Ok(frame)
    }

    /// Current carousel state
    pub fn frame(&self) -> Frame {
        self.bindings.with_controller(|c| {
            let track = c.presenter();
            Frame {
                index: c.current_index(),
                length: c.length(),
                offset: track.track_offset(),
                dragging: c.is_dragging(),
                thumbnail: track
                    .selected_thumbnail()
                    .and_then(|i| self.thumbnails.get(i).cloned()),
            }
        })
    }

    /// Number of listeners currently registered
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }
}
