//! Drawable surface boundary
//!
//! `Presenter` keeps a surface in step with a session: shapes are created,
//! recolored and deleted from drained `GameEvent`s, positions are copied from
//! the state every frame, and the HUD texts follow lives and phase changes.

use std::collections::HashMap;

use glam::Vec2;
use thiserror::Error;

use crate::sim::{Aabb, EntityId, GameEvent, GameState, Shape};

/// What the presentation layer must provide
pub trait Surface {
    type Handle: Copy + Eq + std::fmt::Debug;

    fn arena_width(&self) -> f32;
    fn create_shape(&mut self, shape: Shape, bounds: Aabb, fill: u32) -> Self::Handle;
    fn move_shape(&mut self, handle: Self::Handle, bounds: Aabb);
    fn recolor_shape(&mut self, handle: Self::Handle, fill: u32);
    fn create_text(&mut self, at: Vec2, text: &str, size: u32) -> Self::Handle;
    fn update_text(&mut self, handle: Self::Handle, text: &str);
    /// Deletes shapes and texts alike
    fn delete(&mut self, handle: Self::Handle);
}

/// Startup failures of the presentation boundary
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("drawing surface unavailable (arena width {0})")]
    SurfaceUnavailable(f32),

    #[error("surface is {surface} wide but the session expects {session}")]
    ArenaMismatch { surface: f32, session: f32 },
}

const HUD_POS: Vec2 = Vec2::new(50.0, 20.0);
const HUD_SIZE: u32 = 15;
const MESSAGE_SIZE: u32 = 40;
const LAUNCH_PROMPT: &str = "Press Space to start";
const GAME_OVER_TEXT: &str = "You Lose! Game Over!";

/// Mirrors a session onto a surface
pub struct Presenter<S: Surface> {
    surface: S,
    shapes: HashMap<EntityId, S::Handle>,
    lives_label: Option<S::Handle>,
    message: Option<S::Handle>,
    message_pos: Vec2,
}

impl<S: Surface> Presenter<S> {
    /// Fails if the surface can't host a session of this size
    pub fn new(surface: S, state: &GameState) -> Result<Self, PresentError> {
        let width = surface.arena_width();
        if !(width > 0.0) {
            return Err(PresentError::SurfaceUnavailable(width));
        }
        if (width - state.tuning.arena_width).abs() > 0.5 {
            return Err(PresentError::ArenaMismatch {
                surface: width,
                session: state.tuning.arena_width,
            });
        }
        Ok(Self {
            surface,
            shapes: HashMap::new(),
            lives_label: None,
            message: None,
            message_pos: Vec2::new(width / 2.0, state.tuning.arena_height / 2.0),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Drain the session's events and bring the surface up to date
    pub fn present(&mut self, state: &mut GameState) {
        for event in state.drain_events() {
            self.apply(&event);
        }
        self.sync_positions(state);
    }

    /// Apply one notification
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Spawned {
                id,
                kind,
                bounds,
                fill,
            } => {
                let handle = self.surface.create_shape(kind.shape(), bounds, fill);
                self.shapes.insert(id, handle);
            }
            GameEvent::Removed { id } => {
                if let Some(handle) = self.shapes.remove(&id) {
                    self.surface.delete(handle);
                }
            }
            GameEvent::Recolored { id, fill } => {
                if let Some(&handle) = self.shapes.get(&id) {
                    self.surface.recolor_shape(handle, fill);
                }
            }
            GameEvent::LivesChanged { lives } => {
                let text = format!("Lives: {}", lives);
                match self.lives_label {
                    Some(handle) => self.surface.update_text(handle, &text),
                    None => {
                        self.lives_label =
                            Some(self.surface.create_text(HUD_POS, &text, HUD_SIZE));
                    }
                }
            }
            GameEvent::AwaitingLaunch => self.show_message(LAUNCH_PROMPT),
            GameEvent::Launched => self.clear_message(),
            GameEvent::GameOver => self.show_message(GAME_OVER_TEXT),
            GameEvent::PowerUpActivated { .. }
            | GameEvent::PowerUpExpired
            | GameEvent::LifeLost { .. } => {}
        }
    }

    fn show_message(&mut self, text: &str) {
        self.clear_message();
        self.message = Some(self.surface.create_text(self.message_pos, text, MESSAGE_SIZE));
    }

    fn clear_message(&mut self) {
        if let Some(handle) = self.message.take() {
            self.surface.delete(handle);
        }
    }

    /// Copy current entity positions onto their shapes
    pub fn sync_positions(&mut self, state: &GameState) {
        for view in state.snapshot() {
            if let Some(&handle) = self.shapes.get(&view.id) {
                self.surface.move_shape(handle, view.bounds);
            }
        }
    }
}

/// An item drawn on a [`HeadlessSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Shape { shape: Shape, bounds: Aabb, fill: u32 },
    Text { at: Vec2, text: String, size: u32 },
}

/// In-memory surface for tests and the headless runner
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: f32,
    items: HashMap<u32, Drawn>,
    next_handle: u32,
}

impl HeadlessSurface {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            items: HashMap::new(),
            next_handle: 1,
        }
    }

    pub fn get(&self, handle: u32) -> Option<&Drawn> {
        self.items.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All text currently on screen
    pub fn texts(&self) -> Vec<&str> {
        let mut texts: Vec<(u32, &str)> = self
            .items
            .iter()
            .filter_map(|(&h, d)| match d {
                Drawn::Text { text, .. } => Some((h, text.as_str())),
                Drawn::Shape { .. } => None,
            })
            .collect();
        texts.sort_by_key(|(h, _)| *h);
        texts.into_iter().map(|(_, t)| t).collect()
    }

    /// Number of shapes with the given fill
    pub fn count_fill(&self, fill: u32) -> usize {
        self.items
            .values()
            .filter(|d| matches!(d, Drawn::Shape { fill: f, .. } if *f == fill))
            .count()
    }

    fn insert(&mut self, drawn: Drawn) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.items.insert(handle, drawn);
        handle
    }
}

impl Surface for HeadlessSurface {
    type Handle = u32;

    fn arena_width(&self) -> f32 {
        self.width
    }

    fn create_shape(&mut self, shape: Shape, bounds: Aabb, fill: u32) -> u32 {
        self.insert(Drawn::Shape {
            shape,
            bounds,
            fill,
        })
    }

    fn move_shape(&mut self, handle: u32, new_bounds: Aabb) {
        if let Some(Drawn::Shape { bounds, .. }) = self.items.get_mut(&handle) {
            *bounds = new_bounds;
        }
    }

    fn recolor_shape(&mut self, handle: u32, new_fill: u32) {
        if let Some(Drawn::Shape { fill, .. }) = self.items.get_mut(&handle) {
            *fill = new_fill;
        }
    }

    fn create_text(&mut self, at: Vec2, text: &str, size: u32) -> u32 {
        log::info!("[text] {}", text);
        self.insert(Drawn::Text {
            at,
            text: text.to_string(),
            size,
        })
    }

    fn update_text(&mut self, handle: u32, new_text: &str) {
        if let Some(Drawn::Text { text, .. }) = self.items.get_mut(&handle) {
            log::info!("[text] {}", new_text);
            *text = new_text.to_string();
        }
    }

    fn delete(&mut self, handle: u32) {
        self.items.remove(&handle);
    }
}
