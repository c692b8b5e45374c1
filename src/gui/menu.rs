//! Menu State Machine
//!
//! Every screen (main menu, settings, test, pause) is a [`MenuState`]. The
//! [`MenuManager`] owns at most one live state at a time and swaps them on
//! request. States never call the manager directly: they push
//! [`MenuAction`]s into the shared [`MenuContext`] and the host applies them
//! once event dispatch has returned.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = MenuManager::new();
//! manager.register_state(StateId::Main, Box::new(|| Box::new(MainMenu::new())));
//! manager.transition_to(StateId::Main, &mut ctx)?;
//!
//! manager.handle_event(&event, &mut ctx);
//! for action in ctx.take_actions() { /* host applies */ }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::audio::SoundCue;
use crate::config::{AssetPaths, TEXT_COLOR, UiSounds};
use crate::input_system::InputEvent;
use crate::render::Painter;
use crate::save::SettingsStore;
use crate::text::text_width;
use crate::ui::{UiEffect, UiError, WidgetId, WidgetRegistry};

/// Names of the registered screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Main,
    Settings,
    Test,
    Pause,
}

impl StateId {
    pub fn name(&self) -> &'static str {
        match self {
            StateId::Main => "main",
            StateId::Settings => "settings",
            StateId::Test => "test",
            StateId::Pause => "pause",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StateId {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(StateId::Main),
            "settings" => Ok(StateId::Settings),
            "test" => Ok(StateId::Test),
            "pause" => Ok(StateId::Pause),
            _ => Err(MenuError::UnknownState(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("unknown menu state '{0}'")]
    UnknownState(String),

    #[error("failed to build the {state} menu: {source}")]
    Build { state: StateId, source: UiError },
}

/// Deferred request from a state to the host
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    TransitionTo(StateId),
    Quit,
    ToggleFullscreen,
    /// Music on/off or volume changed in the settings store
    MusicChanged,
    PlaySound(SoundCue),
}

/// Data shared between the host and the active state
pub struct MenuContext {
    pub screen_size: (u32, u32),
    pub settings: SettingsStore,
    pub assets: AssetPaths,
    pub sounds: UiSounds,
    /// Frames per second measured by the host
    pub fps: f32,
    actions: Vec<MenuAction>,
}

impl MenuContext {
    pub fn new(settings: SettingsStore, assets: AssetPaths, screen_size: (u32, u32)) -> Self {
        let sounds = UiSounds::resolve(&assets);
        MenuContext {
            screen_size,
            settings,
            assets,
            sounds,
            fps: 0.0,
            actions: Vec::new(),
        }
    }

    /// Queues an action for the host
    pub fn push(&mut self, action: MenuAction) {
        self.actions.push(action);
    }

    /// Drains queued actions in the order they were pushed
    pub fn take_actions(&mut self) -> Vec<MenuAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn pending_actions(&self) -> &[MenuAction] {
        &self.actions
    }
}

/// One menu screen
pub trait MenuState {
    fn id(&self) -> StateId;

    /// Builds the screen's widgets for the current screen size
    fn create_widgets(&mut self, ctx: &MenuContext) -> Result<(), UiError>;

    /// Returns `true` if the event was consumed
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut MenuContext) -> bool;

    fn update(&mut self, dt: f32);

    fn draw(&self, painter: &mut dyn Painter, ctx: &MenuContext) -> Result<(), String>;

    /// Tears the screen down; the state is dropped right after
    fn cleanup(&mut self);

    /// Ids of the live widgets, in focus order
    fn widget_ids(&self) -> Vec<WidgetId>;

    fn focused_widget(&self) -> Option<WidgetId>;
}

/// Dispatches `event` through a screen's registry
///
/// Sound effects are forwarded to the host as [`MenuAction::PlaySound`];
/// widget commands are appended to `commands` for the screen to act on
/// after the registry borrow ends.
pub fn dispatch_to_widgets<C: Clone>(
    registry: &mut WidgetRegistry<C>,
    event: &InputEvent,
    ctx: &mut MenuContext,
    commands: &mut Vec<C>,
) -> bool {
    let mut effects = Vec::new();
    let handled = registry.dispatch(event, &mut effects);

    for effect in effects {
        match effect {
            UiEffect::Command(command) => commands.push(command),
            UiEffect::Sound(cue) => ctx.push(MenuAction::PlaySound(cue)),
            // Applied by the registry itself
            UiEffect::SelectInGroup { .. } => {}
        }
    }

    handled
}

/// Draws a screen title centered horizontally at y = 100
pub fn draw_title(painter: &mut dyn Painter, title: &str, screen_width: u32) -> Result<(), String> {
    let scale = 4;
    let x = (screen_width as i32 - text_width(title, scale) as i32) / 2;
    painter.draw_text(title, x, 100, TEXT_COLOR, scale)
}

/// Builds a fresh instance of a state
pub type StateFactory = Box<dyn Fn() -> Box<dyn MenuState>>;

/// Owns the registered state factories and the active state
#[derive(Default)]
pub struct MenuManager {
    factories: HashMap<StateId, StateFactory>,
    current: Option<Box<dyn MenuState>>,
}

impl MenuManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the factory for `id`
    pub fn register_state(&mut self, id: StateId, factory: StateFactory) {
        self.factories.insert(id, factory);
    }

    /// Tears down the active state and enters `id`
    ///
    /// An unregistered id leaves the current state untouched.
    pub fn transition_to(&mut self, id: StateId, ctx: &mut MenuContext) -> Result<(), MenuError> {
        let Some(factory) = self.factories.get(&id) else {
            tracing::error!("Cannot transition to unregistered state '{}'", id);
            return Err(MenuError::UnknownState(id.to_string()));
        };

        let previous = self.current_id();
        if let Some(mut old) = self.current.take() {
            old.cleanup();
        }

        let mut next = factory();
        if let Err(source) = next.create_widgets(ctx) {
            tracing::error!("Failed to build the {} menu: {}", id, source);
            next.cleanup();
            if let Some(previous) = previous.filter(|previous| *previous != id) {
                self.restore(previous, ctx);
            }
            return Err(MenuError::Build { state: id, source });
        }
        self.current = Some(next);

        tracing::info!("Transitioned to {}", id);
        Ok(())
    }

    /// Re-enters `id` after a failed transition so the user is not left
    /// without a screen
    fn restore(&mut self, id: StateId, ctx: &mut MenuContext) {
        let Some(factory) = self.factories.get(&id) else {
            return;
        };
        let mut state = factory();
        match state.create_widgets(ctx) {
            Ok(()) => {
                tracing::warn!("Returned to the {} menu", id);
                self.current = Some(state);
            }
            Err(e) => tracing::error!("Failed to restore the {} menu: {}", id, e),
        }
    }

    /// Like [`transition_to`](Self::transition_to) with a free-form name
    pub fn transition_to_named(&mut self, name: &str, ctx: &mut MenuContext) -> Result<(), MenuError> {
        match name.parse::<StateId>() {
            Ok(id) => self.transition_to(id, ctx),
            Err(e) => {
                tracing::error!("Cannot transition to unknown state '{}'", name);
                Err(e)
            }
        }
    }

    /// Re-enters the active state, rebuilding its widgets from scratch
    pub fn rebuild(&mut self, ctx: &mut MenuContext) -> Result<(), MenuError> {
        match self.current_id() {
            Some(id) => self.transition_to(id, ctx),
            None => Ok(()),
        }
    }

    pub fn current_id(&self) -> Option<StateId> {
        self.current.as_ref().map(|state| state.id())
    }

    pub fn current(&self) -> Option<&dyn MenuState> {
        self.current.as_deref()
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut MenuContext) -> bool {
        match self.current.as_mut() {
            Some(state) => state.handle_event(event, ctx),
            None => false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(state) = self.current.as_mut() {
            state.update(dt);
        }
    }

    pub fn draw(&self, painter: &mut dyn Painter, ctx: &MenuContext) -> Result<(), String> {
        match &self.current {
            Some(state) => state.draw(painter, ctx),
            None => Ok(()),
        }
    }
}
