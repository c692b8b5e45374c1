//! Widget registry and keyboard focus ring
//!
//! Each menu screen owns one [`WidgetRegistry`]. It holds the screen's
//! widgets in registration order (which is also the Tab order), the
//! selection groups coupling some of them, and the index of the focused
//! widget.

use super::UiError;
use super::selection::SelectionGroup;
use super::widget::{GroupId, UiEffect, Widget, WidgetId};
use crate::input_system::{InputEvent, Key};
use crate::render::Painter;

#[derive(Debug)]
pub struct WidgetRegistry<C> {
    widgets: Vec<Widget<C>>,
    groups: Vec<SelectionGroup>,
    focused: Option<usize>,
}

impl<C> Default for WidgetRegistry<C> {
    fn default() -> Self {
        WidgetRegistry {
            widgets: Vec::new(),
            groups: Vec::new(),
            focused: None,
        }
    }
}

impl<C: Clone> WidgetRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a widget to the ring
    pub fn register(&mut self, widget: Widget<C>) -> Result<&mut Widget<C>, UiError> {
        if self.index_of(widget.id().as_str()).is_some() {
            return Err(UiError::DuplicateWidget(widget.id().to_string()));
        }
        // A widget built focused would break the single-focus invariant
        let mut widget = widget;
        widget.set_focus(false);
        self.widgets.push(widget);
        let index = self.widgets.len() - 1;
        Ok(&mut self.widgets[index])
    }

    /// Creates an empty selection group owned by this registry
    pub fn create_group(&mut self, allow_unselect: bool) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(SelectionGroup::new(id, allow_unselect));
        id
    }

    /// Adds a registered widget to a selection group
    pub fn add_to_group(&mut self, group: GroupId, id: &str) -> Result<(), UiError> {
        let index = self.index_of(id).ok_or_else(|| UiError::UnknownWidget(id.to_string()))?;
        let group = self.groups.get_mut(group.0).ok_or(UiError::UnknownGroup(group.0))?;
        group.add(&mut self.widgets[index]);
        Ok(())
    }

    pub fn group(&self, group: GroupId) -> Option<&SelectionGroup> {
        self.groups.get(group.0)
    }

    /// Selects `id` inside `group`; `false` if either is unknown
    pub fn select_in_group(&mut self, group: GroupId, id: &str) -> bool {
        match self.groups.get_mut(group.0) {
            Some(selection) => selection.select(&WidgetId::from(id), &mut self.widgets),
            None => false,
        }
    }

    pub fn clear_group_selection(&mut self, group: GroupId) -> bool {
        match self.groups.get_mut(group.0) {
            Some(selection) => selection.clear_selection(&mut self.widgets),
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Widget<C>> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Widget<C>> {
        self.widgets.iter_mut().find(|w| w.id() == id)
    }

    pub fn widgets(&self) -> &[Widget<C>] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    /// Removes every widget and group
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.groups.clear();
        self.focused = None;
    }

    /// Enables or disables a widget, keeping the focus index consistent
    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.widgets[index].set_disabled(disabled);
        if disabled && self.focused == Some(index) {
            self.focused = None;
        }
        true
    }

    pub fn focused_id(&self) -> Option<&WidgetId> {
        self.focused.map(|index| self.widgets[index].id())
    }

    /// Focuses `id`, revoking focus from the previous holder
    ///
    /// Refused (returns `false`) for unknown or disabled widgets.
    pub fn set_focus(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) if !self.widgets[index].is_disabled() => {
                self.focus_index(index);
                true
            }
            _ => false,
        }
    }

    pub fn clear_focus(&mut self) {
        if let Some(index) = self.focused.take() {
            self.widgets[index].set_focus(false);
        }
    }

    fn focus_index(&mut self, index: usize) {
        if let Some(previous) = self.focused {
            self.widgets[previous].set_focus(false);
        }
        self.widgets[index].set_focus(true);
        self.focused = Some(index);
    }

    /// Moves focus to the next enabled widget, wrapping
    ///
    /// Scans at most once around the ring, so an all-disabled ring leaves
    /// focus unset. Returns whether focus landed somewhere.
    pub fn focus_next(&mut self) -> bool {
        self.step_focus(true)
    }

    /// Moves focus to the previous enabled widget, wrapping
    pub fn focus_prev(&mut self) -> bool {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> bool {
        let len = self.widgets.len();
        if len == 0 {
            return false;
        }

        let mut index = match (self.focused, forward) {
            (Some(current), true) => (current + 1) % len,
            (Some(current), false) => (current + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };

        for _ in 0..len {
            if !self.widgets[index].is_disabled() {
                self.focus_index(index);
                return true;
            }
            index = if forward { (index + 1) % len } else { (index + len - 1) % len };
        }

        self.clear_focus();
        false
    }

    /// Routes one event through the ring
    ///
    /// `Tab`/`Shift+Tab` are consumed for navigation. Every other event is
    /// offered to every widget; selection requests are applied here and the
    /// remaining effects (commands and sounds) are appended to `effects` in
    /// the order they were raised.
    pub fn dispatch(&mut self, event: &InputEvent, effects: &mut Vec<UiEffect<C>>) -> bool {
        if let InputEvent::KeyDown { key: Key::Tab, mods } = *event {
            let moved = if mods.shift { self.focus_prev() } else { self.focus_next() };
            if moved {
                if let Some(sound) = self.focused.and_then(|i| self.widgets[i].focus_sound()) {
                    effects.push(UiEffect::Sound(sound.clone()));
                }
            }
            return moved;
        }

        let mut handled = false;
        let mut raised = Vec::new();
        for index in 0..self.widgets.len() {
            handled |= self.widgets[index].handle_event(event, &mut raised);

            for effect in raised.drain(..) {
                match effect {
                    UiEffect::SelectInGroup { group, widget } => {
                        if let Some(selection) = self.groups.get_mut(group.0) {
                            selection.activate(&widget, &mut self.widgets);
                        }
                    }
                    other => effects.push(other),
                }
            }
        }
        handled
    }

    /// Drops hover, press and drag state on every widget
    pub fn reset_interactions(&mut self) {
        for widget in &mut self.widgets {
            widget.reset_interaction();
        }
    }

    pub fn update(&mut self, dt: f32) {
        for widget in &mut self.widgets {
            widget.update(dt);
        }
    }

    pub fn draw(&self, painter: &mut dyn Painter) -> Result<(), String> {
        for widget in &self.widgets {
            widget.draw(painter)?;
        }
        Ok(())
    }
}
