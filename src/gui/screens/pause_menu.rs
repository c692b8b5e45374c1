//! In-game pause overlay
//!
//! Stands in for the game view: a placeholder scene with the pause panel
//! on top. `Escape` (or Resume) hides the panel and `Escape` brings it back.

use super::{BUTTON_HEIGHT, BUTTON_WIDTH, row_offset};
use crate::config::{HOVER_TEXT_COLOR, TEXT_COLOR};
use crate::gui::menu::{MenuAction, MenuContext, MenuState, StateId, dispatch_to_widgets};
use crate::gui::panel::Panel;
use crate::input_system::{InputEvent, Key};
use crate::render::Painter;
use crate::text::text_width;
use crate::ui::{Color, UiError, WidgetBuilder, WidgetId, WidgetRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseCommand {
    Resume,
    Settings,
    QuitToMain,
}

pub struct PauseMenu {
    registry: WidgetRegistry<PauseCommand>,
    panel: Panel,
    open: bool,
}

impl PauseMenu {
    pub fn new() -> Self {
        PauseMenu {
            registry: WidgetRegistry::new(),
            panel: Panel::new("PAUSED"),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        self.registry.reset_interactions();
        if open {
            self.registry.set_focus("resume");
        } else {
            self.registry.clear_focus();
        }
    }

    fn apply(&mut self, command: PauseCommand, ctx: &mut MenuContext) {
        match command {
            PauseCommand::Resume => self.set_open(false),
            PauseCommand::Settings => ctx.push(MenuAction::TransitionTo(StateId::Settings)),
            PauseCommand::QuitToMain => ctx.push(MenuAction::TransitionTo(StateId::Main)),
        }
    }

    fn draw_scene(&self, painter: &mut dyn Painter, screen: (u32, u32)) -> Result<(), String> {
        let lines = [("Game in progress", 3), ("Press ESC to pause", 2)];
        let mut y = screen.1 as i32 / 2 - 40;
        for (line, scale) in lines {
            let x = (screen.0 as i32 - text_width(line, scale) as i32) / 2;
            painter.draw_text(line, x, y, TEXT_COLOR, scale)?;
            y += 50;
        }
        Ok(())
    }
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState for PauseMenu {
    fn id(&self) -> StateId {
        StateId::Pause
    }

    fn create_widgets(&mut self, ctx: &MenuContext) -> Result<(), UiError> {
        let screen = ctx.screen_size;
        let first_row = self.panel.content_offset();
        self.registry.clear();

        let buttons = [
            ("resume", "Resume", PauseCommand::Resume),
            ("settings", "Settings", PauseCommand::Settings),
            ("quit", "Quit to Main Menu", PauseCommand::QuitToMain),
        ];
        for (row, (id, label, command)) in buttons.into_iter().enumerate() {
            let mut widget = WidgetBuilder::button(id, label)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(first_row, row as u32))
                .colors(Color::rgb(45, 45, 60), Color::rgb(80, 100, 140))
                .sounds(ctx.sounds.click.clone(), ctx.sounds.hover.clone())
                .focus_sound(ctx.sounds.focus.clone())
                .on_click(command)
                .build()?;
            widget.style_mut().hover_text = Some(HOVER_TEXT_COLOR);
            self.registry.register(widget)?;
        }

        if self.open {
            self.registry.set_focus("resume");
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut MenuContext) -> bool {
        if let InputEvent::KeyDown { key: Key::Escape, .. } = event {
            self.set_open(!self.open);
            return true;
        }
        if !self.open {
            return false;
        }

        let mut commands = Vec::new();
        let handled = dispatch_to_widgets(&mut self.registry, event, ctx, &mut commands);
        for command in commands {
            self.apply(command, ctx);
        }
        handled
    }

    fn update(&mut self, dt: f32) {
        if self.open {
            self.registry.update(dt);
        }
    }

    fn draw(&self, painter: &mut dyn Painter, ctx: &MenuContext) -> Result<(), String> {
        self.draw_scene(painter, ctx.screen_size)?;
        if self.open {
            self.panel.render(painter)?;
            self.registry.draw(painter)?;
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        self.registry.clear();
    }

    fn widget_ids(&self) -> Vec<WidgetId> {
        self.registry.widgets().iter().map(|w| w.id().clone()).collect()
    }

    fn focused_widget(&self) -> Option<WidgetId> {
        self.registry.focused_id().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::screens::testing::context;
    use crate::render::testing::RecordingPainter;

    fn built() -> (PauseMenu, MenuContext) {
        let ctx = context();
        let mut menu = PauseMenu::new();
        menu.create_widgets(&ctx).unwrap();
        (menu, ctx)
    }

    #[test]
    fn test_opens_with_resume_focused() {
        let (menu, _) = built();
        assert!(menu.is_open());
        assert_eq!(menu.focused_widget(), Some(WidgetId::from("resume")));
    }

    #[test]
    fn test_escape_toggles_overlay() {
        let (mut menu, mut ctx) = built();
        assert!(menu.handle_event(&InputEvent::key(Key::Escape), &mut ctx));
        assert!(!menu.is_open());
        assert_eq!(menu.focused_widget(), None);

        // Closed overlay lets the panel buttons sleep
        assert!(!menu.handle_event(&InputEvent::key(Key::Return), &mut ctx));

        menu.handle_event(&InputEvent::key(Key::Escape), &mut ctx);
        assert!(menu.is_open());
        assert_eq!(menu.focused_widget(), Some(WidgetId::from("resume")));
    }

    #[test]
    fn test_resume_closes() {
        let (mut menu, mut ctx) = built();
        menu.handle_event(&InputEvent::key(Key::Return), &mut ctx);
        assert!(!menu.is_open());
        assert!(ctx.take_actions().is_empty());
    }

    #[test]
    fn test_quit_to_main() {
        let (mut menu, mut ctx) = built();
        menu.handle_event(&InputEvent::key(Key::Tab), &mut ctx);
        menu.handle_event(&InputEvent::key(Key::Tab), &mut ctx);
        menu.handle_event(&InputEvent::key(Key::Return), &mut ctx);
        assert_eq!(ctx.take_actions(), vec![MenuAction::TransitionTo(StateId::Main)]);
    }

    #[test]
    fn test_draws_panel_only_when_open() {
        let (mut menu, mut ctx) = built();
        let mut painter = RecordingPainter::new(1280, 720);
        menu.draw(&mut painter, &ctx).unwrap();
        assert!(painter.texts().contains(&"PAUSED"));
        assert!(painter.texts().contains(&"Resume"));

        menu.handle_event(&InputEvent::key(Key::Escape), &mut ctx);
        let mut painter = RecordingPainter::new(1280, 720);
        menu.draw(&mut painter, &ctx).unwrap();
        assert_eq!(painter.texts(), vec!["Game in progress", "Press ESC to pause"]);
    }
}
