//! Main menu screen

use super::{BUTTON_HEIGHT, BUTTON_WIDTH, menu_button, row_offset};
use crate::config::DANGER_TEXT_COLOR;
use crate::gui::menu::{MenuAction, MenuContext, MenuState, StateId, dispatch_to_widgets, draw_title};
use crate::input_system::InputEvent;
use crate::render::Painter;
use crate::ui::{UiError, WidgetId, WidgetRegistry};

/// Offset of the first button from the screen center
const FIRST_ROW: i32 = -100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    StartGame,
    Settings,
    TestMenu,
    Quit,
}

pub struct MainMenu {
    registry: WidgetRegistry<MainCommand>,
}

impl MainMenu {
    pub fn new() -> Self {
        MainMenu {
            registry: WidgetRegistry::new(),
        }
    }

    fn apply(&mut self, command: MainCommand, ctx: &mut MenuContext) {
        match command {
            MainCommand::StartGame => {
                tracing::info!("Starting new game!");
                ctx.push(MenuAction::TransitionTo(StateId::Pause));
            }
            MainCommand::Settings => ctx.push(MenuAction::TransitionTo(StateId::Settings)),
            MainCommand::TestMenu => ctx.push(MenuAction::TransitionTo(StateId::Test)),
            MainCommand::Quit => ctx.push(MenuAction::Quit),
        }
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState for MainMenu {
    fn id(&self) -> StateId {
        StateId::Main
    }

    fn create_widgets(&mut self, ctx: &MenuContext) -> Result<(), UiError> {
        let screen = ctx.screen_size;
        self.registry.clear();

        self.registry.register(
            menu_button("start", "Start Game", ctx)
                .centered_on(screen, BUTTON_WIDTH - 75, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 0))
                .hover_label("> Start Game <")
                .tooltip("Start a new game")
                .on_click(MainCommand::StartGame)
                .build()?,
        )?;

        self.registry.register(
            menu_button("load", "Load Game", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 1))
                .hover_label("Load Game (Unavailable)")
                .tooltip("Load a saved game")
                .disabled(true)
                .build()?,
        )?;

        self.registry.register(
            menu_button("settings", "Settings", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 2))
                .hover_label("* Settings *")
                .tooltip("Game settings")
                .icon(ctx.assets.image("settings_icon.png"))
                .on_click(MainCommand::Settings)
                .build()?,
        )?;

        self.registry.register(
            menu_button("test", "Test Menu", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 3))
                .hover_label("> Test Menu <")
                .tooltip("Test features")
                .on_click(MainCommand::TestMenu)
                .build()?,
        )?;

        let mut quit = menu_button("quit", "Quit", ctx)
            .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 4))
            .hover_label("X Exit Game X")
            .tooltip("Exit the game")
            .on_click(MainCommand::Quit)
            .build()?;
        quit.style_mut().hover_text = Some(DANGER_TEXT_COLOR);
        self.registry.register(quit)?;

        self.registry.set_focus("start");
        Ok(())
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut MenuContext) -> bool {
        let mut commands = Vec::new();
        let handled = dispatch_to_widgets(&mut self.registry, event, ctx, &mut commands);
        for command in commands {
            self.apply(command, ctx);
        }
        handled
    }

    fn update(&mut self, dt: f32) {
        self.registry.update(dt);
    }

    fn draw(&self, painter: &mut dyn Painter, ctx: &MenuContext) -> Result<(), String> {
        draw_title(painter, "Main Menu", ctx.screen_size.0)?;
        self.registry.draw(painter)
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
    use crate::input_system::Key;

    fn built() -> (MainMenu, MenuContext) {
        let ctx = context();
        let mut menu = MainMenu::new();
        menu.create_widgets(&ctx).unwrap();
        (menu, ctx)
    }

    #[test]
    fn test_layout_and_initial_focus() {
        let (menu, _) = built();
        let ids: Vec<_> = menu.widget_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["start", "load", "settings", "test", "quit"]);
        assert_eq!(menu.focused_widget(), Some(WidgetId::from("start")));
        assert!(menu.registry.get("load").unwrap().is_disabled());
    }

    #[test]
    fn test_enter_on_start_opens_game() {
        let (mut menu, mut ctx) = built();
        assert!(menu.handle_event(&InputEvent::key(Key::Return), &mut ctx));
        assert_eq!(ctx.take_actions(), vec![MenuAction::TransitionTo(StateId::Pause)]);
    }

    #[test]
    fn test_tab_skips_disabled_load() {
        let (mut menu, mut ctx) = built();
        menu.handle_event(&InputEvent::key(Key::Tab), &mut ctx);
        assert_eq!(menu.focused_widget(), Some(WidgetId::from("settings")));
    }

    #[test]
    fn test_quit_button() {
        let (mut menu, mut ctx) = built();
        menu.registry.set_focus("quit");
        menu.handle_event(&InputEvent::key(Key::Space), &mut ctx);
        assert_eq!(ctx.take_actions(), vec![MenuAction::Quit]);
    }

    #[test]
    fn test_cleanup_clears_registry() {
        let (mut menu, _) = built();
        menu.cleanup();
        assert!(menu.widget_ids().is_empty());
        assert_eq!(menu.focused_widget(), None);
    }
}
