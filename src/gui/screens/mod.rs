//! The concrete menu screens and their shared layout helpers

pub mod main_menu;
pub mod pause_menu;
pub mod settings_menu;
pub mod test_menu;

pub use main_menu::MainMenu;
pub use pause_menu::PauseMenu;
pub use settings_menu::SettingsMenu;
pub use test_menu::TestMenu;

use super::menu::{MenuContext, MenuManager, StateId};
use crate::config::{HOVER_TEXT_COLOR, TEXT_COLOR};
use crate::ui::{WidgetBuilder, WidgetStyle};

// Button geometry and spacing
pub const BUTTON_WIDTH: u32 = 250;
pub const BUTTON_HEIGHT: u32 = 50;
pub const BUTTON_SPACING: u32 = 20;

/// Vertical offset (from screen center) of the `row`-th button in a column
pub fn row_offset(first: i32, row: u32) -> i32 {
    first + (row * (BUTTON_HEIGHT + BUTTON_SPACING)) as i32
}

/// Text-only menu button with the shared hover color and UI sounds
pub fn menu_button<C: Clone>(id: &str, label: &str, ctx: &MenuContext) -> WidgetBuilder<C> {
    let style = WidgetStyle {
        text: TEXT_COLOR,
        hover_text: Some(HOVER_TEXT_COLOR),
        ..Default::default()
    };
    WidgetBuilder::button(id, label)
        .style(style)
        .text_only()
        .sounds(ctx.sounds.click.clone(), ctx.sounds.hover.clone())
        .focus_sound(ctx.sounds.focus.clone())
}

/// Registers every screen with the manager
pub fn register_all(manager: &mut MenuManager) {
    manager.register_state(StateId::Main, Box::new(|| Box::new(MainMenu::new())));
    manager.register_state(StateId::Settings, Box::new(|| Box::new(SettingsMenu::new())));
    manager.register_state(StateId::Test, Box::new(|| Box::new(TestMenu::new())));
    manager.register_state(StateId::Pause, Box::new(|| Box::new(PauseMenu::new())));
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::AssetPaths;
    use crate::save::SettingsStore;

    pub fn context() -> MenuContext {
        MenuContext::new(SettingsStore::in_memory(), AssetPaths::new("no/such/assets"), (1280, 720))
    }

    pub fn manager() -> MenuManager {
        let mut manager = MenuManager::new();
        register_all(&mut manager);
        manager
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::input_system::InputEvent;
    use crate::gui::menu::MenuAction;
    use crate::ui::WidgetId;

    fn ids(manager: &MenuManager) -> Vec<String> {
        manager
            .current()
            .map(|state| state.widget_ids().iter().map(WidgetId::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_row_offsets() {
        assert_eq!(row_offset(-100, 0), -100);
        assert_eq!(row_offset(-100, 2), 40);
    }

    #[test]
    fn test_every_screen_builds() {
        let mut manager = manager();
        let mut ctx = context();
        for id in [StateId::Main, StateId::Settings, StateId::Test, StateId::Pause] {
            manager.transition_to(id, &mut ctx).unwrap();
            assert_eq!(manager.current_id(), Some(id));
            assert!(!ids(&manager).is_empty());
        }
    }

    #[test]
    fn test_main_settings_main_leaves_no_settings_widgets() {
        let mut manager = manager();
        let mut ctx = context();
        manager.transition_to(StateId::Main, &mut ctx).unwrap();
        let main_ids = ids(&manager);

        manager.transition_to(StateId::Settings, &mut ctx).unwrap();
        assert!(ids(&manager).contains(&"music_volume".to_string()));

        manager.transition_to(StateId::Main, &mut ctx).unwrap();
        assert_eq!(ids(&manager), main_ids);
        assert!(!ids(&manager).contains(&"music_volume".to_string()));
    }

    #[test]
    fn test_click_through_main_to_settings_and_back() {
        let mut manager = manager();
        let mut ctx = context();
        manager.transition_to(StateId::Main, &mut ctx).unwrap();

        // Settings is the third row of the main column
        let y = 360 + row_offset(-100, 2);
        manager.handle_event(&InputEvent::MouseMotion { x: 640, y }, &mut ctx);
        manager.handle_event(&InputEvent::left_down(640, y), &mut ctx);
        manager.handle_event(&InputEvent::left_up(640, y), &mut ctx);

        let actions = ctx.take_actions();
        assert_eq!(actions, vec![MenuAction::TransitionTo(StateId::Settings)]);
        // Nothing moves until the host applies the action
        assert_eq!(manager.current_id(), Some(StateId::Main));
    }

    #[test]
    fn test_rebuild_does_not_duplicate_widgets() {
        let mut manager = manager();
        let mut ctx = context();
        manager.transition_to(StateId::Test, &mut ctx).unwrap();
        let before = ids(&manager);
        manager.rebuild(&mut ctx).unwrap();
        manager.rebuild(&mut ctx).unwrap();
        assert_eq!(ids(&manager), before);
    }
}
