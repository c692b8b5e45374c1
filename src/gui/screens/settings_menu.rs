//! Settings screen
//!
//! Every control writes straight through to the [`crate::save::SettingsStore`];
//! the host reacts to [`MenuAction::MusicChanged`] and
//! [`MenuAction::ToggleFullscreen`] for the parts it owns.

use super::{BUTTON_HEIGHT, BUTTON_WIDTH, menu_button, row_offset};
use crate::config::TEXT_COLOR;
use crate::gui::menu::{MenuAction, MenuContext, MenuState, StateId, dispatch_to_widgets, draw_title};
use crate::input_system::InputEvent;
use crate::render::Painter;
use crate::save::settings::MAX_VOLUME;
use crate::ui::{UiError, Widget, WidgetBuilder, WidgetId, WidgetRegistry};

const FIRST_ROW: i32 = -170;
const SLIDER_HEIGHT: u32 = 20;
const VOLUME_STEP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    ToggleMusic,
    ToggleFps,
    ToggleFullscreen,
    MusicVolume(i32),
    SfxVolume(i32),
    Back,
}

fn music_label(enabled: bool) -> &'static str {
    if enabled { "Disable Music" } else { "Enable Music" }
}

fn fps_label(visible: bool) -> &'static str {
    if visible { "Hide FPS" } else { "Show FPS" }
}

fn fullscreen_label(fullscreen: bool) -> &'static str {
    if fullscreen { "Windowed Mode" } else { "Fullscreen Mode" }
}

fn to_volume(value: i32) -> u8 {
    value.clamp(0, MAX_VOLUME as i32) as u8
}

pub struct SettingsMenu {
    registry: WidgetRegistry<SettingsCommand>,
}

impl SettingsMenu {
    pub fn new() -> Self {
        SettingsMenu {
            registry: WidgetRegistry::new(),
        }
    }

    fn relabel(&mut self, id: &str, label: &str) {
        if let Some(widget) = self.registry.get_mut(id) {
            widget.set_label(label);
        }
    }

    fn apply(&mut self, command: SettingsCommand, ctx: &mut MenuContext) {
        match command {
            SettingsCommand::ToggleMusic => {
                let enabled = ctx.settings.toggle_music();
                self.relabel("music", music_label(enabled));
                ctx.push(MenuAction::MusicChanged);
            }
            SettingsCommand::ToggleFps => {
                let visible = ctx.settings.toggle_fps_display();
                self.relabel("fps", fps_label(visible));
            }
            // The host persists the flag and rebuilds this screen
            SettingsCommand::ToggleFullscreen => ctx.push(MenuAction::ToggleFullscreen),
            SettingsCommand::MusicVolume(value) => {
                ctx.settings.set_music_volume(to_volume(value));
                ctx.push(MenuAction::MusicChanged);
            }
            SettingsCommand::SfxVolume(value) => ctx.settings.set_sfx_volume(to_volume(value)),
            SettingsCommand::Back => ctx.push(MenuAction::TransitionTo(StateId::Main)),
        }
    }

    fn slider(
        id: &str,
        label: &str,
        value: u8,
        y_offset: i32,
        on_change: fn(i32) -> SettingsCommand,
        ctx: &MenuContext,
    ) -> Result<Widget<SettingsCommand>, UiError> {
        WidgetBuilder::slider(id, label, 0, MAX_VOLUME as i32, value as i32)
            .centered_on(ctx.screen_size, BUTTON_WIDTH, SLIDER_HEIGHT, 0, y_offset)
            .step(VOLUME_STEP)
            .text_color(TEXT_COLOR)
            .sounds(ctx.sounds.click.clone(), None)
            .focus_sound(ctx.sounds.focus.clone())
            .on_change(on_change)
            .build()
    }
}

impl Default for SettingsMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState for SettingsMenu {
    fn id(&self) -> StateId {
        StateId::Settings
    }

    fn create_widgets(&mut self, ctx: &MenuContext) -> Result<(), UiError> {
        let screen = ctx.screen_size;
        let settings = &ctx.settings;
        self.registry.clear();

        self.registry.register(
            menu_button("music", music_label(settings.music_enabled()), ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 0))
                .tooltip("Toggle background music")
                .on_click(SettingsCommand::ToggleMusic)
                .build()?,
        )?;

        self.registry.register(
            menu_button("fps", fps_label(settings.fps_display()), ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 1))
                .tooltip("Toggle FPS counter")
                .on_click(SettingsCommand::ToggleFps)
                .build()?,
        )?;

        self.registry.register(
            menu_button("fullscreen", fullscreen_label(settings.fullscreen()), ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 2))
                .tooltip("Switch display mode (F11)")
                .on_click(SettingsCommand::ToggleFullscreen)
                .build()?,
        )?;

        // Sliders need room for the label above and the value below
        let sliders_top = row_offset(FIRST_ROW, 3) + 10;
        self.registry.register(Self::slider(
            "music_volume",
            "Music Volume",
            settings.music_volume(),
            sliders_top,
            SettingsCommand::MusicVolume,
            ctx,
        )?)?;
        self.registry.register(Self::slider(
            "sfx_volume",
            "Effects Volume",
            settings.sfx_volume(),
            sliders_top + 70,
            SettingsCommand::SfxVolume,
            ctx,
        )?)?;

        self.registry.register(
            menu_button("back", "Back to Main Menu", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, sliders_top + 140)
                .hover_label("< Main Menu")
                .tooltip("Return to main menu")
                .on_click(SettingsCommand::Back)
                .build()?,
        )?;

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
        draw_title(painter, "Settings Menu", ctx.screen_size.0)?;
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

    fn built(ctx: &MenuContext) -> SettingsMenu {
        let mut menu = SettingsMenu::new();
        menu.create_widgets(ctx).unwrap();
        menu
    }

    fn activate(menu: &mut SettingsMenu, id: &str, ctx: &mut MenuContext) {
        assert!(menu.registry.set_focus(id));
        menu.handle_event(&InputEvent::key(Key::Return), ctx);
    }

    #[test]
    fn test_labels_follow_settings() {
        let mut ctx = context();
        ctx.settings.set_fps_display(true);
        let menu = built(&ctx);
        assert_eq!(menu.registry.get("music").unwrap().label(), "Disable Music");
        assert_eq!(menu.registry.get("fps").unwrap().label(), "Hide FPS");
        assert_eq!(menu.registry.get("fullscreen").unwrap().label(), "Fullscreen Mode");
    }

    #[test]
    fn test_toggle_music_persists_and_relabels() {
        let mut ctx = context();
        let mut menu = built(&ctx);

        activate(&mut menu, "music", &mut ctx);
        assert!(!ctx.settings.music_enabled());
        assert_eq!(menu.registry.get("music").unwrap().label(), "Enable Music");
        assert_eq!(ctx.take_actions(), vec![MenuAction::MusicChanged]);
    }

    #[test]
    fn test_toggle_fps() {
        let mut ctx = context();
        let mut menu = built(&ctx);
        activate(&mut menu, "fps", &mut ctx);
        assert!(ctx.settings.fps_display());
        assert_eq!(menu.registry.get("fps").unwrap().label(), "Hide FPS");
    }

    #[test]
    fn test_fullscreen_is_delegated_to_host() {
        let mut ctx = context();
        let mut menu = built(&ctx);
        activate(&mut menu, "fullscreen", &mut ctx);
        assert_eq!(ctx.take_actions(), vec![MenuAction::ToggleFullscreen]);
        assert!(!ctx.settings.fullscreen());
    }

    #[test]
    fn test_volume_slider_keys_write_settings() {
        let mut ctx = context();
        let mut menu = built(&ctx);
        menu.registry.set_focus("sfx_volume");
        menu.handle_event(&InputEvent::key(Key::Left), &mut ctx);
        menu.handle_event(&InputEvent::key(Key::Left), &mut ctx);
        assert_eq!(ctx.settings.sfx_volume(), 90);

        menu.registry.set_focus("music_volume");
        menu.handle_event(&InputEvent::key(Key::Left), &mut ctx);
        assert_eq!(ctx.settings.music_volume(), 95);
        assert_eq!(ctx.take_actions(), vec![MenuAction::MusicChanged]);
    }

    #[test]
    fn test_back_returns_to_main() {
        let mut ctx = context();
        let mut menu = built(&ctx);
        activate(&mut menu, "back", &mut ctx);
        assert_eq!(ctx.take_actions(), vec![MenuAction::TransitionTo(StateId::Main)]);
    }
}
