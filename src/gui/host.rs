//! Menu Host
//!
//! Runs the frame loop around a [`MenuManager`]:
//!
//! 1. Poll events from the [`Platform`]
//! 2. Intercept common actions (quit, resize, fullscreen) before the
//!    active screen sees them
//! 3. Forward everything else, then apply the [`MenuAction`]s the screen
//!    queued
//! 4. Update and draw (background, screen, help line, FPS counter)

use crate::audio::AudioSink;
use crate::config::{BACKGROUND_COLOR, FPS_COLOR, HELP_TEXT, TEXT_COLOR};
use crate::gui::menu::{MenuAction, MenuContext, MenuError, MenuManager, StateId};
use crate::gui::screens::register_all;
use crate::input_system::{CommonAction, InputEvent, InputSystem};
use crate::render::Painter;
use crate::text::text_width;
use crate::ui::Rect;

/// Window, input and audio services the host runs on
pub trait Platform {
    /// Events gathered since the previous call
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Current drawable size in pixels
    fn screen_size(&self) -> (u32, u32);

    /// Switches display mode and returns the new screen size
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(u32, u32), String>;

    /// Clears, runs `draw` with a painter for this frame, and presents
    fn draw_frame(
        &mut self,
        draw: &mut dyn FnMut(&mut dyn Painter) -> Result<(), String>,
    ) -> Result<(), String>;

    fn audio(&mut self) -> &mut dyn AudioSink;

    /// Paces the loop and returns the seconds elapsed since the last frame
    fn frame_time(&mut self) -> f32;
}

/// Rolling frames-per-second measurement
#[derive(Debug, Default)]
struct FpsCounter {
    frames: u32,
    elapsed: f32,
    current: f32,
}

impl FpsCounter {
    /// Recomputed twice a second
    const WINDOW: f32 = 0.5;

    fn tick(&mut self, dt: f32) -> f32 {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= Self::WINDOW {
            self.current = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
        self.current
    }
}

/// Scales `image` to cover `screen` while keeping its aspect ratio,
/// centered (edges may be cropped)
pub fn cover_rect(image: (u32, u32), screen: (u32, u32)) -> Rect {
    if image.0 == 0 || image.1 == 0 {
        return Rect::new(0, 0, screen.0, screen.1);
    }
    let scale = (screen.0 as f32 / image.0 as f32).max(screen.1 as f32 / image.1 as f32);
    let width = (image.0 as f32 * scale).round() as u32;
    let height = (image.1 as f32 * scale).round() as u32;
    Rect::new(
        (screen.0 as i32 - width as i32) / 2,
        (screen.1 as i32 - height as i32) / 2,
        width,
        height,
    )
}

pub struct MenuHost {
    manager: MenuManager,
    ctx: MenuContext,
    input: InputSystem,
    running: bool,
    fps: FpsCounter,
    /// Icon key of the background image, if the file exists
    background: Option<String>,
}

impl MenuHost {
    /// Host with every screen registered
    pub fn new(ctx: MenuContext) -> Self {
        let mut manager = MenuManager::new();
        register_all(&mut manager);
        Self::with_manager(manager, ctx)
    }

    pub fn with_manager(manager: MenuManager, ctx: MenuContext) -> Self {
        let background_path = ctx.assets.background_image();
        let background = if background_path.exists() {
            Some(background_path.to_string_lossy().into_owned())
        } else {
            tracing::warn!("Background image {:?} not found", background_path);
            None
        };

        MenuHost {
            manager,
            ctx,
            input: InputSystem::new(),
            running: true,
            fps: FpsCounter::default(),
            background,
        }
    }

    pub fn context(&self) -> &MenuContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut MenuContext {
        &mut self.ctx
    }

    pub fn manager(&self) -> &MenuManager {
        &self.manager
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Key of the background image for platforms that preload icons
    pub fn background_icon(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Enters the main menu and starts music according to the settings
    pub fn start(&mut self, platform: &mut dyn Platform) -> Result<(), MenuError> {
        self.start_in(StateId::Main, platform)
    }

    pub fn start_in(&mut self, state: StateId, platform: &mut dyn Platform) -> Result<(), MenuError> {
        self.ctx.screen_size = platform.screen_size();
        self.running = true;
        self.apply_music(platform);
        self.manager.transition_to(state, &mut self.ctx)
    }

    /// Runs until quit is requested; returns `true` when the user asked to exit
    pub fn run(&mut self, platform: &mut dyn Platform) -> Result<bool, String> {
        self.run_from(StateId::Main, platform)
    }

    pub fn run_from(&mut self, state: StateId, platform: &mut dyn Platform) -> Result<bool, String> {
        self.start_in(state, platform).map_err(|e| e.to_string())?;
        while self.run_frame(platform)? {}
        tracing::info!("Menu loop finished");
        Ok(true)
    }

    /// Processes one frame; returns whether the loop should continue
    pub fn run_frame(&mut self, platform: &mut dyn Platform) -> Result<bool, String> {
        for event in platform.poll_events() {
            self.handle_event(&event, platform);
            if !self.running {
                return Ok(false);
            }
        }

        let dt = platform.frame_time();
        self.ctx.fps = self.fps.tick(dt);
        self.manager.update(dt);

        let manager = &self.manager;
        let ctx = &self.ctx;
        let background = self.background.as_deref();
        platform.draw_frame(&mut |painter| Self::draw(manager, ctx, background, painter))?;

        Ok(self.running)
    }

    /// Routes one event: common actions first, then the active screen
    pub fn handle_event(&mut self, event: &InputEvent, platform: &mut dyn Platform) {
        match self.input.common_action(event) {
            Some(action) => self.apply_common(action, platform),
            None => {
                self.manager.handle_event(event, &mut self.ctx);
            }
        }
        self.apply_actions(platform);
    }

    fn apply_common(&mut self, action: CommonAction, platform: &mut dyn Platform) {
        match action {
            CommonAction::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            CommonAction::Resize { width, height } => {
                tracing::debug!("Window resized to {}x{}", width, height);
                self.ctx.screen_size = (width, height);
                self.rebuild();
            }
            CommonAction::ToggleFullscreen => self.toggle_fullscreen(platform),
        }
    }

    fn apply_actions(&mut self, platform: &mut dyn Platform) {
        for action in self.ctx.take_actions() {
            match action {
                MenuAction::TransitionTo(id) => {
                    // Failures are logged by the manager; the current screen stays
                    let _ = self.manager.transition_to(id, &mut self.ctx);
                }
                MenuAction::Quit => {
                    tracing::info!("Quit requested");
                    self.running = false;
                }
                MenuAction::ToggleFullscreen => self.toggle_fullscreen(platform),
                MenuAction::MusicChanged => self.apply_music(platform),
                MenuAction::PlaySound(cue) => {
                    let volume = self.ctx.settings.sfx_volume();
                    platform.audio().play_sound(&cue, volume);
                }
            }
        }
    }

    /// Persists the flipped setting, switches mode and rebuilds the screen
    fn toggle_fullscreen(&mut self, platform: &mut dyn Platform) {
        let fullscreen = self.ctx.settings.toggle_fullscreen();
        match platform.set_fullscreen(fullscreen) {
            Ok(size) => self.ctx.screen_size = size,
            Err(e) => tracing::warn!("Failed to switch display mode: {}", e),
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        if let Err(e) = self.manager.rebuild(&mut self.ctx) {
            tracing::error!("Failed to rebuild menu: {}", e);
        }
    }

    fn apply_music(&mut self, platform: &mut dyn Platform) {
        let enabled = self.ctx.settings.music_enabled();
        let volume = self.ctx.settings.music_volume();
        platform.audio().set_music(enabled, volume);
    }

    fn draw(
        manager: &MenuManager,
        ctx: &MenuContext,
        background: Option<&str>,
        painter: &mut dyn Painter,
    ) -> Result<(), String> {
        let (width, height) = ctx.screen_size;
        painter.fill_rect(Rect::new(0, 0, width, height), BACKGROUND_COLOR)?;
        if let Some(icon) = background {
            let rect = match painter.icon_size(icon) {
                Some(size) => cover_rect(size, ctx.screen_size),
                None => Rect::new(0, 0, width, height),
            };
            painter.draw_icon(icon, rect)?;
        }

        manager.draw(painter, ctx)?;

        let help_x = (width as i32 - text_width(HELP_TEXT, 2) as i32) / 2;
        painter.draw_text(HELP_TEXT, help_x, height as i32 - 40, TEXT_COLOR, 2)?;

        if ctx.settings.fps_display() {
            painter.draw_text(&format!("FPS: {}", ctx.fps.round() as u32), 10, 10, FPS_COLOR, 2)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::audio::SoundCue;
    use crate::config::AssetPaths;
    use crate::gui::screens::row_offset;
    use crate::input_system::Key;
    use crate::save::SettingsStore;
    use crate::ui::WidgetId;

    fn host() -> MenuHost {
        let ctx = MenuContext::new(SettingsStore::in_memory(), AssetPaths::new("no/such/assets"), (1280, 720));
        MenuHost::new(ctx)
    }

    /// Center of the `row`-th main menu button
    fn main_row(row: u32) -> (i32, i32) {
        (640, 360 + row_offset(-100, row))
    }

    fn click(x: i32, y: i32) -> Vec<InputEvent> {
        vec![
            InputEvent::MouseMotion { x, y },
            InputEvent::left_down(x, y),
            InputEvent::left_up(x, y),
        ]
    }

    #[test]
    fn test_run_until_quit() {
        let mut host = host();
        let mut platform = ScriptedPlatform::new(vec![vec![], vec![]]);
        assert!(host.run(&mut platform).unwrap());
        assert_eq!(platform.frames_drawn, 2);
        assert!(!host.is_running());
        // Music started from the settings on entry
        assert_eq!(platform.audio.music, vec![(true, 100)]);
    }

    #[test]
    fn test_q_key_quits() {
        let mut host = host();
        let mut platform = ScriptedPlatform::new(vec![vec![InputEvent::key(Key::char('q'))]]);
        host.start(&mut platform).unwrap();
        assert!(!host.run_frame(&mut platform).unwrap());
        assert_eq!(platform.frames_drawn, 0);
    }

    #[test]
    fn test_click_settings_transitions() {
        let mut host = host();
        let (x, y) = main_row(2);
        let mut platform = ScriptedPlatform::new(vec![click(x, y)]);
        host.start(&mut platform).unwrap();
        host.run_frame(&mut platform).unwrap();
        assert_eq!(host.manager().current_id(), Some(StateId::Settings));
        assert!(platform.texts().contains(&"Settings Menu".to_string()));
    }

    #[test]
    fn test_quit_button_stops_loop() {
        let mut host = host();
        let (x, y) = main_row(4);
        let mut platform = ScriptedPlatform::new(vec![click(x, y)]);
        host.start(&mut platform).unwrap();
        assert!(!host.run_frame(&mut platform).unwrap());
    }

    #[test]
    fn test_resize_rebuilds_and_cancels_press() {
        let mut host = host();
        let (x, y) = main_row(2);
        let mut platform = ScriptedPlatform::new(vec![vec![
            InputEvent::MouseMotion { x, y },
            InputEvent::left_down(x, y),
            InputEvent::Resized {
                width: 1280,
                height: 720,
            },
            InputEvent::left_up(x, y),
        ]]);
        host.start(&mut platform).unwrap();
        host.run_frame(&mut platform).unwrap();

        // The press was abandoned with the old widgets
        assert_eq!(host.manager().current_id(), Some(StateId::Main));
        assert_eq!(
            host.manager().current().and_then(|s| s.focused_widget()),
            Some(WidgetId::from("start"))
        );
    }

    #[test]
    fn test_resize_cancels_slider_drag() {
        let mut host = host();
        // Music volume slider spans x 515..765 around y 410; 764 maps to 100
        let mut platform = ScriptedPlatform::new(vec![vec![
            InputEvent::MouseMotion { x: 764, y: 410 },
            InputEvent::left_down(764, 410),
            InputEvent::Resized {
                width: 1280,
                height: 720,
            },
            InputEvent::MouseMotion { x: 540, y: 410 },
            InputEvent::left_up(540, 410),
        ]]);
        host.start_in(StateId::Settings, &mut platform).unwrap();
        host.run_frame(&mut platform).unwrap();

        assert_eq!(host.manager().current_id(), Some(StateId::Settings));
        assert_eq!(host.context().settings.music_volume(), 100);
        assert!(platform.audio.music.iter().all(|&(_, volume)| volume == 100));
    }

    #[test]
    fn test_resize_updates_screen_size() {
        let mut host = host();
        let mut platform = ScriptedPlatform::new(vec![vec![InputEvent::Resized {
            width: 800,
            height: 600,
        }]]);
        host.start(&mut platform).unwrap();
        host.run_frame(&mut platform).unwrap();
        assert_eq!(host.context().screen_size, (800, 600));
    }

    #[test]
    fn test_f11_toggles_and_persists_fullscreen() {
        let mut host = host();
        let mut platform = ScriptedPlatform::new(vec![
            vec![InputEvent::key(Key::F11)],
            vec![InputEvent::key(Key::F11)],
        ]);
        host.start(&mut platform).unwrap();

        host.run_frame(&mut platform).unwrap();
        assert!(host.context().settings.fullscreen());
        assert_eq!(host.context().screen_size, (1920, 1080));

        host.run_frame(&mut platform).unwrap();
        assert!(!host.context().settings.fullscreen());
        assert_eq!(platform.fullscreen, vec![true, false]);
        assert_eq!(host.context().screen_size, (1280, 720));
    }

    #[test]
    fn test_help_line_and_fps_counter() {
        let mut host = host();
        let mut platform = ScriptedPlatform::new(vec![vec![]]);
        host.start(&mut platform).unwrap();
        host.run_frame(&mut platform).unwrap();
        assert!(platform.texts().contains(&HELP_TEXT.to_string()));
        assert!(!platform.texts().iter().any(|t| t.starts_with("FPS")));

        host.context_mut().settings.set_fps_display(true);
        platform.frames.push_back(vec![]);
        host.run_frame(&mut platform).unwrap();
        assert!(platform.texts().iter().any(|t| t.starts_with("FPS: ")));
    }

    #[test]
    fn test_sounds_play_at_sfx_volume() {
        let mut host = host();
        let cue = SoundCue::unchecked("click.wav");
        host.context_mut().sounds.click = Some(cue.clone());
        host.context_mut().settings.set_sfx_volume(40);

        let mut platform = ScriptedPlatform::new(vec![vec![InputEvent::key(Key::Return)]]);
        host.start(&mut platform).unwrap();
        host.run_frame(&mut platform).unwrap();

        assert_eq!(platform.audio.sounds, vec![(cue, 40)]);
        // Start Game was focused and opens the game view
        assert_eq!(host.manager().current_id(), Some(StateId::Pause));
    }

    #[test]
    fn test_cover_rect_keeps_aspect() {
        assert_eq!(cover_rect((640, 360), (1280, 720)), Rect::new(0, 0, 1280, 720));
        // Square image on a wide screen is cropped top and bottom
        assert_eq!(cover_rect((100, 100), (1280, 720)), Rect::new(0, -280, 1280, 1280));
        assert_eq!(cover_rect((0, 10), (1280, 720)), Rect::new(0, 0, 1280, 720));
    }

    #[test]
    fn test_fps_counter_window() {
        let mut fps = FpsCounter::default();
        for _ in 0..29 {
            fps.tick(1.0 / 60.0);
        }
        assert_eq!(fps.current, 0.0);
        let mut measured = 0.0;
        for _ in 0..11 {
            measured = fps.tick(1.0 / 60.0);
        }
        assert!((measured - 60.0).abs() < 0.5);
    }
}
