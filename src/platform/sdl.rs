//! SDL2 backend
//!
//! Translates SDL events into [`InputEvent`]s, paints through an SDL canvas
//! and switches between windowed and desktop-fullscreen modes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sdl2::EventPump;
use sdl2::event::{Event, WindowEvent};
use sdl2::image::LoadTexture;
use sdl2::keyboard::{Keycode, Mod};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{FullscreenType, Window, WindowContext};

use crate::audio::{AudioSink, SilentAudio};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_FPS};
use crate::gui::Platform;
use crate::input_system::{InputEvent, Key, KeyMods, MouseButton};
use crate::render::Painter;
use crate::ui::{Color, Rect};

fn sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

fn sdl_rect(rect: Rect) -> sdl2::rect::Rect {
    sdl2::rect::Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// Maps an SDL keycode onto the keys the menus distinguish
pub fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Tab => Key::Tab,
        Keycode::Return => Key::Return,
        Keycode::KpEnter => Key::KeypadEnter,
        Keycode::Space => Key::Space,
        Keycode::Escape => Key::Escape,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::F11 => Key::F11,
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Key::char(c),
                _ => Key::Other,
            }
        }
    }
}

fn translate_button(button: sdl2::mouse::MouseButton) -> MouseButton {
    match button {
        sdl2::mouse::MouseButton::Left => MouseButton::Left,
        sdl2::mouse::MouseButton::Right => MouseButton::Right,
        sdl2::mouse::MouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

/// Converts one SDL event; events the menus ignore map to `None`
pub fn translate_event(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::Window {
            win_event: WindowEvent::Resized(width, height),
            ..
        } => Some(InputEvent::Resized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }),
        Event::MouseMotion { x, y, .. } => Some(InputEvent::MouseMotion { x, y }),
        Event::MouseButtonDown { mouse_btn, x, y, .. } => Some(InputEvent::MouseDown {
            button: translate_button(mouse_btn),
            x,
            y,
        }),
        Event::MouseButtonUp { mouse_btn, x, y, .. } => Some(InputEvent::MouseUp {
            button: translate_button(mouse_btn),
            x,
            y,
        }),
        Event::KeyDown {
            keycode: Some(keycode),
            keymod,
            repeat,
            ..
        } => {
            let key = translate_key(keycode);
            // Held arrows keep stepping sliders; everything else fires once
            if repeat && !matches!(key, Key::Left | Key::Right | Key::Up | Key::Down) {
                return None;
            }
            let mods = KeyMods {
                shift: keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD),
            };
            Some(InputEvent::KeyDown { key, mods })
        }
        _ => None,
    }
}

/// Opens the game window and its accelerated canvas
pub fn create_canvas(
    video: &sdl2::VideoSubsystem,
    title: &str,
    fullscreen: bool,
) -> Result<Canvas<Window>, String> {
    let mut builder = video.window(title, SCREEN_WIDTH, SCREEN_HEIGHT);
    builder.position_centered().resizable();
    if fullscreen {
        builder.fullscreen_desktop();
    }
    let window = builder.build().map_err(|e| e.to_string())?;
    window
        .into_canvas()
        .present_vsync()
        .build()
        .map_err(|e| e.to_string())
}

/// Icons loaded so far; a failed load is remembered as `None`
type IconCache<'a> = HashMap<String, Option<Texture<'a>>>;

fn load_icon<'a>(creator: &'a TextureCreator<WindowContext>, icons: &mut IconCache<'a>, key: &str) {
    if icons.contains_key(key) {
        return;
    }
    let texture = match creator.load_texture(key) {
        Ok(texture) => Some(texture),
        Err(e) => {
            tracing::warn!("Failed to load icon {}: {}", key, e);
            None
        }
    };
    icons.insert(key.to_string(), texture);
}

/// Painter over the SDL canvas for a single frame
pub struct SdlPainter<'p, 'a> {
    canvas: &'p mut Canvas<Window>,
    creator: &'a TextureCreator<WindowContext>,
    icons: &'p mut IconCache<'a>,
}

impl SdlPainter<'_, '_> {
    fn set_color(&mut self, color: Color) {
        let mode = if color.a < 255 { BlendMode::Blend } else { BlendMode::None };
        self.canvas.set_blend_mode(mode);
        self.canvas.set_draw_color(sdl_color(color));
    }
}

impl Painter for SdlPainter<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        if rect.is_empty() {
            return Ok(());
        }
        self.set_color(color);
        self.canvas.fill_rect(sdl_rect(rect))
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        if rect.is_empty() {
            return Ok(());
        }
        self.set_color(color);
        self.canvas.draw_rect(sdl_rect(rect))
    }

    fn draw_icon(&mut self, icon: &str, rect: Rect) -> Result<(), String> {
        if rect.is_empty() {
            return Ok(());
        }
        load_icon(self.creator, self.icons, icon);
        match self.icons.get(icon) {
            Some(Some(texture)) => self.canvas.copy(texture, None, Some(sdl_rect(rect))),
            _ => Ok(()),
        }
    }

    fn size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    fn icon_size(&self, icon: &str) -> Option<(u32, u32)> {
        match self.icons.get(icon) {
            Some(Some(texture)) => {
                let query = texture.query();
                Some((query.width, query.height))
            }
            _ => None,
        }
    }
}

pub struct SdlPlatform<'a> {
    canvas: Canvas<Window>,
    creator: &'a TextureCreator<WindowContext>,
    icons: IconCache<'a>,
    event_pump: EventPump,
    audio: SilentAudio,
    last_frame: Instant,
}

impl<'a> SdlPlatform<'a> {
    pub fn new(canvas: Canvas<Window>, event_pump: EventPump, creator: &'a TextureCreator<WindowContext>) -> Self {
        SdlPlatform {
            canvas,
            creator,
            icons: HashMap::new(),
            event_pump,
            audio: SilentAudio,
            last_frame: Instant::now(),
        }
    }

    /// Loads an icon up front so its size is known on the first frame
    pub fn preload_icon(&mut self, key: &str) {
        load_icon(self.creator, &mut self.icons, key);
    }
}

impl Platform for SdlPlatform<'_> {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.event_pump.poll_iter().filter_map(|e| translate_event(&e)).collect()
    }

    fn screen_size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(u32, u32), String> {
        let window = self.canvas.window_mut();
        if fullscreen {
            window.set_fullscreen(FullscreenType::Desktop)?;
        } else {
            window.set_fullscreen(FullscreenType::Off)?;
            window.set_size(SCREEN_WIDTH, SCREEN_HEIGHT).map_err(|e| e.to_string())?;
            window.set_position(
                sdl2::video::WindowPos::Centered,
                sdl2::video::WindowPos::Centered,
            );
        }
        tracing::info!("Fullscreen {}", if fullscreen { "on" } else { "off" });
        Ok(window.size())
    }

    fn draw_frame(
        &mut self,
        draw: &mut dyn FnMut(&mut dyn Painter) -> Result<(), String>,
    ) -> Result<(), String> {
        self.canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        self.canvas.clear();
        {
            let mut painter = SdlPainter {
                canvas: &mut self.canvas,
                creator: self.creator,
                icons: &mut self.icons,
            };
            draw(&mut painter)?;
        }
        self.canvas.present();
        Ok(())
    }

    fn audio(&mut self) -> &mut dyn AudioSink {
        &mut self.audio
    }

    fn frame_time(&mut self) -> f32 {
        let budget = Duration::from_secs_f32(1.0 / TARGET_FPS as f32);
        let elapsed = self.last_frame.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }
}
