//! Test screen exercising every widget feature

use super::{BUTTON_HEIGHT, BUTTON_WIDTH, menu_button, row_offset};
use crate::gui::menu::{MenuAction, MenuContext, MenuState, StateId, dispatch_to_widgets, draw_title};
use crate::input_system::{InputEvent, Key};
use crate::render::Painter;
use crate::ui::{BadgePosition, GroupId, UiError, WidgetBuilder, WidgetId, WidgetRegistry};

const FIRST_ROW: i32 = -100;
const DIFFICULTY_ROW: i32 = -170;
const DIFFICULTY_WIDTH: u32 = 150;
const DIFFICULTY_HEIGHT: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    fn id(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCommand {
    Feature(u8),
    Difficulty(Difficulty),
    Notify,
    Back,
}

pub struct TestMenu {
    registry: WidgetRegistry<TestCommand>,
    difficulty_group: Option<GroupId>,
    notifications: u32,
}

impl TestMenu {
    pub fn new() -> Self {
        TestMenu {
            registry: WidgetRegistry::new(),
            difficulty_group: None,
            notifications: 0,
        }
    }

    /// Id of the selected difficulty button
    pub fn selected_difficulty(&self) -> Option<&WidgetId> {
        self.difficulty_group
            .and_then(|group| self.registry.group(group))
            .and_then(|group| group.selected())
    }

    fn apply(&mut self, command: TestCommand, ctx: &mut MenuContext) {
        match command {
            TestCommand::Feature(n) => tracing::info!("Test feature {} activated", n),
            TestCommand::Difficulty(difficulty) => {
                tracing::info!("Difficulty set to {:?}", difficulty)
            }
            TestCommand::Notify => {
                self.notifications += 1;
                if let Some(widget) = self.registry.get_mut("notify") {
                    widget.set_badge(Some(self.notifications.to_string()));
                }
            }
            TestCommand::Back => ctx.push(MenuAction::TransitionTo(StateId::Main)),
        }
    }
}

impl Default for TestMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState for TestMenu {
    fn id(&self) -> StateId {
        StateId::Test
    }

    fn create_widgets(&mut self, ctx: &MenuContext) -> Result<(), UiError> {
        let screen = ctx.screen_size;
        self.registry.clear();

        self.registry.register(
            menu_button("feature1", "Test Feature 1", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 0))
                .tooltip("Try test feature 1")
                .on_click(TestCommand::Feature(1))
                .build()?,
        )?;

        self.registry.register(
            menu_button("feature2", "Test Feature 2", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 1))
                .tooltip("Try test feature 2 (T)")
                .shortcut(Key::char('t'))
                .on_click(TestCommand::Feature(2))
                .build()?,
        )?;

        // Radio row above the column
        let group = self.registry.create_group(false);
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let x_offset = (i as i32 - 1) * (DIFFICULTY_WIDTH as i32 + 20);
            self.registry.register(
                WidgetBuilder::button(difficulty.id(), difficulty.label())
                    .centered_on(screen, DIFFICULTY_WIDTH, DIFFICULTY_HEIGHT, x_offset, DIFFICULTY_ROW)
                    .sounds(ctx.sounds.click.clone(), ctx.sounds.hover.clone())
                    .on_click(TestCommand::Difficulty(*difficulty))
                    .build()?,
            )?;
            self.registry.add_to_group(group, difficulty.id())?;
        }
        self.difficulty_group = Some(group);

        self.registry.register(
            menu_button("notify", "Notifications", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 2))
                .tooltip("Click to add a notification")
                .badge(self.notifications.to_string(), BadgePosition::TopRight)
                .on_click(TestCommand::Notify)
                .build()?,
        )?;

        self.registry.register(
            menu_button("locked", "Locked Feature", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 3))
                .hover_label("Locked Feature (Unavailable)")
                .disabled(true)
                .build()?,
        )?;

        self.registry.register(
            menu_button("back", "Back to Main Menu", ctx)
                .centered_on(screen, BUTTON_WIDTH, BUTTON_HEIGHT, 0, row_offset(FIRST_ROW, 4))
                .hover_label("< Main Menu")
                .tooltip("Return to main menu")
                .on_click(TestCommand::Back)
                .build()?,
        )?;

        self.registry.set_focus("feature1");
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
        draw_title(painter, "Test Menu", ctx.screen_size.0)?;
        self.registry.draw(painter)
    }

    fn cleanup(&mut self) {
        self.registry.clear();
        self.difficulty_group = None;
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
    use crate::ui::Rect;

    fn built() -> (TestMenu, MenuContext) {
        let ctx = context();
        let mut menu = TestMenu::new();
        menu.create_widgets(&ctx).unwrap();
        (menu, ctx)
    }

    fn click_center(menu: &mut TestMenu, bounds: Rect, ctx: &mut MenuContext) {
        let center = bounds.center();
        menu.handle_event(&InputEvent::MouseMotion { x: center.x, y: center.y }, ctx);
        menu.handle_event(&InputEvent::left_down(center.x, center.y), ctx);
        menu.handle_event(&InputEvent::left_up(center.x, center.y), ctx);
    }

    fn toggled(menu: &TestMenu) -> Vec<bool> {
        ["easy", "normal", "hard"]
            .iter()
            .map(|id| menu.registry.get(id).unwrap().is_toggled())
            .collect()
    }

    #[test]
    fn test_difficulty_radio_group() {
        let (mut menu, mut ctx) = built();
        assert_eq!(toggled(&menu), vec![true, false, false]);

        let normal = menu.registry.get("normal").unwrap().bounds();
        click_center(&mut menu, normal, &mut ctx);
        assert_eq!(toggled(&menu), vec![false, true, false]);

        let hard = menu.registry.get("hard").unwrap().bounds();
        click_center(&mut menu, hard, &mut ctx);
        assert_eq!(toggled(&menu), vec![false, false, true]);
        assert_eq!(menu.selected_difficulty(), Some(&WidgetId::from("hard")));
    }

    #[test]
    fn test_badge_counts_clicks() {
        let (mut menu, mut ctx) = built();
        let bounds = menu.registry.get("notify").unwrap().bounds();
        click_center(&mut menu, bounds, &mut ctx);
        click_center(&mut menu, bounds, &mut ctx);
        let badge = menu.registry.get("notify").unwrap().badge().unwrap();
        assert_eq!(badge.text, "2");
        assert_eq!(badge.position, BadgePosition::TopRight);
    }

    #[test]
    fn test_shortcut_works_without_focus() {
        let (mut menu, mut ctx) = built();
        assert!(menu.handle_event(&InputEvent::shift_key(Key::char('T')), &mut ctx));
        assert_eq!(menu.focused_widget(), Some(WidgetId::from("feature1")));
    }

    #[test]
    fn test_locked_button_never_reacts() {
        let (mut menu, mut ctx) = built();
        let bounds = menu.registry.get("locked").unwrap().bounds();
        click_center(&mut menu, bounds, &mut ctx);
        let locked = menu.registry.get("locked").unwrap();
        assert!(!locked.is_hovered());
        assert!(!locked.is_pressed());
        assert!(ctx.take_actions().is_empty());
    }

    #[test]
    fn test_tab_order_skips_locked() {
        let (mut menu, mut ctx) = built();
        let mut visited = Vec::new();
        for _ in 0..7 {
            menu.handle_event(&InputEvent::key(Key::Tab), &mut ctx);
            visited.push(menu.focused_widget().unwrap().to_string());
        }
        assert_eq!(
            visited,
            vec!["feature2", "easy", "normal", "hard", "notify", "back", "feature1"]
        );
    }
}
