//! Radio-style exclusive selection
//!
//! A group only stores the ids of its members. The widgets themselves live in
//! the owning [`super::focus::WidgetRegistry`], which passes them in whenever
//! the group needs to change their toggle flags.

use super::widget::{GroupId, Widget, WidgetId};

#[derive(Debug, Clone)]
pub struct SelectionGroup {
    id: GroupId,
    members: Vec<WidgetId>,
    selected: Option<WidgetId>,
    allow_unselect: bool,
}

impl SelectionGroup {
    /// Creates an empty group
    ///
    /// With `allow_unselect` the selection may be cleared, and activating the
    /// selected member again deselects it.
    pub fn new(id: GroupId, allow_unselect: bool) -> Self {
        SelectionGroup {
            id,
            members: Vec::new(),
            selected: None,
            allow_unselect,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn members(&self) -> &[WidgetId] {
        &self.members
    }

    pub fn selected(&self) -> Option<&WidgetId> {
        self.selected.as_ref()
    }

    pub fn allows_unselect(&self) -> bool {
        self.allow_unselect
    }

    /// Adds `widget` to the group, switching it into toggle mode
    ///
    /// The first member becomes the default selection; later members start
    /// untoggled.
    pub fn add<C: Clone>(&mut self, widget: &mut Widget<C>) {
        if self.members.contains(widget.id()) {
            return;
        }
        widget.join_group(self.id);
        self.members.push(widget.id().clone());

        if self.members.len() == 1 && self.selected.is_none() {
            widget.set_group_toggled(true);
            self.selected = Some(widget.id().clone());
        } else {
            widget.set_group_toggled(false);
        }
    }

    /// Selects the member `id`, untoggling every other member
    ///
    /// Returns `false` (and changes nothing) if `id` is not a member.
    pub fn select<C: Clone>(&mut self, id: &WidgetId, widgets: &mut [Widget<C>]) -> bool {
        if !self.members.contains(id) {
            return false;
        }
        for widget in widgets.iter_mut() {
            if self.members.contains(widget.id()) {
                widget.set_group_toggled(widget.id() == id);
            }
        }
        self.selected = Some(id.clone());
        true
    }

    /// Clears the selection; only allowed with `allow_unselect`
    pub fn clear_selection<C: Clone>(&mut self, widgets: &mut [Widget<C>]) -> bool {
        if !self.allow_unselect {
            return false;
        }
        for widget in widgets.iter_mut() {
            if self.members.contains(widget.id()) {
                widget.set_group_toggled(false);
            }
        }
        self.selected = None;
        true
    }

    /// Applies a member's click: selects it, or deselects it when it is
    /// already selected and unselecting is allowed
    pub fn activate<C: Clone>(&mut self, id: &WidgetId, widgets: &mut [Widget<C>]) -> bool {
        if self.allow_unselect && self.selected.as_ref() == Some(id) {
            self.clear_selection(widgets)
        } else {
            self.select(id, widgets)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::builder::WidgetBuilder;

    fn widgets(n: usize) -> Vec<Widget<()>> {
        (0..n)
            .map(|i| WidgetBuilder::button(format!("w{}", i), format!("W{}", i)).build().unwrap())
            .collect()
    }

    fn toggled(widgets: &[Widget<()>]) -> Vec<bool> {
        widgets.iter().map(|w| w.is_toggled()).collect()
    }

    fn group_of(widgets: &mut [Widget<()>], allow_unselect: bool) -> SelectionGroup {
        let mut group = SelectionGroup::new(GroupId(0), allow_unselect);
        for widget in widgets.iter_mut() {
            group.add(widget);
        }
        group
    }

    #[test]
    fn test_first_member_selected_by_default() {
        let mut ws = widgets(3);
        let group = group_of(&mut ws, false);
        assert_eq!(toggled(&ws), vec![true, false, false]);
        assert_eq!(group.selected(), Some(&WidgetId::from("w0")));
        assert!(ws.iter().all(|w| w.toggle_mode() && w.group() == Some(GroupId(0))));
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut ws = widgets(3);
        let mut group = group_of(&mut ws, false);

        for (target, expected) in [
            ("w2", vec![false, false, true]),
            ("w1", vec![false, true, false]),
            ("w1", vec![false, true, false]),
            ("w0", vec![true, false, false]),
        ] {
            assert!(group.select(&WidgetId::from(target), &mut ws));
            assert_eq!(toggled(&ws), expected);
            assert_eq!(ws.iter().filter(|w| w.is_toggled()).count(), 1);
        }
    }

    #[test]
    fn test_select_unknown_changes_nothing() {
        let mut ws = widgets(2);
        let mut group = group_of(&mut ws, false);
        assert!(!group.select(&WidgetId::from("nope"), &mut ws));
        assert_eq!(toggled(&ws), vec![true, false]);
        assert_eq!(group.selected(), Some(&WidgetId::from("w0")));
    }

    #[test]
    fn test_non_members_untouched() {
        let mut ws = widgets(3);
        let mut group = SelectionGroup::new(GroupId(1), false);
        group.add(&mut ws[0]);
        group.add(&mut ws[1]);
        ws[2].set_toggled(true); // not a toggle, ignored anyway
        group.select(&WidgetId::from("w1"), &mut ws);
        assert_eq!(toggled(&ws), vec![false, true, false]);
        assert_eq!(ws[2].group(), None);
    }

    #[test]
    fn test_clear_requires_allow_unselect() {
        let mut ws = widgets(2);
        let mut strict = group_of(&mut ws, false);
        assert!(!strict.clear_selection(&mut ws));
        assert_eq!(toggled(&ws), vec![true, false]);

        let mut ws = widgets(2);
        let mut loose = group_of(&mut ws, true);
        assert!(loose.clear_selection(&mut ws));
        assert_eq!(toggled(&ws), vec![false, false]);
        assert_eq!(loose.selected(), None);
    }

    #[test]
    fn test_activate_selected_member() {
        let mut ws = widgets(2);
        let mut strict = group_of(&mut ws, false);
        strict.activate(&WidgetId::from("w0"), &mut ws);
        assert_eq!(toggled(&ws), vec![true, false]);

        let mut ws = widgets(2);
        let mut loose = group_of(&mut ws, true);
        loose.activate(&WidgetId::from("w0"), &mut ws);
        assert_eq!(toggled(&ws), vec![false, false]);
        loose.activate(&WidgetId::from("w1"), &mut ws);
        assert_eq!(toggled(&ws), vec![false, true]);
    }

    #[test]
    fn test_adding_twice_is_ignored() {
        let mut ws = widgets(1);
        let mut group = SelectionGroup::new(GroupId(0), false);
        group.add(&mut ws[0]);
        group.add(&mut ws[0]);
        assert_eq!(group.members().len(), 1);
    }
}
