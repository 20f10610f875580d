use super::Color;

/// Set of interaction states a host widget is currently in.
///
/// Stored as a bitmask; `StateSet::EMPTY` is the resting state.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet(u16);

impl StateSet {
    pub const EMPTY: StateSet = StateSet(0);
    pub const ENABLED: StateSet = StateSet(1 << 0);
    pub const PRESSED: StateSet = StateSet(1 << 1);
    pub const FOCUSED: StateSet = StateSet(1 << 2);
    pub const HOVERED: StateSet = StateSet(1 << 3);
    pub const SELECTED: StateSet = StateSet(1 << 4);
    pub const CHECKED: StateSet = StateSet(1 << 5);
    pub const ACTIVATED: StateSet = StateSet(1 << 6);

    #[inline]
    pub const fn union(self, other: StateSet) -> StateSet {
        StateSet(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: StateSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for StateSet {
    type Output = StateSet;
    #[inline]
    fn bitor(self, rhs: StateSet) -> StateSet {
        self.union(rhs)
    }
}

/// Mapping from interaction states to concrete colors.
///
/// Entries are checked in insertion order; the first entry whose required
/// states are all present wins. An entry with an empty requirement matches
/// anything, so it belongs last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorStateList {
    entries: Vec<(StateSet, Color)>,
}

impl ColorStateList {
    /// Single color for every state.
    pub fn value_of(color: Color) -> Self {
        Self { entries: vec![(StateSet::EMPTY, color)] }
    }

    pub fn new(entries: Vec<(StateSet, Color)>) -> Self {
        Self { entries }
    }

    /// Appends an entry, builder style.
    pub fn with(mut self, required: StateSet, color: Color) -> Self {
        self.entries.push((required, color));
        self
    }

    /// Resolves the color for `state`, or `fallback` when nothing matches.
    pub fn color_for_state(&self, state: StateSet, fallback: Color) -> Color {
        self.entries
            .iter()
            .find(|(required, _)| state.contains(*required))
            .map_or(fallback, |&(_, color)| color)
    }

    /// True when the resolved color can depend on the state.
    pub fn is_stateful(&self) -> bool {
        self.entries.iter().any(|(required, _)| !required.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_rgb8(255, 0, 0);
    const GREEN: Color = Color::from_rgb8(0, 255, 0);

    fn button_colors() -> ColorStateList {
        ColorStateList::new(vec![(StateSet::PRESSED, RED)]).with(StateSet::EMPTY, GREEN)
    }

    #[test]
    fn first_matching_entry_wins() {
        let list = button_colors();
        let pressed = StateSet::ENABLED | StateSet::PRESSED;
        assert_eq!(list.color_for_state(pressed, Color::BLACK), RED);
        assert_eq!(list.color_for_state(StateSet::ENABLED, Color::BLACK), GREEN);
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let list = ColorStateList::new(vec![(StateSet::PRESSED, RED)]);
        assert_eq!(list.color_for_state(StateSet::EMPTY, Color::BLACK), Color::BLACK);
    }

    #[test]
    fn value_of_is_not_stateful() {
        assert!(!ColorStateList::value_of(RED).is_stateful());
        assert!(button_colors().is_stateful());
    }
}
