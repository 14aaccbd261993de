//! Toggleable multi-selection used by the lead forms for sales agents and
//! priority levels.

use crate::domain::agent::Agent;
use crate::domain::types::Priority;

/// What a [`MultiSelect`] chooses from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    Agents,
    Priority,
}

impl SelectionKind {
    /// Summary shown while nothing is selected.
    pub const fn placeholder(self) -> &'static str {
        match self {
            SelectionKind::Agents => "Select Agents",
            SelectionKind::Priority => "Select Priority",
        }
    }
}

/// An option that can be offered in a [`MultiSelect`].
pub trait SelectCandidate {
    /// Token stored in the selection; `None` when the option cannot be selected.
    fn token(&self) -> Option<&str>;
    /// Display name of the option.
    fn label(&self) -> &str;
}

impl SelectCandidate for Agent {
    fn token(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl SelectCandidate for Priority {
    fn token(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn label(&self) -> &str {
        self.as_str()
    }
}

/// Ordered set of selected tokens.
///
/// Uniqueness is enforced on every change; insertion order is kept for
/// stable display only, so equality ignores it (and the overlay state).
#[derive(Clone, Debug)]
pub struct MultiSelect {
    kind: SelectionKind,
    selected: Vec<String>,
    open: bool,
}

impl PartialEq for MultiSelect {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.selected.len() == other.selected.len()
            && self.selected.iter().all(|token| other.contains(token))
    }
}

impl Eq for MultiSelect {}

impl MultiSelect {
    /// Empty selection, as on a new-lead form.
    pub fn new(kind: SelectionKind) -> Self {
        Self {
            kind,
            selected: Vec::new(),
            open: false,
        }
    }

    /// Selection pre-populated from a loaded record. Duplicates keep their
    /// first occurrence.
    pub fn with_selected<I, S>(kind: SelectionKind, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut select = Self::new(kind);
        for token in tokens {
            let token = token.into();
            if !select.contains(&token) {
                select.selected.push(token);
            }
        }
        select
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    /// Removes `token` when selected, appends it otherwise.
    pub fn toggle(&mut self, token: impl Into<String>) {
        let token = token.into();
        match self.selected.iter().position(|selected| *selected == token) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(token),
        }
    }

    /// Returns a new selection with `token` toggled, leaving `self` untouched.
    #[must_use]
    pub fn toggled(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.toggle(token);
        next
    }

    pub fn contains(&self, token: &str) -> bool {
        self.selected.iter().any(|selected| selected == token)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Comma-separated display names in selection order.
    ///
    /// Tokens are resolved through `candidates`; unknown tokens are shown
    /// verbatim.
    pub fn summarize<C: SelectCandidate>(&self, candidates: &[C]) -> String {
        if self.selected.is_empty() {
            return self.kind.placeholder().to_string();
        }

        self.selected
            .iter()
            .map(|token| {
                candidates
                    .iter()
                    .find(|candidate| candidate.token() == Some(token.as_str()))
                    .map_or(token.as_str(), SelectCandidate::label)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Tokens for the outgoing create/update payload.
    pub fn serialize(&self) -> Vec<String> {
        self.selected.clone()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the selection overlay. Toggling through the returned guard is
    /// possible until it is dismissed or dropped, which closes the overlay.
    pub fn open(&mut self) -> Overlay<'_> {
        self.open = true;
        Overlay { select: self }
    }
}

/// Where a pointer interaction landed relative to the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    Inside,
    Outside,
}

/// Scoped handle on an open selection overlay.
#[derive(Debug)]
pub struct Overlay<'a> {
    select: &'a mut MultiSelect,
}

impl Overlay<'_> {
    pub fn toggle(&mut self, token: impl Into<String>) {
        self.select.toggle(token);
    }

    pub fn selected(&self) -> &[String] {
        self.select.selected()
    }

    /// Routes a pointer interaction. An outside interaction closes the
    /// overlay and leaves the selection as it was.
    pub fn pointer(self, target: Pointer) -> Option<Self> {
        match target {
            Pointer::Inside => Some(self),
            Pointer::Outside => None,
        }
    }
}

impl Drop for Overlay<'_> {
    fn drop(&mut self) {
        self.select.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str, name: &str) -> Agent {
        Agent {
            id: Some(id.to_string()),
            name: name.to_string(),
            email: None,
            phone: None,
            role: None,
        }
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut select = MultiSelect::new(SelectionKind::Agents);
        select.toggle("a1");
        select.toggle("a2");
        select.toggle("a3");
        select.toggle("a2");

        assert_eq!(select.selected(), ["a1", "a3"]);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let start = MultiSelect::with_selected(SelectionKind::Priority, ["High", "Low"]);
        for token in ["High", "Low", "Medium"] {
            assert_eq!(start.toggled(token).toggled(token), start);
        }
    }

    #[test]
    fn fresh_form_serializes_empty() {
        assert!(MultiSelect::new(SelectionKind::Agents).serialize().is_empty());
    }

    #[test]
    fn with_selected_drops_duplicates() {
        let select = MultiSelect::with_selected(SelectionKind::Agents, ["a1", "a2", "a1"]);
        assert_eq!(select.serialize(), vec!["a1", "a2"]);
    }

    #[test]
    fn summarize_resolves_names_in_selection_order() {
        let candidates = vec![agent("a1", "Priya"), agent("a2", "Sam")];
        let select = MultiSelect::with_selected(SelectionKind::Agents, ["a2", "gone", "a1"]);

        assert_eq!(select.summarize(&candidates), "Sam, gone, Priya");
    }

    #[test]
    fn summarize_empty_uses_placeholder() {
        let agents: Vec<Agent> = Vec::new();
        assert_eq!(
            MultiSelect::new(SelectionKind::Agents).summarize(&agents),
            "Select Agents"
        );
        assert_eq!(
            MultiSelect::new(SelectionKind::Priority).summarize(&Priority::CHOICES),
            "Select Priority"
        );
    }

    #[test]
    fn outside_pointer_closes_without_changing_selection() {
        let mut select = MultiSelect::new(SelectionKind::Priority);
        {
            let mut overlay = select.open();
            overlay.toggle("High");
            let overlay = overlay.pointer(Pointer::Inside);
            assert!(overlay.is_some());
            let overlay = overlay.and_then(|overlay| overlay.pointer(Pointer::Outside));
            assert!(overlay.is_none());
        }

        assert!(!select.is_open());
        assert_eq!(select.selected(), ["High"]);
    }

    #[test]
    fn dropping_overlay_closes_it() {
        let mut select = MultiSelect::new(SelectionKind::Agents);
        let overlay = select.open();
        drop(overlay);
        assert!(!select.is_open());
    }
}
