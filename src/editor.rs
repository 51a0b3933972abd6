// src/editor.rs
//! Working-list state for form dialogs, shared by every repeatable section

use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction<T> {
    Add(T),
    Remove(usize),
    ToggleDialog,
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationState {
    Uninitialized,
    Hydrating,
    Ready,
}

/// Ordered collection being edited before it is submitted to the store.
#[derive(Debug, Clone)]
pub struct CollectionEditor<T> {
    items: Vec<T>,
    dialog_open: bool,
    hydration: HydrationState,
}

impl<T> Default for CollectionEditor<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            dialog_open: false,
            hydration: HydrationState::Uninitialized,
        }
    }
}

impl<T: Clone> CollectionEditor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: EditorAction<T>) {
        match action {
            EditorAction::Add(item) => self.items.push(item),
            EditorAction::Remove(index) => {
                if index < self.items.len() {
                    self.items.remove(index);
                }
            }
            EditorAction::ToggleDialog => self.dialog_open = !self.dialog_open,
            EditorAction::ClearAll => self.items.clear(),
        }
    }

    /// Load `records` into the working list, once per editor.
    /// Returns false when the editor was already hydrated.
    pub fn hydrate(&mut self, records: &[T]) -> bool {
        if self.hydration != HydrationState::Uninitialized {
            debug!("Editor already hydrated, skipping {} record(s)", records.len());
            return false;
        }

        self.hydration = HydrationState::Hydrating;
        for record in records {
            self.dispatch(EditorAction::Add(record.clone()));
        }
        self.hydration = HydrationState::Ready;
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn hydration(&self) -> HydrationState {
        self.hydration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_clear() {
        let mut editor = CollectionEditor::new();
        editor.dispatch(EditorAction::Add("a"));
        editor.dispatch(EditorAction::Add("b"));
        editor.dispatch(EditorAction::Add("c"));
        editor.dispatch(EditorAction::Remove(1));
        assert_eq!(editor.items(), &["a", "c"]);

        editor.dispatch(EditorAction::Remove(9));
        assert_eq!(editor.len(), 2);

        editor.dispatch(EditorAction::ClearAll);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_toggle_dialog() {
        let mut editor: CollectionEditor<u8> = CollectionEditor::new();
        assert!(!editor.is_dialog_open());
        editor.dispatch(EditorAction::ToggleDialog);
        assert!(editor.is_dialog_open());
        editor.dispatch(EditorAction::ToggleDialog);
        assert!(!editor.is_dialog_open());
    }

    #[test]
    fn test_hydrate_runs_once() {
        let mut editor = CollectionEditor::new();
        assert_eq!(editor.hydration(), HydrationState::Uninitialized);

        assert!(editor.hydrate(&[1, 2, 3]));
        assert_eq!(editor.hydration(), HydrationState::Ready);
        assert_eq!(editor.items(), &[1, 2, 3]);

        // re-mount must not duplicate entries
        assert!(!editor.hydrate(&[1, 2, 3]));
        assert_eq!(editor.items(), &[1, 2, 3]);
    }

    #[test]
    fn test_hydrate_with_nothing_still_marks_ready() {
        let mut editor: CollectionEditor<u8> = CollectionEditor::new();
        assert!(editor.hydrate(&[]));
        assert_eq!(editor.hydration(), HydrationState::Ready);
        assert!(!editor.hydrate(&[7]));
        assert!(editor.is_empty());
    }
}
