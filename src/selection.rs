//! Selected entry tracking with change listeners

use std::fmt;

use crate::document::EntryId;

/// A selection transition, delivered to listeners and the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<EntryId>,
    pub current: Option<EntryId>,
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&SelectionChange)>;

/// The current and previous selection
///
/// `previous` only describes the latest transition; the next `select`
/// replaces it.
#[derive(Default)]
pub struct SelectionState {
    current: Option<EntryId>,
    previous: Option<EntryId>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&EntryId> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&EntryId> {
        self.previous.as_ref()
    }

    /// Make `target` current; `None` if it already was
    pub fn select(&mut self, target: Option<EntryId>) -> Option<SelectionChange> {
        if target == self.current {
            return None;
        }

        self.previous = self.current.take();
        self.current = target;

        let change = SelectionChange {
            previous: self.previous.clone(),
            current: self.current.clone(),
        };
        tracing::trace!("Selection {:?} -> {:?}", change.previous, change.current);
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
        Some(change)
    }

    pub fn clear(&mut self) -> Option<SelectionChange> {
        self.select(None)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Detach every listener
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_select_tracks_previous_for_one_transition() {
        let mut sel = SelectionState::new();
        let change = sel.select(Some("a".into())).unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.current, Some("a".into()));

        sel.select(Some("b".into()));
        assert_eq!(sel.previous(), Some(&"a".into()));
        sel.select(Some("c".into()));
        assert_eq!(sel.previous(), Some(&"b".into()));
        assert_eq!(sel.current(), Some(&"c".into()));
    }

    #[test]
    fn test_reselect_is_not_a_change() {
        let mut sel = SelectionState::new();
        sel.select(Some("a".into()));
        assert!(sel.select(Some("a".into())).is_none());
        assert_eq!(sel.previous(), None);
    }

    #[test]
    fn test_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut sel = SelectionState::new();
        let sink = Rc::clone(&seen);
        let id = sel.subscribe(move |change| sink.borrow_mut().push(change.current.clone()));

        sel.select(Some("a".into()));
        sel.clear();
        assert_eq!(*seen.borrow(), vec![Some(EntryId::from("a")), None]);

        assert!(sel.unsubscribe(id));
        assert!(!sel.unsubscribe(id));
        sel.select(Some("b".into()));
        assert_eq!(seen.borrow().len(), 2);
    }
}
