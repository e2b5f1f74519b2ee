//! Identifier management using string interning for efficient storage and comparison
//!
//! Element ids of a process graph (`Task_1`, `Flow_0x8a`, `Task_1_overtime`, ...)
//! are compared constantly during linting and timer synchronisation. The [`Id`]
//! type interns them once so that equality and hashing are integer operations.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned identifier of a process element.
///
/// # Examples
///
/// ```
/// use procflow_core::identifier::Id;
///
/// let task = Id::new("Task_1");
/// let boundary = task.with_suffix("_overtime");
///
/// assert_eq!(boundary, "Task_1_overtime");
/// assert!(boundary.ends_with("_overtime"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name`; equal names always yield the same `Id`.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates a derived id by appending `suffix` to this id.
    ///
    /// Synthetic timer elements are named this way: a task `T` owns
    /// `T_overtime`, `T_overtime_service`, `T_overtime_service_flow` and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// use procflow_core::identifier::Id;
    ///
    /// let boundary = Id::new("Task_1").with_suffix("_timer");
    /// assert_eq!(boundary.with_suffix("_service"), "Task_1_timer_service");
    /// ```
    pub fn with_suffix(&self, suffix: &str) -> Self {
        with_interner(|interner| {
            let base = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            let derived = format!("{base}{suffix}");
            Self(interner.get_or_intern(derived))
        })
    }

    /// Returns `true` if the textual form of this id ends with `suffix`.
    pub fn ends_with(&self, suffix: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .is_some_and(|value| value.ends_with(suffix))
        })
    }

    /// Returns an owned copy of the textual form of this id.
    pub fn to_text(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_owned()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve first so the lock is released before the formatter runs.
        let value = self.to_text();
        write!(f, "{value}")
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("UserTask_1");
        let id2 = Id::new("UserTask_1");
        let id3 = Id::new("UserTask_2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "UserTask_1");
    }

    #[test]
    fn test_with_suffix() {
        let task = Id::new("Approve");

        let overtime = task.with_suffix("_overtime");
        let service = overtime.with_suffix("_service");
        let flow = service.with_suffix("_flow");

        assert_eq!(overtime, "Approve_overtime");
        assert_eq!(service, "Approve_overtime_service");
        assert_eq!(flow, "Approve_overtime_service_flow");
        assert_eq!(task.with_suffix("_overtime"), overtime);
    }

    #[test]
    fn test_ends_with() {
        let id = Id::new("Review_timer_loop");

        assert!(id.ends_with("_timer_loop"));
        assert!(id.ends_with("_loop"));
        assert!(!id.ends_with("_timer"));
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
        assert_eq!(id.to_text(), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "Gateway_1".into();
        let id2 = Id::new("Gateway_1");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("StartEvent_1");

        assert!(id == "StartEvent_1");
        assert!(id != "StartEvent");

        let slice: &str = "StartEvent_1";
        assert!(id == slice);
    }
}
