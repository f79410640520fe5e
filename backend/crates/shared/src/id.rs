//! Common ID Types
//!
//! Type-safe numeric ID wrappers for platform entities.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type RoomId = Id<markers::Room>;
/// let room = RoomId::new(21452505);
/// assert_eq!(room.value(), 21452505);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a raw platform id
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw id
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for live room IDs
    pub struct Room;

    /// Marker for user (streamer / viewer) IDs
    pub struct User;
}

/// Type aliases for common IDs
pub type RoomId = Id<markers::Room>;
pub type UserId = Id<markers::User>;

impl RoomId {
    /// Rooms below this id are short (vanity) ids that alias a real room
    pub const SHORT_ID_LIMIT: i64 = 10_000;

    /// Whether this id is a short alias that needs resolving
    pub const fn is_short(&self) -> bool {
        self.value < Self::SHORT_ID_LIMIT
    }
}
