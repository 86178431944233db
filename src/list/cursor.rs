use std::fmt;
use std::fmt::Formatter;
use std::marker::PhantomData;
use std::pin::Pin;
use std::ptr::NonNull;

use crate::list::node::{Kind, Links, Node};
use crate::list::{Error, NodeList};

/// Where a cursor stands, derived purely from the record it references.
///
/// No revision counter or invalidation token exists anywhere: a cursor
/// re-derives its own validity from the presence of its record's links every
/// time it is asked. The mapping is:
///
/// | `prev` | `next` | position            |
/// |--------|--------|---------------------|
/// | absent | present| `BeforeStart`       |
/// | present| absent | `PastEnd`           |
/// | present| present| `AttachedElement`   |
/// | absent | absent | `DetachedElement`   |
///
/// plus `Null` for a cursor that references no record at all. A cursor left
/// standing on an element that is then detached observes the change: its
/// position becomes `DetachedElement` without anyone telling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The cursor references no record.
    Null,
    /// At the head boundary; there is nothing before it.
    BeforeStart,
    /// At the tail boundary; there is nothing after it.
    PastEnd,
    /// At an element currently linked into a list.
    AttachedElement,
    /// At an element that is not linked anywhere.
    DetachedElement,
}

fn classify(record: &Links) -> Position {
    match (record.prev.get().is_some(), record.next.get().is_some()) {
        (false, true) => Position::BeforeStart,
        (true, false) => Position::PastEnd,
        (true, true) => Position::AttachedElement,
        (false, false) => Position::DetachedElement,
    }
}

/// A read-only cursor over a [`NodeList`].
///
/// A cursor is a thin reference to one link record (an element's record or
/// one of the list's two boundary records), or it is null. It classifies its
/// own [`Position`] structurally and can move in both directions.
///
/// Cursor equality is strict: two cursors are equal only when both reference
/// the same record *and* neither is null. A null cursor is never equal to
/// anything, not even to another null cursor, so invalid positions can never
/// alias valid ones.
///
/// # Examples
///
/// ```
/// use node_list::{Cursor, Node, NodeList, Position};
/// use std::pin::pin;
///
/// let mut list = NodeList::new();
/// let mut node = pin!(Node::new(1));
/// node.as_mut().attach_to(&mut list);
///
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.position(), Position::AttachedElement);
/// assert_eq!(cursor.current(), Ok(&1));
///
/// cursor.advance().unwrap();
/// assert_eq!(cursor.position(), Position::PastEnd);
/// assert!(cursor == list.cursor_end());
///
/// // Null cursors never compare equal, including to each other.
/// let null: Cursor<i32> = Cursor::null();
/// assert!(null != Cursor::null());
/// ```
pub struct Cursor<'a, T: 'a> {
    pub(crate) current: Option<NonNull<Links>>,
    pub(crate) _marker: PhantomData<&'a NodeList<T>>,
}

/// A cursor over a [`NodeList`] with editing operations.
///
/// Beyond everything a [`Cursor`] can do, a `CursorMut` can mutate the
/// payload under it, splice caller-owned nodes in at its position, and
/// detach the element it stands on while stepping off it.
pub struct CursorMut<'a, T: 'a> {
    pub(crate) current: Option<NonNull<Links>>,
    pub(crate) _marker: PhantomData<&'a mut NodeList<T>>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn from_record(current: Option<NonNull<Links>>) -> Self {
                Self {
                    current,
                    _marker: PhantomData,
                }
            }

            fn record(&self) -> Result<&'a Links, Error> {
                match self.current {
                    // SAFETY: a non-null cursor references a live record;
                    // keeping the record alive for as long as the cursor is
                    // used is the caller discipline documented on the crate
                    // root.
                    Some(record) => Ok(unsafe { &*record.as_ptr() }),
                    None => Err(Error::NullCursor),
                }
            }

            /// Returns `true` if the cursor references no record.
            pub fn is_null(&self) -> bool {
                self.current.is_none()
            }

            /// Classify the cursor's position. See [`Position`].
            pub fn position(&self) -> Position {
                match self.record() {
                    Ok(record) => classify(record),
                    Err(_) => Position::Null,
                }
            }

            /// Returns `true` if the cursor is at the head boundary.
            ///
            /// Fails with [`Error::NullCursor`] on a null cursor, as do all
            /// the position predicates below.
            pub fn is_before_start(&self) -> Result<bool, Error> {
                Ok(classify(self.record()?) == Position::BeforeStart)
            }

            /// Returns `true` if the cursor is at the tail boundary.
            pub fn is_past_end(&self) -> Result<bool, Error> {
                Ok(classify(self.record()?) == Position::PastEnd)
            }

            /// Returns `true` if the cursor is at an attached element.
            pub fn is_at_attached_element(&self) -> Result<bool, Error> {
                Ok(classify(self.record()?) == Position::AttachedElement)
            }

            /// Returns `true` if the cursor is at a detached element.
            pub fn is_at_detached_element(&self) -> Result<bool, Error> {
                Ok(classify(self.record()?) == Position::DetachedElement)
            }

            /// Returns `true` if the cursor is at an element, attached or
            /// not.
            pub fn is_at_element(&self) -> Result<bool, Error> {
                match classify(self.record()?) {
                    Position::AttachedElement | Position::DetachedElement => Ok(true),
                    _ => Ok(false),
                }
            }

            /// Move to the referenced record's successor.
            ///
            /// Fails on a null cursor and at the past-the-end position; the
            /// cursor stays put on failure. Advancing off a detached element
            /// leaves the cursor null, since a detached record has no
            /// successor.
            pub fn advance(&mut self) -> Result<(), Error> {
                let record = self.record()?;
                if classify(record) == Position::PastEnd {
                    return Err(Error::PastEnd);
                }
                self.current = record.next.get();
                Ok(())
            }

            /// Move to the referenced record's predecessor.
            ///
            /// Fails on a null cursor and at the before-the-start position;
            /// the cursor stays put on failure. Retreating off a detached
            /// element leaves the cursor null.
            pub fn retreat(&mut self) -> Result<(), Error> {
                let record = self.record()?;
                if classify(record) == Position::BeforeStart {
                    return Err(Error::BeforeStart);
                }
                self.current = record.prev.get();
                Ok(())
            }

            /// Borrow the payload of the element under the cursor.
            ///
            /// Works at attached and detached elements alike; fails at a
            /// boundary with [`Error::NotAnElement`] and on a null cursor
            /// with [`Error::NullCursor`]. Boundary records are recognized
            /// by their kind tag, never by guessing from layout.
            pub fn current(&self) -> Result<&'a T, Error> {
                let record = self.current.ok_or(Error::NullCursor)?;
                // SAFETY: a non-null cursor references a live record.
                match unsafe { record.as_ref() }.kind {
                    Kind::Boundary => Err(Error::NotAnElement),
                    // SAFETY: `Element` records exist only inside a
                    // `Node<T>`, whose links are its first field
                    // (`repr(C)`), so the containing node starts at the
                    // record's own address.
                    Kind::Element => {
                        Ok(unsafe { &record.cast::<Node<T>>().as_ref().element })
                    }
                }
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("position", &self.position())
                    .field("current", &self.current().ok())
                    .finish()
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut);

impl<'a, T: 'a> Cursor<'a, T> {
    /// Create a null cursor.
    pub fn null() -> Self {
        Self::from_record(None)
    }

    /// Advance, returning a cursor at the pre-move record.
    ///
    /// Same preconditions as [`Cursor::advance`].
    pub fn post_advance(&mut self) -> Result<Cursor<'a, T>, Error> {
        let before = self.clone();
        self.advance()?;
        Ok(before)
    }

    /// Retreat, returning a cursor at the pre-move record.
    ///
    /// Same preconditions as [`Cursor::retreat`].
    pub fn post_retreat(&mut self) -> Result<Cursor<'a, T>, Error> {
        let before = self.clone();
        self.retreat()?;
        Ok(before)
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    /// Create a null cursor.
    pub fn null() -> Self {
        Self::from_record(None)
    }

    /// Advance, returning a read-only cursor at the pre-move record.
    ///
    /// Same preconditions as [`CursorMut::advance`].
    pub fn post_advance(&mut self) -> Result<Cursor<'a, T>, Error> {
        let before = Cursor::from_record(self.current);
        self.advance()?;
        Ok(before)
    }

    /// Retreat, returning a read-only cursor at the pre-move record.
    ///
    /// Same preconditions as [`CursorMut::retreat`].
    pub fn post_retreat(&mut self) -> Result<Cursor<'a, T>, Error> {
        let before = Cursor::from_record(self.current);
        self.retreat()?;
        Ok(before)
    }

    /// Mutably borrow the payload of the element under the cursor.
    ///
    /// Same preconditions as [`CursorMut::current`].
    pub fn current_mut(&mut self) -> Result<&'a mut T, Error> {
        let record = self.current.ok_or(Error::NullCursor)?;
        // SAFETY: a non-null cursor references a live record.
        match unsafe { record.as_ref() }.kind {
            Kind::Boundary => Err(Error::NotAnElement),
            // SAFETY: as in `current`; only the payload is borrowed, never
            // the links.
            Kind::Element => {
                Ok(unsafe { &mut (*record.cast::<Node<T>>().as_ptr()).element })
            }
        }
    }

    /// Re-borrow the mutable cursor as a short-lived read-only one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_record(self.current)
    }

    /// Convert the mutable cursor into a read-only one at the same record.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::from_record(self.current)
    }

    /// Splice `node` in immediately before the cursor's record.
    ///
    /// The cursor must not be before the start, since no position exists in
    /// front of the head boundary, and its record must be attached (the
    /// tail boundary counts: inserting before it appends). The cursor stays
    /// on its record, so the new element ends up behind it.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_list::{Node, NodeList};
    /// use std::pin::pin;
    ///
    /// let mut list = NodeList::new();
    /// let mut a = pin!(Node::new(1));
    /// let mut b = pin!(Node::new(2));
    ///
    /// list.cursor_end_mut().insert_before(a.as_mut()).unwrap();
    /// list.cursor_start_mut().insert_before(b.as_mut()).unwrap();
    ///
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 1]);
    /// ```
    pub fn insert_before(&mut self, node: Pin<&mut Node<T>>) -> Result<(), Error> {
        let record = self.current.ok_or(Error::NullCursor)?;
        // SAFETY: a non-null cursor references a live record.
        match classify(unsafe { record.as_ref() }) {
            Position::BeforeStart => Err(Error::BeforeStart),
            Position::DetachedElement => Err(Error::DetachedTarget),
            _ => {
                node.into_ref().get_ref().links.splice_before(record);
                Ok(())
            }
        }
    }

    /// Splice `node` in immediately after the cursor's record.
    ///
    /// The mirror image of [`CursorMut::insert_before`]: the cursor must not
    /// be past the end, and inserting after the head boundary prepends.
    pub fn insert_after(&mut self, node: Pin<&mut Node<T>>) -> Result<(), Error> {
        let record = self.current.ok_or(Error::NullCursor)?;
        // SAFETY: a non-null cursor references a live record.
        match classify(unsafe { record.as_ref() }) {
            Position::PastEnd => Err(Error::PastEnd),
            Position::DetachedElement => Err(Error::DetachedTarget),
            _ => {
                node.into_ref().get_ref().links.splice_after(record);
                Ok(())
            }
        }
    }

    /// Detach the element under the cursor and move to its successor.
    ///
    /// The cursor must be at an attached element. The successor is captured
    /// before the detach clears the removed record's own links.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_list::{Node, NodeList};
    /// use std::pin::pin;
    ///
    /// let mut list = NodeList::new();
    /// let mut a = pin!(Node::new(1));
    /// let mut b = pin!(Node::new(2));
    /// a.as_mut().attach_to(&mut list);
    /// b.as_mut().attach_to(&mut list);
    ///
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.remove_and_advance().unwrap();
    ///
    /// assert!(!a.is_attached());
    /// assert_eq!(cursor.current(), Ok(&2));
    /// ```
    pub fn remove_and_advance(&mut self) -> Result<(), Error> {
        let record = self.current.ok_or(Error::NullCursor)?;
        // SAFETY: a non-null cursor references a live record.
        let record = unsafe { record.as_ref() };
        if classify(record) != Position::AttachedElement {
            return Err(Error::NotAttached);
        }
        let next = record.next.get();
        record.unlink();
        self.current = next;
        Ok(())
    }

    /// Detach the element under the cursor and move to its predecessor.
    ///
    /// The mirror image of [`CursorMut::remove_and_advance`].
    pub fn remove_and_retreat(&mut self) -> Result<(), Error> {
        let record = self.current.ok_or(Error::NullCursor)?;
        // SAFETY: a non-null cursor references a live record.
        let record = unsafe { record.as_ref() };
        if classify(record) != Position::AttachedElement {
            return Err(Error::NotAttached);
        }
        let prev = record.prev.get();
        record.unlink();
        self.current = prev;
        Ok(())
    }
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self::from_record(self.current)
    }
}

impl<'a, T: 'a> Default for Cursor<'a, T> {
    /// The default cursor is null.
    fn default() -> Self {
        Self::null()
    }
}

impl<'a, T: 'a> Default for CursorMut<'a, T> {
    /// The default cursor is null.
    fn default() -> Self {
        Self::null()
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

fn same_record(a: Option<NonNull<Links>>, b: Option<NonNull<Links>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        // Null cursors are never equal, not even to each other.
        _ => false,
    }
}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        same_record(self.current, other.current)
    }
}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        same_record(self.current, other.current)
    }
}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        same_record(self.current, other.current)
    }
}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        same_record(self.current, other.current)
    }
}

/// A forward iterator driven by a cursor: yields the element under the
/// cursor, then advances. Non-cyclic and fused: it ends at the tail
/// boundary.
pub struct CursorIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

/// The reversed-traversal adapter over a cursor: retreats first, then yields
/// the element it lands on. Starting from the past-the-end position this
/// walks the list back to front.
///
/// # Examples
///
/// ```
/// use node_list::{Node, NodeList};
/// use std::pin::pin;
///
/// let mut list = NodeList::new();
/// let mut a = pin!(Node::new(1));
/// let mut b = pin!(Node::new(2));
/// a.as_mut().attach_to(&mut list);
/// b.as_mut().attach_to(&mut list);
///
/// let reversed: Vec<i32> = list.cursor_end().into_iter().rev().copied().collect();
/// assert_eq!(reversed, [2, 1]);
/// ```
pub struct CursorBackIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

impl<'a, T: 'a> CursorIter<'a, T> {
    /// Recover the cursor at its current resting record.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }

    /// Swap advancing for retreating.
    pub fn rev(self) -> CursorBackIter<'a, T> {
        CursorBackIter {
            cursor: self.cursor,
        }
    }

    /// Peek at the element under the cursor without moving.
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.current().ok()
    }
}

impl<'a, T: 'a> CursorBackIter<'a, T> {
    /// Recover the cursor at its current resting record.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }

    /// Swap retreating for advancing.
    pub fn rev(self) -> CursorIter<'a, T> {
        CursorIter {
            cursor: self.cursor,
        }
    }

    /// Peek at the element the next step would yield without moving.
    pub fn peek(&self) -> Option<&'a T> {
        let mut probe = self.cursor.clone();
        probe.retreat().ok()?;
        probe.current().ok()
    }
}
