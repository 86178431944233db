//! This crate provides an intrusive doubly-linked list: the linkage state
//! lives inside each caller-owned [`Node`], and the [`NodeList`] owns nothing
//! but its two boundary records.
//!
//! Nodes attach and detach *themselves*. The list never allocates, copies,
//! or frees an element; it only takes part in relinking. Dropping a node
//! detaches it first, so a list can never be left pointing at storage that
//! no longer exists.
//!
//! Here is a quick example showing how the pieces fit together.
//!
//! ```
//! use node_list::{Node, NodeList, Position};
//! use std::pin::pin;
//!
//! let mut list = NodeList::new();
//!
//! let mut a = pin!(Node::new(1));
//! let mut b = pin!(Node::new(2));
//! let mut c = pin!(Node::new(3));
//!
//! a.as_mut().attach_to(&mut list);
//! c.as_mut().attach_to(&mut list);
//! b.as_mut().attach_before(&c).unwrap(); // splice b between a and c
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//!
//! b.detach();
//! assert_eq!(list.len(), 2);
//!
//! let cursor = list.cursor_start();
//! assert_eq!(cursor.position(), Position::AttachedElement);
//! assert_eq!(cursor.current(), Ok(&1));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a list with two attached nodes looks like this:
//!
//! ```text
//!  NodeList                 caller-owned, pinned         caller-owned, pinned
//! ┌──────────┐   ╔═══════════╗         ╔═══════════╗         ┌───────────┐
//! │   head ──┼─→ ║   next    ║ ──────→ ║   next    ║ ──────→ │  (tail)   │
//! │  (Box)   │   ╟───────────╢         ╟───────────╢         │ boundary  │
//! │   tail ──┼─┐ ║   prev    ║ ←────── ║   prev    ║ ←────── │  record   │
//! └──────────┘ │ ╟───────────╢         ╟───────────╢         └───────────┘
//!              │ ║ payload T ║         ║ payload T ║               ↑
//!              │ ╚═══════════╝         ╚═══════════╝               │
//!              │     Node                   Node                   │
//!              └───────────────────────────────────────────────────┘
//! ```
//!
//! The head boundary's `prev` and the tail boundary's `next` are permanently
//! absent; that is how the two ends recognize themselves. In an empty list
//! the two boundaries reference each other directly. Because the boundary
//! records sit behind their own allocations, moving the `NodeList` value
//! does not disturb the chain.
//!
//! A record's links also tell a [`Node`], and any cursor standing on it,
//! everything about its own state, with no external bookkeeping:
//!
//! | `prev`  | `next`  | meaning                        |
//! |---------|---------|--------------------------------|
//! | absent  | present | head boundary (before-the-start) |
//! | present | absent  | tail boundary (past-the-end)     |
//! | present | present | attached element               |
//! | absent  | absent  | detached element               |
//!
//! # Attachment lifecycle
//!
//! A node is constructed standalone and detached. Attaching it anywhere
//! ([`Node::attach_to`], [`Node::attach_before`], [`Node::attach_after`], or
//! through [`CursorMut::insert_before`]/[`CursorMut::insert_after`]) first
//! detaches it from wherever it currently is, so a node is linked into at
//! most one place at any time. [`Node::detach`] has no preconditions and is
//! idempotent. Every attach is all-or-nothing: a rejected attach reports an
//! [`Error`] and changes no links at all.
//!
//! Attaching takes `Pin<&mut Node<T>>` because the node's address is written
//! into its neighbors' links: the pin guarantees the node will not move and
//! cannot be freed without being dropped, and dropping detaches.
//!
//! # Cursors and iteration
//!
//! [`Cursor`] and [`CursorMut`] classify their own [`Position`] from the
//! record they stand on, so there are no invalidation tokens: a cursor
//! parked on an element that is detached behind its back simply reports
//! `DetachedElement` from then on. Cursor equality is strict: null cursors
//! are never equal to anything, including each other.
//!
//! [`Iter`] and [`IterMut`] are plain double-ended iterators over the
//! payloads; reverse traversal is `list.iter().rev()` or the
//! [`CursorBackIter`] adapter, which swaps advancing for retreating.
//!
//! # Ownership discipline
//!
//! The list assumes what it cannot enforce: a node's storage must stay valid
//! while anything still references it. Pinning plus detach-on-drop covers
//! the list's own links; what remains is the caller's side:
//!
//! - do not keep using a cursor after the node under it is gone; the cursor
//!   re-derives its state from that node's record;
//! - do not hold a payload reference obtained from a cursor or iterator
//!   while also mutating the same payload through the node.
//!
//! Thread safety is explicitly out of scope: nothing here is `Send` or
//! `Sync`, and all operations assume a single writer.
//!
//! [`CursorMut::insert_before`]: crate::list::cursor::CursorMut::insert_before
//! [`CursorMut::insert_after`]: crate::list::cursor::CursorMut::insert_after

#[doc(inline)]
pub use list::cursor::{Cursor, CursorBackIter, CursorIter, CursorMut, Position};
#[doc(inline)]
pub use list::iterator::{Iter, IterMut};
#[doc(inline)]
pub use list::node::Node;
#[doc(inline)]
pub use list::{Error, NodeList};

pub mod list;

mod experiments;
