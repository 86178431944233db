//! An experimental fully-safe rendition of a doubly-linked chain, with no
//! raw pointers: link state lives in token-branded cells, and every joint is
//! owned as two compile-time-counted halves, one per inbound reference.
//!
//! Kept as a private study. The main crate cannot adopt this encoding,
//! since splitting a joint's ownership into halves is incompatible with
//! elements whose storage the caller keeps owning, but it demonstrates what
//! the borrow checker can prove about the same shape of structure.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct Chain<'id, T> {
    ends: [Option<HalfJoint<'id, T>>; 2],
}

struct Joint<'id, T> {
    neighbors: [Option<HalfJoint<'id, T>>; 2],
    value: T,
}

type HalfJoint<'id, T> = Half<GhostCell<'id, Joint<'id, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, T> Joint<'id, T> {
    fn new(value: T) -> Self {
        let neighbors = [None, None];
        Self { neighbors, value }
    }
}

impl<'id, T> Default for Chain<'id, T> {
    fn default() -> Self {
        let ends = [None, None];
        Self { ends }
    }
}

impl<'id, T> Chain<'id, T> {
    const FRONT: usize = 0;
    const BACK: usize = 1;

    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ends[Self::FRONT].is_none()
    }

    /// Walk the chain front to back. Like the main crate, no counter is
    /// cached anywhere.
    pub fn count(&self, token: &GhostToken<'id>) -> usize {
        let mut count = 0;
        let mut current = self.ends[Self::FRONT].as_ref();
        while let Some(joint) = current {
            count += 1;
            current = joint.deref().borrow(token).neighbors[Self::BACK].as_ref();
        }
        count
    }

    pub fn attach_front(&mut self, value: T, token: &mut GhostToken<'id>) {
        self.attach_at(Self::FRONT, value, token);
    }

    pub fn attach_back(&mut self, value: T, token: &mut GhostToken<'id>) {
        self.attach_at(Self::BACK, value, token);
    }

    pub fn detach_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.detach_at(Self::FRONT, token)
    }

    pub fn detach_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.detach_at(Self::BACK, token)
    }

    /// A joint's two halves live in the slots that face it: one in each
    /// neighbor, or in `ends` at the rim of the chain.
    fn attach_at(&mut self, side: usize, value: T, token: &mut GhostToken<'id>) {
        let far = 1 - side;
        let (outer, inner) = Full::split(Full::new(GhostCell::new(Joint::new(value))));
        match self.ends[side].take() {
            Some(old_end) => {
                old_end.deref().borrow_mut(token).neighbors[side] = Some(outer);
                inner.deref().borrow_mut(token).neighbors[far] = Some(old_end);
                self.ends[side] = Some(inner);
            }
            None => {
                self.ends[far] = Some(outer);
                self.ends[side] = Some(inner);
            }
        }
    }

    fn detach_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<T> {
        let far = 1 - side;
        let end = self.ends[side].take()?;
        let other = match end.deref().borrow_mut(token).neighbors[far].take() {
            Some(second) => {
                let other = second.deref().borrow_mut(token).neighbors[side]
                    .take()
                    .unwrap();
                self.ends[side] = Some(second);
                other
            }
            None => self.ends[far].take().unwrap(),
        };
        Some(Full::into_box(Full::join(end, other)).into_inner().value)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::Chain;
    use ghost_cell::GhostToken;

    #[test]
    fn attach_and_detach_at_both_ends() {
        GhostToken::new(|mut token| {
            let mut chain = Chain::new();
            assert!(chain.is_empty());
            assert_eq!(chain.count(&token), 0);

            chain.attach_back(2, &mut token);
            chain.attach_front(1, &mut token);
            chain.attach_back(3, &mut token);
            assert!(!chain.is_empty());
            assert_eq!(chain.count(&token), 3);

            assert_eq!(chain.detach_front(&mut token), Some(1));
            assert_eq!(chain.detach_back(&mut token), Some(3));
            assert_eq!(chain.detach_front(&mut token), Some(2));
            assert_eq!(chain.detach_front(&mut token), None);
            assert!(chain.is_empty());
        })
    }

    #[test]
    fn detached_values_come_back_in_chain_order() {
        GhostToken::new(|mut token| {
            let mut chain = Chain::new();
            for value in 0..5 {
                chain.attach_back(value, &mut token);
            }
            let mut drained = Vec::new();
            while let Some(value) = chain.detach_front(&mut token) {
                drained.push(value);
            }
            assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        })
    }
}
