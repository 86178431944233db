use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::list::NodeList;

impl<T: PartialEq> PartialEq for NodeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for NodeList<T> {}

impl<T: PartialOrd> PartialOrd for NodeList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for NodeList<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

// No `Clone`: a node is attached to at most one list, so a list cannot be
// duplicated without duplicating node identity.

impl<T: Hash> Hash for NodeList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for element in self {
            element.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use crate::list::NodeList;
    use crate::Node;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::pin::pin;

    fn hashed<T: Hash>(list: &NodeList<T>) -> u64 {
        let mut hasher = DefaultHasher::new();
        list.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn lists_compare_by_payload_sequence() {
        let mut left = NodeList::new();
        let mut right = NodeList::new();
        let mut a = pin!(Node::new(1));
        let mut b = pin!(Node::new(1));
        a.as_mut().attach_to(&mut left);
        b.as_mut().attach_to(&mut right);

        assert_eq!(left, right);
        assert_eq!(hashed(&left), hashed(&right));

        *right.front_mut().unwrap() = 2;
        assert_ne!(left, right);
        assert!(left < right);
    }

    #[test]
    fn shorter_prefix_orders_first() {
        let mut short = NodeList::new();
        let mut long = NodeList::new();
        let mut a = pin!(Node::new(1));
        let mut b = pin!(Node::new(1));
        let mut c = pin!(Node::new(2));
        a.as_mut().attach_to(&mut short);
        b.as_mut().attach_to(&mut long);
        c.as_mut().attach_to(&mut long);

        assert!(short < long);
        assert_ne!(hashed(&short), hashed(&long));
    }
}
