// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Fine-grained set: one mutex per node, traversed with lock coupling.
//!
//! # Protocol
//!
//! The head slot is guarded by its own mutex and treated as the zeroth position of the list.
//! A traversal locks the head slot, then the first node. While the current node's key is below
//! the target, the predecessor is released, the current node becomes the predecessor, and the
//! next node is locked while the new predecessor is still held.
//!
//! - At most two locks are held at once: the slot before the current node, and the current node.
//! - Locks are always taken in list order, so two traversals can never wait on each other in a
//!   cycle.
//! - Every mutation happens through the predecessor slot while both locks are held, including
//!   insertion in front of the first node and into an empty list.
//!
//! Nodes are reference counted so guards can be handed along the chain. A deleted node is
//! unlinked while its predecessor is locked; no other traverser can reach it afterwards, so the
//! last reference is dropped right after both locks are released.

use std::sync::Arc;

use lock_api::ArcMutexGuard;
use parking_lot::{Mutex, MutexGuard, RawMutex};

use super::ConcurrentSet;
use crate::types::{Key, Strategy};

type Link = Option<Arc<Mutex<Node>>>;

/// Owned guard on a node, independent of any borrow of its predecessor.
type NodeGuard = ArcMutexGuard<RawMutex, Node>;

struct Node {
    key: Key,
    next: Link,
}

/// The locked position in front of the current node.
enum Slot<'a> {
    Head(MutexGuard<'a, Link>),
    Node(NodeGuard),
}

impl Slot<'_> {
    fn link(&self) -> &Link {
        match self {
            Slot::Head(guard) => &**guard,
            Slot::Node(guard) => &guard.next,
        }
    }

    fn link_mut(&mut self) -> &mut Link {
        match self {
            Slot::Head(guard) => &mut **guard,
            Slot::Node(guard) => &mut guard.next,
        }
    }

    /// Lock the node this slot points at, while the slot stays locked.
    fn lock_next(&self) -> Option<NodeGuard> {
        self.link().as_ref().map(|node| node.lock_arc())
    }
}

/// Lock-coupling set. Operations on disjoint regions of the list proceed in parallel.
pub struct FineSet {
    head: Mutex<Link>,
}

impl FineSet {
    pub fn new() -> Self {
        Self {
            head: Mutex::new(None),
        }
    }

    /// Walk to the first node whose key is not below `key`.
    ///
    /// Returns the locked predecessor slot and the locked current node (`None` past the tail).
    fn locate(&self, key: Key) -> (Slot<'_>, Option<NodeGuard>) {
        let mut pred = Slot::Head(self.head.lock());
        let mut cur = pred.lock_next();
        loop {
            match cur {
                Some(node) if node.key < key => {
                    // Assigning drops the old predecessor; `node` stays locked throughout.
                    pred = Slot::Node(node);
                    cur = pred.lock_next();
                }
                other => return (pred, other),
            }
        }
    }
}

impl Default for FineSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcurrentSet for FineSet {
    fn member(&self, key: Key) -> bool {
        let (_pred, cur) = self.locate(key);
        cur.is_some_and(|node| node.key == key)
    }

    fn insert(&self, key: Key) -> bool {
        let (mut pred, cur) = self.locate(key);
        if cur.as_ref().is_some_and(|node| node.key == key) {
            return false;
        }

        let slot = pred.link_mut();
        let next = slot.take();
        *slot = Some(Arc::new(Mutex::new(Node { key, next })));

        drop(cur);
        drop(pred);
        true
    }

    fn delete(&self, key: Key) -> bool {
        let (mut pred, cur) = self.locate(key);
        let Some(mut victim) = cur.filter(|node| node.key == key) else {
            return false;
        };

        let successor = victim.next.take();
        let unlinked = std::mem::replace(pred.link_mut(), successor);

        drop(victim);
        drop(pred);
        // Unreachable now; this releases the last reference.
        drop(unlinked);
        true
    }

    fn snapshot(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut pred = Slot::Head(self.head.lock());
        let mut cur = pred.lock_next();
        while let Some(node) = cur {
            keys.push(node.key);
            pred = Slot::Node(node);
            cur = pred.lock_next();
        }
        keys
    }

    fn strategy(&self) -> Strategy {
        Strategy::Fine
    }
}

impl Drop for FineSet {
    fn drop(&mut self) {
        let mut cur = self.head.get_mut().take();
        while let Some(node) = cur {
            cur = node.lock().next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Find the node holding `key` by walking the chain.
    fn node_for(set: &FineSet, key: Key) -> Arc<Mutex<Node>> {
        let mut cur = set.head.lock().clone();
        while let Some(node) = cur {
            if node.lock().key == key {
                return node;
            }
            cur = node.lock().next.clone();
        }
        panic!("key {key} not in set");
    }

    #[test]
    fn test_front_insertions_are_ordered() {
        let set = FineSet::new();
        for key in (0..100).rev() {
            assert!(set.insert(key));
        }
        assert_eq!(set.snapshot(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_deleted_node_is_released() {
        let set = FineSet::new();
        set.insert(1);
        set.insert(2);
        set.insert(3);

        let weak = Arc::downgrade(&node_for(&set, 2));
        assert!(set.delete(2));
        assert!(weak.upgrade().is_none(), "deleted node still referenced");
        assert_eq!(set.snapshot(), vec![1, 3]);
    }

    #[test]
    fn test_earlier_region_not_blocked_by_later_lock() {
        let set = FineSet::new();
        for key in 1..=10 {
            set.insert(key);
        }

        // Hold the lock of the tail node; work below key 9 must not touch it.
        let tail = node_for(&set, 10);
        let held = tail.lock();

        let shared = &set;
        thread::scope(|s| {
            let (tx, rx) = mpsc::channel();
            s.spawn(move || {
                let results = (shared.member(3), shared.insert(0), shared.delete(5));
                tx.send(results).unwrap();
            });
            let results = rx
                .recv_timeout(Duration::from_secs(5))
                .expect("operation on an earlier region blocked");
            assert_eq!(results, (true, true, true));
        });

        drop(held);
        assert_eq!(set.snapshot(), vec![0, 1, 2, 3, 4, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_traversal_waits_on_locked_node() {
        let set = FineSet::new();
        for key in 1..=3 {
            set.insert(key);
        }

        let middle = node_for(&set, 2);
        let held = middle.lock();

        let shared = &set;
        thread::scope(|s| {
            let (tx, rx) = mpsc::channel();
            s.spawn(move || {
                tx.send(shared.insert(4)).unwrap();
            });
            // The insert has to pass node 2, so it waits until we let go.
            assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
            drop(held);
            assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
        });
        assert_eq!(set.snapshot(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_long_list_drop() {
        let set = FineSet::new();
        for key in (0..100_000).rev() {
            set.insert(key);
        }
        drop(set);
    }
}
