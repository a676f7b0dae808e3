// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Sequential sorted chain shared by the coarse and reader-writer sets.
//!
//! Not synchronized. Callers wrap it in a lock that covers whole operations.

use crate::types::Key;

type Link = Option<Box<Node>>;

struct Node {
    key: Key,
    next: Link,
}

/// Singly-linked chain, strictly ascending by key.
#[derive(Default)]
pub(crate) struct Chain {
    head: Link,
}

/// Advance to the first slot whose node is not below `key`.
fn seek(mut slot: &mut Link, key: Key) -> &mut Link {
    // Test through a shared borrow; the mutable reborrow is taken only to step forward.
    while slot.as_ref().is_some_and(|node| node.key < key) {
        slot = match slot {
            Some(node) => &mut node.next,
            None => break,
        };
    }
    slot
}

impl Chain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contains(&self, key: Key) -> bool {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if node.key >= key {
                return node.key == key;
            }
            cur = node.next.as_deref();
        }
        false
    }

    pub(crate) fn insert(&mut self, key: Key) -> bool {
        let slot = seek(&mut self.head, key);
        if slot.as_ref().is_some_and(|node| node.key == key) {
            return false;
        }
        let next = slot.take();
        *slot = Some(Box::new(Node { key, next }));
        true
    }

    pub(crate) fn remove(&mut self, key: Key) -> bool {
        let slot = seek(&mut self.head, key);
        match slot.take() {
            Some(mut node) if node.key == key => {
                *slot = node.next.take();
                true
            }
            other => {
                *slot = other;
                false
            }
        }
    }

    pub(crate) fn keys(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            keys.push(node.key);
            cur = node.next.as_deref();
        }
        keys
    }
}

impl Drop for Chain {
    // Unlink node by node; the default recursive drop can overflow the stack on long chains.
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}
