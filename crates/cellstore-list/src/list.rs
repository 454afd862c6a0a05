//! The node container: a doubly linked list of cell stores.
//!
//! Nodes live in a slot arena. Links are slot indices, freed slots go on a
//! free list for reuse, and every slot carries a generation that is bumped
//! when its node is removed.

use cellstore_array::CellStore;
use cellstore_core::StoreConfig;
use tracing::trace;

use crate::error::ListError;
use crate::handle::NodeHandle;

#[derive(Clone, Debug)]
struct Node {
    store: CellStore,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A doubly linked list whose nodes each own one [`CellStore`].
///
/// Nodes are addressed by [`NodeHandle`]. A handle stays valid until its
/// node is removed; afterwards every call taking it fails with
/// [`ListError::StaleHandle`], even if the slot has been reused.
#[derive(Clone, Debug, Default)]
pub struct CellList {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    config: StoreConfig,
}

impl CellList {
    /// An empty list whose byte-built nodes use the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list whose byte-built nodes use `config`.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configuration applied by [`CellList::push_back_bytes`].
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn handle_of(&self, index: usize) -> NodeHandle {
        NodeHandle::new(index, self.slots[index].generation)
    }

    fn resolve(&self, handle: NodeHandle) -> Result<&Node, ListError> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(ListError::StaleHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    fn resolve_mut(&mut self, handle: NodeHandle) -> Result<&mut Node, ListError> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(ListError::StaleHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    fn set_prev(&mut self, index: usize, prev: Option<usize>) {
        if let Some(node) = self.slots[index].node.as_mut() {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, index: usize, next: Option<usize>) {
        if let Some(node) = self.slots[index].node.as_mut() {
            node.next = next;
        }
    }

    /// Prepend a node holding `store`.
    pub fn push_front(&mut self, store: CellStore) -> NodeHandle {
        let old_head = self.head;
        let index = self.alloc(Node {
            store,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.set_prev(h, Some(index)),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
        self.handle_of(index)
    }

    /// Append a node holding `store`.
    pub fn push_back(&mut self, store: CellStore) -> NodeHandle {
        let old_tail = self.tail;
        let index = self.alloc(Node {
            store,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.set_next(t, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        self.handle_of(index)
    }

    /// Append a node whose store holds `bytes` as `width`-byte cells.
    pub fn push_back_bytes(
        &mut self,
        width: usize,
        bytes: &[u8],
    ) -> Result<NodeHandle, ListError> {
        let store = CellStore::from_bytes(width, bytes.to_vec(), self.config.clone())?;
        Ok(self.push_back(store))
    }

    /// Insert a node holding `store` just before `at`.
    pub fn insert_before(
        &mut self,
        at: NodeHandle,
        store: CellStore,
    ) -> Result<NodeHandle, ListError> {
        let prev = self.resolve(at)?.prev;
        let index = self.alloc(Node {
            store,
            prev,
            next: Some(at.index),
        });
        self.set_prev(at.index, Some(index));
        match prev {
            Some(p) => self.set_next(p, Some(index)),
            None => self.head = Some(index),
        }
        self.len += 1;
        Ok(self.handle_of(index))
    }

    fn unlink(&mut self, index: usize) -> Result<CellStore, ListError> {
        let slot = &mut self.slots[index];
        let node = slot.node.take().ok_or(ListError::StaleHandle {
            index,
            generation: slot.generation,
        })?;
        trace!(index, generation = slot.generation, "removed list node");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);

        match node.prev {
            Some(p) => self.set_next(p, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.set_prev(n, node.prev),
            None => self.tail = node.prev,
        }
        self.len -= 1;
        Ok(node.store)
    }

    /// Remove the node `at` and return its store.
    pub fn remove(&mut self, at: NodeHandle) -> Result<CellStore, ListError> {
        self.resolve(at)?;
        self.unlink(at.index)
    }

    /// Remove the first node.
    pub fn pop_front(&mut self) -> Result<CellStore, ListError> {
        let head = self.head.ok_or(ListError::Empty)?;
        self.unlink(head)
    }

    /// Remove the last node.
    pub fn pop_back(&mut self) -> Result<CellStore, ListError> {
        let tail = self.tail.ok_or(ListError::Empty)?;
        self.unlink(tail)
    }

    /// The store of node `at`.
    pub fn get(&self, at: NodeHandle) -> Result<&CellStore, ListError> {
        self.resolve(at).map(|node| &node.store)
    }

    /// The store of node `at`, mutably.
    pub fn get_mut(&mut self, at: NodeHandle) -> Result<&mut CellStore, ListError> {
        self.resolve_mut(at).map(|node| &mut node.store)
    }

    /// Handle of the first node.
    pub fn front(&self) -> Option<NodeHandle> {
        self.head.map(|i| self.handle_of(i))
    }

    /// Handle of the last node.
    pub fn back(&self) -> Option<NodeHandle> {
        self.tail.map(|i| self.handle_of(i))
    }

    /// Handle of the node after `at`, if any.
    pub fn next(&self, at: NodeHandle) -> Result<Option<NodeHandle>, ListError> {
        Ok(self.resolve(at)?.next.map(|i| self.handle_of(i)))
    }

    /// Handle of the node before `at`, if any.
    pub fn prev(&self, at: NodeHandle) -> Result<Option<NodeHandle>, ListError> {
        Ok(self.resolve(at)?.prev.map(|i| self.handle_of(i)))
    }

    /// Handle of the node at `position`. Negative positions count from the
    /// back: `-1` is the last node.
    pub fn nth(&self, position: isize) -> Option<NodeHandle> {
        let (mut at, steps) = if position >= 0 {
            (self.head, position.unsigned_abs())
        } else {
            (self.tail, position.unsigned_abs() - 1)
        };
        for _ in 0..steps {
            let node = self.slots[at?].node.as_ref()?;
            at = if position >= 0 { node.next } else { node.prev };
        }
        at.map(|i| self.handle_of(i))
    }

    /// Nodes front to back.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Remove every node. All outstanding handles become stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

/// Iterator over `(handle, store)` pairs, front to back.
pub struct Iter<'a> {
    list: &'a CellList,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeHandle, &'a CellStore);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = self.list.slots[index].node.as_ref()?;
        self.next = node.next;
        self.remaining -= 1;
        Some((self.list.handle_of(index), &node.store))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a CellList {
    type Item = (NodeHandle, &'a CellStore);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
