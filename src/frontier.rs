use std::rc::Rc;

use crate::state::SearchState;

/// The open set of a graph search. Priorities are fixed when an item is
/// added; the stack ignores them entirely and the heap never reorders an
/// item after insertion (stale duplicates are the explored set's problem).
pub trait Frontier {
    fn add(&mut self, priority: u32, state: Rc<SearchState>);
    fn remove(&mut self) -> Option<Rc<SearchState>>;
    fn is_empty(&self) -> bool;
}

/// LIFO frontier; drives the depth-first strategy.
#[derive(Debug, Default)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Stack<T> {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Frontier for Stack<Rc<SearchState>> {
    fn add(&mut self, _priority: u32, state: Rc<SearchState>) {
        self.push(state);
    }

    fn remove(&mut self) -> Option<Rc<SearchState>> {
        self.pop()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Implicit binary min-heap. Slot 0 is a reserved sentinel so the tree is
/// 1-indexed and the index arithmetic stays branch-free: parent = i / 2,
/// children = 2i and 2i + 1.
#[derive(Debug)]
pub struct MinHeap<T> {
    slots: Vec<Option<(u32, T)>>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> MinHeap<T> {
        MinHeap::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> MinHeap<T> {
        MinHeap { slots: vec![None] }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append as the last leaf, then sift up while strictly smaller than the
    /// parent. Equal keys stay where they land.
    pub fn add(&mut self, key: u32, item: T) {
        self.slots.push(Some((key, item)));
        self.sift_up(self.slots.len() - 1);
    }

    /// Remove the minimum-keyed item, or `None` on an empty heap.
    pub fn remove(&mut self) -> Option<(u32, T)> {
        match self.len() {
            0 => None,
            1 => self.slots.pop().flatten(),
            _ => {
                let last = self.slots.len() - 1;
                self.slots.swap(1, last);
                let min = self.slots.pop().flatten();
                self.sift_down(1);
                min
            }
        }
    }

    fn key(&self, index: usize) -> u32 {
        self.slots[index].as_ref().map_or(u32::MAX, |(key, _)| *key)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 1 && self.key(index) < self.key(index / 2) {
            self.slots.swap(index, index / 2);
            index /= 2;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = index * 2;
            let right = left + 1;
            let end = self.slots.len();

            let smallest = if right < end {
                if self.key(left) <= self.key(right) {
                    left
                } else {
                    right
                }
            } else if left < end {
                // A node with only a left child.
                left
            } else {
                return;
            };

            if self.key(smallest) >= self.key(index) {
                return;
            }

            self.slots.swap(index, smallest);
            index = smallest;
        }
    }
}

impl Frontier for MinHeap<Rc<SearchState>> {
    fn add(&mut self, priority: u32, state: Rc<SearchState>) {
        MinHeap::add(self, priority, state);
    }

    fn remove(&mut self) -> Option<Rc<SearchState>> {
        MinHeap::remove(self).map(|(_, state)| state)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
