// License and Copyright Notice:
//
// Some of the code and doc comments in this module were copied from
// `std::collections::LinkedList` in the Rust standard library.
// https://github.com/rust-lang/rust/blob/master/src/liballoc/collections/linked_list.rs
//
// The original code/comments from LinkedList are dual-licensed under
// the Apache License, Version 2.0 <https://github.com/rust-lang/rust/blob/master/LICENSE-APACHE>
// or the MIT license <https://github.com/rust-lang/rust/blob/master/LICENSE-MIT>
//
// Copyrights of the original code/comments are retained by their contributors.
// For full authorship information, see the version control history of
// https://github.com/rust-lang/rust/ or https://thanks.rust-lang.org

use std::{fmt, marker::PhantomData, ptr::NonNull};

use super::error::Error;

pub(crate) struct ListNode<T> {
    next: Option<NonNull<ListNode<T>>>,
    prev: Option<NonNull<ListNode<T>>>,
    pub(crate) element: T,
}

impl<T> fmt::Debug for ListNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListNode")
            .field("next", &self.next)
            .field("prev", &self.prev)
            .finish()
    }
}

impl<T> ListNode<T> {
    fn new(element: T) -> Self {
        Self {
            next: None,
            prev: None,
            element,
        }
    }

    /// # Safety
    ///
    /// `this` must point to a live node.
    pub(crate) unsafe fn next_node_ptr(this: NonNull<Self>) -> Option<NonNull<Self>> {
        (*this.as_ptr()).next
    }

    /// # Safety
    ///
    /// `this` must point to a live node.
    pub(crate) unsafe fn prev_node_ptr(this: NonNull<Self>) -> Option<NonNull<Self>> {
        (*this.as_ptr()).prev
    }
}

/// A position inside a `BlockList`. `None` is the end sentinel: it is one past
/// the last node and never holds an element.
pub(crate) type Link<T> = Option<NonNull<ListNode<T>>>;

/// A doubly linked list that owns its nodes.
///
/// Nodes never move once allocated. `split` and `append` hand whole node ranges
/// over to another list by relinking the boundary pointers, so a `NonNull` to a
/// node stays valid until that node is erased or its owning list is dropped.
pub(crate) struct BlockList<T> {
    len: usize,
    head: Link<T>,
    tail: Link<T>,
    marker: PhantomData<Box<ListNode<T>>>,
}

// The list owns its nodes like a `Box` does.
unsafe impl<T: Send> Send for BlockList<T> {}
unsafe impl<T: Sync> Sync for BlockList<T> {}

impl<T> Drop for BlockList<T> {
    fn drop(&mut self) {
        struct DropGuard<'a, T>(&'a mut BlockList<T>);

        impl<'a, T> Drop for DropGuard<'a, T> {
            fn drop(&mut self) {
                // Continue the same loop we do below. This only runs when a destructor has
                // panicked. If another one panics this will abort.
                while self.0.pop_front_node().is_some() {}
            }
        }

        while let Some(node) = self.pop_front_node() {
            let guard = DropGuard(self);
            drop(node);
            std::mem::forget(guard);
        }
    }
}

impl<T> Default for BlockList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for BlockList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::new();
        for element in self.iter() {
            list.push_back(element.clone());
        }
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for BlockList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Inner crate public function/methods
impl<T> BlockList<T> {
    pub(crate) const fn new() -> Self {
        Self {
            len: 0,
            head: None,
            tail: None,
            marker: PhantomData,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> Link<T> {
        self.head
    }

    pub(crate) fn tail(&self) -> Link<T> {
        self.tail
    }

    pub(crate) fn front(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    pub(crate) fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    pub(crate) fn back(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    pub(crate) fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    /// Adds an element to the front of the list and returns its node.
    pub(crate) fn push_front(&mut self, element: T) -> NonNull<ListNode<T>> {
        let mut node = Box::new(ListNode::new(element));
        node.prev = None;
        node.next = self.head;
        let node = NonNull::from(Box::leak(node));

        // Not creating new mutable (unique!) references overlapping `element`.
        match self.head {
            None => self.tail = Some(node),
            Some(head) => unsafe { (*head.as_ptr()).prev = Some(node) },
        }

        self.head = Some(node);
        self.len += 1;
        node
    }

    /// Adds an element to the back of the list and returns its node.
    pub(crate) fn push_back(&mut self, element: T) -> NonNull<ListNode<T>> {
        let mut node = Box::new(ListNode::new(element));
        node.next = None;
        node.prev = self.tail;
        let node = NonNull::from(Box::leak(node));

        match self.tail {
            None => self.head = Some(node),
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
        }

        self.tail = Some(node);
        self.len += 1;
        node
    }

    /// Removes the first element.
    pub(crate) fn pop_front(&mut self) -> Result<T, Error> {
        self.pop_front_node()
            .map(|node| node.element)
            .ok_or(Error::EmptyContainer)
    }

    /// Removes the last element.
    pub(crate) fn pop_back(&mut self) -> Result<T, Error> {
        self.pop_back_node()
            .map(|node| node.element)
            .ok_or(Error::EmptyContainer)
    }

    /// Inserts `element` right before `pos` and returns the new node. Inserting
    /// before the end sentinel appends.
    ///
    /// # Safety
    ///
    /// `pos` must be `None` or a node owned by this list.
    pub(crate) unsafe fn insert_before(
        &mut self,
        pos: Link<T>,
        element: T,
    ) -> NonNull<ListNode<T>> {
        let Some(next) = pos else {
            return self.push_back(element);
        };
        if pos == self.head {
            return self.push_front(element);
        }

        let prev = (*next.as_ptr()).prev;
        let mut node = Box::new(ListNode::new(element));
        node.prev = prev;
        node.next = Some(next);
        let node = NonNull::from(Box::leak(node));

        (*next.as_ptr()).prev = Some(node);
        if let Some(prev) = prev {
            (*prev.as_ptr()).next = Some(node);
        }

        self.len += 1;
        node
    }

    /// Removes the element at `pos`, returning it together with the position of
    /// the following element (or the end sentinel).
    ///
    /// # Safety
    ///
    /// `pos` must be `None` or a node owned by this list.
    pub(crate) unsafe fn erase(&mut self, pos: Link<T>) -> Result<(T, Link<T>), Error> {
        let node = pos.ok_or(Error::InvalidIterator)?;
        let next = (*node.as_ptr()).next;
        self.unlink(node);
        let node = Box::from_raw(node.as_ptr());
        Ok((node.element, next))
    }

    /// Steps forward from `pos`. Stepping from the end sentinel fails.
    ///
    /// # Safety
    ///
    /// `pos` must be `None` or a node owned by this list.
    pub(crate) unsafe fn next_of(&self, pos: Link<T>) -> Result<Link<T>, Error> {
        match pos {
            None => Err(Error::InvalidIterator),
            Some(node) => Ok(ListNode::next_node_ptr(node)),
        }
    }

    /// Steps backward from `pos`. Stepping from the head (or from the end
    /// sentinel of an empty list) fails.
    ///
    /// # Safety
    ///
    /// `pos` must be `None` or a node owned by this list.
    pub(crate) unsafe fn prev_of(&self, pos: Link<T>) -> Result<Link<T>, Error> {
        let prev = match pos {
            None => self.tail,
            Some(node) => ListNode::prev_node_ptr(node),
        };
        prev.map(Some).ok_or(Error::InvalidIterator)
    }

    /// Returns the 0-based offset of `pos` by scanning from the head. Fails for
    /// the end sentinel and for nodes that are not in this list.
    pub(crate) fn offset_of(&self, pos: Link<T>) -> Result<usize, Error> {
        let target = pos.ok_or(Error::InvalidIterator)?;
        let mut cursor = self.head;
        let mut offset = 0;
        while let Some(node) = cursor {
            if node == target {
                return Ok(offset);
            }
            cursor = unsafe { ListNode::next_node_ptr(node) };
            offset += 1;
        }
        Err(Error::InvalidIterator)
    }

    /// Returns the node at `index`, walking from whichever end is closer.
    /// `index >= len` yields the end sentinel.
    pub(crate) fn node_at(&self, index: usize) -> Link<T> {
        if index >= self.len {
            return None;
        }

        unsafe {
            if index <= self.len / 2 {
                let mut cursor = self.head;
                for _ in 0..index {
                    cursor = cursor.and_then(|node| ListNode::next_node_ptr(node));
                }
                cursor
            } else {
                let mut cursor = self.tail;
                for _ in 0..(self.len - 1 - index) {
                    cursor = cursor.and_then(|node| ListNode::prev_node_ptr(node));
                }
                cursor
            }
        }
    }

    /// Partitions the list into its first `at` elements and the rest. `self` is
    /// left empty. No element is moved or copied.
    pub(crate) fn split(&mut self, at: usize) -> (Self, Self) {
        let mut front = std::mem::take(self);
        if at == 0 {
            return (Self::new(), front);
        }

        let Some(last) = front.node_at(at - 1) else {
            // `at` covers the whole list.
            return (front, Self::new());
        };

        unsafe {
            match ListNode::next_node_ptr(last) {
                None => (front, Self::new()),
                Some(first) => {
                    (*last.as_ptr()).next = None;
                    (*first.as_ptr()).prev = None;

                    let back = Self {
                        len: front.len - at,
                        head: Some(first),
                        tail: front.tail,
                        marker: PhantomData,
                    };
                    front.tail = Some(last);
                    front.len = at;
                    (front, back)
                }
            }
        }
    }

    /// Moves all nodes of `other` to the back of this list in O(1). `other` is
    /// left empty.
    pub(crate) fn append(&mut self, other: &mut Self) {
        match self.tail {
            None => std::mem::swap(self, other),
            Some(tail) => {
                if let Some(other_head) = other.head.take() {
                    unsafe {
                        (*tail.as_ptr()).next = Some(other_head);
                        (*other_head.as_ptr()).prev = Some(tail);
                    }
                    self.tail = other.tail.take();
                    self.len += std::mem::replace(&mut other.len, 0);
                }
            }
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }
}

// Private function/methods
impl<T> BlockList<T> {
    fn pop_front_node(&mut self) -> Option<Box<ListNode<T>>> {
        // This method takes care not to create mutable references to whole nodes,
        // to maintain validity of aliasing pointers into `element`.
        self.head.map(|node| unsafe {
            let mut node = Box::from_raw(node.as_ptr());
            self.head = node.next;

            match self.head {
                None => self.tail = None,
                // Not creating new mutable (unique!) references overlapping `element`.
                Some(head) => (*head.as_ptr()).prev = None,
            }

            self.len -= 1;

            node.prev = None;
            node.next = None;
            node
        })
    }

    fn pop_back_node(&mut self) -> Option<Box<ListNode<T>>> {
        self.tail.map(|node| unsafe {
            let mut node = Box::from_raw(node.as_ptr());
            self.tail = node.prev;

            match self.tail {
                None => self.head = None,
                Some(tail) => (*tail.as_ptr()).next = None,
            }

            self.len -= 1;

            node.prev = None;
            node.next = None;
            node
        })
    }

    /// Unlinks the specified node from the current list. The node is not dropped.
    ///
    /// # Safety
    ///
    /// `node` must be owned by this list.
    unsafe fn unlink(&mut self, mut node: NonNull<ListNode<T>>) {
        let node = node.as_mut(); // this one is ours now, we can create an &mut.

        // Not creating new mutable (unique!) references overlapping `element`.
        match node.prev {
            Some(prev) => (*prev.as_ptr()).next = node.next,
            // this node is the head node
            None => self.head = node.next,
        };

        match node.next {
            Some(next) => (*next.as_ptr()).prev = node.prev,
            // this node is the tail node
            None => self.tail = node.prev,
        };

        node.prev = None;
        node.next = None;

        self.len -= 1;
    }
}

pub(crate) struct Iter<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    marker: PhantomData<&'a ListNode<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.len -= 1;
            self.tail = node.prev;
            &node.element
        })
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

pub(crate) struct IterMut<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    marker: PhantomData<&'a mut ListNode<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &mut node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.len -= 1;
            self.tail = node.prev;
            &mut node.element
        })
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

pub(crate) struct IntoIter<T> {
    list: BlockList<T>,
}

impl<T> IntoIterator for BlockList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
