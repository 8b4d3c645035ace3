//! Index-linked doubly linked list.
//!
//! Items live in `Vec<Option<Link<T>>>` slots and refer to their neighbours
//! by slot index. Freed slots go on a free list and are reused, so a slot
//! index stays valid until its item is removed. Promotion and removal are
//! O(1) given a slot.

pub(crate) type Slot = usize;

/// Upper bound on slots reserved up front; beyond it the slab grows on demand.
const MAX_INITIAL_SLOTS: usize = 64;

#[derive(Debug, Clone)]
struct Link<T> {
    item: T,
    prev: Option<Slot>,
    next: Option<Slot>,
}

#[derive(Debug, Clone)]
pub(crate) struct LinkedSlab<T> {
    slots: Vec<Option<Link<T>>>,
    free: Vec<Slot>,
    head: Option<Slot>,
    tail: Option<Slot>,
    len: usize,
}

impl<T> LinkedSlab<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        LinkedSlab {
            slots: Vec::with_capacity(capacity.min(MAX_INITIAL_SLOTS)),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<Slot> {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> Option<Slot> {
        self.tail
    }

    pub(crate) fn get(&self, slot: Slot) -> Option<&T> {
        self.slots.get(slot)?.as_ref().map(|link| &link.item)
    }

    pub(crate) fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.slots.get_mut(slot)?.as_mut().map(|link| &mut link.item)
    }

    fn alloc(&mut self, item: T) -> Slot {
        let link = Link {
            item,
            prev: None,
            next: None,
        };
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(link);
            slot
        } else {
            self.slots.push(Some(link));
            self.slots.len() - 1
        }
    }

    /// Unlinks `slot` from its neighbours, leaving the item in place.
    fn detach(&mut self, slot: Slot) {
        let (prev, next) = match self.slots[slot].as_ref() {
            Some(link) => (link.prev, link.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(link) = self.slots[p].as_mut() {
                    link.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(link) = self.slots[n].as_mut() {
                    link.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(link) = self.slots[slot].as_mut() {
            link.prev = None;
            link.next = None;
        }
    }

    fn attach_front(&mut self, slot: Slot) {
        let old_head = self.head;

        if let Some(link) = self.slots[slot].as_mut() {
            link.prev = None;
            link.next = old_head;
        }

        match old_head {
            Some(h) => {
                if let Some(link) = self.slots[h].as_mut() {
                    link.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }

        self.head = Some(slot);
    }

    /// Inserts at the front and returns the new item's slot.
    pub(crate) fn push_front(&mut self, item: T) -> Slot {
        let slot = self.alloc(item);
        self.attach_front(slot);
        self.len += 1;
        slot
    }

    /// Moves an occupied slot to the front.
    pub(crate) fn move_to_front(&mut self, slot: Slot) {
        if self.head == Some(slot) || self.get(slot).is_none() {
            return;
        }
        self.detach(slot);
        self.attach_front(slot);
    }

    /// Removes the item at `slot`, freeing the slot for reuse.
    pub(crate) fn remove(&mut self, slot: Slot) -> Option<T> {
        self.get(slot)?;
        self.detach(slot);
        let link = self.slots[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(link.item)
    }

    /// Removes the back item.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Iterates front to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            slab: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.free = Vec::new();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walks the list both ways and checks that links agree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut forward = Vec::new();
        let mut cursor = self.head;
        let mut prev = None;
        while let Some(slot) = cursor {
            let link = self.slots[slot].as_ref().expect("linked slot is occupied");
            assert_eq!(link.prev, prev, "back link of slot {}", slot);
            forward.push(slot);
            prev = Some(slot);
            cursor = link.next;
        }
        assert_eq!(self.tail, prev);
        assert_eq!(forward.len(), self.len);

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(slot) = cursor {
            backward.push(slot);
            cursor = self.slots[slot].as_ref().and_then(|link| link.prev);
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }
}

/// Front-to-back iterator over a [`LinkedSlab`].
pub(crate) struct Iter<'a, T> {
    slab: &'a LinkedSlab<T>,
    cursor: Option<Slot>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let link = self.slab.slots[slot].as_ref()?;
        self.cursor = link.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&link.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
