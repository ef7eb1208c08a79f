// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage backing the diagram's nodes and links.

use core::marker::PhantomData;

/// A generational handle into an [`Arena`].
pub(crate) trait Handle: Copy {
    fn from_parts(idx: u32, generation: u32) -> Self;
    fn idx(self) -> usize;
    fn generation(self) -> u32;
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with a free list. Stale handles never resolve.
#[derive(Clone, Debug)]
pub(crate) struct Arena<H, T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
    _handle: PhantomData<fn() -> H>,
}

impl<H: Handle, T> Arena<H, T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            _handle: PhantomData,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles are intentionally 32-bit."
    )]
    pub(crate) fn insert(&mut self, value: T) -> H {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            // Vacant slots keep their last generation; bump it so old handles stay dead.
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            return H::from_parts(idx as u32, slot.generation);
        }
        self.slots.push(Slot {
            generation: 1,
            value: Some(value),
        });
        H::from_parts((self.slots.len() - 1) as u32, 1)
    }

    pub(crate) fn remove(&mut self, handle: H) -> Option<T> {
        let slot = self.slots.get_mut(handle.idx())?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        self.free_list.push(handle.idx());
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, handle: H) -> Option<&T> {
        let slot = self.slots.get(handle.idx())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.idx())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    pub(crate) fn contains(&self, handle: H) -> bool {
        self.get(handle).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles are intentionally 32-bit."
    )]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|v| (H::from_parts(idx as u32, slot.generation), v))
        })
    }
}
