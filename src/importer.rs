//! Back-references from image data to the importer that produced it.
//!
//! Image data only carries an [`ImporterHandle`]. What the handle refers to
//! is kept in an [`ImporterRegistry`] owned by the import pipeline, so image
//! data never keeps an importer alive and never looks inside it.

use alloc::vec::Vec;
use core::num::NonZeroU32;

/// Opaque identifier of an importer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImporterHandle(NonZeroU32);

impl ImporterHandle {
    /// Raw handle value, never zero.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Issues [`ImporterHandle`]s and resolves them back to importer state.
#[derive(Clone, Debug)]
pub struct ImporterRegistry<T> {
    entries: Vec<T>,
}

impl<T> Default for ImporterRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ImporterRegistry<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register importer state and get a handle for it.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX - 1` importers are registered.
    pub fn register(&mut self, state: T) -> ImporterHandle {
        self.entries.push(state);
        let id = u32::try_from(self.entries.len())
            .ok()
            .and_then(NonZeroU32::new)
            .expect("importer registry full");
        ImporterHandle(id)
    }

    /// Look up the state behind `handle`.
    pub fn get(&self, handle: ImporterHandle) -> Option<&T> {
        self.entries.get(handle.get() as usize - 1)
    }

    pub fn get_mut(&mut self, handle: ImporterHandle) -> Option<&mut T> {
        self.entries.get_mut(handle.get() as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
