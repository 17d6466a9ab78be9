// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Windows of visibilities held in memory.

use std::collections::BTreeMap;

use super::{MsColumn, VisReadError, VisStore, WindowData};

/// A [`VisStore`] that holds all of its windows in memory. Handy for synthetic
/// data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    windows: BTreeMap<usize, WindowData>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Add a window, keyed by its `data_desc_id`. Any existing window with the
    /// same ID is replaced and returned.
    pub fn insert(&mut self, window: WindowData) -> Option<WindowData> {
        self.windows.insert(window.data_desc_id, window)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl FromIterator<WindowData> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = WindowData>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for window in iter {
            store.insert(window);
        }
        store
    }
}

impl VisStore for MemoryStore {
    fn data_desc_ids(&mut self) -> Result<Vec<usize>, VisReadError> {
        Ok(self.windows.keys().copied().collect())
    }

    fn read_window(
        &mut self,
        data_desc_id: usize,
        columns: &[MsColumn],
    ) -> Result<WindowData, VisReadError> {
        match self.windows.get(&data_desc_id) {
            Some(w) => Ok(w.clone().retain(columns)),
            None => Err(VisReadError::NoSuchDataDescId {
                data_desc_id,
                available: self.windows.keys().copied().collect(),
            }),
        }
    }
}
