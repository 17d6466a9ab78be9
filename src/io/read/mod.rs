// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read visibilities, one window (`DATA_DESC_ID`) at a time.

mod error;
mod memory;
pub(crate) mod ms;

pub use error::VisReadError;
pub use memory::MemoryStore;
pub use ms::{shapes_are_uniform, MsReadError, MsReader, Selection, WindowShape};

use marlu::c64;
use ndarray::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};

/// The main-table columns that can be queried for a window. The meaning of
/// each column is fixed by the measurement set definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MsColumn {
    #[strum(serialize = "DATA")]
    Data,

    #[strum(serialize = "MODEL_DATA")]
    ModelData,

    #[strum(serialize = "WEIGHT")]
    Weight,

    #[strum(serialize = "UVW")]
    Uvw,

    #[strum(serialize = "ANTENNA1")]
    Antenna1,

    #[strum(serialize = "ANTENNA2")]
    Antenna2,

    #[strum(serialize = "FLAG")]
    Flag,
}

impl MsColumn {
    /// The name of the column in the main table.
    pub fn name(self) -> &'static str {
        match self {
            MsColumn::Data => "DATA",
            MsColumn::ModelData => "MODEL_DATA",
            MsColumn::Weight => "WEIGHT",
            MsColumn::Uvw => "UVW",
            MsColumn::Antenna1 => "ANTENNA1",
            MsColumn::Antenna2 => "ANTENNA2",
            MsColumn::Flag => "FLAG",
        }
    }

    /// The lower-case key used for this column in query results.
    pub fn key(self) -> &'static str {
        match self {
            MsColumn::Data => "data",
            MsColumn::ModelData => "model_data",
            MsColumn::Weight => "weight",
            MsColumn::Uvw => "uvw",
            MsColumn::Antenna1 => "antenna1",
            MsColumn::Antenna2 => "antenna2",
            MsColumn::Flag => "flag",
        }
    }
}

/// The result of querying a single window. Only the requested columns are
/// populated.
///
/// Array axes follow the data-access tools of CASA, i.e. the row axis
/// (one row per baseline per time) is last:
/// - `data`, `model_data` and `flag`: `[pol, chan, row]`
/// - `weight`: `[pol, row]` (weights don't vary with channel)
/// - `uvw`: `[3, row]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowData {
    pub data_desc_id: usize,
    pub data: Option<Array3<c64>>,
    pub model_data: Option<Array3<c64>>,
    pub weight: Option<Array2<f64>>,
    pub flag: Option<Array3<bool>>,
    pub uvw: Option<Array2<f64>>,
    pub antenna1: Option<Array1<i32>>,
    pub antenna2: Option<Array1<i32>>,
}

impl WindowData {
    pub fn new(data_desc_id: usize) -> WindowData {
        WindowData {
            data_desc_id,
            ..Default::default()
        }
    }

    /// Is this column populated?
    pub fn contains(&self, column: MsColumn) -> bool {
        match column {
            MsColumn::Data => self.data.is_some(),
            MsColumn::ModelData => self.model_data.is_some(),
            MsColumn::Weight => self.weight.is_some(),
            MsColumn::Uvw => self.uvw.is_some(),
            MsColumn::Antenna1 => self.antenna1.is_some(),
            MsColumn::Antenna2 => self.antenna2.is_some(),
            MsColumn::Flag => self.flag.is_some(),
        }
    }

    /// The lower-case keys of the populated columns.
    pub fn keys(&self) -> Vec<&'static str> {
        use strum::IntoEnumIterator;

        MsColumn::iter()
            .filter(|&c| self.contains(c))
            .map(MsColumn::key)
            .collect()
    }

    /// Keep only the requested columns.
    pub(crate) fn retain(mut self, columns: &[MsColumn]) -> WindowData {
        let keep = |c| columns.contains(&c);
        if !keep(MsColumn::Data) {
            self.data = None;
        }
        if !keep(MsColumn::ModelData) {
            self.model_data = None;
        }
        if !keep(MsColumn::Weight) {
            self.weight = None;
        }
        if !keep(MsColumn::Uvw) {
            self.uvw = None;
        }
        if !keep(MsColumn::Antenna1) {
            self.antenna1 = None;
        }
        if !keep(MsColumn::Antenna2) {
            self.antenna2 = None;
        }
        if !keep(MsColumn::Flag) {
            self.flag = None;
        }
        self
    }
}

/// Something that visibilities can be read from, one window at a time.
pub trait VisStore {
    /// All window identifiers (`DATA_DESC_ID`s) in this store, ascending.
    fn data_desc_ids(&mut self) -> Result<Vec<usize>, VisReadError>;

    /// Read the requested columns of a single window.
    fn read_window(
        &mut self,
        data_desc_id: usize,
        columns: &[MsColumn],
    ) -> Result<WindowData, VisReadError>;
}
