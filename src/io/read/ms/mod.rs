// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to interface with CASA measurement sets.
//!
//! More info: https://casa.nrao.edu/Memos/229.html#SECTION00060000000000000000

mod error;

pub use error::MsReadError;

use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, trace};
use marlu::{c32, rubbl_casatables};
use ndarray::prelude::*;
use rubbl_casatables::{CasaDataType, Table, TableOpenMode};

use super::{MsColumn, VisReadError, VisStore, WindowData};

/// Open a measurement set table read only. If `table` is `None`, then open the
/// base table.
pub(super) fn read_table(ms: &Path, table: Option<&str>) -> Result<Table, MsReadError> {
    let t = Table::open(
        format!("{}/{}", ms.display(), table.unwrap_or("")),
        TableOpenMode::Read,
    )?;
    Ok(t)
}

/// The shape of the visibilities in a single window, as described by the
/// measurement set's sub-tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowShape {
    pub data_desc_id: usize,
    pub spectral_window_id: i32,
    pub polarization_id: i32,
    pub num_chans: usize,
    pub num_pols: usize,

    /// The number of main-table rows belonging to this window.
    pub num_rows: usize,
}

/// Can all of these windows be read as a single uniformly-shaped column? This
/// is only true when every window has the same number of channels and
/// polarisations.
pub fn shapes_are_uniform(shapes: &[WindowShape]) -> bool {
    shapes
        .iter()
        .map(|s| (s.num_chans, s.num_pols))
        .all_equal()
}

pub struct MsReader {
    /// The path to the measurement set on disk.
    pub(crate) ms: PathBuf,

    main_table: Table,

    /// The names of the columns in the main table.
    col_names: Vec<String>,

    /// The `DATA_DESC_ID` of every main-table row.
    row_data_desc_ids: Vec<usize>,

    /// The number of rows in the `DATA_DESCRIPTION` table, i.e. the number of
    /// windows.
    num_data_descs: usize,
}

impl MsReader {
    /// Open a measurement set. The main table stays open until the reader is
    /// dropped.
    pub fn new<P: AsRef<Path>>(ms: P) -> Result<MsReader, MsReadError> {
        fn inner(ms: &Path) -> Result<MsReader, MsReadError> {
            debug!("Using measurement set: {}", ms.display());
            if !ms.exists() {
                return Err(MsReadError::BadFile(ms.to_path_buf()));
            }

            let mut main_table = read_table(ms, None)?;
            if main_table.n_rows() == 0 {
                return Err(MsReadError::MainTableEmpty);
            }
            let col_names = main_table.column_names()?;
            trace!("Main table columns: {col_names:?}");

            let num_data_descs = {
                let data_desc_table = read_table(ms, Some("DATA_DESCRIPTION"))?;
                data_desc_table.n_rows() as usize
            };
            if num_data_descs == 0 {
                return Err(MsReadError::NoDataDescriptions);
            }
            debug!("Number of DATA_DESC_IDs: {num_data_descs}");

            let row_data_desc_ids = main_table
                .get_col_as_vec::<i32>("DATA_DESC_ID")?
                .into_iter()
                .map(|id| {
                    if id < 0 {
                        return Err(MsReadError::NegativeDataDescId(id));
                    }
                    let id = id as usize;
                    if id >= num_data_descs {
                        return Err(MsReadError::BadDataDescId {
                            data_desc_id: id,
                            num_data_descs,
                        });
                    }
                    Ok(id)
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(MsReader {
                ms: ms.to_path_buf(),
                main_table,
                col_names,
                row_data_desc_ids,
                num_data_descs,
            })
        }
        inner(ms.as_ref())
    }

    /// The names of the columns in the main table.
    pub fn column_names(&self) -> &[String] {
        &self.col_names
    }

    fn has_column(&self, column: MsColumn) -> bool {
        self.col_names.iter().any(|c| c == column.name())
    }

    /// The `SPECTRAL_WINDOW_ID` associated with each `DATA_DESC_ID`.
    pub fn spectral_window_ids(&self) -> Result<Vec<i32>, MsReadError> {
        let mut data_desc_table = read_table(&self.ms, Some("DATA_DESCRIPTION"))?;
        let ids = data_desc_table.get_col_as_vec("SPECTRAL_WINDOW_ID")?;
        Ok(ids)
    }

    /// Get the shape of each window.
    pub fn window_shapes(&self) -> Result<Vec<WindowShape>, MsReadError> {
        let (spw_ids, pol_ids): (Vec<i32>, Vec<i32>) = {
            let mut data_desc_table = read_table(&self.ms, Some("DATA_DESCRIPTION"))?;
            (
                data_desc_table.get_col_as_vec("SPECTRAL_WINDOW_ID")?,
                data_desc_table.get_col_as_vec("POLARIZATION_ID")?,
            )
        };
        let num_chans: Vec<i32> = {
            let mut spw_table = read_table(&self.ms, Some("SPECTRAL_WINDOW"))?;
            spw_table.get_col_as_vec("NUM_CHAN")?
        };
        let num_corrs: Vec<i32> = {
            let mut pol_table = read_table(&self.ms, Some("POLARIZATION"))?;
            pol_table.get_col_as_vec("NUM_CORR")?
        };

        let lookup = |values: &[i32], index: i32, sub_table: &'static str| {
            usize::try_from(index)
                .ok()
                .and_then(|i| values.get(i))
                .map(|&v| v.max(0) as usize)
                .ok_or(MsReadError::BadSubtableIndex {
                    table: "DATA_DESCRIPTION",
                    sub_table,
                    index,
                    num_rows: values.len(),
                })
        };

        spw_ids
            .into_iter()
            .zip(pol_ids)
            .enumerate()
            .map(|(data_desc_id, (spectral_window_id, polarization_id))| {
                Ok(WindowShape {
                    data_desc_id,
                    spectral_window_id,
                    polarization_id,
                    num_chans: lookup(&num_chans, spectral_window_id, "SPECTRAL_WINDOW")?,
                    num_pols: lookup(&num_corrs, polarization_id, "POLARIZATION")?,
                    num_rows: self
                        .row_data_desc_ids
                        .iter()
                        .filter(|&&id| id == data_desc_id)
                        .count(),
                })
            })
            .collect()
    }

    /// Could the visibility columns of this measurement set be read in one
    /// go, i.e. do all windows have the same shape?
    pub fn has_uniform_shape(&self) -> Result<bool, MsReadError> {
        Ok(shapes_are_uniform(&self.window_shapes()?))
    }

    /// Select the rows of a single window. Only one selection can exist at a
    /// time; it is reset when it is dropped.
    pub fn select(&mut self, data_desc_id: usize) -> Result<Selection<'_>, MsReadError> {
        if data_desc_id >= self.num_data_descs {
            return Err(MsReadError::BadDataDescId {
                data_desc_id,
                num_data_descs: self.num_data_descs,
            });
        }
        let rows: Vec<u64> = self
            .row_data_desc_ids
            .iter()
            .positions(|&id| id == data_desc_id)
            .map(|i| i as u64)
            .collect();
        debug!(
            "Selected {} rows with DATA_DESC_ID {data_desc_id}",
            rows.len()
        );

        Ok(Selection {
            reader: self,
            data_desc_id,
            rows,
        })
    }
}

impl VisStore for MsReader {
    fn data_desc_ids(&mut self) -> Result<Vec<usize>, VisReadError> {
        Ok((0..self.num_data_descs).collect())
    }

    fn read_window(
        &mut self,
        data_desc_id: usize,
        columns: &[MsColumn],
    ) -> Result<WindowData, VisReadError> {
        let mut selection = self.select(data_desc_id)?;
        let window = selection.get_data(columns)?;
        selection.reset();
        Ok(window)
    }
}

/// The main-table rows of a single window.
pub struct Selection<'a> {
    reader: &'a mut MsReader,
    data_desc_id: usize,
    rows: Vec<u64>,
}

impl Selection<'_> {
    pub fn data_desc_id(&self) -> usize {
        self.data_desc_id
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Read the requested columns for the selected rows.
    ///
    /// If the measurement set has no `MODEL_DATA` column but it was requested,
    /// then the model array is empty.
    pub fn get_data(&mut self, columns: &[MsColumn]) -> Result<WindowData, MsReadError> {
        let mut window = WindowData::new(self.data_desc_id);

        for &column in columns.iter().unique() {
            if !self.reader.has_column(column) {
                if column == MsColumn::ModelData {
                    debug!(
                        "{} has no MODEL_DATA column; returning an empty model",
                        self.reader.ms.display()
                    );
                    window.model_data = Some(Array3::zeros((0, 0, 0)));
                    continue;
                }
                return Err(MsReadError::NoColumn {
                    column: column.name(),
                });
            }

            trace!(
                "Reading {column} for DATA_DESC_ID {}",
                self.data_desc_id
            );
            match column {
                MsColumn::Data => {
                    window.data = Some(self.read_array_column(column, "data", |v: c32| {
                        marlu::c64::new(v.re.into(), v.im.into())
                    })?)
                }
                MsColumn::ModelData => {
                    window.model_data =
                        Some(self.read_array_column(column, "model data", |v: c32| {
                            marlu::c64::new(v.re.into(), v.im.into())
                        })?)
                }
                MsColumn::Flag => {
                    window.flag = Some(self.read_array_column(column, "flags", |v: bool| v)?)
                }
                MsColumn::Weight => window.weight = Some(self.read_weights()?),
                MsColumn::Uvw => window.uvw = Some(self.read_uvws()?),
                MsColumn::Antenna1 | MsColumn::Antenna2 => {
                    let mut antennas = Array1::zeros(self.rows.len());
                    for (a, &row_index) in antennas.iter_mut().zip(self.rows.iter()) {
                        *a = self
                            .reader
                            .main_table
                            .get_cell::<i32>(column.name(), row_index)?;
                    }
                    if column == MsColumn::Antenna1 {
                        window.antenna1 = Some(antennas);
                    } else {
                        window.antenna2 = Some(antennas);
                    }
                }
            }
        }

        Ok(window)
    }

    /// Read a column whose cells are `[chan, pol]` arrays into a
    /// `[pol, chan, row]` array. All rows must have the same cell shape.
    fn read_array_column<T, U, F>(
        &mut self,
        column: MsColumn,
        array_type: &'static str,
        convert: F,
    ) -> Result<Array3<U>, MsReadError>
    where
        Array2<T>: CasaDataType,
        T: Copy,
        U: Clone + Default,
        F: Fn(T) -> U,
    {
        let (first, last) = match (self.rows.first(), self.rows.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Ok(Array3::default((0, 0, 0))),
        };

        // Array cells have to be read through a row; reading them straight
        // from the table reports the element type rather than the array type.
        let mut cells: Vec<Array2<T>> = Vec::with_capacity(self.rows.len());
        let mut wanted = self.rows.iter().copied().peekable();
        let mut row_index = first;
        self.reader
            .main_table
            .for_each_row_in_range(first..last + 1, |row| {
                if wanted.peek() == Some(&row_index) {
                    cells.push(row.get_cell(column.name())?);
                    wanted.next();
                }
                row_index += 1;
                Ok(())
            })?;

        let num_rows = cells.len();
        let mut out: Option<Array3<U>> = None;
        for ((i_row, cell), &row_index) in cells.into_iter().enumerate().zip(self.rows.iter()) {
            let (num_chans, num_pols) = cell.dim();
            let out = out.get_or_insert_with(|| Array3::default((num_pols, num_chans, num_rows)));
            let (expected_pols, expected_chans, _) = out.dim();
            if num_chans != expected_chans {
                return Err(MsReadError::BadArraySize {
                    array_type,
                    row_index,
                    expected_len: expected_chans,
                    axis_num: 0,
                });
            }
            if num_pols != expected_pols {
                return Err(MsReadError::BadArraySize {
                    array_type,
                    row_index,
                    expected_len: expected_pols,
                    axis_num: 1,
                });
            }

            out.slice_mut(s![.., .., i_row])
                .assign(&cell.t().mapv(&convert));
        }

        Ok(out.unwrap_or_else(|| Array3::default((0, 0, 0))))
    }

    /// Read the `WEIGHT` column into a `[pol, row]` array.
    fn read_weights(&mut self) -> Result<Array2<f64>, MsReadError> {
        let num_rows = self.rows.len();
        let mut out: Option<Array2<f64>> = None;
        for (i_row, &row_index) in self.rows.iter().enumerate() {
            let weights: Vec<f32> = self
                .reader
                .main_table
                .get_cell_as_vec(MsColumn::Weight.name(), row_index)?;
            let out = out.get_or_insert_with(|| Array2::zeros((weights.len(), num_rows)));
            if weights.len() != out.len_of(Axis(0)) {
                return Err(MsReadError::BadArraySize {
                    array_type: "weights",
                    row_index,
                    expected_len: out.len_of(Axis(0)),
                    axis_num: 0,
                });
            }
            for (o, w) in out.column_mut(i_row).iter_mut().zip(weights) {
                *o = w.into();
            }
        }

        Ok(out.unwrap_or_else(|| Array2::zeros((0, 0))))
    }

    /// Read the `UVW` column into a `[3, row]` array.
    fn read_uvws(&mut self) -> Result<Array2<f64>, MsReadError> {
        let mut out = Array2::zeros((3, self.rows.len()));
        for (i_row, &row_index) in self.rows.iter().enumerate() {
            let uvw: Vec<f64> = self
                .reader
                .main_table
                .get_cell_as_vec(MsColumn::Uvw.name(), row_index)?;
            if uvw.len() != 3 {
                return Err(MsReadError::BadArraySize {
                    array_type: "UVW",
                    row_index,
                    expected_len: 3,
                    axis_num: 0,
                });
            }
            out.column_mut(i_row).assign(&ArrayView1::from(&uvw));
        }

        Ok(out)
    }

    /// Finish with this selection. A selection only holds row indices into
    /// the reader's open main table, so there is nothing to release; this
    /// just ends the borrow of the reader, as dropping the selection does.
    pub fn reset(self) {}
}

impl Drop for Selection<'_> {
    fn drop(&mut self) {
        trace!("Resetting selection of DATA_DESC_ID {}", self.data_desc_id);
    }
}
