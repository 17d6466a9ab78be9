// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{borrow::Cow, path::PathBuf};

use clap::Parser;
use log::debug;

use super::{InfoPrinter, MsScatterError};
use crate::io::read::MsReader;

#[derive(Parser, Debug)]
pub(super) struct MsInfoArgs {
    /// Path to the measurement set to be inspected.
    #[clap(name = "MEASUREMENT_SET", parse(from_os_str))]
    ms: PathBuf,
}

impl MsInfoArgs {
    pub(super) fn run(self) -> Result<(), MsScatterError> {
        debug!("Inspecting {}", self.ms.display());
        let reader = MsReader::new(&self.ms)?;
        let spw_ids = reader.spectral_window_ids()?;
        let shapes = reader.window_shapes()?;
        let uniform = reader.has_uniform_shape()?;

        let mut printer = InfoPrinter::new(format!("{}", self.ms.display()).into());
        printer.push_line(format!("Columns: {}", reader.column_names().join(", ")).into());
        printer.push_line(format!("Spectral window IDs: {spw_ids:?}").into());
        printer.push_block(
            shapes
                .iter()
                .map(|s| {
                    Cow::from(format!(
                        "DATA_DESC_ID {}: SPW {}, POLARIZATION {}, {} channels, {} polarisations, {} rows",
                        s.data_desc_id,
                        s.spectral_window_id,
                        s.polarization_id,
                        s.num_chans,
                        s.num_pols,
                        s.num_rows
                    ))
                })
                .collect(),
        );
        printer.push_line(
            if uniform {
                "All windows have the same shape"
            } else {
                "Windows have different shapes; a uniform read of all rows is not possible"
            }
            .into(),
        );
        printer.display();

        Ok(())
    }
}
