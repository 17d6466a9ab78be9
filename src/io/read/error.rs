// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading visibilities out of a [`super::VisStore`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisReadError {
    #[error("DATA_DESC_ID {data_desc_id} doesn't exist; available IDs: {available:?}")]
    NoSuchDataDescId {
        data_desc_id: usize,
        available: Vec<usize>,
    },

    #[error(transparent)]
    MS(#[from] super::ms::MsReadError),
}
