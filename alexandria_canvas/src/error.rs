// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types. All of them are fail-soft: they are logged and reported back
//! as values, never raised past the connection manager.

use crate::handle::HandleRole;

/// Why a link drag ended without a link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Released with no handle under the pointer.
    #[error("no valid handle under pointer")]
    NoTarget,
    /// Released on a handle of the card the drag started on.
    #[error("cannot connect a card to itself")]
    SelfLoop,
    /// Both handles have the same role.
    #[error("cannot connect two {role} handles")]
    RoleMismatch {
        /// The role both handles share.
        role: HandleRole,
    },
    /// A primary release reached the canvas without any handle claiming it.
    #[error("release was not claimed by any handle")]
    Interrupted,
    /// The card owning the drag source was removed mid-drag.
    #[error("drag source was removed")]
    SourceRemoved,
}

/// Card initialization failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// The card was built without an input or output handle.
    #[error("handles are missing on card `{card}`")]
    MissingHandles {
        /// Name of the card.
        card: String,
    },
}
