// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations against the canonical and overlay stores.
//!
//! All writes go through [`writer::commit`], which wraps the supplied
//! operations in a single database transaction. Overlay lifecycle
//! operations (merge, discard, delete) live in `overlay`.

mod overlay;
mod writer;

pub use overlay::{
    delete_disruption, discard_overlay, discard_overlay_with_canonical, merge_overlay,
};
pub use writer::{Target, WriteOp, commit};
