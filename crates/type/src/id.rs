// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one ingested result inside the record store.
///
/// Minted once per ingestion and never reused. Backed by a UUID v7, so
/// identifiers minted later sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
	pub fn generate() -> Self {
		Self(Uuid::now_v7())
	}
}

impl Display for RecordId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl From<Uuid> for RecordId {
	fn from(value: Uuid) -> Self {
		Self(value)
	}
}
