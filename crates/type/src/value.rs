// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A single cell of a query result.
///
/// The cache never interprets values; it only stores and slices rows of them.
/// Drivers map their native types onto these variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (SQL NULL)
	Null,
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte signed integer
	Int8(i64),
	/// An 8-byte floating point
	Float8(f64),
	/// A UTF-8 encoded text
	Utf8(String),
	/// A binary large object
	Blob(Vec<u8>),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn float8(v: impl Into<f64>) -> Self {
		Value::Float8(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn blob(v: impl Into<Vec<u8>>) -> Self {
		Value::Blob(v.into())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Boolean(v) => write!(f, "{}", v),
			Value::Int8(v) => write!(f, "{}", v),
			Value::Float8(v) => write!(f, "{}", v),
			Value::Utf8(v) => f.write_str(v),
			Value::Blob(v) => {
				f.write_str("0x")?;
				for byte in v {
					write!(f, "{:02x}", byte)?;
				}
				Ok(())
			}
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Null)
	}
}
