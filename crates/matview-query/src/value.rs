//! Bind values collected while building a statement

/// Ordered bind values for a statement's `$n` placeholders
///
/// DDL statements never carry values; catalog lookups bind their
/// identifiers instead of splicing them into the SQL text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values(pub Vec<String>);

impl Values {
	/// Create an empty value list
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Number of bind values
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no bind values
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consume into the inner vector
	pub fn into_inner(self) -> Vec<String> {
		self.0
	}
}

impl IntoIterator for Values {
	type Item = String;
	type IntoIter = std::vec::IntoIter<String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
