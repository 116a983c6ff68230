// Copyright 2023-2025 Hashkit Team

/// A streaming byte sink that absorbs input in fixed-size blocks.
///
/// This is the ingestion half of every hasher in the crate. Adapters such as
/// [`HashBuffer`](crate::serialization::HashBuffer) use the block length to batch writes.
pub trait Ingest {
	/// Number of bytes consumed by one compression step.
	fn block_len(&self) -> usize;

	/// Absorbs `data`; zero-length input is a no-op.
	fn ingest(&mut self, data: &[u8]);
}

/// Feeds `chunks` into `hasher` in order.
pub fn ingest_chunks<'a, H: Ingest + ?Sized>(
	hasher: &mut H,
	chunks: impl IntoIterator<Item = &'a [u8]>,
) {
	for chunk in chunks {
		hasher.ingest(chunk);
	}
}
