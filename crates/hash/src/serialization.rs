// Copyright 2024-2025 Hashkit Team

use std::cmp::min;

use bytes::{buf::UninitSlice, BufMut};

use crate::hasher::Ingest;

/// Adapter that wraps an [`Ingest`] reference and exposes the [`BufMut`] interface.
///
/// Writes are collected into one block-sized buffer and forwarded a block at a time, so any
/// serializer that targets `BufMut` can stream straight into a hasher. The tail is flushed on
/// drop.
#[derive(Debug)]
pub struct HashBuffer<'a, H: Ingest> {
	hasher: &'a mut H,
	block: Vec<u8>,
	/// Invariant: `index` is always strictly less than `block.len()`.
	index: usize,
}

impl<'a, H: Ingest> HashBuffer<'a, H> {
	pub fn new(hasher: &'a mut H) -> Self {
		let block = vec![0u8; hasher.block_len()];
		Self {
			hasher,
			block,
			index: 0,
		}
	}

	fn flush(&mut self) {
		if self.index == 0 {
			return;
		}
		self.hasher.ingest(&self.block[..self.index]);
		self.index = 0;
	}
}

unsafe impl<H: Ingest> BufMut for HashBuffer<'_, H> {
	fn remaining_mut(&self) -> usize {
		usize::MAX
	}

	unsafe fn advance_mut(&mut self, mut cnt: usize) {
		while cnt > 0 {
			let remaining = min(self.block.len() - self.index, cnt);
			cnt -= remaining;
			self.index += remaining;
			if self.index == self.block.len() {
				self.flush();
			}
		}
	}

	fn chunk_mut(&mut self) -> &mut UninitSlice {
		let buffer = &mut self.block[self.index..];
		buffer.into()
	}
}

impl<H: Ingest> Drop for HashBuffer<'_, H> {
	fn drop(&mut self) {
		self.flush()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{sha2_256::Sha256, sha2_512::Sha512_224, sm3::Sm3};

	#[test]
	fn test_hash_buffer_updates() {
		let message =
			b"yo, listen up, here's the story about a little guy that lives in a blue world";
		assert!(message.len() > 64);
		assert!(message.len() < 128);

		let expected_digest = Sm3::hash(message);

		let mut hasher = Sm3::new();
		{
			let mut buffer = HashBuffer::new(&mut hasher);
			buffer.put_slice(message);
		}
		hasher.finalize();
		assert_eq!(hasher.digest_bytes(), expected_digest);
	}

	#[test]
	fn test_unused_hash_buffer_leaves_finalized_hasher_alone() {
		let mut hasher = Sha256::new();
		hasher.update(b"abc").finalize();
		{
			let _buffer = HashBuffer::new(&mut hasher);
		}
		assert_eq!(hasher.digest_bytes(), Sha256::hash(b"abc"));
	}

	#[test]
	fn test_hash_buffer_block_aligned_writes() {
		let message = [0x5au8; 128];
		let mut hasher = Sm3::new();
		{
			let mut buffer = HashBuffer::new(&mut hasher);
			buffer.put_slice(&message);
		}
		hasher.finalize();
		assert_eq!(hasher.digest_bytes(), Sm3::hash(message));
	}

	#[test]
	fn test_hash_buffer_mixed_puts() {
		let mut hasher = Sha512_224::new();
		{
			let mut buffer = HashBuffer::new(&mut hasher);
			for i in 0..100u32 {
				buffer.put_u32(i);
				buffer.put_u8(0xee);
			}
			buffer.put_u64_le(u64::MAX);
		}
		hasher.finalize();

		let mut expected = Vec::new();
		for i in 0..100u32 {
			expected.extend_from_slice(&i.to_be_bytes());
			expected.push(0xee);
		}
		expected.extend_from_slice(&u64::MAX.to_le_bytes());
		assert_eq!(hasher.digest_bytes(), Sha512_224::hash(&expected));
	}
}
