// Copyright 2025 Hashkit Team

//! Byte/word conversions shared by every compression function.
//!
//! All endianness handling lives here: compression functions read their message words through
//! [`load_be`] and engines serialize their state through [`Word::store_be`].

use std::{
	fmt::Debug,
	ops::{BitAnd, BitOr, BitXor, Not},
};

/// An unsigned machine word used as a hash state element.
pub trait Word:
	Copy
	+ Default
	+ Debug
	+ Eq
	+ BitAnd<Output = Self>
	+ BitOr<Output = Self>
	+ BitXor<Output = Self>
	+ Not<Output = Self>
	+ Send
	+ Sync
	+ 'static
{
	/// Width of the word in bytes.
	const BYTES: usize;

	/// Interprets the first `Self::BYTES` bytes of `bytes` as a big-endian word.
	///
	/// # Panics
	/// Panics if `bytes` is shorter than `Self::BYTES`.
	fn from_be_slice(bytes: &[u8]) -> Self;

	/// Writes the word big-endian into the first `Self::BYTES` bytes of `out`.
	///
	/// # Panics
	/// Panics if `out` is shorter than `Self::BYTES`.
	fn store_be(self, out: &mut [u8]);
}

macro_rules! impl_word {
	($ty:ty) => {
		impl Word for $ty {
			const BYTES: usize = std::mem::size_of::<$ty>();

			#[inline(always)]
			fn from_be_slice(bytes: &[u8]) -> Self {
				let mut word = [0u8; std::mem::size_of::<$ty>()];
				word.copy_from_slice(&bytes[..Self::BYTES]);
				<$ty>::from_be_bytes(word)
			}

			#[inline(always)]
			fn store_be(self, out: &mut [u8]) {
				out[..Self::BYTES].copy_from_slice(&self.to_be_bytes());
			}
		}
	};
}

impl_word!(u32);
impl_word!(u64);

/// Loads the `index`-th big-endian word of `bytes`.
///
/// The word starts at byte offset `index * W::BYTES`; the slice needs no particular alignment.
#[inline(always)]
pub fn load_be<W: Word>(bytes: &[u8], index: usize) -> W {
	W::from_be_slice(&bytes[index * W::BYTES..])
}

/// Loads the first `N` big-endian words of `block`.
#[inline]
pub fn load_block_be<W: Word, const N: usize>(block: &[u8]) -> [W; N] {
	std::array::from_fn(|i| load_be(block, i))
}

/// Serializes `words` big-endian into `out`, stopping once `out` is full.
///
/// A trailing partial word contributes its most significant bytes, which is how the truncated
/// variants (e.g. SHA2-512/224) take the leftmost bits of the state.
pub fn store_words_be<W: Word>(words: &[W], out: &mut [u8]) {
	let mut word_bytes = [0u8; 8];
	for (chunk, word) in out.chunks_mut(W::BYTES).zip(words) {
		word.store_be(&mut word_bytes);
		chunk.copy_from_slice(&word_bytes[..chunk.len()]);
	}
}
