// Copyright 2025 Hashkit Team

//! Generic Merkle–Damgård streaming engine.
//!
//! [`BlockHasher`] owns the partial-block buffer, the message length counter and the chaining
//! state, and delegates the per-block work to a [`BlockAlgorithm`]. Every concrete hash in this
//! crate is a `BlockHasher` over a different algorithm parameter set.

use std::{fmt, marker::PhantomData, mem};

use digest::{
	generic_array::{ArrayLength, GenericArray},
	typenum::Unsigned,
	FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};
use hashkit_utils::ensure;

use crate::{
	bits::{store_words_be, Word},
	error::HashError,
	hasher::Ingest,
};

/// Padding marker: the mandatory "1" bit followed by seven zero bits.
const PADDING_MARKER: u8 = 0x80;

/// Total number of bytes absorbed by an engine, as it is encoded in the padding length field.
pub trait LengthCounter: Copy + Default + fmt::Debug + Eq + Send + Sync + 'static {
	/// Width in bytes of the big-endian bit-length field appended during padding.
	const FIELD_BYTES: usize;

	/// Adds `n` bytes to the counter.
	fn add_bytes(&mut self, n: usize) -> Result<(), HashError>;

	/// Writes the counter, converted to bits, as a big-endian integer filling `out` exactly.
	fn write_bit_len_be(&self, out: &mut [u8]) -> Result<(), HashError>;
}

macro_rules! impl_length_counter {
	($ty:ty) => {
		impl LengthCounter for $ty {
			const FIELD_BYTES: usize = std::mem::size_of::<$ty>();

			#[inline]
			fn add_bytes(&mut self, n: usize) -> Result<(), HashError> {
				let total = <$ty>::try_from(n)
					.ok()
					.and_then(|n| self.checked_add(n))
					.ok_or(HashError::MessageTooLong {
						field_bits: 8 * Self::FIELD_BYTES,
					})?;
				*self = total;
				Ok(())
			}

			#[inline]
			fn write_bit_len_be(&self, out: &mut [u8]) -> Result<(), HashError> {
				let bits = self.checked_mul(8).ok_or(HashError::MessageTooLong {
					field_bits: 8 * Self::FIELD_BYTES,
				})?;
				out.copy_from_slice(&bits.to_be_bytes());
				Ok(())
			}
		}
	};
}

impl_length_counter!(u64);
impl_length_counter!(u128);

/// Parameter set of a Merkle–Damgård hash built from 8-word chaining state and 16-word blocks.
pub trait BlockAlgorithm: Clone + Send + Sync + 'static {
	/// Human readable algorithm name, used in logs and `Debug` output.
	const NAME: &'static str;

	/// State and message word.
	type Word: Word;

	/// Byte counter; its width also fixes the width of the padding length field.
	type Counter: LengthCounter;

	/// Digest length in bytes.
	type OutputSize: ArrayLength<u8> + 'static;

	/// Block length in bytes.
	const BLOCK_BYTES: usize = 16 * <Self::Word as Word>::BYTES;

	/// Chaining state before the first block.
	const INITIAL_STATE: [Self::Word; 8];

	/// Applies the compression function to one block of exactly `Self::BLOCK_BYTES` bytes.
	fn compress(state: &mut [Self::Word; 8], block: &[u8]);
}

/// Fixed-length digest produced by a [`BlockHasher`] over `A`.
pub type DigestBytes<A> = GenericArray<u8, <A as BlockAlgorithm>::OutputSize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
	Accepting,
	Finalized,
}

/// Incremental hasher generic over the [`BlockAlgorithm`].
///
/// Lifecycle: bytes are fed with [`update`](Self::update) any number of times, then
/// [`finalize`](Self::finalize) is called exactly once, after which only the digest getters and
/// [`reset`](Self::reset) may be used. Feeding data into a finalized hasher panics; the `try_*`
/// variants report the same misuse as a [`HashError`] instead.
///
/// The type also implements [`digest::Digest`] through the RustCrypto traits. With that trait in
/// scope, `hasher.finalize()` resolves to the consuming `Digest::finalize(self)` rather than the
/// inherent `finalize(&mut self)`, since by-value receivers are tried first. Code that mixes both
/// APIs should call the inherent method as `BlockHasher::finalize(&mut hasher)` or keep `Digest`
/// out of scope.
#[derive(Clone)]
pub struct BlockHasher<A: BlockAlgorithm> {
	state: [A::Word; 8],
	/// Invariant: between public calls, `buffer.len() < A::BLOCK_BYTES`.
	buffer: Vec<u8>,
	len: A::Counter,
	phase: Phase,
	_marker: PhantomData<A>,
}

impl<A: BlockAlgorithm> BlockHasher<A> {
	pub fn new() -> Self {
		Self {
			state: A::INITIAL_STATE,
			// Room for the two blocks the padding may need.
			buffer: Vec::with_capacity(2 * A::BLOCK_BYTES),
			len: A::Counter::default(),
			phase: Phase::Accepting,
			_marker: PhantomData,
		}
	}

	/// Hashes `data` in one shot.
	pub fn hash(data: impl AsRef<[u8]>) -> DigestBytes<A> {
		let mut hasher = Self::new();
		hasher.update(data).finalize();
		hasher.digest_bytes()
	}

	/// Discards all absorbed data and returns to the freshly constructed state.
	pub fn reset(&mut self) {
		tracing::trace!(algorithm = A::NAME, "reset");
		self.state = A::INITIAL_STATE;
		self.buffer.clear();
		self.len = A::Counter::default();
		self.phase = Phase::Accepting;
	}

	pub fn is_finalized(&self) -> bool {
		self.phase == Phase::Finalized
	}

	/// Absorbs `data`.
	///
	/// # Panics
	/// Panics if the hasher is finalized or the message outgrows the length field.
	pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
		match self.try_update(data.as_ref()) {
			Ok(this) => this,
			Err(err) => panic!("{} update failed: {err}", A::NAME),
		}
	}

	pub fn try_update(&mut self, data: &[u8]) -> Result<&mut Self, HashError> {
		ensure!(self.phase == Phase::Accepting, HashError::AlreadyFinalized);
		self.len.add_bytes(data.len())?;
		self.absorb(data);
		Ok(self)
	}

	/// Pads the message and compresses the final block(s).
	///
	/// # Panics
	/// Panics if the hasher is already finalized or the message outgrows the length field.
	pub fn finalize(&mut self) -> &mut Self {
		match self.try_finalize() {
			Ok(this) => this,
			Err(err) => panic!("{} finalize failed: {err}", A::NAME),
		}
	}

	pub fn try_finalize(&mut self) -> Result<&mut Self, HashError> {
		ensure!(self.phase == Phase::Accepting, HashError::AlreadyFinalized);
		self.append_padding()?;

		let padded = mem::take(&mut self.buffer);
		debug_assert_eq!(padded.len() % A::BLOCK_BYTES, 0);
		tracing::trace!(
			algorithm = A::NAME,
			message_len = ?self.len,
			padding_blocks = padded.len() / A::BLOCK_BYTES,
			"finalize"
		);
		self.absorb(&padded);
		debug_assert!(self.buffer.is_empty());

		// Keep the allocation for reuse after a reset.
		self.buffer = padded;
		self.buffer.clear();
		self.phase = Phase::Finalized;
		Ok(self)
	}

	/// Returns the digest.
	///
	/// # Panics
	/// Panics if the hasher is not finalized.
	pub fn digest_bytes(&self) -> DigestBytes<A> {
		match self.try_digest() {
			Ok(digest) => digest,
			Err(err) => panic!("{}: {err}", A::NAME),
		}
	}

	pub fn try_digest(&self) -> Result<DigestBytes<A>, HashError> {
		ensure!(self.phase == Phase::Finalized, HashError::NotFinalized);
		let mut out = DigestBytes::<A>::default();
		store_words_be(&self.state, &mut out);
		Ok(out)
	}

	/// Returns the digest as a byte vector.
	///
	/// # Panics
	/// Panics if the hasher is not finalized.
	pub fn to_vec(&self) -> Vec<u8> {
		self.digest_bytes().to_vec()
	}

	/// Returns the digest as lowercase hex without separators.
	///
	/// # Panics
	/// Panics if the hasher is not finalized.
	pub fn to_hex_string(&self) -> String {
		hex::encode(self.digest_bytes())
	}

	/// Output length in bytes.
	pub const fn output_len() -> usize {
		<A::OutputSize as Unsigned>::USIZE
	}

	/// Compresses every whole block of `data`, topping up the pending partial block first, and
	/// keeps the remainder buffered.
	fn absorb(&mut self, mut data: &[u8]) {
		if !self.buffer.is_empty() {
			let take = (A::BLOCK_BYTES - self.buffer.len()).min(data.len());
			self.buffer.extend_from_slice(&data[..take]);
			if self.buffer.len() < A::BLOCK_BYTES {
				return;
			}

			A::compress(&mut self.state, &self.buffer);
			self.buffer.clear();
			data = &data[take..];
		}

		let mut blocks = data.chunks_exact(A::BLOCK_BYTES);
		for block in &mut blocks {
			A::compress(&mut self.state, block);
		}
		self.buffer.extend_from_slice(blocks.remainder());
	}

	/// Appends the marker byte, zero fill and bit length so the buffer becomes a whole number
	/// of blocks (one or two).
	fn append_padding(&mut self) -> Result<(), HashError> {
		let field_bytes = <A::Counter as LengthCounter>::FIELD_BYTES;
		let mut bit_len = [0u8; 16];
		self.len.write_bit_len_be(&mut bit_len[..field_bytes])?;

		self.buffer.push(PADDING_MARKER);
		// `buffer.len()` is in 1..=BLOCK_BYTES here.
		let zeros = (2 * A::BLOCK_BYTES - field_bytes - self.buffer.len()) % A::BLOCK_BYTES;
		self.buffer.resize(self.buffer.len() + zeros, 0);
		self.buffer.extend_from_slice(&bit_len[..field_bytes]);
		Ok(())
	}
}

impl<A: BlockAlgorithm> Default for BlockHasher<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: BlockAlgorithm> fmt::Debug for BlockHasher<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {{ ... }}", A::NAME)
	}
}

impl<A: BlockAlgorithm> Ingest for BlockHasher<A> {
	fn block_len(&self) -> usize {
		A::BLOCK_BYTES
	}

	fn ingest(&mut self, data: &[u8]) {
		BlockHasher::update(self, data);
	}
}

impl<A: BlockAlgorithm> HashMarker for BlockHasher<A> {}

impl<A: BlockAlgorithm> OutputSizeUser for BlockHasher<A> {
	type OutputSize = A::OutputSize;
}

impl<A: BlockAlgorithm> Update for BlockHasher<A> {
	fn update(&mut self, data: &[u8]) {
		BlockHasher::update(self, data);
	}
}

impl<A: BlockAlgorithm> FixedOutput for BlockHasher<A> {
	fn finalize_into(mut self, out: &mut Output<Self>) {
		BlockHasher::finalize(&mut self);
		out.copy_from_slice(&self.digest_bytes());
	}
}

impl<A: BlockAlgorithm> Reset for BlockHasher<A> {
	fn reset(&mut self) {
		BlockHasher::reset(self);
	}
}

impl<A: BlockAlgorithm> FixedOutputReset for BlockHasher<A> {
	fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
		BlockHasher::finalize(self);
		out.copy_from_slice(&self.digest_bytes());
		BlockHasher::reset(self);
	}
}
