// Copyright 2025 Hashkit Team

//! TupleHash ([NIST SP 800-185], section 5).
//!
//! A tuple of byte strings is hashed by prefixing every element with `left_encode` of its bit
//! length before forwarding it to a customizable XOF, so that tuples whose concatenations agree
//! still hash differently. The requested output length is bound into the digest with a trailing
//! `right_encode`.
//!
//! [NIST SP 800-185]: <https://doi.org/10.6028/NIST.SP.800-185>

use std::fmt;

use hashkit_utils::{bail, ensure};

use crate::{
	error::HashError,
	xof::{CShake128, CShake256, CustomizableXof},
};

/// Function name string (N) that separates TupleHash from other cSHAKE users.
pub const FUNCTION_NAME: &[u8] = b"TupleHash";

const MAX_ENCODED_LEN: usize = 1 + std::mem::size_of::<u64>();

/// Stack buffer holding one `left_encode`/`right_encode` output.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncBuf {
	bytes: [u8; MAX_ENCODED_LEN],
	len: usize,
}

impl EncBuf {
	pub fn as_slice(&self) -> &[u8] {
		&self.bytes[..self.len]
	}
}

impl AsRef<[u8]> for EncBuf {
	fn as_ref(&self) -> &[u8] {
		self.as_slice()
	}
}

impl fmt::Debug for EncBuf {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.as_slice()).finish()
	}
}

/// Minimal big-endian bytes of `value` (at least one byte) written at `out[offset..]`.
fn minimal_be(value: u64, out: &mut [u8; MAX_ENCODED_LEN], offset: usize) -> usize {
	let n = ((u64::BITS - value.leading_zeros()).div_ceil(8)).max(1) as usize;
	out[offset..offset + n].copy_from_slice(&value.to_be_bytes()[8 - n..]);
	n
}

/// `left_encode(x)`: the byte count of `x`'s minimal big-endian encoding, then the encoding.
pub fn left_encode(value: u64) -> EncBuf {
	let mut bytes = [0u8; MAX_ENCODED_LEN];
	let n = minimal_be(value, &mut bytes, 1);
	bytes[0] = n as u8;
	EncBuf { bytes, len: n + 1 }
}

/// `right_encode(x)`: `x`'s minimal big-endian encoding, then its byte count.
pub fn right_encode(value: u64) -> EncBuf {
	let mut bytes = [0u8; MAX_ENCODED_LEN];
	let n = minimal_be(value, &mut bytes, 0);
	bytes[n] = n as u8;
	EncBuf { bytes, len: n + 1 }
}

fn bit_len(byte_len: usize) -> Option<u64> {
	u64::try_from(byte_len).ok()?.checked_mul(8)
}

/// TupleHash over the customizable XOF `X`.
///
/// Elements are fed one at a time with [`next_data`](Self::next_data); their order and
/// boundaries are part of the hashed value.
#[derive(Clone)]
pub struct TupleHash<X: CustomizableXof> {
	xof: X,
	output_len: usize,
	/// `Some` once finalized.
	digest: Option<Vec<u8>>,
}

impl<X: CustomizableXof> TupleHash<X> {
	/// Creates a hasher producing `output_len` bytes, customized by `customization` (S).
	///
	/// # Panics
	/// Panics if `output_len` is zero or its bit length does not fit in 64 bits.
	pub fn new(output_len: usize, customization: impl AsRef<[u8]>) -> Self {
		match Self::try_new(output_len, customization) {
			Ok(hasher) => hasher,
			Err(err) => panic!("TupleHash over {}: {err}", X::NAME),
		}
	}

	pub fn try_new(output_len: usize, customization: impl AsRef<[u8]>) -> Result<Self, HashError> {
		if output_len == 0 || bit_len(output_len).is_none() {
			bail!(HashError::InvalidOutputLength { len: output_len });
		}
		Ok(Self {
			xof: X::new(FUNCTION_NAME, customization.as_ref()),
			output_len,
			digest: None,
		})
	}

	/// Hashes a whole tuple in one shot.
	pub fn hash<I>(output_len: usize, customization: impl AsRef<[u8]>, elements: I) -> Vec<u8>
	where
		I: IntoIterator,
		I::Item: AsRef<[u8]>,
	{
		let mut hasher = Self::new(output_len, customization);
		for element in elements {
			hasher.next_data(element);
		}
		hasher.finalize();
		hasher.to_vec()
	}

	pub fn output_len(&self) -> usize {
		self.output_len
	}

	pub fn is_finalized(&self) -> bool {
		self.digest.is_some()
	}

	/// Discards all elements, keeping the output length and customization.
	pub fn reset(&mut self) {
		tracing::trace!(xof = X::NAME, "tuple hash reset");
		self.xof.reset();
		self.digest = None;
	}

	/// Appends the next tuple element.
	///
	/// # Panics
	/// Panics if the hasher is finalized.
	pub fn next_data(&mut self, element: impl AsRef<[u8]>) -> &mut Self {
		match self.try_next_data(element.as_ref()) {
			Ok(this) => this,
			Err(err) => panic!("TupleHash over {}: {err}", X::NAME),
		}
	}

	pub fn try_next_data(&mut self, element: &[u8]) -> Result<&mut Self, HashError> {
		ensure!(self.digest.is_none(), HashError::AlreadyFinalized);
		let Some(element_bits) = bit_len(element.len()) else {
			bail!(HashError::MessageTooLong { field_bits: 64 });
		};
		self.xof.update(left_encode(element_bits).as_slice());
		self.xof.update(element);
		Ok(self)
	}

	/// Binds the output length and squeezes the digest.
	///
	/// # Panics
	/// Panics if the hasher is already finalized.
	pub fn finalize(&mut self) -> &mut Self {
		match self.try_finalize() {
			Ok(this) => this,
			Err(err) => panic!("TupleHash over {}: {err}", X::NAME),
		}
	}

	pub fn try_finalize(&mut self) -> Result<&mut Self, HashError> {
		ensure!(self.digest.is_none(), HashError::AlreadyFinalized);
		let output_bits = bit_len(self.output_len)
			.ok_or(HashError::InvalidOutputLength { len: self.output_len })?;
		self.xof.update(right_encode(output_bits).as_slice());

		let mut digest = vec![0u8; self.output_len];
		self.xof.finalize_into_reset(&mut digest);
		tracing::trace!(xof = X::NAME, output_len = self.output_len, "tuple hash finalize");
		self.digest = Some(digest);
		Ok(self)
	}

	pub fn try_digest(&self) -> Result<&[u8], HashError> {
		match &self.digest {
			Some(digest) => Ok(digest),
			None => Err(HashError::NotFinalized),
		}
	}

	/// Returns the digest.
	///
	/// # Panics
	/// Panics if the hasher is not finalized.
	pub fn digest_bytes(&self) -> &[u8] {
		match self.try_digest() {
			Ok(digest) => digest,
			Err(err) => panic!("TupleHash over {}: {err}", X::NAME),
		}
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
}

impl<X: CustomizableXof> fmt::Debug for TupleHash<X> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TupleHash")
			.field("xof", &X::NAME)
			.field("output_len", &self.output_len)
			.field("finalized", &self.is_finalized())
			.finish()
	}
}

/// TupleHash128: TupleHash over cSHAKE128.
pub type TupleHash128 = TupleHash<CShake128>;
/// TupleHash256: TupleHash over cSHAKE256.
pub type TupleHash256 = TupleHash<CShake256>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;
	use proptest::prelude::*;
	use tiny_keccak::Hasher;

	use super::*;

	#[test]
	fn test_left_encode() {
		assert_eq!(left_encode(0).as_slice(), [1, 0]);
		assert_eq!(left_encode(255).as_slice(), [1, 255]);
		assert_eq!(left_encode(256).as_slice(), [2, 1, 0]);
		assert_eq!(left_encode(u64::MAX).as_slice(), [8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
	}

	#[test]
	fn test_right_encode() {
		assert_eq!(right_encode(0).as_slice(), [0, 1]);
		assert_eq!(right_encode(256).as_slice(), [1, 0, 2]);
		assert_eq!(right_encode(1 << 56).as_slice(), [1, 0, 0, 0, 0, 0, 0, 0, 8]);
	}

	#[test]
	fn test_nist_sample_1() {
		let mut hasher = TupleHash128::new(32, b"");
		hasher
			.next_data(hex!("000102"))
			.next_data(hex!("101112131415"))
			.finalize();
		assert_eq!(
			hasher.digest_bytes(),
			hex!("c5d8786c1afb9b82111ab34b65b2c0048fa64e6d48e263264ce1707d3ffc8ed1")
		);
	}

	#[test]
	fn test_element_boundaries_matter() {
		let ab_c = TupleHash128::hash(32, b"", [b"ab".as_slice(), b"c"]);
		let a_bc = TupleHash128::hash(32, b"", [b"a".as_slice(), b"bc"]);
		let abc = TupleHash128::hash(32, b"", [b"abc".as_slice()]);
		assert_ne!(ab_c, a_bc);
		assert_ne!(ab_c, abc);
		assert_ne!(a_bc, abc);
	}

	#[test]
	fn test_empty_elements_are_counted() {
		let none = TupleHash256::hash(64, b"", Vec::<&[u8]>::new());
		let one_empty = TupleHash256::hash(64, b"", [b"".as_slice()]);
		let two_empty = TupleHash256::hash(64, b"", [b"".as_slice(), b""]);
		assert_ne!(none, one_empty);
		assert_ne!(one_empty, two_empty);
	}

	#[test]
	fn test_output_length_is_bound() {
		let short = TupleHash128::hash(32, b"", [b"abc".as_slice()]);
		let long = TupleHash128::hash(64, b"", [b"abc".as_slice()]);
		assert_eq!(long.len(), 64);
		assert_ne!(short[..], long[..32]);
	}

	#[test]
	fn test_customization_separates() {
		let plain = TupleHash128::hash(32, b"", [b"abc".as_slice()]);
		let custom = TupleHash128::hash(32, b"My Tuple App", [b"abc".as_slice()]);
		assert_ne!(plain, custom);
	}

	#[test]
	fn test_lifecycle() {
		let mut hasher = TupleHash256::new(32, b"app");
		assert_eq!(hasher.try_digest().unwrap_err(), HashError::NotFinalized);

		hasher.next_data(b"x").finalize();
		let first = hasher.to_hex_string();
		assert_eq!(first.len(), 64);
		assert_eq!(hasher.try_next_data(b"y").unwrap_err(), HashError::AlreadyFinalized);
		assert_eq!(hasher.try_finalize().unwrap_err(), HashError::AlreadyFinalized);

		hasher.reset();
		assert!(!hasher.is_finalized());
		hasher.next_data(b"x").finalize();
		assert_eq!(hasher.to_hex_string(), first);
	}

	#[test]
	#[should_panic(expected = "already been finalized")]
	fn test_next_data_after_finalize_panics() {
		let mut hasher = TupleHash128::new(16, b"");
		hasher.finalize();
		hasher.next_data(b"late");
	}

	#[test]
	fn test_zero_output_len_is_rejected() {
		assert_eq!(
			TupleHash128::try_new(0, b"").unwrap_err(),
			HashError::InvalidOutputLength { len: 0 }
		);
	}

	fn reference_128(customization: &[u8], elements: &[Vec<u8>], output_len: usize) -> Vec<u8> {
		let mut reference = tiny_keccak::TupleHash::v128(customization);
		for element in elements {
			reference.update(element);
		}
		let mut out = vec![0u8; output_len];
		reference.finalize(&mut out);
		out
	}

	fn reference_256(customization: &[u8], elements: &[Vec<u8>], output_len: usize) -> Vec<u8> {
		let mut reference = tiny_keccak::TupleHash::v256(customization);
		for element in elements {
			reference.update(element);
		}
		let mut out = vec![0u8; output_len];
		reference.finalize(&mut out);
		out
	}

	proptest! {
		#[test]
		fn test_tuple_hash128_vs_reference(
			customization in prop::collection::vec(any::<u8>(), 0..=32),
			elements in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=300), 0..=6),
			output_len in 1usize..=200,
		) {
			assert_eq!(
				TupleHash128::hash(output_len, &customization, &elements),
				reference_128(&customization, &elements, output_len)
			);
		}

		#[test]
		fn test_tuple_hash256_vs_reference(
			customization in prop::collection::vec(any::<u8>(), 0..=32),
			elements in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=300), 0..=6),
			output_len in 1usize..=200,
		) {
			assert_eq!(
				TupleHash256::hash(output_len, &customization, &elements),
				reference_256(&customization, &elements, output_len)
			);
		}
	}
}
