// Copyright 2025 Hashkit Team

//! Wide-block SHA2 family: SHA2-512/224 and SHA2-512/256 ([FIPS 180-4], sections 5.3.6 and 6.4).
//!
//! Both variants run the SHA2-512 compression function over 128-byte blocks with a 128-bit
//! length field, start from their own initial state and keep the leftmost bytes of the final
//! state.
//!
//! [FIPS 180-4]: <https://doi.org/10.6028/NIST.FIPS.180-4>

use digest::typenum::{U28, U32};

use crate::{
	bits::load_block_be,
	engine::{BlockAlgorithm, BlockHasher},
};

const BLOCK_BYTES: usize = 128;
const ROUNDS: usize = 80;

#[rustfmt::skip]
const K: [u64; ROUNDS] = [
	0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
	0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
	0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
	0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
	0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
	0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
	0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
	0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
	0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
	0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
	0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
	0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
	0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
	0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
	0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
	0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
	0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
	0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
	0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
	0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

/// Working registers `a..h`, indexed so that round `t` reads register `i` at `(i + 8 - t % 8) % 8`.
///
/// Instead of shifting eight values every round, each round writes two slots and the names
/// rotate over the array.
struct Registers([u64; 8]);

impl Registers {
	#[inline(always)]
	fn slot(t: usize, reg: usize) -> usize {
		(reg + 8 - t % 8) % 8
	}

	#[inline(always)]
	fn get(&self, t: usize, reg: usize) -> u64 {
		self.0[Self::slot(t, reg)]
	}

	#[inline(always)]
	fn set(&mut self, t: usize, reg: usize, value: u64) {
		self.0[Self::slot(t, reg)] = value;
	}
}

#[inline(always)]
fn ch(x: u64, y: u64, z: u64) -> u64 {
	(x & (y ^ z)) ^ z
}

#[inline(always)]
fn maj(x: u64, y: u64, z: u64) -> u64 {
	(x & (y | z)) | (y & z)
}

#[inline(always)]
fn big_sigma0(x: u64) -> u64 {
	x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

#[inline(always)]
fn big_sigma1(x: u64) -> u64 {
	x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

#[inline(always)]
fn small_sigma0(x: u64) -> u64 {
	x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline(always)]
fn small_sigma1(x: u64) -> u64 {
	x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

/// The SHA2-512 compression function.
///
/// # Panics
/// Panics if `block` is not exactly 128 bytes long.
pub fn compress512(state: &mut [u64; 8], block: &[u8]) {
	assert_eq!(block.len(), BLOCK_BYTES, "compression input must be one block");
	let message: [u64; 16] = load_block_be(block);

	let mut w = [0u64; ROUNDS];
	w[..16].copy_from_slice(&message);
	for t in 16..ROUNDS {
		w[t] = small_sigma1(w[t - 2])
			.wrapping_add(w[t - 7])
			.wrapping_add(small_sigma0(w[t - 15]))
			.wrapping_add(w[t - 16]);
	}

	const A: usize = 0;
	const B: usize = 1;
	const C: usize = 2;
	const D: usize = 3;
	const E: usize = 4;
	const F: usize = 5;
	const G: usize = 6;
	const H: usize = 7;

	let mut regs = Registers(*state);
	for t in 0..ROUNDS {
		let (a, b, c) = (regs.get(t, A), regs.get(t, B), regs.get(t, C));
		let (e, f, g) = (regs.get(t, E), regs.get(t, F), regs.get(t, G));
		let t1 = regs
			.get(t, H)
			.wrapping_add(big_sigma1(e))
			.wrapping_add(ch(e, f, g))
			.wrapping_add(K[t])
			.wrapping_add(w[t]);
		let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

		// `h` becomes the next round's `a` and `d` its `e`; everything else only changes name.
		regs.set(t, D, regs.get(t, D).wrapping_add(t1));
		regs.set(t, H, t1.wrapping_add(t2));
	}

	// ROUNDS is a multiple of 8, so the names are back in their starting slots.
	debug_assert_eq!(ROUNDS % 8, 0);
	for (s, v) in state.iter_mut().zip(regs.0) {
		*s = s.wrapping_add(v);
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512_224Algorithm;

impl BlockAlgorithm for Sha512_224Algorithm {
	const NAME: &'static str = "SHA2-512/224";

	type Word = u64;
	type Counter = u128;
	type OutputSize = U28;

	const INITIAL_STATE: [u64; 8] = [
		0x8c3d37c819544da2,
		0x73e1996689dcd4d6,
		0x1dfab7ae32ff9c82,
		0x679dd514582f9fcf,
		0x0f6d2b697bd44da8,
		0x77e36f7304c48942,
		0x3f9d85a86a1d36c8,
		0x1112e6ad91d692a1,
	];

	fn compress(state: &mut [u64; 8], block: &[u8]) {
		compress512(state, block);
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512_256Algorithm;

impl BlockAlgorithm for Sha512_256Algorithm {
	const NAME: &'static str = "SHA2-512/256";

	type Word = u64;
	type Counter = u128;
	type OutputSize = U32;

	const INITIAL_STATE: [u64; 8] = [
		0x22312194fc2bf72c,
		0x9f555fa3c84c64c2,
		0x2393b86b6f53b151,
		0x963877195940eabd,
		0x96283ee2a88effe3,
		0xbe5e1e2553863992,
		0x2b0199fc2c85b8aa,
		0x0eb72ddc81c52ca2,
	];

	fn compress(state: &mut [u64; 8], block: &[u8]) {
		compress512(state, block);
	}
}

/// SHA2-512/224 hasher state.
pub type Sha512_224 = BlockHasher<Sha512_224Algorithm>;
/// SHA2-512/256 hasher state.
pub type Sha512_256 = BlockHasher<Sha512_256Algorithm>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;
	use proptest::prelude::*;

	use super::*;

	const TWO_BLOCK_MESSAGE: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";

	#[test]
	fn test_empty() {
		assert_eq!(
			Sha512_224::hash(b"")[..],
			hex!("6ed0dd02806fa89e25de060c19d3ac86cabb87d6a0ddd05c333b84f4")
		);
		assert_eq!(
			Sha512_256::hash(b"")[..],
			hex!("c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a")
		);
	}

	#[test]
	fn test_single_block() {
		assert_eq!(
			Sha512_224::hash(b"abc")[..],
			hex!("4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa")
		);
		assert_eq!(
			Sha512_256::hash(b"abc")[..],
			hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23")
		);
	}

	#[test]
	fn test_two_blocks() {
		assert_eq!(TWO_BLOCK_MESSAGE.len(), 112);
		assert_eq!(
			Sha512_224::hash(TWO_BLOCK_MESSAGE)[..],
			hex!("23fec5bb94d60b23308192640b0c453335d664734fe40e7268674af9")
		);
		assert_eq!(
			Sha512_256::hash(TWO_BLOCK_MESSAGE)[..],
			hex!("3928e184fb8690f840da3988121d31be65cb9d3ef83ee6146feac861e19b563a")
		);
	}

	#[test]
	fn test_truncation_takes_high_bytes_of_fourth_word() {
		let mut block = [0u8; 128];
		block[..3].copy_from_slice(b"abc");
		block[3] = 0x80;
		block[127] = 24;
		let mut state = Sha512_224Algorithm::INITIAL_STATE;
		compress512(&mut state, &block);

		let digest = Sha512_224::hash(b"abc");
		assert_eq!(digest[..8], state[0].to_be_bytes());
		assert_eq!(digest[24..], state[3].to_be_bytes()[..4]);
	}

	#[test]
	fn test_register_slots_rotate() {
		// Round 1 reads `a` from the slot round 0 wrote as `h`.
		assert_eq!(Registers::slot(0, 7), Registers::slot(1, 0));
		// Round 1 reads `e` from the slot round 0 wrote as `d`.
		assert_eq!(Registers::slot(0, 3), Registers::slot(1, 4));
		assert_eq!(Registers::slot(8, 5), Registers::slot(0, 5));
	}

	#[test]
	#[should_panic(expected = "compression input must be one block")]
	fn test_compress_rejects_64_byte_block() {
		let mut state = Sha512_256Algorithm::INITIAL_STATE;
		compress512(&mut state, &[0u8; 64]);
	}

	proptest! {
		#[test]
		fn test_sha512_224_vs_reference(input in prop::collection::vec(any::<u8>(), 0..=1024)) {
			assert_eq!(
				Sha512_224::hash(&input)[..],
				<sha2::Sha512_224 as sha2::Digest>::digest(&input)[..]
			);
		}

		#[test]
		fn test_sha512_256_vs_reference(input in prop::collection::vec(any::<u8>(), 0..=1024)) {
			assert_eq!(
				Sha512_256::hash(&input)[..],
				<sha2::Sha512_256 as sha2::Digest>::digest(&input)[..]
			);
		}
	}
}
