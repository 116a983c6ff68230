// Copyright 2025 Hashkit Team

//! SHA2-256 and SHA2-224 ([FIPS 180-4], section 6.2).
//!
//! [FIPS 180-4]: <https://doi.org/10.6028/NIST.FIPS.180-4>

use digest::typenum::{U28, U32};

use crate::{
	bits::load_block_be,
	engine::{BlockAlgorithm, BlockHasher},
};

const BLOCK_BYTES: usize = 64;
const ROUNDS: usize = 64;

#[rustfmt::skip]
const K: [u32; ROUNDS] = [
	0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
	0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
	0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
	0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
	0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
	0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
	0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
	0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
	(x & (y ^ z)) ^ z
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
	(x & (y | z)) | (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
	x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
	x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
	x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
	x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// The SHA2-256 compression function, shared by SHA2-224.
///
/// # Panics
/// Panics if `block` is not exactly 64 bytes long.
pub fn compress256(state: &mut [u32; 8], block: &[u8]) {
	assert_eq!(block.len(), BLOCK_BYTES, "compression input must be one block");
	let message: [u32; 16] = load_block_be(block);

	let mut w = [0u32; ROUNDS];
	w[..16].copy_from_slice(&message);
	for t in 16..ROUNDS {
		w[t] = small_sigma1(w[t - 2])
			.wrapping_add(w[t - 7])
			.wrapping_add(small_sigma0(w[t - 15]))
			.wrapping_add(w[t - 16]);
	}

	let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
	for t in 0..ROUNDS {
		let t1 = h
			.wrapping_add(big_sigma1(e))
			.wrapping_add(ch(e, f, g))
			.wrapping_add(K[t])
			.wrapping_add(w[t]);
		let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
		h = g;
		g = f;
		f = e;
		e = d.wrapping_add(t1);
		d = c;
		c = b;
		b = a;
		a = t1.wrapping_add(t2);
	}

	for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
		*s = s.wrapping_add(v);
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Algorithm;

impl BlockAlgorithm for Sha256Algorithm {
	const NAME: &'static str = "SHA2-256";

	type Word = u32;
	type Counter = u64;
	type OutputSize = U32;

	const INITIAL_STATE: [u32; 8] = [
		0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
		0x5be0cd19,
	];

	fn compress(state: &mut [u32; 8], block: &[u8]) {
		compress256(state, block);
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha224Algorithm;

impl BlockAlgorithm for Sha224Algorithm {
	const NAME: &'static str = "SHA2-224";

	type Word = u32;
	type Counter = u64;
	type OutputSize = U28;

	const INITIAL_STATE: [u32; 8] = [
		0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7,
		0xbefa4fa4,
	];

	fn compress(state: &mut [u32; 8], block: &[u8]) {
		compress256(state, block);
	}
}

/// SHA2-256 hasher state.
pub type Sha256 = BlockHasher<Sha256Algorithm>;
/// SHA2-224 hasher state.
pub type Sha224 = BlockHasher<Sha224Algorithm>;
