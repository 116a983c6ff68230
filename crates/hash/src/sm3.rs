// Copyright 2025 Hashkit Team

//! SM3 cryptographic hash ([GB/T 32905-2016], [draft-sca-cfrg-sm3]).
//!
//! SM3 shares the Merkle–Damgård shape of SHA2-256 (64-byte blocks, 64-bit length field) but
//! expands the message into 68 words, runs two 16/48 round phases with different boolean
//! functions and feeds the working registers back into the chaining state with XOR.
//!
//! [GB/T 32905-2016]: <https://www.oscca.gov.cn/sca/xxgk/2010-12/17/content_1002389.shtml>
//! [draft-sca-cfrg-sm3]: <https://datatracker.ietf.org/doc/html/draft-sca-cfrg-sm3-02>

use digest::typenum::U32;

use crate::{
	bits::load_block_be,
	engine::{BlockAlgorithm, BlockHasher},
};

const BLOCK_BYTES: usize = 64;
const ROUNDS: usize = 64;
const EXPANDED_WORDS: usize = ROUNDS + 4;
/// Rounds using the XOR boolean functions.
const FIRST_PHASE_ROUNDS: usize = 16;

const T_FIRST_PHASE: u32 = 0x79cc4519;
const T_SECOND_PHASE: u32 = 0x7a879d8a;

#[inline(always)]
fn p0(x: u32) -> u32 {
	x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
	x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(j: usize, x: u32, y: u32, z: u32) -> u32 {
	if j < FIRST_PHASE_ROUNDS {
		x ^ y ^ z
	} else {
		(x & y) | (x & z) | (y & z)
	}
}

#[inline(always)]
fn gg(j: usize, x: u32, y: u32, z: u32) -> u32 {
	if j < FIRST_PHASE_ROUNDS {
		x ^ y ^ z
	} else {
		(x & y) | (!x & z)
	}
}

/// Round constant `T_j <<< (j mod 32)`.
#[inline(always)]
fn round_constant(j: usize) -> u32 {
	let t = if j < FIRST_PHASE_ROUNDS {
		T_FIRST_PHASE
	} else {
		T_SECOND_PHASE
	};
	// Rotation by zero (j = 0, 32) is the identity.
	t.rotate_left((j % 32) as u32)
}

fn expand(block: &[u8]) -> [u32; EXPANDED_WORDS] {
	let message: [u32; 16] = load_block_be(block);

	let mut w = [0u32; EXPANDED_WORDS];
	w[..16].copy_from_slice(&message);
	for j in 16..EXPANDED_WORDS {
		w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
			^ w[j - 13].rotate_left(7)
			^ w[j - 6];
	}
	w
}

/// The SM3 compression function `CF`.
///
/// # Panics
/// Panics if `block` is not exactly 64 bytes long.
pub fn compress_sm3(state: &mut [u32; 8], block: &[u8]) {
	assert_eq!(block.len(), BLOCK_BYTES, "compression input must be one block");
	let w = expand(block);

	let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
	for j in 0..ROUNDS {
		let a12 = a.rotate_left(12);
		let ss1 = a12
			.wrapping_add(e)
			.wrapping_add(round_constant(j))
			.rotate_left(7);
		let ss2 = ss1 ^ a12;
		let tt1 = ff(j, a, b, c)
			.wrapping_add(d)
			.wrapping_add(ss2)
			.wrapping_add(w[j] ^ w[j + 4]);
		let tt2 = gg(j, e, f, g)
			.wrapping_add(h)
			.wrapping_add(ss1)
			.wrapping_add(w[j]);

		d = c;
		c = b.rotate_left(9);
		b = a;
		a = tt1;
		h = g;
		g = f.rotate_left(19);
		f = e;
		e = p0(tt2);
	}

	for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
		*s ^= v;
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sm3Algorithm;

impl BlockAlgorithm for Sm3Algorithm {
	const NAME: &'static str = "SM3";

	type Word = u32;
	type Counter = u64;
	type OutputSize = U32;

	const INITIAL_STATE: [u32; 8] = [
		0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d,
		0xb0fb0e4e,
	];

	fn compress(state: &mut [u32; 8], block: &[u8]) {
		compress_sm3(state, block);
	}
}

/// SM3 hasher state.
pub type Sm3 = BlockHasher<Sm3Algorithm>;
