// Copyright 2025 Hashkit Team

//! Extendable-output primitives consumed by the tuple layer.
//!
//! The tuple construction only needs the narrow [`CustomizableXof`] interface; the sponge itself
//! comes from `tiny-keccak`.

use std::{fmt, mem};

use tiny_keccak::Hasher as _;

/// An extendable-output function with NIST SP 800-185 style domain separation.
pub trait CustomizableXof: Clone {
	const NAME: &'static str;

	/// Creates an instance bound to `function_name` (N) and `customization` (S).
	fn new(function_name: &[u8], customization: &[u8]) -> Self;

	/// Returns to the state right after [`CustomizableXof::new`], keeping N and S.
	fn reset(&mut self);

	/// Absorbs `data`.
	fn update(&mut self, data: &[u8]);

	/// Squeezes `out.len()` bytes of output and resets the instance.
	fn finalize_into_reset(&mut self, out: &mut [u8]);
}

macro_rules! impl_cshake {
	($name:ident, $ctor:ident, $display:literal) => {
		#[doc = concat!($display, " over the Keccak-f\\[1600\\] sponge.")]
		#[derive(Clone)]
		pub struct $name {
			initial: tiny_keccak::CShake,
			state: tiny_keccak::CShake,
		}

		impl CustomizableXof for $name {
			const NAME: &'static str = $display;

			fn new(function_name: &[u8], customization: &[u8]) -> Self {
				let initial = tiny_keccak::CShake::$ctor(function_name, customization);
				Self {
					state: initial.clone(),
					initial,
				}
			}

			fn reset(&mut self) {
				self.state = self.initial.clone();
			}

			fn update(&mut self, data: &[u8]) {
				self.state.update(data);
			}

			fn finalize_into_reset(&mut self, out: &mut [u8]) {
				mem::replace(&mut self.state, self.initial.clone()).finalize(out);
			}
		}

		impl fmt::Debug for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(concat!($display, " { ... }"))
			}
		}
	};
}

impl_cshake!(CShake128, v128, "cSHAKE128");
impl_cshake!(CShake256, v256, "cSHAKE256");
