// Copyright 2023-2025 Hashkit Team

//! Incremental Merkle–Damgård hashes (SHA2-224/256, SHA2-512/224, SHA2-512/256, SM3) on one
//! generic streaming engine, plus TupleHash over cSHAKE.

pub mod bits;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod serialization;
pub mod sha2_256;
pub mod sha2_512;
pub mod sm3;
pub mod tuple;
pub mod xof;

pub use digest;
pub use engine::{BlockAlgorithm, BlockHasher, DigestBytes, LengthCounter};
pub use error::HashError;
pub use hasher::*;
pub use sha2_256::{Sha224, Sha256};
pub use sha2_512::{Sha512_224, Sha512_256};
pub use self::sm3::Sm3;
pub use tuple::{left_encode, right_encode, TupleHash, TupleHash128, TupleHash256};
pub use xof::{CShake128, CShake256, CustomizableXof};
