// Copyright 2024-2025 Hashkit Team

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
	#[error("the hasher has already been finalized; call reset() before reusing it")]
	AlreadyFinalized,
	#[error("the digest is only available after finalize()")]
	NotFinalized,
	#[error("message length does not fit the {field_bits}-bit length field")]
	MessageTooLong { field_bits: usize },
	#[error("invalid output length: {len} bytes")]
	InvalidOutputLength { len: usize },
}
