// Copyright 2024-2025 Hashkit Team

pub mod env;
pub mod error_utils;
pub mod tracing;
