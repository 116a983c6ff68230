// Copyright 2024-2025 Hashkit Team

const TRUTHY_VALUES: [&str; 4] = ["1", "on", "true", "yes"];

/// Read boolean flag from the environment variable.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => parse_flag(&val),
		Err(_) => false,
	}
}

fn parse_flag(val: &str) -> bool {
	TRUTHY_VALUES
		.iter()
		.any(|truthy| truthy.eq_ignore_ascii_case(val.trim()))
}
