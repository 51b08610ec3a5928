/// Log target for the pallet.
pub const LOG_TARGET: &str = "runtime::confidential-tally";

/// Number of tally options used by the default genesis configuration.
pub const DEFAULT_OPTION_COUNT: u32 = 3;
