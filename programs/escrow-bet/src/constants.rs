pub const SEED_MARKET: &[u8] = b"market";
pub const SEED_VAULT: &[u8] = b"vault";
pub const SEED_POSITION: &[u8] = b"position";

/// Binary markets only: outcomes are `0` and `1`.
pub const OUTCOME_COUNT: usize = 2;

/// Upper bound on pooled participants.
///
/// Settlement pays every winner in one transaction, two accounts per winner,
/// so the pool is capped to stay inside the 64-account lock limit: 28 winners
/// plus the fixed `settle` accounts come to at most 62 keys.
///
/// A legacy transaction only carries about 35 keys, i.e. 14 winners. Markets
/// that may settle with more winners must submit `settle` as a versioned
/// transaction with an address lookup table.
pub const MAX_POOLED_PARTICIPANTS: u32 = 28;

/// Head-to-head markets hold at most one position per outcome.
pub const HEAD_TO_HEAD_PER_OUTCOME: u32 = 1;
