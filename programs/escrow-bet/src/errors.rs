use anchor_lang::prelude::*;

/// Custom error codes for the escrow program.
///
/// Error codes are offset from 6000 (Anchor convention).
#[error_code]
pub enum EscrowError {
    /// Signer is not the market operator.
    #[msg("Unauthorized: not the market operator")]
    NotAuthorized,

    /// Deposit attempted while the admission window is closed.
    #[msg("Window is closed")]
    WindowClosed,

    /// Market has already been settled; it is frozen.
    #[msg("Market already settled")]
    AlreadySettled,

    /// Participant already holds a position in this market.
    #[msg("You have already voted")]
    DuplicateVote,

    /// Outcome must be 0 or 1.
    #[msg("Invalid outcome")]
    InvalidOutcome,

    /// Token balance below the amount the transfer needs.
    #[msg("Insufficient token balance")]
    InsufficientFunds,

    /// Delegated allowance to the market is missing or too small.
    #[msg("Insufficient allowance for the market")]
    InsufficientAllowance,

    /// Settlement needs a top-up but no funding account was supplied.
    #[msg("Funding account required to cover the payout shortfall")]
    FundingAccountMissing,

    /// Nobody holds the winning outcome and the market rejects that case.
    #[msg("No positions on the winning outcome")]
    NoWinners,

    #[msg("Fixed stake must be > 0")]
    InvalidStake,

    /// Head-to-head market already has a participant on this outcome.
    #[msg("Outcome already taken in head-to-head market")]
    OutcomeTaken,

    /// Pooled market reached its participant cap.
    #[msg("Market is full")]
    MarketFull,

    /// Winner accounts passed to settle do not match the recorded winner count.
    #[msg("Winner accounts do not match recorded winners")]
    WinnerAccountsMismatch,

    /// A supplied position is not a winning position of this market.
    #[msg("Position does not belong to the winning side of this market")]
    PositionMismatch,

    #[msg("Winner position supplied more than once")]
    DuplicateWinner,

    /// Payout token account is not the participant's account for this mint.
    #[msg("Payout account does not match participant or mint")]
    PayoutAccountMismatch,

    #[msg("Arithmetic overflow")]
    Overflow,
}
