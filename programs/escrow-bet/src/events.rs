use anchor_lang::prelude::*;

use crate::state::MarketKind;

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub market_id: u64,
    pub operator: Pubkey,
    pub funding_source: Pubkey,
    pub token_mint: Pubkey,
    pub fixed_stake: u64,
    pub kind: MarketKind,
}

#[event]
pub struct DepositAccepted {
    pub market: Pubkey,
    pub participant: Pubkey,
    pub outcome: u8,
    pub amount: u64,
    pub outcome_total: u64,
}

#[event]
pub struct WindowChanged {
    pub market: Pubkey,
    pub open: bool,
}

// --- SETTLEMENT ---
#[event]
pub struct WinnerPaid {
    pub market: Pubkey,
    pub participant: Pubkey,
    pub payout: u64,
}

#[event]
pub struct MarketSettled {
    pub market: Pubkey,
    pub winning_outcome: u8,
    pub winner_count: u32,
    pub losing_pool: u64,
    pub total_paid_out: u64,
    pub funding_drawn: u64,
    pub residual: u64,
}
