use anchor_lang::prelude::*;

use crate::constants::{HEAD_TO_HEAD_PER_OUTCOME, MAX_POOLED_PARTICIPANTS, OUTCOME_COUNT};
use crate::errors::EscrowError;

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", operator.key, market_id.to_le_bytes()]
///
/// One fixed-stake escrow. The record is kept after settlement as a frozen
/// audit trail.
#[account]
#[derive(Default)]
pub struct Market {
    /// Operator-chosen identifier, part of the PDA seeds.
    pub market_id: u64,

    /// Sole signer allowed to toggle the window and settle.
    pub operator: Pubkey,

    /// Owner of the token account that backs payout shortfalls.
    pub funding_source: Pubkey,

    /// Mint of the custodied token.
    pub token_mint: Pubkey,

    /// Vault PDA token account (authority = this market).
    pub vault: Pubkey,

    /// Mandatory per-participant deposit.
    pub fixed_stake: u64,

    pub kind: MarketKind,

    pub no_winner_policy: NoWinnerPolicy,

    /// Admission window. Deposits require `true`.
    pub window_open: bool,

    /// Terminal flag.
    pub settled: bool,

    /// Declared winner, set at settlement.
    pub winning_outcome: Option<u8>,

    // ─── Registry aggregates ───
    /// Stake held per outcome.
    pub outcome_totals: [u64; 2],

    /// Positions per outcome.
    pub outcome_counts: [u32; 2],

    // ─── Settlement audit ───
    /// Tokens paid to winners.
    pub total_paid_out: u64,

    /// Tokens pulled from the funding source.
    pub funding_drawn: u64,

    /// Losing-pool remainder left in custody.
    pub residual: u64,

    /// Market PDA bump seed.
    pub bump: u8,

    /// Vault bump seed.
    pub vault_bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Market {
    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8  // discriminator
        + 8                     // market_id
        + 32                    // operator
        + 32                    // funding_source
        + 32                    // token_mint
        + 32                    // vault
        + 8                     // fixed_stake
        + 1                     // kind
        + 1                     // no_winner_policy
        + 1                     // window_open
        + 1                     // settled
        + (1 + 1)               // winning_outcome (Option<u8>)
        + 8 * OUTCOME_COUNT     // outcome_totals
        + 4 * OUTCOME_COUNT     // outcome_counts
        + 8                     // total_paid_out
        + 8                     // funding_drawn
        + 8                     // residual
        + 1                     // bump
        + 1                     // vault_bump
        + 32;                   // reserved

    pub fn is_operator(&self, key: &Pubkey) -> bool {
        self.operator == *key
    }

    pub fn participant_count(&self) -> u32 {
        self.outcome_counts.iter().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    /// Sum of all recorded stakes.
    pub fn total_staked(&self) -> u64 {
        self.outcome_totals
            .iter()
            .fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Open or close admission. Frozen once settled.
    pub fn set_window(&mut self, open: bool) -> Result<()> {
        require!(!self.settled, EscrowError::AlreadySettled);
        self.window_open = open;
        Ok(())
    }

    /// Validate a deposit request against the market and the participant's
    /// (possibly empty) position. Returns the outcome index on success.
    ///
    /// Ledger checks (allowance, balance) are done separately by the caller,
    /// after this passes.
    pub fn check_admission(&self, position: &Position, outcome: u8) -> Result<usize> {
        require!(!self.settled, EscrowError::AlreadySettled);
        require!(self.window_open, EscrowError::WindowClosed);
        let idx = outcome_index(outcome)?;
        require!(!position.has_deposited, EscrowError::DuplicateVote);

        match self.kind {
            MarketKind::HeadToHead => require!(
                self.outcome_counts[idx] < HEAD_TO_HEAD_PER_OUTCOME,
                EscrowError::OutcomeTaken
            ),
            MarketKind::Pooled => require!(
                self.participant_count() < MAX_POOLED_PARTICIPANTS,
                EscrowError::MarketFull
            ),
        }

        Ok(idx)
    }

    /// Compute the aggregates after one more `fixed_stake` on `idx`.
    ///
    /// Nothing is written; run before the stake transfer and apply with
    /// `commit_deposit` once it went through.
    pub fn prepare_deposit(&self, idx: usize) -> Result<DepositBooking> {
        let outcome_total = self.outcome_totals[idx]
            .checked_add(self.fixed_stake)
            .ok_or(EscrowError::Overflow)?;
        let outcome_count = self.outcome_counts[idx]
            .checked_add(1)
            .ok_or(EscrowError::Overflow)?;
        Ok(DepositBooking {
            idx,
            outcome_total,
            outcome_count,
        })
    }

    pub fn commit_deposit(&mut self, booking: DepositBooking) {
        self.outcome_totals[booking.idx] = booking.outcome_total;
        self.outcome_counts[booking.idx] = booking.outcome_count;
    }

    /// Compute the payouts for declaring `winning_outcome`, given the vault's
    /// current balance.
    ///
    /// Each winner receives `stake + losing_pool / winner_count`. Whatever the
    /// vault cannot cover is reported as `shortfall`, to be pulled from the
    /// funding source before any payout.
    pub fn settlement_plan(&self, winning_outcome: u8, custody_balance: u64) -> Result<SettlementPlan> {
        require!(!self.settled, EscrowError::AlreadySettled);
        let w = outcome_index(winning_outcome)?;
        let losing_pool = self.outcome_totals[1 - w];
        let winner_count = self.outcome_counts[w];

        if winner_count == 0 {
            require!(
                self.no_winner_policy == NoWinnerPolicy::Retain,
                EscrowError::NoWinners
            );
            return Ok(SettlementPlan {
                winning_outcome,
                winner_count: 0,
                losing_pool,
                share_per_winner: 0,
                total_payout: 0,
                shortfall: 0,
                residual: losing_pool,
            });
        }

        let share_per_winner = losing_pool / winner_count as u64;
        let distributed = share_per_winner
            .checked_mul(winner_count as u64)
            .ok_or(EscrowError::Overflow)?;
        let total_payout = self.outcome_totals[w]
            .checked_add(distributed)
            .ok_or(EscrowError::Overflow)?;

        Ok(SettlementPlan {
            winning_outcome,
            winner_count,
            losing_pool,
            share_per_winner,
            total_payout,
            shortfall: total_payout.saturating_sub(custody_balance),
            residual: losing_pool - distributed,
        })
    }

    /// Commit the terminal state once every payout of `plan` went through.
    pub fn finalize_settlement(&mut self, plan: &SettlementPlan) {
        self.settled = true;
        self.window_open = false;
        self.winning_outcome = Some(plan.winning_outcome);
        self.total_paid_out = plan.total_payout;
        self.funding_drawn = plan.shortfall;
        self.residual = plan.residual;
    }
}

/// Registry aggregates for one admitted deposit, computed ahead of the transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositBooking {
    pub idx: usize,
    pub outcome_total: u64,
    pub outcome_count: u32,
}

/// Map a wire outcome to an index into the per-outcome arrays.
pub fn outcome_index(outcome: u8) -> Result<usize> {
    let idx = outcome as usize;
    require!(idx < OUTCOME_COUNT, EscrowError::InvalidOutcome);
    Ok(idx)
}

/// ─── Settlement Plan ──────────────────────────────────────────────
///
/// Pure result of the settlement computation; the instruction executes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPlan {
    pub winning_outcome: u8,
    pub winner_count: u32,
    pub losing_pool: u64,
    pub share_per_winner: u64,
    /// Winner stakes plus the distributed part of the losing pool.
    pub total_payout: u64,
    /// Amount to pull from the funding source before paying out.
    pub shortfall: u64,
    pub residual: u64,
}

impl SettlementPlan {
    pub fn payout_for(&self, stake: u64) -> Result<u64> {
        Ok(stake
            .checked_add(self.share_per_winner)
            .ok_or(EscrowError::Overflow)?)
    }

    /// Validate the winner pairs supplied to `settle` and price each one.
    ///
    /// Every recorded winner must appear exactly once, each position must be a
    /// winning position of `market` owned by this program, and each payout
    /// account must be a token account of `token_mint` owned by the
    /// participant. Payouts come back in the order of `claims`.
    pub fn winner_payouts(
        &self,
        market: &Pubkey,
        token_mint: &Pubkey,
        claims: &[WinnerClaim],
    ) -> Result<Vec<WinnerPayout>> {
        require!(
            claims.len() == self.winner_count as usize,
            EscrowError::WinnerAccountsMismatch
        );

        let mut payouts: Vec<WinnerPayout> = Vec::with_capacity(claims.len());
        let mut planned_total: u64 = 0;

        for claim in claims {
            let position = &claim.position;
            require_keys_eq!(claim.position_program, crate::ID, EscrowError::PositionMismatch);
            require!(
                position.is_winner(market, self.winning_outcome),
                EscrowError::PositionMismatch
            );
            require!(
                !payouts.iter().any(|p| p.participant == position.participant),
                EscrowError::DuplicateWinner
            );

            require_keys_eq!(
                claim.payout_program,
                anchor_spl::token::ID,
                EscrowError::PayoutAccountMismatch
            );
            require!(
                claim.payout_owner == position.participant && claim.payout_mint == *token_mint,
                EscrowError::PayoutAccountMismatch
            );

            let amount = self.payout_for(position.amount)?;
            planned_total = planned_total
                .checked_add(amount)
                .ok_or(EscrowError::Overflow)?;
            payouts.push(WinnerPayout {
                participant: position.participant,
                amount,
            });
        }

        require!(
            planned_total == self.total_payout,
            EscrowError::WinnerAccountsMismatch
        );

        Ok(payouts)
    }
}

/// One `[position, payout token account]` pair as supplied to `settle`.
#[derive(Clone)]
pub struct WinnerClaim {
    /// Program owning the position account.
    pub position_program: Pubkey,
    pub position: Position,
    /// Program owning the payout account.
    pub payout_program: Pubkey,
    pub payout_owner: Pubkey,
    pub payout_mint: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerPayout {
    pub participant: Pubkey,
    pub amount: u64,
}

/// ─── Market Kind ──────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MarketKind {
    /// Two participants, one per outcome.
    HeadToHead,

    /// Any number of participants up to `MAX_POOLED_PARTICIPANTS`.
    #[default]
    Pooled,
}

/// ─── No-Winner Policy ─────────────────────────────────────────────
///
/// What `settle` does when nobody holds the declared outcome.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum NoWinnerPolicy {
    /// Fail with `NoWinners`; the operator has to decide.
    #[default]
    Reject,

    /// Settle anyway; the pool stays in custody.
    Retain,
}

/// ─── Position ─────────────────────────────────────────────────────
///
/// PDA: seeds = [b"position", market.key, participant.key]
///
/// Written once per participant; never mutated afterwards.
#[account]
#[derive(Default)]
pub struct Position {
    pub market: Pubkey,

    pub participant: Pubkey,

    /// 0 or 1.
    pub outcome: u8,

    /// Always the market's `fixed_stake`.
    pub amount: u64,

    /// Presence marker.
    pub has_deposited: bool,

    pub bump: u8,
}

impl Position {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // market
        + 32                    // participant
        + 1                     // outcome
        + 8                     // amount
        + 1                     // has_deposited
        + 1;                    // bump

    pub fn record(&mut self, market: Pubkey, participant: Pubkey, outcome: u8, amount: u64, bump: u8) {
        self.market = market;
        self.participant = participant;
        self.outcome = outcome;
        self.amount = amount;
        self.has_deposited = true;
        self.bump = bump;
    }

    pub fn is_winner(&self, market: &Pubkey, winning_outcome: u8) -> bool {
        self.has_deposited && self.market == *market && self.outcome == winning_outcome
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            participant: self.participant,
            outcome: self.outcome,
            amount: self.amount,
            has_deposited: self.has_deposited,
        }
    }
}

/// Read-only view returned by `get_position`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct PositionSnapshot {
    pub participant: Pubkey,
    pub outcome: u8,
    pub amount: u64,
    pub has_deposited: bool,
}
