use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;


use instructions::*;
use state::PositionSnapshot;

declare_id!("FEuvCz6fYJbMM8R99MCQsiFGjecSHAm7K7kh6BogNHc1");

#[program]
pub mod escrow_bet {
    use super::*;

    /// Create a fixed-stake binary escrow market.
    ///
    /// The signer becomes the operator. The vault PDA token account is created
    /// with the market PDA as authority.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        instructions::create_market::handler(ctx, params)
    }

    /// Stake `fixed_stake` on outcome 0 or 1.
    ///
    /// The participant's token account must delegate at least `fixed_stake` to
    /// the market PDA. One position per participant.
    pub fn deposit(ctx: Context<Deposit>, outcome: u8) -> Result<()> {
        instructions::deposit::handler(ctx, outcome)
    }

    /// Open or close deposit admission. Operator only.
    pub fn set_window(ctx: Context<SetWindow>, open: bool) -> Result<()> {
        instructions::set_window::handler(ctx, open)
    }

    /// Declare the winning outcome and pay every winner.
    ///
    /// payout = stake + losing_pool / winner_count
    ///
    /// Any amount the vault cannot cover is pulled first from the funding
    /// source's delegated allowance. Operator only; at most once.
    pub fn settle<'info>(
        ctx: Context<'_, '_, '_, 'info, Settle<'info>>,
        winning_outcome: u8,
    ) -> Result<()> {
        instructions::settle::handler(ctx, winning_outcome)
    }

    pub fn get_position(ctx: Context<ReadPosition>) -> Result<PositionSnapshot> {
        instructions::views::position(ctx)
    }

    pub fn get_outcome_total(ctx: Context<ReadMarket>, outcome: u8) -> Result<u64> {
        instructions::views::outcome_total(ctx, outcome)
    }

    pub fn get_outcome_totals(ctx: Context<ReadMarket>) -> Result<[u64; 2]> {
        instructions::views::outcome_totals(ctx)
    }
}
