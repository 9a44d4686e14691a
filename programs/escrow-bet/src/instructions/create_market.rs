use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{SEED_MARKET, SEED_VAULT};
use crate::errors::EscrowError;
use crate::events::MarketCreated;
use crate::state::*;

/// Parameters for creating a new escrow market.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateMarketParams {
    /// Operator-chosen id; lets one operator run several markets.
    pub market_id: u64,

    /// Mandatory per-participant deposit (token base units).
    pub fixed_stake: u64,

    pub kind: MarketKind,

    pub no_winner_policy: NoWinnerPolicy,

    /// Owner of the token account that covers payout shortfalls.
    pub funding_source: Pubkey,
}

#[derive(Accounts)]
#[instruction(params: CreateMarketParams)]
pub struct CreateMarket<'info> {
    /// Becomes the market operator; pays for account allocation.
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        init,
        payer = operator,
        space = Market::SIZE,
        seeds = [
            SEED_MARKET,
            operator.key().as_ref(),
            params.market_id.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// Token the market custodies.
    pub token_mint: Account<'info, Mint>,

    /// Vault PDA — holds every deposit for this market.
    #[account(
        init,
        payer = operator,
        token::mint = token_mint,
        token::authority = market,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
    require!(params.fixed_stake > 0, EscrowError::InvalidStake);

    let market = &mut ctx.accounts.market;

    market.market_id = params.market_id;
    market.operator = ctx.accounts.operator.key();
    market.funding_source = params.funding_source;
    market.token_mint = ctx.accounts.token_mint.key();
    market.vault = ctx.accounts.vault.key();
    market.fixed_stake = params.fixed_stake;
    market.kind = params.kind;
    market.no_winner_policy = params.no_winner_policy;
    market.window_open = true;
    market.settled = false;
    market.winning_outcome = None;
    market.outcome_totals = [0; 2];
    market.outcome_counts = [0; 2];
    market.total_paid_out = 0;
    market.funding_drawn = 0;
    market.residual = 0;
    market.bump = ctx.bumps.market;
    market.vault_bump = ctx.bumps.vault;

    msg!(
        "Market #{} created by {} | stake: {} | kind: {:?} | no-winner: {:?}",
        market.market_id,
        market.operator,
        market.fixed_stake,
        market.kind,
        market.no_winner_policy,
    );

    emit!(MarketCreated {
        market: market.key(),
        market_id: market.market_id,
        operator: market.operator,
        funding_source: market.funding_source,
        token_mint: market.token_mint,
        fixed_stake: market.fixed_stake,
        kind: market.kind,
    });

    Ok(())
}
