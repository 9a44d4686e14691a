use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{SEED_MARKET, SEED_POSITION, SEED_VAULT};
use crate::events::DepositAccepted;
use crate::ledger;
use crate::state::*;

#[derive(Accounts)]
pub struct Deposit<'info> {
    /// The participant placing the stake.
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(mut)]
    pub market: Account<'info, Market>,

    /// Position PDA — allocated on first call; a recorded position rejects
    /// any further deposit.
    #[account(
        init_if_needed,
        payer = participant,
        space = Position::SIZE,
        seeds = [SEED_POSITION, market.key().as_ref(), participant.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    /// Source of the stake; must delegate at least `fixed_stake` to the market.
    #[account(
        mut,
        token::mint = market.token_mint,
        token::authority = participant,
    )]
    pub participant_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Deposit>, outcome: u8) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let idx = ctx
        .accounts
        .market
        .check_admission(&ctx.accounts.position, outcome)?;

    let booking = ctx.accounts.market.prepare_deposit(idx)?;

    let stake = ctx.accounts.market.fixed_stake;
    ledger::check_delegated_pull(&ctx.accounts.participant_token_account, &market_key, stake)?;

    // Pull the stake; the market PDA signs as approved delegate
    let operator = ctx.accounts.market.operator;
    let market_id_bytes = ctx.accounts.market.market_id.to_le_bytes();
    let bump = ctx.accounts.market.bump;
    let seeds: &[&[u8]] = &[
        SEED_MARKET,
        operator.as_ref(),
        market_id_bytes.as_ref(),
        &[bump],
    ];

    ledger::transfer_as_market(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.participant_token_account.to_account_info(),
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.market.to_account_info(),
        &[seeds],
        stake,
    )?;

    let participant = ctx.accounts.participant.key();
    let market = &mut ctx.accounts.market;
    market.commit_deposit(booking);

    let position = &mut ctx.accounts.position;
    position.record(market_key, participant, outcome, stake, ctx.bumps.position);

    msg!(
        "Deposit: {} staked {} on outcome {} in market #{} (outcome total {})",
        participant,
        stake,
        outcome,
        market.market_id,
        market.outcome_totals[idx],
    );

    emit!(DepositAccepted {
        market: market_key,
        participant,
        outcome,
        amount: stake,
        outcome_total: market.outcome_totals[idx],
    });

    Ok(())
}
