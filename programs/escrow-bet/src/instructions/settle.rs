use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{SEED_MARKET, SEED_VAULT};
use crate::errors::EscrowError;
use crate::events::{MarketSettled, WinnerPaid};
use crate::ledger;
use crate::state::*;

#[derive(Accounts)]
pub struct Settle<'info> {
    /// Operator — the only account authorized to settle.
    #[account(
        constraint = market.is_operator(&operator.key()) @ EscrowError::NotAuthorized,
    )]
    pub operator: Signer<'info>,

    #[account(
        mut,
        constraint = !market.settled @ EscrowError::AlreadySettled,
    )]
    pub market: Account<'info, Market>,

    /// Market vault — source of every payout.
    #[account(
        mut,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Funding source's token account. Only needed when the vault is short.
    #[account(
        mut,
        token::mint = market.token_mint,
        token::authority = market.funding_source,
    )]
    pub funding_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Winners are passed as `remaining_accounts` pairs:
/// `[position, winner token account]` for every position on the winning side.
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, Settle<'info>>,
    winning_outcome: u8,
) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let token_mint = ctx.accounts.market.token_mint;
    let plan = ctx
        .accounts
        .market
        .settlement_plan(winning_outcome, ctx.accounts.vault.amount)?;

    require!(
        ctx.remaining_accounts.len() % 2 == 0,
        EscrowError::WinnerAccountsMismatch
    );

    // Validate every winner before the first transfer
    let mut claims: Vec<WinnerClaim> = Vec::with_capacity(ctx.remaining_accounts.len() / 2);
    for pair in ctx.remaining_accounts.chunks(2) {
        let position_info = &pair[0];
        let payout_info = &pair[1];

        let position = Position::try_deserialize(&mut &position_info.try_borrow_data()?[..])?;
        let payout_account = TokenAccount::try_deserialize(&mut &payout_info.try_borrow_data()?[..])?;

        claims.push(WinnerClaim {
            position_program: *position_info.owner,
            position,
            payout_program: *payout_info.owner,
            payout_owner: payout_account.owner,
            payout_mint: payout_account.mint,
        });
    }
    let payouts = plan.winner_payouts(&market_key, &token_mint, &claims)?;

    let funding = ctx.accounts.funding_account.as_ref();
    ledger::ensure_top_up(
        funding.map(|account| ledger::Delegation::of(account)),
        &market_key,
        plan.shortfall,
    )?;

    let operator = ctx.accounts.market.operator;
    let market_id_bytes = ctx.accounts.market.market_id.to_le_bytes();
    let bump = ctx.accounts.market.bump;
    let seeds: &[&[u8]] = &[
        SEED_MARKET,
        operator.as_ref(),
        market_id_bytes.as_ref(),
        &[bump],
    ];

    let token_program = ctx.accounts.token_program.to_account_info();
    let vault = ctx.accounts.vault.to_account_info();
    let market_info = ctx.accounts.market.to_account_info();

    // Top up the vault from the funding source's allowance
    if plan.shortfall > 0 {
        if let Some(funding) = funding {
            ledger::transfer_as_market(
                &token_program,
                &funding.to_account_info(),
                &vault,
                &market_info,
                &[seeds],
                plan.shortfall,
            )?;
        }
    }

    for (payout, pair) in payouts.iter().zip(ctx.remaining_accounts.chunks(2)) {
        ledger::transfer_as_market(
            &token_program,
            &vault,
            &pair[1],
            &market_info,
            &[seeds],
            payout.amount,
        )?;

        msg!("Paid {} to {}", payout.amount, payout.participant);
        emit!(WinnerPaid {
            market: market_key,
            participant: payout.participant,
            payout: payout.amount,
        });
    }

    // Terminal state only after every payout went through
    let market = &mut ctx.accounts.market;
    market.finalize_settlement(&plan);

    msg!(
        "Market #{} settled: outcome={}, winners={}, losing_pool={}, paid={}, funding={}, residual={}",
        market.market_id,
        winning_outcome,
        plan.winner_count,
        plan.losing_pool,
        plan.total_payout,
        plan.shortfall,
        plan.residual,
    );

    emit!(MarketSettled {
        market: market_key,
        winning_outcome,
        winner_count: plan.winner_count,
        losing_pool: plan.losing_pool,
        total_paid_out: plan.total_payout,
        funding_drawn: plan.shortfall,
        residual: plan.residual,
    });

    Ok(())
}
