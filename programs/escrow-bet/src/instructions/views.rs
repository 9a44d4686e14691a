use anchor_lang::prelude::*;

use crate::constants::SEED_POSITION;
use crate::state::*;

#[derive(Accounts)]
pub struct ReadMarket<'info> {
    pub market: Account<'info, Market>,
}

#[derive(Accounts)]
pub struct ReadPosition<'info> {
    pub market: Account<'info, Market>,

    /// CHECK: any address may be queried.
    pub participant: UncheckedAccount<'info>,

    /// CHECK: validated by seeds; may be unallocated when the participant
    /// never deposited.
    #[account(
        seeds = [SEED_POSITION, market.key().as_ref(), participant.key().as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,
}

pub fn outcome_total(ctx: Context<ReadMarket>, outcome: u8) -> Result<u64> {
    let idx = outcome_index(outcome)?;
    Ok(ctx.accounts.market.outcome_totals[idx])
}

pub fn outcome_totals(ctx: Context<ReadMarket>) -> Result<[u64; 2]> {
    Ok(ctx.accounts.market.outcome_totals)
}

pub fn position(ctx: Context<ReadPosition>) -> Result<PositionSnapshot> {
    let info = ctx.accounts.position.to_account_info();
    if info.data_is_empty() {
        return Ok(PositionSnapshot {
            participant: ctx.accounts.participant.key(),
            ..PositionSnapshot::default()
        });
    }

    require_keys_eq!(*info.owner, crate::ID);
    let position = Position::try_deserialize(&mut &info.try_borrow_data()?[..])?;
    Ok(position.snapshot())
}
