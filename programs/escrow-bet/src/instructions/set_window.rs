use anchor_lang::prelude::*;

use crate::errors::EscrowError;
use crate::events::WindowChanged;
use crate::state::*;

#[derive(Accounts)]
pub struct SetWindow<'info> {
    #[account(
        constraint = market.is_operator(&operator.key()) @ EscrowError::NotAuthorized,
    )]
    pub operator: Signer<'info>,

    #[account(mut)]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<SetWindow>, open: bool) -> Result<()> {
    let market = &mut ctx.accounts.market;
    market.set_window(open)?;

    msg!(
        "Market #{} window {}",
        market.market_id,
        if open { "opened" } else { "closed" },
    );

    emit!(WindowChanged {
        market: market.key(),
        open,
    });

    Ok(())
}
