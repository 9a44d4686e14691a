//! Narrow interface to the SPL Token program.
//!
//! The market never holds tokens outside its vault. Every inbound movement is
//! a pull the market signs for as the approved delegate of the source account;
//! every outbound movement is signed by the market as vault authority.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::errors::EscrowError;

/// Check that `spender` may pull `amount` from an account holding `balance`
/// with the given delegation.
///
/// Allowance is checked before balance.
pub fn ensure_pullable(
    balance: u64,
    delegate: Option<Pubkey>,
    delegated_amount: u64,
    spender: &Pubkey,
    amount: u64,
) -> Result<()> {
    let allowance = match delegate {
        Some(d) if d == *spender => delegated_amount,
        _ => 0,
    };
    require!(allowance >= amount, EscrowError::InsufficientAllowance);
    require!(balance >= amount, EscrowError::InsufficientFunds);
    Ok(())
}

/// Balance and delegation of a token account, as the market sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Delegation {
    pub balance: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
}

impl Delegation {
    pub fn of(account: &TokenAccount) -> Self {
        let delegate = match account.delegate {
            COption::Some(d) => Some(d),
            COption::None => None,
        };
        Delegation {
            balance: account.amount,
            delegate,
            delegated_amount: account.delegated_amount,
        }
    }

    pub fn ensure_pullable(&self, spender: &Pubkey, amount: u64) -> Result<()> {
        ensure_pullable(
            self.balance,
            self.delegate,
            self.delegated_amount,
            spender,
            amount,
        )
    }
}

pub fn check_delegated_pull(account: &TokenAccount, spender: &Pubkey, amount: u64) -> Result<()> {
    Delegation::of(account).ensure_pullable(spender, amount)
}

/// Check the funding source can cover a settlement top-up of `amount`.
///
/// The funding account is only needed when `amount > 0`.
pub fn ensure_top_up(source: Option<Delegation>, spender: &Pubkey, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let source = source.ok_or(EscrowError::FundingAccountMissing)?;
    source.ensure_pullable(spender, amount)
}

/// Transfer `amount` with the market PDA as signing authority.
pub fn transfer_as_market<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    market: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: market.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}
