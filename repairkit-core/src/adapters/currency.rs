use repairkit_domain::ports::CurrencySink;
use repairkit_types::ActorId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("insufficient funds for {actor}: balance {balance}, requested {amount}")]
    InsufficientFunds {
        actor: ActorId,
        balance: f64,
        amount: f64,
    },
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<ActorId, f64>,
    withdrawals: Vec<(ActorId, f64)>,
}

/// In-memory balances. Withdrawals beyond the balance are refused.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deposit(&self, actor: ActorId, amount: f64) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state.balances.entry(actor).or_insert(0.0) += amount;
    }

    pub fn balance(&self, actor: &ActorId) -> f64 {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.balances.get(actor).copied().unwrap_or(0.0)
    }

    /// Every successful withdrawal, in order.
    pub fn withdrawals(&self) -> Vec<(ActorId, f64)> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.withdrawals.clone()
    }
}

impl CurrencySink for Ledger {
    fn withdraw(&self, actor: &ActorId, amount: f64) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let balance = state.balances.get(actor).copied().unwrap_or(0.0);
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                actor: *actor,
                balance,
                amount,
            }
            .into());
        }

        state.balances.insert(*actor, balance - amount);
        state.withdrawals.push((*actor, amount));
        debug!(actor = %actor, amount, remaining = balance - amount, "withdrew repair cost");
        Ok(())
    }
}
