//! Transaction building blocks.
//!
//! # Responsibilities
//! - Wrap contract states with their notary (`TransactionState`)
//! - Reference states recorded on the ledger (`StateRef`, `StateAndRef`)
//! - Assemble unsigned transactions for contract verification
//!
//! Signing, notarisation and finality belong to the host flow engine and are
//! deliberately absent.

use std::time::Duration;

use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::identity::Party;

/// A contract state paired with the notary that will certify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionState<T> {
    pub data: T,
    pub notary: Party,
}

impl<T> TransactionState<T> {
    pub fn new(data: T, notary: Party) -> Self {
        Self { data, notary }
    }
}

/// Pointer to an output of a recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateRef {
    pub txhash: B256,
    pub index: u32,
}

impl std::fmt::Display for StateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.txhash, self.index)
    }
}

/// A recorded state together with its ledger reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAndRef<T> {
    pub state: TransactionState<T>,
    #[serde(rename = "ref")]
    pub state_ref: StateRef,
}

/// A command and the keys that must sign for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command<C> {
    pub value: C,
    pub signers: Vec<Address>,
}

/// Validity window for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub midpoint: DateTime<Utc>,
    pub tolerance: Duration,
}

/// Mutable, unsigned transaction under construction.
#[derive(Debug, Clone)]
pub struct TransactionBuilder<S, C> {
    notary: Party,
    inputs: Vec<S>,
    outputs: Vec<TransactionState<S>>,
    commands: Vec<Command<C>>,
    time_window: Option<TimeWindow>,
}

impl<S: Clone, C: Clone> TransactionBuilder<S, C> {
    pub fn new(notary: Party) -> Self {
        Self {
            notary,
            inputs: Vec::new(),
            outputs: Vec::new(),
            commands: Vec::new(),
            time_window: None,
        }
    }

    /// Add an output state (notarised by this builder's notary) and a command.
    pub fn with_items(mut self, output: S, command: Command<C>) -> Self {
        self.add_output_state(output);
        self.add_command(command);
        self
    }

    /// Add a consumed state.
    pub fn add_input_state(&mut self, state: S) {
        self.inputs.push(state);
    }

    pub fn add_output_state(&mut self, state: S) {
        self.outputs.push(TransactionState::new(state, self.notary.clone()));
    }

    pub fn add_command(&mut self, command: Command<C>) {
        self.commands.push(command);
    }

    /// Set the time window the notary will check against.
    pub fn set_time(&mut self, midpoint: DateTime<Utc>, tolerance: Duration) {
        self.time_window = Some(TimeWindow { midpoint, tolerance });
    }

    pub fn notary(&self) -> &Party {
        &self.notary
    }

    pub fn outputs(&self) -> &[TransactionState<S>] {
        &self.outputs
    }

    pub fn commands(&self) -> &[Command<C>] {
        &self.commands
    }

    /// Resolved view of the transaction, as handed to contract verification.
    pub fn to_ledger_transaction(&self) -> LedgerTransaction<S, C> {
        LedgerTransaction {
            inputs: self.inputs.clone(),
            outputs: self.outputs.iter().map(|o| o.data.clone()).collect(),
            commands: self.commands.clone(),
            timestamp: self.time_window,
        }
    }
}

/// Transaction with resolved inputs, used by contract verification.
#[derive(Debug, Clone)]
pub struct LedgerTransaction<S, C> {
    pub inputs: Vec<S>,
    pub outputs: Vec<S>,
    pub commands: Vec<Command<C>>,
    pub timestamp: Option<TimeWindow>,
}
