//! # Ledger Invariants
//!
//! State invariants are checked against a single [`LedgerSnapshot`];
//! transition invariants compare the snapshots either side of one action.

extern crate std;

use std::boxed::Box;
use std::string::{String, ToString};
use std::vec::Vec;

use super::generators::LedgerAction;
use super::{ActionOutcome, LedgerSnapshot};

// ── State Invariants ─────────────────────────────────────────────────────────

pub trait Invariant {
    fn name(&self) -> &str;

    /// `Err(description)` on violation.
    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), String>;
}

/// `total_supply == Σ balances`. Value is only ever minted by rewards and
/// initialization, and only moved by transfers.
pub struct SupplyMatchesBalances;

impl Invariant for SupplyMatchesBalances {
    fn name(&self) -> &str {
        "total_supply == sum(balances)"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), String> {
        let sum = snapshot.sum_balances();
        if snapshot.total_supply != sum {
            return Err(std::format!(
                "total supply ({}) != sum of balances ({})",
                snapshot.total_supply,
                sum
            ));
        }
        Ok(())
    }
}

pub struct NonNegativeBalances;

impl Invariant for NonNegativeBalances {
    fn name(&self) -> &str {
        "all balances >= 0"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), String> {
        for account in &snapshot.accounts {
            if account.balance < 0 {
                return Err(std::format!(
                    "{} has negative balance {}",
                    account.user_id,
                    account.balance
                ));
            }
        }
        Ok(())
    }
}

/// Every stored commitment matches the stored balance.
pub struct CommitmentsConsistent;

impl Invariant for CommitmentsConsistent {
    fn name(&self) -> &str {
        "commitment == H(user_id || balance)"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), String> {
        match snapshot.accounts.iter().find(|a| !a.commitment_ok) {
            Some(account) => Err(std::format!(
                "{} carries a stale commitment for balance {}",
                account.user_id,
                account.balance
            )),
            None => Ok(()),
        }
    }
}

pub struct InvariantSet {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantSet {
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    pub fn ledger_defaults() -> Self {
        let mut set = Self::new();
        set.add(Box::new(SupplyMatchesBalances));
        set.add(Box::new(NonNegativeBalances));
        set.add(Box::new(CommitmentsConsistent));
        set
    }

    pub fn add(&mut self, invariant: Box<dyn Invariant>) {
        self.invariants.push(invariant);
    }

    /// `(name, message)` for every violated invariant.
    pub fn check_all(&self, snapshot: &LedgerSnapshot) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for inv in &self.invariants {
            if let Err(msg) = inv.check(snapshot) {
                violations.push((inv.name().to_string(), msg));
            }
        }
        violations
    }

    pub fn assert_all(&self, snapshot: &LedgerSnapshot) {
        let violations = self.check_all(snapshot);
        if !violations.is_empty() {
            let mut report = String::from("Invariant violations detected:\n");
            for (name, msg) in &violations {
                report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
            }
            panic!("{}", report);
        }
    }

    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

impl Default for InvariantSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Transition Invariants ────────────────────────────────────────────────────

/// One executed action with the ledger state either side of it.
pub struct Transition<'a> {
    pub action: &'a LedgerAction,
    /// User ids the action's indices resolved to, in action order.
    pub users: &'a [String],
    pub outcome: &'a ActionOutcome,
    pub before: &'a LedgerSnapshot,
    pub after: &'a LedgerSnapshot,
}

pub trait TransitionInvariant {
    fn name(&self) -> &str;
    fn check(&self, step: &Transition) -> Result<(), String>;
}

/// A rejected action leaves every balance and the supply as they were.
pub struct RejectionChangesNothing;

impl TransitionInvariant for RejectionChangesNothing {
    fn name(&self) -> &str {
        "rejected actions do not write"
    }

    fn check(&self, step: &Transition) -> Result<(), String> {
        if step.outcome.is_ok() || step.before.same_ledger_as(step.after) {
            return Ok(());
        }
        Err(std::format!(
            "{:?} was rejected ({:?}) but the ledger changed",
            step.action,
            step.outcome
        ))
    }
}

/// A successful transfer debits and credits the same amount and mints nothing.
pub struct TransferConservation;

impl TransitionInvariant for TransferConservation {
    fn name(&self) -> &str {
        "transfers conserve value"
    }

    fn check(&self, step: &Transition) -> Result<(), String> {
        let LedgerAction::Transfer { amount, .. } = step.action else {
            return Ok(());
        };
        if !step.outcome.is_ok() {
            return Ok(());
        }
        let (from, to) = (&step.users[0], &step.users[1]);
        let before = (step.before.balance_of(from), step.before.balance_of(to));
        let after = (step.after.balance_of(from), step.after.balance_of(to));
        let (Some(fb), Some(tb), Some(fa), Some(ta)) = (before.0, before.1, after.0, after.1)
        else {
            return Err(std::format!("transfer {} -> {} touched a missing account", from, to));
        };

        if fa != fb - amount || ta != tb + amount {
            return Err(std::format!(
                "transfer of {}: {} {} -> {}, {} {} -> {}",
                amount,
                from,
                fb,
                fa,
                to,
                tb,
                ta
            ));
        }
        if step.after.total_supply != step.before.total_supply {
            return Err(std::format!(
                "transfer changed supply {} -> {}",
                step.before.total_supply,
                step.after.total_supply
            ));
        }
        Ok(())
    }
}

/// A successful reward mints exactly its amount.
pub struct RewardMintsAmount;

impl TransitionInvariant for RewardMintsAmount {
    fn name(&self) -> &str {
        "rewards mint exactly the amount"
    }

    fn check(&self, step: &Transition) -> Result<(), String> {
        let amount = match step.action {
            LedgerAction::RewardPatient { amount, .. } | LedgerAction::RewardDoctor { amount, .. } => {
                *amount
            }
            _ => return Ok(()),
        };
        if !step.outcome.is_ok() {
            return Ok(());
        }
        let expected = step.before.total_supply + amount;
        if step.after.total_supply != expected {
            return Err(std::format!(
                "reward of {}: expected supply {}, got {}",
                amount,
                expected,
                step.after.total_supply
            ));
        }
        Ok(())
    }
}

pub struct TransitionInvariantSet {
    invariants: Vec<Box<dyn TransitionInvariant>>,
}

impl TransitionInvariantSet {
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    pub fn ledger_defaults() -> Self {
        let mut set = Self::new();
        set.add(Box::new(RejectionChangesNothing));
        set.add(Box::new(TransferConservation));
        set.add(Box::new(RewardMintsAmount));
        set
    }

    pub fn add(&mut self, invariant: Box<dyn TransitionInvariant>) {
        self.invariants.push(invariant);
    }

    pub fn check_all(&self, step: &Transition) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for inv in &self.invariants {
            if let Err(msg) = inv.check(step) {
                violations.push((inv.name().to_string(), msg));
            }
        }
        violations
    }
}

impl Default for TransitionInvariantSet {
    fn default() -> Self {
        Self::new()
    }
}
