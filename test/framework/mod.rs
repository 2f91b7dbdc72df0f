//! # MediNet Contract Testing Framework
//!
//! Shared harness for cross-contract tests: deploys the three MediNet
//! contracts against mock collaborators, drives random action sequences
//! through the token ledger, and checks ledger invariants after every step.
//!
//! ```text
//! test/framework/
//! ├── mod.rs             # TestEnv, LedgerHarness, snapshots
//! ├── generators.rs      # proptest strategies for amounts and actions
//! ├── invariants.rs      # state and transition invariants
//! └── state_explorer.rs  # executes action sequences, checking invariants
//! ```
//!
//! ```rust,ignore
//! use test_framework::{LedgerHarness, TestEnv};
//!
//! let env = TestEnv::new();
//! let ledger = LedgerHarness::new(&env, 3);
//! ledger.open(0, 10 * SCALE);
//! assert_eq!(ledger.total_supply(), 10 * SCALE);
//! ```

extern crate std;

pub mod invariants;
pub mod state_explorer;

use common::testutils::{
    MockAttributeAuthority, MockAttributeAuthorityClient, MockSettlementBridge,
    MockSettlementBridgeClient,
};
use identity::{IdentityContract, IdentityContractClient};
use patient_care::{PatientCareContract, PatientCareContractClient};
use payment::{PaymentContract, PaymentContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the host `Env` with the collaborators every MediNet contract needs:
/// an attribute authority holding one caller per role, and a settlement bridge.
pub struct TestEnv {
    pub env: Env,
    pub authority: MockAttributeAuthorityClient<'static>,
    pub authority_id: Address,
    pub bridge: MockSettlementBridgeClient<'static>,
    pub bridge_id: Address,
    pub admin: Address,
    pub doctor: Address,
    pub patient: Address,
}

impl TestEnv {
    /// Fresh environment with auth mocked and the role callers registered.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000);

        let authority_id = env.register(MockAttributeAuthority, ());
        let authority = MockAttributeAuthorityClient::new(&env, &authority_id);
        let bridge_id = env.register(MockSettlementBridge, ());
        let bridge = MockSettlementBridgeClient::new(&env, &bridge_id);

        let admin = Address::generate(&env);
        let doctor = Address::generate(&env);
        let patient = Address::generate(&env);
        authority.set_role(&admin, &String::from_str(&env, "admin"));
        authority.set_role(&doctor, &String::from_str(&env, "doctor"));
        authority.set_role(&patient, &String::from_str(&env, "patient"));

        Self {
            env,
            authority,
            authority_id,
            bridge,
            bridge_id,
            admin,
            doctor,
            patient,
        }
    }

    pub fn str(&self, value: &str) -> String {
        String::from_str(&self.env, value)
    }

    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger clock by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn deploy_identity(&self) -> IdentityContractClient<'static> {
        let client = IdentityContractClient::new(&self.env, &self.env.register(IdentityContract, ()));
        client.initialize(&self.admin, &self.authority_id);
        client
    }

    pub fn deploy_patient_care(&self) -> PatientCareContractClient<'static> {
        let client =
            PatientCareContractClient::new(&self.env, &self.env.register(PatientCareContract, ()));
        client.initialize(&self.admin, &self.authority_id);
        client
    }

    pub fn deploy_payment(&self) -> PaymentContractClient<'static> {
        let client = PaymentContractClient::new(&self.env, &self.env.register(PaymentContract, ()));
        client.initialize(&self.admin, &self.authority_id, &self.bridge_id);
        client
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Token Ledger Harness ─────────────────────────────────────────────────────

/// Which role-holding caller performs an action.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Actor {
    Admin,
    Doctor,
    Patient,
}

/// A deployed token ledger with a fixed pool of user ids `u0 … u{n-1}`.
pub struct LedgerHarness<'a> {
    pub env: &'a TestEnv,
    pub client: PaymentContractClient<'static>,
    pub users: std::vec::Vec<std::string::String>,
}

impl<'a> LedgerHarness<'a> {
    pub fn new(env: &'a TestEnv, num_users: usize) -> Self {
        let client = env.deploy_payment();
        let users = (0..num_users).map(|i| std::format!("u{}", i)).collect();
        Self { env, client, users }
    }

    pub fn caller(&self, actor: Actor) -> &Address {
        match actor {
            Actor::Admin => &self.env.admin,
            Actor::Doctor => &self.env.doctor,
            Actor::Patient => &self.env.patient,
        }
    }

    /// User id for a pool index (modular).
    pub fn user(&self, index: usize) -> String {
        self.env.str(&self.users[index % self.users.len()])
    }

    /// Open (or reset) the account at `index`.
    pub fn open(&self, index: usize, balance: i128) {
        self.client
            .initialize_token(&self.env.admin, &self.user(index), &balance);
    }

    /// Open every pooled account with `balance`.
    pub fn open_all(&self, balance: i128) {
        for i in 0..self.users.len() {
            self.open(i, balance);
        }
    }

    /// Balance at `index`, or `None` if the account was never opened.
    pub fn balance(&self, index: usize) -> Option<i128> {
        match self.client.try_get_balance(&self.user(index)) {
            Ok(Ok(account)) => Some(account.balance),
            _ => None,
        }
    }

    pub fn total_supply(&self) -> i128 {
        self.client.total_supply()
    }

    /// Every observable piece of ledger state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut accounts = std::vec::Vec::new();
        for (i, name) in self.users.iter().enumerate() {
            if let Ok(Ok(account)) = self.client.try_get_balance(&self.user(i)) {
                accounts.push(AccountView {
                    user_id: name.clone(),
                    balance: account.balance,
                    commitment_ok: account.is_consistent(&self.env.env),
                });
            }
        }
        LedgerSnapshot {
            timestamp: self.env.timestamp(),
            total_supply: self.total_supply(),
            accounts,
        }
    }
}

/// One account as seen by a snapshot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AccountView {
    pub user_id: std::string::String,
    pub balance: i128,
    /// Stored commitment matches the stored balance.
    pub commitment_ok: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LedgerSnapshot {
    pub timestamp: u64,
    pub total_supply: i128,
    pub accounts: std::vec::Vec<AccountView>,
}

impl LedgerSnapshot {
    pub fn sum_balances(&self) -> i128 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    pub fn balance_of(&self, user_id: &str) -> Option<i128> {
        self.accounts
            .iter()
            .find(|a| a.user_id == user_id)
            .map(|a| a.balance)
    }

    /// Same accounts and supply, ignoring the clock.
    pub fn same_ledger_as(&self, other: &LedgerSnapshot) -> bool {
        self.total_supply == other.total_supply && self.accounts == other.accounts
    }
}

// ── Outcome Tracking ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ActionOutcome {
    Ok,
    /// Contract error code.
    Rejected(u32),
    /// Host-level failure (trap, conversion error).
    Unexpected(std::string::String),
}

impl ActionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionOutcome::Ok)
    }
}

/// Summary of an exploration run.
#[derive(Debug, Clone, Default)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
}

impl TestRunSummary {
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }
}
