//! # State Explorer
//!
//! Runs a [`LedgerAction`] sequence against a [`LedgerHarness`], snapshotting
//! the ledger after every step and checking both state and transition
//! invariants. Cost per step is one balance read per pooled user.

extern crate std;

use std::string::String;
use std::vec::Vec;

use super::generators::LedgerAction;
use super::invariants::{InvariantSet, Transition, TransitionInvariantSet};
use super::{ActionOutcome, LedgerHarness, TestRunSummary};

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub max_steps: usize,
    /// Stop at the first violation.
    pub fail_fast: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
        }
    }
}

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub action_log: Vec<(LedgerAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of logged actions that the ledger accepted.
    pub fn accepted(&self) -> usize {
        self.action_log.iter().filter(|(_, o)| o.is_ok()).count()
    }
}

pub struct StateExplorer<'h, 'e> {
    harness: &'h LedgerHarness<'e>,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
}

impl<'h, 'e> StateExplorer<'h, 'e> {
    pub fn new(
        harness: &'h LedgerHarness<'e>,
        invariants: InvariantSet,
        transitions: TransitionInvariantSet,
        config: ExplorerConfig,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions,
            config,
        }
    }

    /// Explorer with every built-in invariant.
    pub fn with_defaults(harness: &'h LedgerHarness<'e>) -> Self {
        Self::new(
            harness,
            InvariantSet::ledger_defaults(),
            TransitionInvariantSet::ledger_defaults(),
            ExplorerConfig::default(),
        )
    }

    pub fn explore(&mut self, actions: &[LedgerAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::default();
        let mut action_log = Vec::new();
        let mut before = self.harness.snapshot();

        for action in actions.iter().take(self.config.max_steps) {
            let users = self.resolve_users(action);
            let outcome = self.execute(action);
            summary.actions_executed += 1;
            summary
                .entry_points_hit
                .insert(String::from(action.entry_point()));

            let after = self.harness.snapshot();
            let mut violations = self.invariants.check_all(&after);
            violations.extend(self.transitions.check_all(&Transition {
                action,
                users: &users,
                outcome: &outcome,
                before: &before,
                after: &after,
            }));
            summary.invariant_checks += 1;
            action_log.push((action.clone(), outcome));

            if !violations.is_empty() {
                for (name, msg) in violations {
                    summary.invariant_violations.push(std::format!(
                        "after action #{} ({:?}): [{}] {}",
                        summary.actions_executed,
                        action,
                        name,
                        msg
                    ));
                }
                if self.config.fail_fast {
                    break;
                }
            }
            before = after;
        }

        ExplorationResult {
            summary,
            action_log,
        }
    }

    fn resolve_users(&self, action: &LedgerAction) -> Vec<String> {
        let name = |i: usize| self.harness.users[i % self.harness.users.len()].clone();
        match action {
            LedgerAction::Open { user, .. }
            | LedgerAction::RewardPatient { user, .. }
            | LedgerAction::RewardDoctor { user, .. } => std::vec![name(*user)],
            LedgerAction::Transfer { from, to, .. } => std::vec![name(*from), name(*to)],
            LedgerAction::AdvanceTime { .. } | LedgerAction::BridgeFailing(_) => Vec::new(),
        }
    }

    fn execute(&self, action: &LedgerAction) -> ActionOutcome {
        let h = self.harness;
        let reason = h.env.str("exploration");
        macro_rules! outcome {
            ($call:expr) => {
                match $call {
                    Ok(Ok(_)) => ActionOutcome::Ok,
                    Ok(Err(e)) => ActionOutcome::Unexpected(std::format!("{:?}", e)),
                    Err(Ok(e)) => ActionOutcome::Rejected(e as u32),
                    Err(Err(e)) => ActionOutcome::Unexpected(std::format!("{:?}", e)),
                }
            };
        }

        match action {
            LedgerAction::Open { user, balance } => {
                outcome!(h
                    .client
                    .try_initialize_token(&h.env.admin, &h.user(*user), balance))
            }
            LedgerAction::RewardPatient { by, user, amount } => {
                outcome!(h
                    .client
                    .try_reward_patient(h.caller(*by), &h.user(*user), amount, &reason))
            }
            LedgerAction::RewardDoctor { by, user, amount } => {
                outcome!(h
                    .client
                    .try_reward_doctor(h.caller(*by), &h.user(*user), amount, &reason))
            }
            LedgerAction::Transfer {
                by,
                from,
                to,
                amount,
            } => outcome!(h.client.try_transfer_tokens(
                h.caller(*by),
                &h.user(*from),
                &h.user(*to),
                amount
            )),
            LedgerAction::AdvanceTime { delta } => {
                h.env.advance_time(*delta);
                ActionOutcome::Ok
            }
            LedgerAction::BridgeFailing(failing) => {
                h.env.bridge.set_failing(failing);
                ActionOutcome::Ok
            }
        }
    }
}

/// Entry points an exploration can reach.
pub const LEDGER_ENTRY_POINTS: &[&str] = &[
    "initialize_token",
    "reward_patient",
    "reward_doctor",
    "transfer_tokens",
];
