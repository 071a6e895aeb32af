//! Impact resolution — which dapps does an operation affect?

use std::collections::BTreeSet;

use crate::types::Operation;

/// Maps an operation to the set of dapp names it impacts.
///
/// Pluggable so hosts with different impact rules can reuse the engine.
/// Returning a `BTreeSet` is deliberate: the engine iterates the set as-is
/// when assigning global sequence numbers, so the lexicographic order of
/// dapp names is the one fixed, replica-stable assignment order for
/// operations that impact more than one dapp.
///
/// An empty set is valid (the operation leaves no trace in the index), and
/// so are names the index has never seen — the first history entry for a
/// dapp implicitly starts its sequence counter at 0.
pub trait ImpactResolver {
    fn resolve(&self, op: &Operation) -> BTreeSet<String>;
}

/// Default impact rules: every dapp operation impacts exactly the dapp it
/// names, and fee votes impact nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DappImpactRules;

impl ImpactResolver for DappImpactRules {
    fn resolve(&self, op: &Operation) -> BTreeSet<String> {
        let mut impacted = BTreeSet::new();
        match op {
            Operation::CreateDapp { dapp_name, .. }
            | Operation::UpdateDappKey { dapp_name, .. }
            | Operation::CommentDapp { dapp_name, .. }
            | Operation::CommentVoteDapp { dapp_name, .. }
            | Operation::DeleteCommentDapp { dapp_name, .. }
            | Operation::JoinDapp { dapp_name, .. }
            | Operation::LeaveDapp { dapp_name, .. }
            | Operation::VoteDapp { dapp_name, .. }
            | Operation::CustomJsonDapp { dapp_name, .. } => {
                impacted.insert(dapp_name.clone());
            }
            Operation::VoteDappTrxFee { .. } => {}
        }
        impacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_dapp_is_impacted() {
        let op = Operation::CreateDapp {
            owner: "alice".into(),
            dapp_name: "alpha".into(),
            dapp_key: "KEY".into(),
        };
        let impacted = DappImpactRules.resolve(&op);
        assert_eq!(impacted.len(), 1);
        assert!(impacted.contains("alpha"));
    }

    #[test]
    fn fee_vote_impacts_nothing() {
        let op = Operation::VoteDappTrxFee {
            voter: "alice".into(),
            trx_fee: 10,
        };
        assert!(DappImpactRules.resolve(&op).is_empty());
    }

    #[test]
    fn custom_json_impacts_its_dapp() {
        let op = Operation::CustomJsonDapp {
            dapp_name: "alpha".into(),
            required_auths: vec!["bob".into()],
            json: "[0, {}]".into(),
        };
        let impacted = DappImpactRules.resolve(&op);
        assert!(impacted.contains("alpha"));
    }
}
