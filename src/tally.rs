// ⚖️ Tally - sponsor assignment and vote counting
//
// Three independent passes over fully loaded registries. Each one mutates
// records in place and accumulates: running a count pass twice counts twice.
//
// Vote result references are assumed valid. A dangling one surfaces as
// TallyError::NotFound and ends the pass; records already visited stay
// updated.

use tracing::info;

use crate::entities::{Bill, Legislator, Registry, Vote, VoteResult, VoteType};
use crate::error::TallyError;

/// Set each bill's `primary_sponsor` to its sponsor's name.
///
/// Bills whose sponsor is not a known legislator keep their current value.
pub fn assign_bill_primary_sponsors(bills: &mut Registry<Bill>, legislators: &Registry<Legislator>) {
    let mut matched = 0;
    for bill in bills.values_mut() {
        if let Some(sponsor) = legislators.get(bill.sponsor_id) {
            bill.primary_sponsor = sponsor.name.clone();
            matched += 1;
        }
    }

    info!(bills = bills.len(), matched, "assigned primary sponsors");
}

/// Count FOR/AGAINST results per bill, resolving result → vote → bill
pub fn assign_bill_vote_counts(
    bills: &mut Registry<Bill>,
    votes: &Registry<Vote>,
    vote_results: &Registry<VoteResult>,
) -> Result<(), TallyError> {
    for result in vote_results.values() {
        let vote = votes.get(result.vote_id).ok_or_else(|| TallyError::NotFound {
            entity: "Vote",
            id: result.vote_id,
            referenced_by: format!("VoteResult {}", result.id),
        })?;

        let bill = bills.get_mut(vote.bill_id).ok_or_else(|| TallyError::NotFound {
            entity: "Bill",
            id: vote.bill_id,
            referenced_by: format!("Vote {}", vote.id),
        })?;

        match result.vote_type {
            VoteType::For => bill.supporter_count += 1,
            VoteType::Against => bill.opposer_count += 1,
            VoteType::Unrecognized(_) => {}
        }
    }

    info!(bills = bills.len(), vote_results = vote_results.len(), "tallied bill votes");
    Ok(())
}

/// Count FOR/AGAINST results cast by each legislator.
///
/// Counts vote events, not distinct bills.
pub fn assign_legislator_vote_counts(
    legislators: &mut Registry<Legislator>,
    vote_results: &Registry<VoteResult>,
) -> Result<(), TallyError> {
    for result in vote_results.values() {
        let legislator = legislators
            .get_mut(result.legislator_id)
            .ok_or_else(|| TallyError::NotFound {
                entity: "Legislator",
                id: result.legislator_id,
                referenced_by: format!("VoteResult {}", result.id),
            })?;

        match result.vote_type {
            VoteType::For => legislator.num_supported_bills += 1,
            VoteType::Against => legislator.num_opposed_bills += 1,
            VoteType::Unrecognized(_) => {}
        }
    }

    info!(
        legislators = legislators.len(),
        vote_results = vote_results.len(),
        "tallied legislator votes"
    );
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RecordId;

    fn legislators(entries: &[(RecordId, &str)]) -> Registry<Legislator> {
        entries
            .iter()
            .map(|(id, name)| (*id, Legislator::new(*id, *name)))
            .collect()
    }

    fn bills(entries: &[(RecordId, &str, RecordId)]) -> Registry<Bill> {
        entries
            .iter()
            .map(|(id, title, sponsor)| (*id, Bill::new(*id, *title, *sponsor)))
            .collect()
    }

    fn votes(entries: &[(RecordId, RecordId)]) -> Registry<Vote> {
        entries.iter().map(|(id, bill)| (*id, Vote::new(*id, *bill))).collect()
    }

    fn results(entries: &[(RecordId, RecordId, RecordId, VoteType)]) -> Registry<VoteResult> {
        entries
            .iter()
            .map(|(id, legislator, vote, kind)| (*id, VoteResult::new(*id, *legislator, *vote, *kind)))
            .collect()
    }

    fn sample_results() -> Registry<VoteResult> {
        results(&[
            (301, 1, 201, VoteType::For),
            (302, 2, 202, VoteType::Against),
            (303, 3, 201, VoteType::Against),
        ])
    }

    // ------------------------------------------------------------------------
    // Sponsor assignment
    // ------------------------------------------------------------------------

    #[test]
    fn test_assign_bill_primary_sponsors() {
        let legislators = legislators(&[(1, "Alice"), (2, "Bob")]);
        let mut bills = bills(&[(101, "Education Reform Act", 1), (102, "Healthcare Reform Act", 2)]);

        assign_bill_primary_sponsors(&mut bills, &legislators);

        assert_eq!(bills.get(101).unwrap().primary_sponsor, "Alice");
        assert_eq!(bills.get(102).unwrap().primary_sponsor, "Bob");
    }

    #[test]
    fn test_unmatched_sponsor_stays_unknown() {
        let legislators = legislators(&[(1, "Alice"), (2, "Bob")]);
        let mut bills = bills(&[(101, "Education Reform Act", 1), (102, "Healthcare Reform Act", 3)]);

        assign_bill_primary_sponsors(&mut bills, &legislators);

        assert_eq!(bills.get(101).unwrap().primary_sponsor, "Alice");
        assert_eq!(bills.get(102).unwrap().primary_sponsor, "Unknown");
    }

    #[test]
    fn test_unmatched_sponsor_keeps_prior_value() {
        let legislators = legislators(&[(1, "Alice")]);
        let mut bills = bills(&[(101, "Education Reform Act", 9)]);
        bills.get_mut(101).unwrap().primary_sponsor = "Carried Over".to_string();

        assign_bill_primary_sponsors(&mut bills, &legislators);

        assert_eq!(bills.get(101).unwrap().primary_sponsor, "Carried Over");
    }

    // ------------------------------------------------------------------------
    // Bill vote tally
    // ------------------------------------------------------------------------

    #[test]
    fn test_assign_bill_vote_counts() {
        let mut bills = bills(&[(101, "Education Reform Act", 1), (102, "Healthcare Reform Act", 2)]);
        let votes = votes(&[(201, 101), (202, 102)]);

        assign_bill_vote_counts(&mut bills, &votes, &sample_results()).unwrap();

        let education = bills.get(101).unwrap();
        assert_eq!((education.supporter_count, education.opposer_count), (1, 1));
        let healthcare = bills.get(102).unwrap();
        assert_eq!((healthcare.supporter_count, healthcare.opposer_count), (0, 1));
    }

    #[test]
    fn test_no_votes_for_bill() {
        let mut bills = bills(&[(101, "Education Reform Act", 1)]);
        let votes = votes(&[(201, 101)]);

        assign_bill_vote_counts(&mut bills, &votes, &Registry::new()).unwrap();

        let bill = bills.get(101).unwrap();
        assert_eq!((bill.supporter_count, bill.opposer_count), (0, 0));
    }

    #[test]
    fn test_bill_counts_independent_of_result_order() {
        let votes = votes(&[(201, 101), (202, 102)]);
        let forward = sample_results();
        let reversed: Registry<VoteResult> = forward
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|(id, result)| (id, result.clone()))
            .collect();

        let mut a = bills(&[(101, "Education Reform Act", 1), (102, "Healthcare Reform Act", 2)]);
        let mut b = a.clone();
        assign_bill_vote_counts(&mut a, &votes, &forward).unwrap();
        assign_bill_vote_counts(&mut b, &votes, &reversed).unwrap();

        assert_eq!(a.values().collect::<Vec<_>>(), b.values().collect::<Vec<_>>());
    }

    #[test]
    fn test_bill_tally_accumulates_on_rerun() {
        let mut bills = bills(&[(101, "Education Reform Act", 1), (102, "Healthcare Reform Act", 2)]);
        let votes = votes(&[(201, 101), (202, 102)]);
        let results = sample_results();

        assign_bill_vote_counts(&mut bills, &votes, &results).unwrap();
        assign_bill_vote_counts(&mut bills, &votes, &results).unwrap();

        assert_eq!(bills.get(101).unwrap().supporter_count, 2);
        assert_eq!(bills.get(102).unwrap().opposer_count, 2);
    }

    #[test]
    fn test_unrecognized_vote_type_is_ignored() {
        let mut bills = bills(&[(101, "Education Reform Act", 1)]);
        let votes = votes(&[(201, 101)]);
        let results = results(&[(301, 1, 201, VoteType::Unrecognized(3))]);

        assign_bill_vote_counts(&mut bills, &votes, &results).unwrap();

        let bill = bills.get(101).unwrap();
        assert_eq!((bill.supporter_count, bill.opposer_count), (0, 0));
    }

    #[test]
    fn test_missing_vote_is_not_found() {
        let mut bills = bills(&[(101, "Education Reform Act", 1)]);
        let votes = votes(&[(201, 101)]);
        let results = results(&[(301, 1, 999, VoteType::For)]);

        let err = assign_bill_vote_counts(&mut bills, &votes, &results).unwrap_err();

        assert_eq!(
            err,
            TallyError::NotFound {
                entity: "Vote",
                id: 999,
                referenced_by: "VoteResult 301".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_bill_is_not_found() {
        let mut bills = bills(&[(101, "Education Reform Act", 1)]);
        let votes = votes(&[(201, 555)]);
        let results = results(&[(301, 1, 201, VoteType::Against)]);

        let err = assign_bill_vote_counts(&mut bills, &votes, &results).unwrap_err();

        assert!(matches!(err, TallyError::NotFound { entity: "Bill", id: 555, .. }));
    }

    // ------------------------------------------------------------------------
    // Legislator vote tally
    // ------------------------------------------------------------------------

    #[test]
    fn test_basic_legislator_vote_counts() {
        let mut legislators = legislators(&[(1, "Alice"), (2, "Bob")]);
        let results = results(&[
            (101, 1, 201, VoteType::For),
            (102, 1, 202, VoteType::Against),
            (103, 2, 203, VoteType::For),
        ]);

        assign_legislator_vote_counts(&mut legislators, &results).unwrap();

        let alice = legislators.get(1).unwrap();
        assert_eq!((alice.num_supported_bills, alice.num_opposed_bills), (1, 1));
        let bob = legislators.get(2).unwrap();
        assert_eq!((bob.num_supported_bills, bob.num_opposed_bills), (1, 0));
    }

    #[test]
    fn test_legislator_without_votes() {
        let mut legislators = legislators(&[(1, "Charlie")]);

        assign_legislator_vote_counts(&mut legislators, &Registry::new()).unwrap();

        let charlie = legislators.get(1).unwrap();
        assert_eq!((charlie.num_supported_bills, charlie.num_opposed_bills), (0, 0));
    }

    #[test]
    fn test_multiple_votes_same_legislator() {
        let mut legislators = legislators(&[(1, "Dana")]);
        let results = results(&[
            (101, 1, 201, VoteType::For),
            (102, 1, 202, VoteType::For),
            (103, 1, 203, VoteType::Against),
        ]);

        assign_legislator_vote_counts(&mut legislators, &results).unwrap();

        let dana = legislators.get(1).unwrap();
        assert_eq!((dana.num_supported_bills, dana.num_opposed_bills), (2, 1));
    }

    #[test]
    fn test_same_bill_twice_counts_twice() {
        let mut legislators = legislators(&[(1, "Dana")]);
        let results = results(&[(101, 1, 201, VoteType::For), (102, 1, 201, VoteType::For)]);

        assign_legislator_vote_counts(&mut legislators, &results).unwrap();

        assert_eq!(legislators.get(1).unwrap().num_supported_bills, 2);
    }

    #[test]
    fn test_legislator_tally_ignores_unrecognized_vote_type() {
        let mut legislators = legislators(&[(1, "Alice")]);
        let results = results(&[(301, 1, 201, VoteType::Unrecognized(3))]);

        assign_legislator_vote_counts(&mut legislators, &results).unwrap();

        let alice = legislators.get(1).unwrap();
        assert_eq!((alice.num_supported_bills, alice.num_opposed_bills), (0, 0));
    }

    #[test]
    fn test_legislator_counts_independent_of_result_order() {
        let forward = results(&[
            (301, 1, 201, VoteType::For),
            (302, 2, 202, VoteType::Against),
            (303, 2, 201, VoteType::Against),
            (304, 1, 202, VoteType::For),
        ]);
        let reversed: Registry<VoteResult> = forward
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|(id, result)| (id, result.clone()))
            .collect();

        let mut a = legislators(&[(1, "Alice"), (2, "Bob")]);
        let mut b = a.clone();
        assign_legislator_vote_counts(&mut a, &forward).unwrap();
        assign_legislator_vote_counts(&mut b, &reversed).unwrap();

        assert_eq!(a.values().collect::<Vec<_>>(), b.values().collect::<Vec<_>>());
        assert_eq!(a.get(2).unwrap().num_opposed_bills, 2);
    }

    #[test]
    fn test_missing_legislator_is_not_found() {
        let mut legislators = legislators(&[(1, "Alice"), (2, "Bob")]);

        let err = assign_legislator_vote_counts(&mut legislators, &sample_results()).unwrap_err();

        assert!(matches!(err, TallyError::NotFound { entity: "Legislator", id: 3, .. }));
    }
}
