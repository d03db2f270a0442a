use std::sync::Arc;

use proptest::prelude::*;

use oracle_ledger::{sanity_check, Collaborators, IntakeOutcome, LedgerError, RecordStore, StoreConfig};
use oracle_nullables::{NullAccessControl, NullChain, NullPauser, NullSettlement, NullValidatorRegistry};
use oracle_types::{Address, BoundCheck, BoundsParams, EventBus, Record, WEI_PER_ETH};

const ETH: u128 = WEI_PER_ETH;
/// Max gain over the shortest allowed period (10 blocks) on a 1024 ETH baseline.
const SAFE_GAIN: u128 = 1_948_160_000_000_000;

fn params() -> BoundsParams {
    BoundsParams {
        min_report_size_blocks: 10,
        ..BoundsParams::default()
    }
}

fn genesis() -> Record {
    Record {
        update_start_block: 1,
        update_end_block: 100,
        total_validators_not_withdrawable: 32,
        total_validators_withdrawable: 0,
        window_withdrawn_principal_amount: 0,
        window_withdrawn_reward_amount: 0,
        total_validator_balance: 1024 * ETH,
        total_processed_deposit: 1024 * ETH,
    }
}

fn store() -> RecordStore {
    let updater = Address::new("0xa99");
    let collaborators = Collaborators {
        access: Arc::new(NullAccessControl::new()),
        registry: Arc::new(NullValidatorRegistry::new(u128::MAX, u64::MAX)),
        settlement: Arc::new(NullSettlement::new()),
        pauser: Arc::new(NullPauser::new()),
        chain: Arc::new(NullChain::new(u64::MAX / 2)),
    };
    let config = StoreConfig {
        bounds: params(),
        ..StoreConfig::new(updater)
    };
    RecordStore::new(genesis(), config, collaborators, Arc::new(EventBus::new())).unwrap()
}

/// Successor of `prev` covering `len` blocks whose rewards were withdrawn.
fn successor(prev: &Record, len: u64, reward: u128) -> Record {
    Record {
        update_start_block: prev.update_end_block + 1,
        update_end_block: prev.update_end_block + len,
        window_withdrawn_reward_amount: reward,
        window_withdrawn_principal_amount: 0,
        ..prev.clone()
    }
}

proptest! {
    /// Every accepted sequence is a gap-free partition of block heights.
    #[test]
    fn accepted_sequence_is_contiguous(
        steps in prop::collection::vec((10u64..500, 0u128..=SAFE_GAIN), 1..20)
    ) {
        let mut store = store();
        let updater = Address::new("0xa99");
        for (len, reward) in steps.iter().copied() {
            let next = successor(store.latest_record(), len, reward);
            let before = store.records_number();
            let outcome = store.receive_record(&updater, next).unwrap();
            prop_assert_eq!(outcome, IntakeOutcome::Accepted { index: before });
            prop_assert_eq!(store.records_number(), before + 1);
        }
        for pair in store.records().windows(2) {
            prop_assert_eq!(pair[1].update_start_block, pair[0].update_end_block + 1);
        }
    }

    /// A start block other than the successor of the tail is always refused.
    #[test]
    fn gaps_and_overlaps_are_refused(offset in 1u64..1_000, backwards in any::<bool>()) {
        let mut store = store();
        let mut next = successor(&genesis(), 50, 0);
        if backwards {
            next.update_start_block -= offset.min(100);
        } else {
            next.update_start_block += offset;
            next.update_end_block += offset;
        }
        let refused = matches!(
            store.receive_record(&Address::new("0xa99"), next),
            Err(LedgerError::Discontinuous { .. })
        );
        prop_assert!(refused);
        prop_assert_eq!(store.records_number(), 1);
    }

    /// Consensus-layer gains inside the band always pass the bounds.
    #[test]
    fn plausible_gain_is_admitted(len in 10u64..500, reward in 0u128..=SAFE_GAIN) {
        let next = successor(&genesis(), len, reward);
        prop_assert_eq!(sanity_check(&genesis(), &next, &params()), Ok(()));
    }

    /// Any drop in processed deposits is caught by the deposit check.
    #[test]
    fn shrinking_deposit_is_flagged(drop in 1u128..=1024 * ETH) {
        let mut next = successor(&genesis(), 50, 0);
        next.total_processed_deposit -= drop;
        let violation = sanity_check(&genesis(), &next, &params()).unwrap_err();
        prop_assert_eq!(violation.check, BoundCheck::ProcessedDepositDecreased);
        prop_assert_eq!(violation.observed, 1024 * ETH - drop);
    }
}
