use proptest::prelude::*;

use oracle_types::{Record, RecordHash};

fn any_record() -> impl Strategy<Value = Record> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u128>(),
        any::<u128>(),
        any::<u128>(),
        any::<u128>(),
    )
        .prop_map(|(s, e, nw, w, p, r, b, d)| Record {
            update_start_block: s,
            update_end_block: e,
            total_validators_not_withdrawable: nw,
            total_validators_withdrawable: w,
            window_withdrawn_principal_amount: p,
            window_withdrawn_reward_amount: r,
            total_validator_balance: b,
            total_processed_deposit: d,
        })
}

proptest! {
    /// RecordHash::is_zero is true only for all-zero bytes.
    #[test]
    fn record_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = RecordHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// Canonical encoding is injective on records.
    #[test]
    fn canonical_bytes_distinguish_records(a in any_record(), b in any_record()) {
        prop_assert_eq!(a == b, a.canonical_bytes() == b.canonical_bytes());
    }

    /// Records survive JSON with full 128-bit amounts.
    #[test]
    fn record_json_preserves_amounts(r in any_record()) {
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, r);
    }

    /// Total validator count never overflows.
    #[test]
    fn total_validators_is_exact(r in any_record()) {
        prop_assert_eq!(
            r.total_validators(),
            r.total_validators_withdrawable as u128 + r.total_validators_not_withdrawable as u128
        );
    }
}
