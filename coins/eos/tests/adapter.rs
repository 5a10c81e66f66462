//! Integration tests for coinbridge_eos

use coinbridge_eos::{
    transaction_record, AssetId, EosAdapter, EosAdapterConfig, EosKit, EosKitError, EosTransaction,
    InMemoryEosKit, KitSyncState, Quantity,
};
use coinbridge_testing::{fixtures, positive_quantity, valid_eos_account, EdgeCaseAccounts};
use coinbridge_traits::prelude::*;
use coinbridge_traits::ParameterMap;
use futures::StreamExt;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

const ACCOUNT: &str = "bob";

fn system_token() -> AssetId {
    AssetId::new("eosio.token", "EOS")
}

fn transfer(action_sequence: u64, from: &str, to: &str) -> EosTransaction {
    EosTransaction {
        id: format!("tx{action_sequence:03}"),
        action_sequence,
        block_number: Some(1_000 + action_sequence),
        from: from.to_string(),
        to: to.to_string(),
        quantity: Quantity {
            amount: Decimal::new(12_500, 4),
            symbol: "EOS".to_string(),
        },
        memo: None,
        date: fixtures::timestamp(action_sequence as i64),
    }
}

fn setup() -> (Arc<InMemoryEosKit>, EosAdapter) {
    let kit = Arc::new(InMemoryEosKit::new(ACCOUNT));
    let adapter = EosAdapter::new(
        fixtures::eos_wallet(),
        kit.clone(),
        EosAdapterConfig::default(),
    );
    (kit, adapter)
}

mod address_tests {
    use super::*;

    #[test]
    fn test_valid_accounts() {
        let (_, adapter) = setup();
        assert!(adapter.validate_address("eosio").is_ok());
        assert!(adapter.validate_address("eosio.token").is_ok());
    }

    #[test]
    fn test_uppercase_is_invalid_account() {
        let (_, adapter) = setup();
        let err = adapter.validate_address("EOSIO").unwrap_err();
        assert!(matches!(err, AdapterError::InvalidAccount { .. }));
        assert_eq!(err.code(), coinbridge_error::ErrorCode::InvalidAccount);
    }

    #[test]
    fn test_empty_and_overlong() {
        let (_, adapter) = setup();
        assert!(adapter.validate_address("").is_err());
        assert!(adapter.validate_address("abcdefghijklm").is_err());
        assert!(adapter.validate_address(EdgeCaseAccounts::MAX_LENGTH).is_ok());
    }

    proptest! {
        #[test]
        fn test_generated_names_validate(name in valid_eos_account()) {
            let (_, adapter) = setup();
            prop_assert!(adapter.validate_address(&name).is_ok());
        }
    }
}

mod record_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_direction_follows_sender(amount in positive_quantity(), outgoing in any::<bool>()) {
            let (from, to) = if outgoing { (ACCOUNT, "alice") } else { ("alice", ACCOUNT) };
            let mut tx = transfer(1, from, to);
            tx.quantity.amount = amount;

            let record = transaction_record(&tx, ACCOUNT);
            prop_assert_eq!(record.from[0].mine, outgoing);
            if outgoing {
                prop_assert!(record.amount < Decimal::ZERO);
            } else {
                prop_assert!(record.amount > Decimal::ZERO);
            }
            prop_assert_eq!(record.amount.abs(), amount);
        }
    }
}

mod history_tests {
    use super::*;

    fn seeded() -> (Arc<InMemoryEosKit>, EosAdapter) {
        let (kit, adapter) = setup();
        let history = (0..25)
            .map(|seq| {
                if seq % 2 == 0 {
                    transfer(seq, "alice", ACCOUNT)
                } else {
                    transfer(seq, ACCOUNT, "alice")
                }
            })
            .collect();
        kit.set_transactions(&system_token(), history);
        (kit, adapter)
    }

    #[tokio::test]
    async fn test_first_page_is_newest_first() {
        let (_, adapter) = seeded();

        let page = adapter.transactions(None, 10).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].inter_transaction_index, 24);
        assert!(page
            .windows(2)
            .all(|pair| pair[0].inter_transaction_index > pair[1].inter_transaction_index));
    }

    #[tokio::test]
    async fn test_cursor_returns_strictly_older() {
        let (_, adapter) = seeded();

        let first = adapter.transactions(None, 10).await.unwrap();
        let cursor = first[4].cursor();

        let older = adapter.transactions(Some(cursor.clone()), 10).await.unwrap();
        assert!(!older.is_empty() && older.len() <= 10);
        assert!(older
            .iter()
            .all(|record| record.inter_transaction_index < cursor.inter_transaction_index));
    }

    #[tokio::test]
    async fn test_last_page_is_short() {
        let (_, adapter) = seeded();

        let page = adapter
            .transactions(Some(TransactionCursor::new("tx003", 3)), 10)
            .await
            .unwrap();
        let indexes: Vec<u64> = page.iter().map(|r| r.inter_transaction_index).collect();
        assert_eq!(indexes, vec![2, 1, 0]);
    }

    #[tokio::test]
    async fn test_overlapping_pages_match_sequential() {
        let (_, adapter) = seeded();

        let first = adapter.transactions(None, 10).await.unwrap();
        let middle = first[4].cursor();
        let tail = first[9].cursor();
        let expected = (
            first.clone(),
            adapter.transactions(Some(middle.clone()), 10).await.unwrap(),
            adapter.transactions(Some(tail.clone()), 5).await.unwrap(),
        );

        let (newest, older, oldest) = tokio::join!(
            adapter.transactions(None, 10),
            adapter.transactions(Some(middle), 10),
            adapter.transactions(Some(tail), 5),
        );
        assert_eq!(
            (newest.unwrap(), older.unwrap(), oldest.unwrap()),
            expected
        );

        let pages = futures::future::join_all((0..4).map(|_| adapter.transactions(None, 10))).await;
        for page in pages {
            assert_eq!(page.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn test_confirmations_use_irreversible_height() {
        let (kit, adapter) = seeded();
        kit.set_irreversible_block_height(1_000);

        assert_eq!(adapter.last_block_height(), Some(1_330));
        let page = adapter.transactions(None, 1).await.unwrap();
        assert_eq!(page[0].block_height, Some(1_024));
        assert_eq!(page[0].confirmations(adapter.last_block_height()), 307);
    }
}

mod send_tests {
    use super::*;

    fn funded() -> (Arc<InMemoryEosKit>, EosAdapter) {
        let (kit, adapter) = setup();
        kit.set_balance(&system_token(), Decimal::new(100, 0));
        (kit, adapter)
    }

    #[tokio::test]
    async fn test_missing_address_never_reaches_kit() {
        let (kit, adapter) = funded();
        let fields: ParameterMap = [("amount".to_string(), json!("1.0"))].into_iter().collect();

        let err = adapter.send_fields(&fields).await.unwrap_err();
        assert!(matches!(err, AdapterError::WrongParameters(_)));
        assert_eq!(kit.send_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_recipient_never_reaches_kit() {
        let (kit, adapter) = funded();

        let err = adapter
            .send(SendParameters::new(Decimal::ONE, "Not.Valid"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidAccount { .. }));
        assert_eq!(kit.send_count(), 0);
    }

    #[tokio::test]
    async fn test_too_many_decimals() {
        let (kit, adapter) = funded();

        let err = adapter
            .send(SendParameters::new(Decimal::new(1, 5), "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::WrongParameters(_)));
        assert_eq!(kit.send_count(), 0);
    }

    #[tokio::test]
    async fn test_send_fields_uses_default_memo() {
        let (kit, adapter) = funded();
        let fields: ParameterMap = [
            ("amount".to_string(), json!(2.5)),
            ("address".to_string(), json!("alice")),
        ]
        .into_iter()
        .collect();

        adapter.send_fields(&fields).await.unwrap();

        assert_eq!(kit.send_count(), 1);
        assert_eq!(adapter.balance(), Decimal::new(975, 1));
        let sent = adapter.transactions(None, 1).await.unwrap();
        assert_eq!(sent[0].amount, Decimal::new(-25, 1));
        assert!(sent[0].is_outgoing());
        assert_eq!(
            kit.register("eosio.token", "EOS").transactions.borrow()[0].memo.as_deref(),
            Some("from coinbridge")
        );
    }

    #[tokio::test]
    async fn test_explicit_memo() {
        let (kit, adapter) = funded();

        adapter
            .send(SendParameters::new(Decimal::ONE, "alice").with_memo("rent"))
            .await
            .unwrap();

        let asset = kit.register("eosio.token", "EOS");
        assert_eq!(asset.transactions.borrow()[0].memo.as_deref(), Some("rent"));
    }

    #[tokio::test]
    async fn test_kit_failure_passes_through() {
        let (kit, adapter) = funded();
        kit.set_send_failure(Some(EosKitError::Rpc("node unavailable".to_string())));

        let err = adapter
            .send(SendParameters::new(Decimal::ONE, "alice"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), coinbridge_error::ErrorCode::Chain);
        match err {
            AdapterError::Chain(inner) => assert_eq!(
                inner.downcast_ref::<EosKitError>(),
                Some(&EosKitError::Rpc("node unavailable".to_string()))
            ),
            other => panic!("expected chain error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_insufficient_amount() {
        let (_, adapter) = funded();

        assert!(adapter
            .validate(&SendParameters::new(Decimal::new(100, 0), "alice"))
            .is_empty());

        let errors = adapter.validate(&SendParameters::new(Decimal::new(101, 0), "alice"));
        assert_eq!(
            errors,
            vec![SendStateError::InsufficientAmount {
                available: Decimal::new(100, 0)
            }]
        );
    }

    #[test]
    fn test_fees_are_zero() {
        let (_, adapter) = funded();
        let params = FeeParameters::new().with_amount(Decimal::ONE);

        assert_eq!(adapter.fee(&params), Decimal::ZERO);
        assert_eq!(adapter.fee_rate(FeeRatePriority::High), 0);
        assert_eq!(adapter.available_balance(&params), Decimal::new(100, 0));
    }
}

mod stream_tests {
    use super::*;

    #[tokio::test]
    async fn test_balance_stream_is_hot() {
        let (kit, adapter) = setup();
        kit.set_balance(&system_token(), Decimal::TEN);

        let mut updates = adapter.balance_updated();
        assert_eq!(updates.next().await, Some(()));
        assert_eq!(adapter.balance(), Decimal::TEN);

        kit.set_balance(&system_token(), Decimal::ONE);
        assert_eq!(updates.next().await, Some(()));
        assert_eq!(adapter.balance(), Decimal::ONE);
    }

    #[tokio::test]
    async fn test_state_mapping() {
        let (kit, adapter) = setup();
        assert_eq!(adapter.state(), AdapterState::NotSynced);

        let mut updates = adapter.state_updated();
        assert_eq!(updates.next().await, Some(()));

        kit.set_sync_state(&system_token(), KitSyncState::Syncing);
        assert_eq!(updates.next().await, Some(()));
        assert_eq!(
            adapter.state(),
            AdapterState::Syncing {
                progress: 50,
                last_block_date: None
            }
        );

        kit.set_sync_state(&system_token(), KitSyncState::Synced);
        assert_eq!(updates.next().await, Some(()));
        assert_eq!(adapter.state(), AdapterState::Synced);
    }

    #[tokio::test]
    async fn test_last_block_height_stream() {
        let (kit, adapter) = setup();
        assert_eq!(adapter.last_block_height(), None);

        let mut updates = adapter.last_block_height_updated();
        assert_eq!(updates.next().await, Some(()));

        kit.set_irreversible_block_height(5);
        assert_eq!(updates.next().await, Some(()));
        assert_eq!(adapter.last_block_height(), Some(335));
    }

    #[tokio::test]
    async fn test_transaction_stream_emits_full_snapshots() {
        let (kit, adapter) = setup();
        kit.set_transactions(&system_token(), vec![transfer(0, "alice", ACCOUNT)]);

        let mut records = adapter.transaction_records();
        let first = records.next().await.unwrap();
        assert_eq!(first.len(), 1);

        kit.push_transaction(&system_token(), transfer(1, ACCOUNT, "alice"));
        let second = records.next().await.unwrap();
        assert_eq!(second.len(), 2);
        assert!(second[0].is_outgoing());
        assert_eq!(second[1].amount, Decimal::new(12_500, 4));
    }

    #[tokio::test]
    async fn test_stream_outlives_adapter() {
        let (kit, adapter) = setup();
        let mut records = adapter.transaction_records();
        drop(adapter);

        assert_eq!(records.next().await, Some(Vec::new()));
        kit.push_transaction(&system_token(), transfer(0, "alice", ACCOUNT));
        assert_eq!(records.next().await.map(|r| r.len()), Some(1));
    }
}

mod payment_tests {
    use super::*;

    #[test]
    fn test_uri_with_amount() {
        let (_, adapter) = setup();

        let payment = adapter.parse_payment_address("eos:eosio?amount=1.5");
        assert_eq!(payment.address, "eosio");
        assert_eq!(payment.amount, Some(Decimal::new(15, 1)));
        assert!(payment.is_valid());
    }

    #[test]
    fn test_bad_address_carries_error() {
        let (_, adapter) = setup();

        let payment = adapter.parse_payment_address("eos:EOSIO");
        assert!(matches!(
            payment.error,
            Some(AdapterError::InvalidAccount { .. })
        ));
    }

    #[test]
    fn test_plain_account() {
        let (_, adapter) = setup();

        let payment = adapter.parse_payment_address(" eosio.token ");
        assert_eq!(payment.address, "eosio.token");
        assert_eq!(payment.amount, None);
        assert!(payment.is_valid());
    }
}

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let (_, adapter) = setup();

        assert_eq!(adapter.receive_address(), ACCOUNT);
        assert_eq!(adapter.decimals(), 4);
        assert_eq!(adapter.confirmations_threshold(), 330);
        assert!(adapter.refreshable());
        assert_eq!(adapter.wallet(), &fixtures::eos_wallet());
        assert!(adapter.debug_info().contains("eosio.token"));
    }

    #[test]
    fn test_lifecycle_hooks_are_noops() {
        let (kit, adapter) = setup();
        kit.set_balance(&system_token(), Decimal::ONE);

        adapter.start();
        adapter.refresh();
        adapter.stop();

        assert_eq!(adapter.balance(), Decimal::ONE);
    }
}
