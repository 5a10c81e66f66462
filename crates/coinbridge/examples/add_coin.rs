//! Add Coin Example
//!
//! Walks through activating coins for an imported account: an EOS token
//! that is ready at once, a transfer through its adapter, and a coin no
//! factory serves.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run -p coinbridge --example add_coin --features eos
//! ```

use coinbridge::eos::{AssetId, EosAdapterFactory, InMemoryEosKit, KitSyncState};
use coinbridge::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let account = Account::new("demo", "Imported", AccountOrigin::Restored);
    let eos = Coin::new(
        "EOS",
        "EOS",
        4,
        CoinType::Eos {
            token: "eosio.token".to_string(),
            symbol: "EOS".to_string(),
        },
    );

    let kit = Arc::new(InMemoryEosKit::new("demoaccount1"));
    let asset = AssetId::new("eosio.token", "EOS");
    kit.set_balance(&asset, Decimal::new(250_000, 4));
    kit.set_sync_state(&asset, KitSyncState::Synced);
    kit.set_irreversible_block_height(312_000_000);

    let service = Arc::new(RestoreSettingsService::new(Arc::new(
        InMemoryRestoreSettingsManager::new(),
    )));
    let activator = CoinActivator::new(service)
        .with_factory(Arc::new(EosAdapterFactory::new().with_kit(account.id.clone(), kit)));

    println!("━━━ Adding {} ━━━\n", eos);

    let adapter = match activator.activate(&eos, &account)? {
        Activation::Active(adapter) => adapter,
        Activation::AwaitingInput(request) => {
            println!("Needs {} first", request.setting_type);
            return Ok(());
        }
    };

    println!("📬 Receive address: {}", adapter.receive_address());
    println!("💰 Balance:         {} EOS", adapter.balance());
    println!("🔗 Last block:      {:?}", adapter.last_block_height());
    println!("📶 State:           {:?}\n", adapter.state());

    let payment = adapter.parse_payment_address("eos:eosio?amount=1.5");
    let params = SendParameters::new(payment.amount.unwrap_or(Decimal::ONE), payment.address)
        .with_memo("demo transfer");

    let problems = adapter.validate(&params);
    if problems.is_empty() {
        adapter.send(params).await?;
        println!("✅ Sent, balance now {} EOS", adapter.balance());
    } else {
        println!("❌ Cannot send: {:?}", problems);
    }

    for record in adapter.transactions(None, 10).await? {
        println!(
            "   #{} {} EOS at {}",
            record.inter_transaction_index, record.amount, record.date
        );
    }
    println!();

    let zcash = Coin::new("Zcash", "ZEC", 8, CoinType::Zcash);
    match activator.activate(&zcash, &account) {
        Err(err) => println!("⚠️  {} ({:?})", err, err.code()),
        Ok(activation) => println!("Unexpected: {:?}", activation),
    }

    Ok(())
}
