//! Example: Print balances, positions and open orders.
//!
//! Reads `BITHUMB_ACCESS_KEY` and `BITHUMB_SECRET_KEY` from the environment.
//!
//! Run with: RUST_LOG=bithumb_api_client=debug cargo run --example account_summary

use std::sync::Arc;

use bithumb_api_client::auth::EnvCredentials;
use bithumb_api_client::rest::BithumbRestClient;
use bithumb_api_client::rest::private::OrderQuery;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = EnvCredentials::try_from_env()
        .ok_or("BITHUMB_ACCESS_KEY and BITHUMB_SECRET_KEY must be set")?;
    let client = BithumbRestClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    let balances = client.get_balances().await?;
    if let Some(limit) = &balances.rate_limit {
        println!(
            "Rate limit [{}]: {}/min, {}/sec left",
            limit.group, limit.minute_limit, limit.second_limit
        );
    }
    for balance in &balances.body {
        println!(
            "{:>6} available {} locked {} avg {}",
            balance.currency, balance.balance, balance.locked, balance.avg_buy_price
        );
    }

    let total = client.get_amount("ALL").await?.into_body();
    println!("Position value: {} KRW", total);

    let orders = client.get_order(OrderQuery::by_market("KRW-BTC")).await?;
    for order in orders.into_body().into_orders() {
        println!("{} {:?} {:?} @ {:?}", order.uuid, order.side, order.volume, order.price);
    }

    Ok(())
}
