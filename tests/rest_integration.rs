use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use rust_decimal::Decimal;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use bithumb_api_client::auth::{Claims, StaticCredentials, query_hash};
use bithumb_api_client::error::{ApiErrorKind, ErrorKind};
use bithumb_api_client::rate_limit::RateLimitInfo;
use bithumb_api_client::rest::private::{
    OrderListFilter, OrderLookup, OrderQuery, WithdrawCoinRequest,
};
use bithumb_api_client::rest::{BithumbClient, BithumbRestClient, RetryPolicy};
use bithumb_api_client::types::{OrdType, OrderState, Side};
use bithumb_api_client::BithumbError;

const SECRET: &str = "test_secret";

fn build_client(server: &MockServer) -> BithumbRestClient {
    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET));
    BithumbRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(10)))
        .build()
}

fn token_claims(request: &Request) -> Claims {
    let header = request
        .headers
        .get("authorization")
        .expect("authorization header")
        .to_str()
        .unwrap();
    let token = header.strip_prefix("Bearer ").expect("bearer token");
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = false;
    decode::<Claims>(token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
        .unwrap()
        .claims
}

fn accounts_body() -> serde_json::Value {
    serde_json::json!([
        {
            "currency": "KRW",
            "balance": "1000000.0",
            "locked": "250000.0",
            "avg_buy_price": "0",
            "avg_buy_price_modified": false,
            "unit_currency": "KRW"
        },
        {
            "currency": "BTC",
            "balance": "0.5",
            "locked": "0.1",
            "avg_buy_price": "50000000",
            "avg_buy_price_modified": false,
            "unit_currency": "KRW"
        },
        {
            "currency": "XRP",
            "balance": "100",
            "locked": "0",
            "avg_buy_price": "700",
            "avg_buy_price_modified": true,
            "unit_currency": "KRW"
        }
    ])
}

fn order_body(uuid: &str, side: &str, ord_type: &str) -> serde_json::Value {
    serde_json::json!({
        "uuid": uuid,
        "side": side,
        "ord_type": ord_type,
        "price": "2000000",
        "state": "wait",
        "market": "KRW-BTC",
        "created_at": "2024-01-01T00:00:00+09:00",
        "volume": "0.001",
        "remaining_volume": "0.001",
        "reserved_fee": "5",
        "remaining_fee": "5",
        "paid_fee": "0",
        "locked": "2005",
        "executed_volume": "0",
        "trades_count": 0
    })
}

async fn mount_accounts(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Remaining-Req", "group=default; min=899; sec=29")
                .set_body_json(accounts_body()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_balances_with_rate_limit() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;

    let client = build_client(&server);
    let response = client.get_balances().await.unwrap();

    assert_eq!(response.body.len(), 3);
    assert_eq!(response.body[1].currency, "BTC");
    assert_eq!(response.body[1].total(), "0.6".parse::<Decimal>().unwrap());
    assert!(response.body[2].avg_buy_price_modified);
    assert_eq!(
        response.rate_limit,
        Some(RateLimitInfo::new("default", 899, 29))
    );

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert!(request.url.query().is_none());
    assert!(request.headers.get("content-type").is_none());
    let claims = token_claims(request);
    assert_eq!(claims.access_key, "test_key");
    assert!(claims.query_hash.is_none());
    assert!(claims.query_hash_alg.is_none());
}

#[tokio::test]
async fn test_missing_rate_limit_header_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.get_balances().await.unwrap();
    assert!(response.body.is_empty());
    assert!(response.rate_limit.is_none());
}

#[tokio::test]
async fn test_balance_projections() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    let client = build_client(&server);

    let btc = client.get_balance("KRW-BTC").await.unwrap();
    assert_eq!(btc.body, "0.5".parse::<Decimal>().unwrap());
    assert_eq!(btc.rate_limit.unwrap().group, "default");

    assert_eq!(
        client.get_balance("BTC").await.unwrap().into_body(),
        "0.5".parse::<Decimal>().unwrap()
    );
    assert_eq!(
        client.get_balance_total("BTC").await.unwrap().into_body(),
        "0.6".parse::<Decimal>().unwrap()
    );
    assert_eq!(
        client.get_avg_buy_price("KRW-XRP").await.unwrap().into_body(),
        Decimal::from(700)
    );
}

#[tokio::test]
async fn test_absent_currency_reports_zero() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    let client = build_client(&server);

    assert_eq!(client.get_balance("ETH").await.unwrap().into_body(), Decimal::ZERO);
    assert_eq!(client.get_balance_total("KRW-ETH").await.unwrap().into_body(), Decimal::ZERO);
    assert_eq!(client.get_avg_buy_price("ETH").await.unwrap().into_body(), Decimal::ZERO);
    assert_eq!(client.get_amount("ETH").await.unwrap().into_body(), Decimal::ZERO);
}

#[tokio::test]
async fn test_get_amount() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    let client = build_client(&server);

    assert_eq!(
        client.get_amount("KRW-BTC").await.unwrap().into_body(),
        Decimal::from(30_000_000)
    );
    // KRW is excluded; 50_000_000 * 0.6 + 700 * 100
    assert_eq!(
        client.get_amount("ALL").await.unwrap().into_body(),
        Decimal::from(30_070_000)
    );
    assert_eq!(client.get_amount("KRW").await.unwrap().into_body(), Decimal::ZERO);
}

#[tokio::test]
async fn test_get_chance() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "bid_fee": "0.0025",
        "ask_fee": "0.0025",
        "maker_bid_fee": "0.0025",
        "maker_ask_fee": "0.0025",
        "market": {
            "id": "KRW-BTC",
            "name": "BTC/KRW",
            "order_types": ["limit"],
            "order_sides": ["ask", "bid"],
            "bid": {"currency": "KRW", "price_unit": null, "min_total": "5000"},
            "ask": {"currency": "BTC", "price_unit": null, "min_total": "5000"},
            "max_total": "1000000000",
            "state": "active"
        },
        "bid_account": accounts_body()[0],
        "ask_account": accounts_body()[1]
    });

    Mock::given(method("GET"))
        .and(path("/v1/orders/chance"))
        .and(query_param("market", "KRW-BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let chance = client.get_chance("KRW-BTC").await.unwrap().into_body();

    assert_eq!(chance.bid_fee, "0.0025".parse::<Decimal>().unwrap());
    assert_eq!(chance.market.id, "KRW-BTC");
    assert_eq!(chance.market.bid.min_total, Some(Decimal::from(5000)));
    assert!(chance.market.bid.price_unit.is_none());
    assert_eq!(chance.ask_account.currency, "BTC");

    let requests = server.received_requests().await.unwrap();
    let claims = token_claims(&requests[0]);
    assert_eq!(claims.query_hash.as_deref(), Some(query_hash("market=KRW-BTC").as_str()));
    assert_eq!(claims.query_hash_alg.as_deref(), Some("SHA512"));
}

#[tokio::test]
async fn test_limit_order_binds_body_to_query_hash() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(body_json(serde_json::json!({
            "market": "KRW-BTC",
            "side": "bid",
            "volume": "0.001",
            "price": "2000000",
            "ord_type": "limit"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(order_body("C0101-order", "bid", "limit")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = client
        .buy_limit_order("KRW-BTC", Decimal::from(2_000_000), Decimal::new(1, 3))
        .await
        .unwrap()
        .into_body();

    assert_eq!(order.uuid, "C0101-order");
    assert_eq!(order.side, Some(Side::Bid));
    assert_eq!(order.ord_type, Some(OrdType::Limit));
    assert_eq!(order.state, Some(OrderState::Wait));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert!(request.url.query().is_none());
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    let claims = token_claims(request);
    assert_eq!(
        claims.query_hash.as_deref(),
        Some(
            query_hash("market=KRW-BTC&side=bid&volume=0.001&price=2000000&ord_type=limit")
                .as_str()
        )
    );
}

#[tokio::test]
async fn test_sell_limit_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(body_json(serde_json::json!({
            "market": "KRW-XRP",
            "side": "ask",
            "volume": "10",
            "price": "705",
            "ord_type": "limit"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(order_body("sell-1", "ask", "limit")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = client
        .sell_limit_order("KRW-XRP", Decimal::from(705), Decimal::from(10))
        .await
        .unwrap();
    assert_eq!(order.body.side, Some(Side::Ask));
}

#[tokio::test]
async fn test_market_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(body_json(serde_json::json!({
            "market": "KRW-BTC",
            "side": "bid",
            "price": "10000",
            "ord_type": "price"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_body("buy-1", "bid", "price")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(body_json(serde_json::json!({
            "market": "KRW-BTC",
            "side": "ask",
            "volume": "0.01",
            "ord_type": "market"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(order_body("sell-1", "ask", "market")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let buy = client
        .place_market_buy("KRW-BTC", Decimal::from(10_000))
        .await
        .unwrap();
    assert_eq!(buy.body.ord_type, Some(OrdType::Price));

    let sell = client
        .place_market_sell("KRW-BTC", Decimal::new(1, 2))
        .await
        .unwrap();
    assert_eq!(sell.body.ord_type, Some(OrdType::Market));
}

#[tokio::test]
async fn test_cancel_order() {
    let server = MockServer::start().await;
    let mut body = order_body("C0101-order", "bid", "limit");
    body["state"] = serde_json::json!("cancel");

    Mock::given(method("DELETE"))
        .and(path("/v1/order"))
        .and(query_param("uuid", "C0101-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = client.cancel_order("C0101-order").await.unwrap().into_body();
    assert_eq!(order.state, Some(OrderState::Cancel));

    let requests = server.received_requests().await.unwrap();
    let claims = token_claims(&requests[0]);
    assert_eq!(claims.query_hash.as_deref(), Some(query_hash("uuid=C0101-order").as_str()));
}

#[tokio::test]
async fn test_get_order_by_id() {
    let server = MockServer::start().await;
    let mut body = order_body("a1b2-c3d4-e5f6-g7h8-i9j0", "bid", "limit");
    body["trades"] = serde_json::json!([{
        "market": "KRW-BTC",
        "uuid": "trade-1",
        "price": "2000000",
        "volume": "0.0005",
        "funds": "1000",
        "side": "bid",
        "created_at": "2024-01-01T00:00:01+09:00"
    }]);

    Mock::given(method("GET"))
        .and(path("/v1/order"))
        .and(query_param("uuid", "a1b2-c3d4-e5f6-g7h8-i9j0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let lookup = client
        .get_order(OrderQuery::infer("a1b2-c3d4-e5f6-g7h8-i9j0"))
        .await
        .unwrap()
        .into_body();

    match lookup {
        OrderLookup::Single(order) => {
            assert_eq!(order.trades.len(), 1);
            assert_eq!(order.trades[0].funds, Some(Decimal::from(1000)));
        }
        OrderLookup::List(_) => panic!("expected a single order"),
    }
}

#[tokio::test]
async fn test_get_order_by_market_uses_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/orders"))
        .and(query_param("market", "KRW-BTC"))
        .and(query_param("state", "wait"))
        .and(query_param("kind", "watch"))
        .and(query_param("limit", "100"))
        .and(query_param("page", "1"))
        .and(query_param("order_by", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            order_body("o-1", "bid", "limit"),
            order_body("o-2", "ask", "limit")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let orders = client
        .get_order(OrderQuery::infer("KRW-BTC"))
        .await
        .unwrap()
        .into_body()
        .into_orders();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].uuid, "o-2");
}

#[tokio::test]
async fn test_get_order_by_market_with_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/orders"))
        .and(query_param("state", "done"))
        .and(query_param("limit", "5"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let filter = OrderListFilter::new("KRW-ETH")
        .state(OrderState::Done)
        .limit(5)
        .page(2);
    let orders = client
        .get_order(OrderQuery::ByMarket(filter))
        .await
        .unwrap()
        .into_body()
        .into_orders();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_withdraw_coin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/withdraws/coin"))
        .and(body_json(serde_json::json!({
            "currency": "XRP",
            "net_type": "XRP",
            "amount": "25",
            "address": "rAddress",
            "secondary_address": "12345"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "type": "withdraw",
            "uuid": "w-1",
            "currency": "XRP",
            "net_type": "XRP",
            "txid": null,
            "state": "PROCESSING",
            "created_at": "2024-01-01T00:00:00+09:00",
            "done_at": null,
            "amount": "25",
            "fee": "1",
            "transaction_type": "default"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = WithdrawCoinRequest::new("XRP", Decimal::from(25), "rAddress")
        .net_type("XRP")
        .secondary_address("12345");
    let withdrawal = client.withdraw_coin(&request).await.unwrap().into_body();

    assert_eq!(withdrawal.uuid, "w-1");
    assert_eq!(withdrawal.kind, "withdraw");
    assert_eq!(withdrawal.state, "PROCESSING");
    assert_eq!(withdrawal.fee, Some(Decimal::ONE));
    assert!(withdrawal.txid.is_none());
}

#[tokio::test]
async fn test_withdraw_to_unregistered_address() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/withdraws/coin"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "name": "withdraw_address_not_registerd",
                "message": "등록된 출금 주소가 아닙니다."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = WithdrawCoinRequest::new("BTC", Decimal::new(1, 2), "bc1unknown");
    let err = client.withdraw_coin(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WithdrawAddressNotRegistered);
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.kind, ApiErrorKind::WithdrawAddressNotRegistered);
    assert_eq!(api_error.status, 400);
}

#[tokio::test]
async fn test_withdraw_cash_and_status() {
    let server = MockServer::start().await;
    let withdrawal = serde_json::json!({
        "type": "withdraw",
        "uuid": "krw-1",
        "currency": "KRW",
        "state": "DONE",
        "amount": "50000",
        "fee": "1000"
    });
    Mock::given(method("POST"))
        .and(path("/v1/withdraws/krw"))
        .and(body_json(serde_json::json!({"amount": "50000"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(withdrawal.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/withdraw"))
        .and(query_param("uuid", "krw-1"))
        .and(query_param("currency", "KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(withdrawal))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let placed = client.withdraw_cash(Decimal::from(50_000)).await.unwrap();
    assert_eq!(placed.body.uuid, "krw-1");

    let status = client.get_withdraw_status("krw-1", "KRW").await.unwrap();
    assert_eq!(status.body.state, "DONE");
    assert_eq!(status.body.amount, Some(Decimal::from(50_000)));
}

#[tokio::test]
async fn test_exchange_rejection_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "name": "insufficient_funds_bid",
                "message": "주문가능한 금액(KRW)이 부족합니다."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .buy_limit_order("KRW-BTC", Decimal::from(2_000_000), Decimal::ONE)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.api_error().unwrap().kind, ApiErrorKind::InsufficientFunds);
    match err {
        BithumbError::Request {
            method,
            endpoint,
            params,
            attempts,
            ..
        } => {
            assert_eq!(method, reqwest::Method::POST);
            assert_eq!(endpoint, "/v1/orders");
            assert!(params.contains("market=KRW-BTC"));
            assert_eq!(attempts, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"name": "jwt_verification", "message": "Jwt 토큰 검증에 실패했습니다."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_balances().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(err.api_error().unwrap().is_authentication());
}

#[tokio::test]
async fn test_too_many_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_balances().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert!(matches!(err.root(), BithumbError::RateLimitExceeded { .. }));
}

#[tokio::test]
async fn test_undecodable_response_is_retried_up_to_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(2)
        .mount(&server)
        .await;

    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET));
    let client = BithumbRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(200)))
        .build();

    let started = Instant::now();
    let err = client.get_balances().await.unwrap_err();

    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(matches!(err, BithumbError::Request { attempts: 2, .. }));

    // Each attempt is signed with its own nonce.
    let requests = server.received_requests().await.unwrap();
    assert_ne!(token_claims(&requests[0]).nonce, token_claims(&requests[1]).nonce);
}

#[tokio::test]
async fn test_retry_recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_accounts(&server).await;

    let client = build_client(&server);
    let balances = client.get_balances().await.unwrap();
    assert_eq!(balances.body.len(), 3);
}

#[tokio::test]
async fn test_market_order_is_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .place_market_buy("KRW-BTC", Decimal::from(10_000))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(matches!(err, BithumbError::Request { attempts: 1, .. }));
}

#[tokio::test]
async fn test_call_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(accounts_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET));
    let client = BithumbRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .call_timeout(Duration::from_millis(100))
        .build();

    let err = client.get_balances().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_missing_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = BithumbRestClient::builder().base_url(server.uri()).build();
    let err = client.get_balances().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err.root(), BithumbError::MissingCredentials));
}

async fn position_through_trait<C: BithumbClient>(client: &C) -> Decimal {
    client.get_amount("ALL").await.unwrap().into_body()
}

#[tokio::test]
async fn test_trait_dispatch() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    let client = build_client(&server);

    assert_eq!(position_through_trait(&client).await, Decimal::from(30_070_000));
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_retry_is_logged_to_injected_subscriber() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("bithumb_api_client=debug")
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/orders/chance"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(2)
        .mount(&server)
        .await;

    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET));
    let client = BithumbRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(10)))
        .tracing_dispatch(tracing::Dispatch::new(subscriber))
        .build();

    let err = client.get_chance("KRW-BTC").await.unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, BithumbError::Request { attempts: 2, .. }));

    let output = logs.contents();
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("retrying"), "{output}");
    assert!(output.contains("/v1/orders/chance"), "{output}");
}

#[tokio::test]
async fn test_default_policy_waits_between_two_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(2)
        .mount(&server)
        .await;

    let credentials = Arc::new(StaticCredentials::new("test_key", SECRET));
    let client = BithumbRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .build();
    assert_eq!(client.retry_policy(), RetryPolicy::default());

    let started = Instant::now();
    let err = client.get_balances().await.unwrap_err();

    assert!(started.elapsed() >= Duration::from_secs(3));
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(matches!(err, BithumbError::Request { attempts: 2, .. }));
}

#[tokio::test]
async fn test_accepted_order_with_unlisted_type_is_not_resent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(order_body("C0101-ioc", "bid", "limit_ioc")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = client
        .buy_limit_order("KRW-BTC", Decimal::from(2_000_000), Decimal::new(1, 3))
        .await
        .unwrap()
        .into_body();

    assert_eq!(order.uuid, "C0101-ioc");
    assert_eq!(order.ord_type, Some(OrdType::Unknown));
    assert_eq!(order.side, Some(Side::Bid));
}

#[tokio::test]
async fn test_accepted_order_in_unexpected_shape_is_final() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"uuid": 42, "ord_type": "limit"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .buy_limit_order("KRW-BTC", Decimal::from(2_000_000), Decimal::new(1, 3))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(!err.is_retryable());
    assert!(matches!(err.root(), BithumbError::UnexpectedShape(_)));
    assert!(matches!(err, BithumbError::Request { attempts: 1, .. }));
}
