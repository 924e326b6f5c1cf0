//! 资产：余额查询、转账前校验与指令构建

mod common;

use std::str::FromStr;

use common::*;
use ironcore_sui::{
    assets::{Coin, Nft, Token},
    error::SuiError,
    service::transaction_builder::{Argument, Command},
};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============ Coin ============

#[tokio::test]
async fn test_coin_descriptor() {
    let mock = MockSuiRpc::new();
    mock.set_balance(SENDER, "0x2::sui::SUI", 1_500_000_000);
    let coin = Coin::new(provider_with(mock));

    assert_eq!(coin.name(), "Sui");
    assert_eq!(coin.symbol(), "SUI");
    assert_eq!(coin.decimals(), 9);
    assert_eq!(coin.balance(SENDER).await.unwrap().value(), dec("1.5"));
}

#[tokio::test]
async fn test_coin_transfer_validation() {
    let mock = MockSuiRpc::new();
    mock.set_balance(SENDER, "0x2::sui::SUI", 1_000_000_000);
    let coin = Coin::new(provider_with(mock.clone()));

    let err = coin.transfer(SENDER, RECEIVER, dec("-0.1")).await.unwrap_err();
    assert_eq!(err, SuiError::InvalidAmount);
    assert!(err.is_validation());
    // 负数金额在任何网络调用之前被拒绝
    assert_eq!(mock.calls("suix_getBalance"), 0);

    // 不足 1 Mist 的正数金额同样被拒绝
    assert_eq!(
        coin.transfer(SENDER, RECEIVER, dec("0.0000000001"))
            .await
            .unwrap_err(),
        SuiError::InvalidAmount
    );
    assert_eq!(mock.calls("suix_getBalance"), 0);

    assert_eq!(
        coin.transfer(SENDER, RECEIVER, dec("1.000000001"))
            .await
            .unwrap_err(),
        SuiError::InsufficientBalance
    );
}

#[tokio::test]
async fn test_coin_transfer_splits_gas_coin() {
    let mock = MockSuiRpc::new();
    mock.set_balance(SENDER, "0x2::sui::SUI", 1_000_000_000);
    let coin = Coin::new(provider_with(mock));

    let signer = coin.transfer(SENDER, RECEIVER, dec("0.25")).await.unwrap();
    assert_eq!(
        signer.raw_data().commands(),
        &[
            Command::SplitCoins {
                coin: Argument::GasCoin,
                amounts: vec![250_000_000],
            },
            Command::TransferObjects {
                objects: vec![Argument::Result(0)],
                recipient: RECEIVER.into(),
            },
        ]
    );
    assert!(signer.signed_data().is_none());
}

// ============ Token ============

fn token_mock() -> std::sync::Arc<MockSuiRpc> {
    let mock = MockSuiRpc::new();
    mock.set_metadata(TOKEN_TYPE, usdc_metadata());
    mock.set_balance(SENDER, TOKEN_TYPE, 10_000_000);
    mock.set_supply(TOKEN_TYPE, 1_000_000_000_000);
    mock
}

#[tokio::test]
async fn test_token_metadata_is_cached() {
    let mock = token_mock();
    let token = Token::new(TOKEN_TYPE, provider_with(mock.clone()));

    assert_eq!(token.name().await.unwrap(), "USD Coin");
    assert_eq!(token.symbol().await.unwrap(), "USDC");
    assert_eq!(token.decimals().await.unwrap(), 6);
    assert_eq!(mock.calls("suix_getCoinMetadata"), 1);

    assert_eq!(token.balance(SENDER).await.unwrap().value(), dec("10"));
    assert_eq!(token.total_supply().await.unwrap().value(), dec("1000000"));
}

#[tokio::test]
async fn test_token_missing_metadata() {
    let mock = MockSuiRpc::new();
    let token = Token::new(TOKEN_TYPE, provider_with(mock));
    assert!(matches!(
        token.decimals().await,
        Err(SuiError::RpcRequest(_))
    ));
}

#[tokio::test]
async fn test_token_unsupported_operations() {
    let token = Token::new(TOKEN_TYPE, provider_with(token_mock()));

    assert_eq!(
        token.allowance(SENDER, RECEIVER).await.unwrap_err(),
        SuiError::NotImplemented("allowance")
    );
    assert!(matches!(
        token.approve(SENDER, RECEIVER, dec("1")).await,
        Err(SuiError::NotImplemented(_))
    ));
    assert!(matches!(
        token.transfer_from(SENDER, SENDER, RECEIVER, dec("1")).await,
        Err(SuiError::NotImplemented(_))
    ));
}

#[tokio::test]
async fn test_token_transfer_splits_single_sufficient_coin() {
    let mock = token_mock();
    mock.set_coins(
        SENDER,
        TOKEN_TYPE,
        vec![
            coin("0xc1", TOKEN_TYPE, 1_000_000),
            coin("0xc2", TOKEN_TYPE, 9_000_000),
        ],
    );
    let token = Token::new(TOKEN_TYPE, provider_with(mock));

    let signer = token.transfer(SENDER, RECEIVER, dec("2.5")).await.unwrap();
    assert_eq!(
        signer.raw_data().commands(),
        &[
            Command::SplitCoins {
                coin: Argument::Object("0xc2".into()),
                amounts: vec![2_500_000],
            },
            Command::TransferObjects {
                objects: vec![Argument::Result(0)],
                recipient: RECEIVER.into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_token_transfer_merges_when_no_coin_suffices() {
    let mock = token_mock();
    mock.set_coins(
        SENDER,
        TOKEN_TYPE,
        vec![
            coin("0xc1", TOKEN_TYPE, 4_000_000),
            coin("0xc2", TOKEN_TYPE, 3_000_000),
            coin("0xc3", TOKEN_TYPE, 3_000_000),
        ],
    );
    let token = Token::new(TOKEN_TYPE, provider_with(mock));

    let signer = token.transfer(SENDER, RECEIVER, dec("9")).await.unwrap();
    assert_eq!(
        signer.raw_data().commands(),
        &[
            Command::MergeCoins {
                destination: Argument::Object("0xc1".into()),
                sources: vec![
                    Argument::Object("0xc2".into()),
                    Argument::Object("0xc3".into())
                ],
            },
            Command::SplitCoins {
                coin: Argument::Object("0xc1".into()),
                amounts: vec![9_000_000],
            },
            Command::TransferObjects {
                objects: vec![Argument::Result(1)],
                recipient: RECEIVER.into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_token_transfer_merges_coins_across_pages() {
    let mock = token_mock();
    mock.set_balance(SENDER, TOKEN_TYPE, 120_000_000);
    mock.set_coins(
        SENDER,
        TOKEN_TYPE,
        (0..120)
            .map(|i| coin(&numbered_coin_id(i), TOKEN_TYPE, 1_000_000))
            .collect(),
    );
    let token = Token::new(TOKEN_TYPE, provider_with(mock.clone()));

    let signer = token.transfer(SENDER, RECEIVER, dec("120")).await.unwrap();
    // 每页 50 个：50 + 50 + 20
    assert_eq!(mock.calls("suix_getCoins"), 3);

    let commands = signer.raw_data().commands();
    assert_eq!(
        commands[0],
        Command::MergeCoins {
            destination: Argument::Object(numbered_coin_id(0)),
            sources: (1..120)
                .map(|i| Argument::Object(numbered_coin_id(i)))
                .collect(),
        }
    );
    assert_eq!(
        commands[1],
        Command::SplitCoins {
            coin: Argument::Object(numbered_coin_id(0)),
            amounts: vec![120_000_000],
        }
    );
}

#[tokio::test]
async fn test_token_coin_listing_stops_on_repeated_cursor() {
    let mock = token_mock();
    mock.set_coins(
        SENDER,
        TOKEN_TYPE,
        vec![
            coin("0xc1", TOKEN_TYPE, 4_000_000),
            coin("0xc2", TOKEN_TYPE, 3_000_000),
        ],
    );
    mock.repeat_page_cursor();
    let token = Token::new(TOKEN_TYPE, provider_with(mock.clone()));

    let signer = token.transfer(SENDER, RECEIVER, dec("6")).await.unwrap();
    assert_eq!(mock.calls("suix_getCoins"), 2);
    assert_eq!(
        signer.raw_data().commands()[0],
        Command::MergeCoins {
            destination: Argument::Object("0xc1".into()),
            sources: vec![Argument::Object("0xc2".into())],
        }
    );
}

#[tokio::test]
async fn test_token_transfer_validation() {
    let mock = token_mock();
    let token = Token::new(TOKEN_TYPE, provider_with(mock));

    assert_eq!(
        token.transfer(SENDER, RECEIVER, dec("-1")).await.unwrap_err(),
        SuiError::InvalidAmount
    );
    assert_eq!(
        token.transfer(SENDER, RECEIVER, dec("10.5")).await.unwrap_err(),
        SuiError::InsufficientBalance
    );
    // 低于代币精度（6 位）的金额截断为 0
    assert_eq!(
        token
            .transfer(SENDER, RECEIVER, dec("0.0000001"))
            .await
            .unwrap_err(),
        SuiError::InvalidAmount
    );
    // 余额足够但没有可用的币对象
    assert_eq!(
        token.transfer(SENDER, RECEIVER, dec("1")).await.unwrap_err(),
        SuiError::InsufficientBalance
    );
}

// ============ NFT ============

fn nft_mock() -> std::sync::Arc<MockSuiRpc> {
    let mock = MockSuiRpc::new();
    mock.set_object(
        NFT_ID,
        move_object(
            NFT_ID,
            SENDER,
            serde_json::json!({
                "id": { "id": NFT_ID },
                "name": "Test NFT #1",
                "url": "https://example.com/nft/1.png"
            }),
        ),
    );
    mock.set_owned_objects(
        SENDER,
        NFT_TYPE,
        vec![move_object(NFT_ID, SENDER, serde_json::json!({ "name": "Test NFT #1" }))],
    );
    mock
}

#[tokio::test]
async fn test_nft_metadata() {
    let mock = nft_mock();
    let nft = Nft::new(NFT_TYPE, provider_with(mock.clone()));

    assert_eq!(nft.name(Some(NFT_ID)).await.unwrap(), "Test NFT #1");
    // symbol / description 缺失时回退到 name
    assert_eq!(nft.symbol(Some(NFT_ID)).await.unwrap(), "Test NFT #1");
    assert_eq!(nft.description(Some(NFT_ID)).await.unwrap(), "Test NFT #1");
    assert_eq!(nft.owner(NFT_ID).await.unwrap(), SENDER);
    assert_eq!(
        nft.token_uri(NFT_ID).await.unwrap(),
        "https://example.com/nft/1.png"
    );
    assert_eq!(mock.calls("sui_getObject"), 1);
}

#[tokio::test]
async fn test_nft_missing_object() {
    let nft = Nft::new(NFT_TYPE, provider_with(MockSuiRpc::new()));
    assert!(nft.metadata(Some("0xdead")).await.unwrap().is_none());
    assert_eq!(nft.name(Some("0xdead")).await.unwrap(), "");
}

#[tokio::test]
async fn test_nft_balance_counts_owned_objects() {
    let nft = Nft::new(NFT_TYPE, provider_with(nft_mock()));
    assert_eq!(nft.balance(SENDER).await.unwrap().value(), Decimal::ONE);
    assert_eq!(nft.balance(RECEIVER).await.unwrap().value(), Decimal::ZERO);
}

#[tokio::test]
async fn test_nft_balance_counts_a_single_page() {
    let mock = nft_mock();
    mock.set_owned_objects(
        RECEIVER,
        NFT_TYPE,
        (0..60)
            .map(|i| move_object(&numbered_coin_id(i), RECEIVER, serde_json::json!({ "name": "Bulk" })))
            .collect(),
    );
    let nft = Nft::new(NFT_TYPE, provider_with(mock.clone()));

    assert_eq!(nft.balance(RECEIVER).await.unwrap().value(), Decimal::from(50));
    assert_eq!(mock.calls("suix_getOwnedObjects"), 1);
}

#[tokio::test]
async fn test_nft_transfer() {
    let mock = nft_mock();
    let nft = Nft::new(NFT_TYPE, provider_with(mock.clone()));

    let signer = nft.transfer(SENDER, RECEIVER, NFT_ID).await.unwrap();
    assert_eq!(
        signer.raw_data().commands(),
        &[Command::TransferObjects {
            objects: vec![Argument::Object(NFT_ID.into())],
            recipient: RECEIVER.into(),
        }]
    );

    // 所有者比较不区分大小写
    let upper = SENDER.to_uppercase().replace("0X", "0x");
    mock.set_owned_objects(
        &upper,
        NFT_TYPE,
        vec![move_object(NFT_ID, SENDER, serde_json::json!({ "name": "Test NFT #1" }))],
    );
    assert!(nft.transfer(&upper, RECEIVER, NFT_ID).await.is_ok());
}

#[tokio::test]
async fn test_nft_transfer_validation() {
    let mock = nft_mock();
    mock.set_owned_objects(
        RECEIVER,
        NFT_TYPE,
        vec![move_object("0xother", RECEIVER, serde_json::json!({ "name": "Other" }))],
    );
    let nft = Nft::new(NFT_TYPE, provider_with(mock));

    // 不持有任何该类型对象
    assert_eq!(
        nft.transfer("0x0abc", RECEIVER, NFT_ID).await.unwrap_err(),
        SuiError::InsufficientBalance
    );
    // 持有同类型对象，但不是该对象的所有者
    assert_eq!(
        nft.transfer(RECEIVER, SENDER, NFT_ID).await.unwrap_err(),
        SuiError::UnauthorizedAddress
    );

    assert!(matches!(
        nft.approved(NFT_ID).await,
        Err(SuiError::NotImplemented(_))
    ));
    assert!(matches!(
        nft.approve(SENDER, RECEIVER, NFT_ID).await,
        Err(SuiError::NotImplemented(_))
    ));
    assert!(matches!(
        nft.transfer_from(SENDER, SENDER, RECEIVER, NFT_ID).await,
        Err(SuiError::NotImplemented(_))
    ));
}
