use super::*;

/// Tests that a winning bet pays even money.
///
/// Expected: Ok with the bet credited
#[tokio::test]
async fn winning_bet_pays_even_money() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let user_id = member(db, guild_id, 500).await?;

    let result = service
        .perform_action(
            guild_id,
            user_id,
            EconomyAction::Gamble { bet: 200 },
            &mut SequenceSource::new([0.1]),
            Utc::now(),
        )
        .await?;

    assert!(result.success);
    assert_eq!(result.balance_after, 700);
    assert!(result.cooldown_expires_at.is_some());

    Ok(())
}

/// Tests that a bet larger than the wallet is refused without any write.
///
/// Expected: Err(InsufficientFunds) and the gamble cooldown left unset
#[tokio::test]
async fn bet_above_wallet_is_refused() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let user_id = member(db, guild_id, 40).await?;

    let result = service
        .perform_action(
            guild_id,
            user_id,
            EconomyAction::Gamble { bet: 50 },
            &mut SequenceSource::new([0.1]),
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(EconomyError::InsufficientFunds {
            required: 50,
            available: 40
        })
    ));
    let stored = store.load(guild_id, user_id).await?.unwrap();
    assert_eq!(stored.wallet, 40);
    assert!(stored.last_gamble_at.is_none());

    Ok(())
}

/// Tests that bets outside the configured bounds are refused.
///
/// Expected: Err(InvalidBet) for a bet under the minimum
#[tokio::test]
async fn bet_below_minimum_is_refused() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({ "gamblingMinBet": 100 })).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let user_id = member(db, guild_id, 1_000).await?;

    let result = service
        .perform_action(
            guild_id,
            user_id,
            EconomyAction::Gamble { bet: 99 },
            &mut SequenceSource::new([0.1]),
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(EconomyError::InvalidBet {
            bet: 99,
            min: 100,
            ..
        })
    ));

    Ok(())
}

/// Tests that gambling can be switched off independently of the economy.
///
/// Expected: Err(ModuleDisabled { Gambling })
#[tokio::test]
async fn disabled_gambling_is_refused() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({ "gamblingEnabled": false })).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);

    let result = service
        .perform_action(
            guild_id,
            3,
            EconomyAction::Gamble { bet: 10 },
            &mut SequenceSource::new([0.1]),
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(EconomyError::ModuleDisabled {
            feature: EconomyFeature::Gambling
        })
    ));

    Ok(())
}
