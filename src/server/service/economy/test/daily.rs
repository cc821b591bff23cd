use super::*;

/// Tests that consecutive daily claims grow the streak and the reward.
///
/// Expected: Ok with rewards 100, 110, 120 and streaks 1, 2, 3
#[tokio::test]
async fn consecutive_claims_build_streak() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let user_id = member(db, guild_id, 0).await?;
    let now = Utc::now();
    let mut rng = SequenceSource::new([0.0]);

    let mut rewards = Vec::new();
    for day in 0..3 {
        let result = service
            .perform_action(guild_id, user_id, EconomyAction::Daily, &mut rng, at(now, day * 86_400))
            .await?;
        rewards.push((result.amount, result.streak));
    }

    assert_eq!(
        rewards,
        vec![(100, Some(1)), (110, Some(2)), (120, Some(3))]
    );

    Ok(())
}

/// Tests that the streak bonus stops growing at the configured maximum.
///
/// Expected: Ok with reward 170 for a streak of 10 capped at 7
#[tokio::test]
async fn streak_bonus_is_capped() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let now = Utc::now();
    let veteran = factory::user_economy::UserEconomyFactory::new(db, guild_id.to_string())
        .daily_streak(10, Some(at(now, -25 * 3600)))
        .build()
        .await?;

    let result = service
        .perform_action(
            guild_id,
            veteran.user_id.parse().unwrap(),
            EconomyAction::Daily,
            &mut SequenceSource::new([0.0]),
            now,
        )
        .await?;

    assert_eq!(result.amount, 170);
    assert_eq!(result.streak, Some(11));

    Ok(())
}

/// Tests that claiming twice within a day is refused.
///
/// Expected: Err(OnCooldown) for the daily action
#[tokio::test]
async fn second_claim_same_day_is_refused() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let now = Utc::now();
    let mut rng = SequenceSource::new([0.0]);

    let first = service
        .perform_action(guild_id, 11, EconomyAction::Daily, &mut rng, now)
        .await?;
    assert_eq!(first.cooldown_expires_at, Some(at(now, 86_400)));

    let result = service
        .perform_action(guild_id, 11, EconomyAction::Daily, &mut rng, at(now, 3600))
        .await;

    assert!(matches!(
        result,
        Err(EconomyError::OnCooldown {
            action: ActionKind::Daily,
            remaining: 82_800,
            ..
        })
    ));

    Ok(())
}

/// Tests that a streak lapses after more than 48 hours without a claim.
///
/// Expected: Ok with the base reward and a streak of 1
#[tokio::test]
async fn lapsed_streak_restarts() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);
    let now = Utc::now();
    let lapsed = factory::user_economy::UserEconomyFactory::new(db, guild_id.to_string())
        .daily_streak(6, Some(at(now, -72 * 3600)))
        .build()
        .await?;

    let result = service
        .perform_action(
            guild_id,
            lapsed.user_id.parse().unwrap(),
            EconomyAction::Daily,
            &mut SequenceSource::new([0.0]),
            now,
        )
        .await?;

    assert_eq!(result.amount, 100);
    assert_eq!(result.streak, Some(1));

    Ok(())
}
