use super::*;
use crate::server::{
    model::economy::config::{EconomyConfig, EconomyConfigPatch},
    service::economy::config::EconomyConfigService,
};

/// Tests that a rejected update is not persisted.
///
/// Expected: Err(AppError::Validation) and the stored configuration unchanged
#[tokio::test]
async fn invalid_update_is_not_persisted() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({})).await?;
    let db = test.db.as_ref().unwrap();
    let service = EconomyConfigService::new(db);
    let before = service.get(guild_id).await?;

    let result = service
        .update(
            guild_id,
            EconomyConfigPatch {
                work_min_reward: Some(500),
                work_max_reward: Some(100),
                ..Default::default()
            },
        )
        .await;

    match result {
        Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(service.get(guild_id).await?, before);

    Ok(())
}

/// Tests that an update is merged over the current configuration.
///
/// Expected: Ok with earlier fields kept and the patched field changed
#[tokio::test]
async fn update_merges_over_current() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({ "currencyName": "gems" })).await?;
    let db = test.db.as_ref().unwrap();
    let service = EconomyConfigService::new(db);

    let updated = service
        .update(
            guild_id,
            EconomyConfigPatch {
                daily_reward: Some(500),
                ..Default::default()
            },
        )
        .await?;

    assert!(updated.enabled);
    assert_eq!(updated.currency_name, "gems");
    assert_eq!(updated.daily_reward, 500);
    assert_eq!(service.get(guild_id).await?, updated);

    Ok(())
}

/// Tests reading the configuration of a guild the bot is not in.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn unknown_guild_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = EconomyConfigService::new(db).get(31337).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that a known guild without stored configuration reads the defaults.
///
/// Expected: Ok with `EconomyConfig::default()`
#[tokio::test]
async fn unconfigured_guild_reads_defaults() -> Result<(), AppError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let guild = factory::create_guild(db).await?;

    let config = EconomyConfigService::new(db)
        .get(guild.guild_id.parse().unwrap())
        .await?;

    assert_eq!(config, EconomyConfig::default());

    Ok(())
}

/// Tests that an update repairs a stored configuration that no longer loads.
///
/// Expected: Ok with the patch merged over the defaults, readable afterwards
#[tokio::test]
async fn update_replaces_unreadable_config() -> Result<(), AppError> {
    let (test, guild_id) = setup(serde_json::json!({
        "workMinReward": 500,
        "workMaxReward": 100
    }))
    .await?;
    let db = test.db.as_ref().unwrap();
    let service = EconomyConfigService::new(db);
    assert!(service.get(guild_id).await.is_err());

    let updated = service
        .update(
            guild_id,
            EconomyConfigPatch {
                enabled: Some(true),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(
        updated,
        EconomyConfig {
            enabled: true,
            ..Default::default()
        }
    );
    assert_eq!(service.get(guild_id).await?, updated);

    Ok(())
}
