use super::*;

/// Tests reading a stored member record back as domain state.
///
/// Expected: Ok(Some) with balances and timestamps preserved
#[tokio::test]
async fn finds_stored_member() -> Result<(), StoreError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let jailed_until = Utc::now() + Duration::hours(1);
    let member = factory::user_economy::UserEconomyFactory::new(db, &guild.guild_id)
        .wallet(750)
        .bank(300)
        .jailed_until(Some(jailed_until))
        .build()
        .await?;

    let state = UserEconomyRepository::new(db)
        .find(guild.guild_id.parse().unwrap(), member.user_id.parse().unwrap())
        .await?
        .unwrap();

    assert_eq!(state.wallet, 750);
    assert_eq!(state.bank, 300);
    assert_eq!(state.jailed_until, member.jailed_until);
    assert_eq!(state.version, 1);

    Ok(())
}

/// Tests that members are scoped to their guild.
///
/// Expected: Ok with only the guild's own members listed
#[tokio::test]
async fn lists_members_of_one_guild() -> Result<(), StoreError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other = factory::create_guild(db).await?;
    factory::create_user_economy(db, &guild.guild_id, 10).await?;
    factory::create_user_economy(db, &guild.guild_id, 20).await?;
    factory::create_user_economy(db, &other.guild_id, 30).await?;

    let members = UserEconomyRepository::new(db)
        .list_by_guild(guild.guild_id.parse().unwrap())
        .await?;

    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.wallet != 30));

    Ok(())
}

/// Tests inserting new state and updating it at the read version.
///
/// Expected: Ok with version 1 after insert and 2 after update
#[tokio::test]
async fn saves_new_then_existing_state() -> Result<(), StoreError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();
    let repo = UserEconomyRepository::new(db);

    let mut state = UserEconomyState::new(guild_id, 77, &EconomyConfig::default());
    let inserted = repo.save(&state).await?;
    assert_eq!(inserted.version, 1);

    state = inserted;
    state.wallet += 50;
    let updated = repo.save(&state).await?;
    assert_eq!(updated.version, 2);

    let stored = repo.find(guild_id, 77).await?.unwrap();
    assert_eq!(stored, updated);

    Ok(())
}

/// Tests that writing state read at an outdated version is refused.
///
/// Expected: Err(StoreError::Conflict) and the stored row unchanged
#[tokio::test]
async fn rejects_stale_version() -> Result<(), StoreError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let member = factory::create_user_economy(db, &guild.guild_id, 100).await?;
    let repo = UserEconomyRepository::new(db);
    let guild_id = guild.guild_id.parse::<u64>().unwrap();
    let user_id = member.user_id.parse::<u64>().unwrap();

    let first = repo.find(guild_id, user_id).await?.unwrap();
    let second = first.clone();

    let mut winner = first;
    winner.wallet = 200;
    repo.save(&winner).await?;

    let mut loser = second;
    loser.wallet = 999;
    let result = repo.save(&loser).await;

    assert!(matches!(result, Err(StoreError::Conflict)));
    assert_eq!(repo.find(guild_id, user_id).await?.unwrap().wallet, 200);

    Ok(())
}

/// Tests that inserting state assumed new fails when a record already exists.
///
/// Expected: Err(StoreError::Conflict)
#[tokio::test]
async fn rejects_duplicate_insert() -> Result<(), StoreError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let member = factory::create_user_economy(db, &guild.guild_id, 100).await?;

    let fresh = UserEconomyState::new(
        guild.guild_id.parse().unwrap(),
        member.user_id.parse().unwrap(),
        &EconomyConfig::default(),
    );
    let result = UserEconomyRepository::new(db).save(&fresh).await;

    assert!(matches!(result, Err(StoreError::Conflict)));

    Ok(())
}
