//! Slash command interaction handler.
//!
//! Parses the command, runs it against the economy service for the guild it was
//! used in, and replies with the rendered outcome. Refusals are replied to
//! ephemerally so only the caller sees them.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction,
};

use crate::server::{
    bot::command::{self, CommandArgs, SlashCommand, LEADERBOARD_PAGE_SIZE},
    data::economy::{EconomyStore, SeaOrmEconomyStore},
    error::economy::EconomyError,
    model::economy::config::EconomyConfig,
    service::economy::{random::RngSource, EconomyService},
};

/// Reply text and whether only the caller should see it.
struct Reply {
    content: String,
    ephemeral: bool,
}

impl Reply {
    fn public(content: String) -> Self {
        Self {
            content,
            ephemeral: false,
        }
    }

    fn private(content: String) -> Self {
        Self {
            content,
            ephemeral: true,
        }
    }
}

/// Handles an interaction; anything but a slash command is ignored.
pub async fn handle_interaction(db: &DatabaseConnection, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let reply = match command.guild_id {
        Some(guild_id) => run_command(db, guild_id.get(), &command).await,
        None => Reply::private("This command can only be used in a server.".to_string()),
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(reply.content)
            .ephemeral(reply.ephemeral),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!(
            "Failed to respond to /{} from {}: {:?}",
            command.data.name,
            command.user.id,
            e
        );
    }
}

async fn run_command(db: &DatabaseConnection, guild_id: u64, command: &CommandInteraction) -> Reply {
    let args = CommandArgs::from_options(&command.data.options);
    let parsed = match command::parse(&command.data.name, &args) {
        Ok(parsed) => parsed,
        Err(e) => return Reply::private(e.to_string()),
    };

    let store = SeaOrmEconomyStore::new(db);
    let config = match store.load_config(guild_id).await {
        Ok(config) => config,
        Err(e) => return failure(&EconomyError::from(e), &EconomyConfig::default()),
    };
    let service = EconomyService::new(&store);
    let user_id = command.user.id.get();

    match parsed {
        SlashCommand::Action(action) => {
            let mut rng = RngSource::from_entropy();

            match service
                .perform_action(guild_id, user_id, action, &mut rng, Utc::now())
                .await
            {
                Ok(result) => Reply::public(command::render_result(&result, &config)),
                Err(e) => failure(&e, &config),
            }
        }
        SlashCommand::Balance { user_id: target } => {
            match service.balance(guild_id, target.unwrap_or(user_id)).await {
                Ok(state) => Reply::public(command::render_balance(&state, &config)),
                Err(e) => failure(&e, &config),
            }
        }
        SlashCommand::Leaderboard { page } => {
            match service
                .leaderboard(guild_id, page, LEADERBOARD_PAGE_SIZE)
                .await
            {
                Ok(leaderboard) => Reply::public(command::render_leaderboard(&leaderboard, &config)),
                Err(e) => failure(&e, &config),
            }
        }
    }
}

fn failure(error: &EconomyError, config: &EconomyConfig) -> Reply {
    if let EconomyError::Persistence(e) = error {
        tracing::error!("Economy command failed: {}", e);
    }

    Reply::private(command::render_error(error, config))
}
