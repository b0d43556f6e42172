//! Grotto headless client.
//!
//! Composition root that loads content, populates a map, and lets an
//! automated player loose in it for a fixed number of inputs. Game messages
//! are logged through `tracing`; the final map is printed to stdout.
//!
//! ```bash
//! GROTTO_SEED=7 GROTTO_TURNS=200 RUST_LOG=grotto_runtime=debug cargo run -p grotto-client
//! ```

mod config;
mod logging;

use anyhow::{Context, Result};
use grotto_content::{ContentFactory, ScenarioBuilder, TemplateCatalog, bundled};
use grotto_core::{GameConfig, Map};
use grotto_runtime::{
    GameEvent, RandomWalkProvider, Runtime, RuntimeConfig, SeededRandom, WaitInputProvider,
};
use tokio::sync::broadcast;

use config::{ClientConfig, PlayerMode};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_to_file)?;

    tracing::info!("Starting grotto client");
    tracing::info!(seed = config.seed, map = %config.map, "Session parameters");

    let (game_config, catalog, map) = load_content(&config)?;

    let mut placement = SeededRandom::new(config.seed);
    let scenario = ScenarioBuilder::new(map)
        .player(catalog.require(TemplateCatalog::PLAYER)?.clone())
        .fungus(catalog.require(TemplateCatalog::FUNGUS)?.clone())
        .fungus_count(config.fungus_count)
        .build(&mut placement)?;

    let builder = Runtime::builder()
        .config(RuntimeConfig {
            game_config,
            command_buffer_size: config.command_buffer_size,
            seed: Some(config.seed),
            ..RuntimeConfig::default()
        })
        .map(scenario.map);
    let builder = match config.player_mode {
        PlayerMode::RandomWalk => builder.player_provider(RandomWalkProvider::new(config.seed)),
        PlayerMode::Wait => builder.player_provider(WaitInputProvider),
    };
    let mut runtime = builder.build().await?;

    let logger = tokio::spawn(log_events(runtime.subscribe_events()));

    let submitted = runtime.run(config.turns).await?;
    tracing::info!(submitted, "Session finished");

    let snapshot = runtime.handle().query_snapshot().await?;
    println!("{}", snapshot.render_ascii());
    match snapshot.entity(scenario.player) {
        Some(player) => println!(
            "player at ({}, {}) hp {}/{} | {} entities",
            player.position.x,
            player.position.y,
            player.hp.unwrap_or_default(),
            player.max_hp.unwrap_or_default(),
            snapshot.entities.len()
        ),
        None => println!("the player is gone | {} entities", snapshot.entities.len()),
    }

    runtime.shutdown().await?;
    logger.await.context("event logger task failed")?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

fn load_content(config: &ClientConfig) -> Result<(GameConfig, TemplateCatalog, Map)> {
    if let Some(dir) = &config.data_dir {
        let factory = ContentFactory::new(dir);
        tracing::info!("Loading content from {}", factory.data_dir().display());
        return Ok((
            factory.load_config()?,
            factory.load_templates()?,
            factory.load_map(&config.map)?,
        ));
    }

    let map = if config.map == "cavern" {
        bundled::cavern()?
    } else {
        ContentFactory::bundled().load_map(&config.map)?
    };
    Ok((bundled::config()?, bundled::templates()?, map))
}

async fn log_events(mut events: broadcast::Receiver<GameEvent>) {
    loop {
        match events.recv().await {
            Ok(GameEvent::Refreshed(snapshot)) => {
                tracing::debug!(entities = snapshot.entities.len(), "refresh");
            }
            Ok(GameEvent::AwaitingInput { actor, messages }) => {
                for message in messages {
                    tracing::info!(%actor, "{message}");
                }
            }
            Ok(GameEvent::GameOver) => {
                tracing::info!("Game over");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger lagged behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
