//! Drives the runtime end to end through its public handle.

use grotto_core::{
    Direction, Entity, EntityId, EntityTemplate, GameConfig, InputOutcome, Map, PlayerCommand,
    Position, ScriptedRng,
};
use grotto_runtime::{
    GameEvent, RandomWalkProvider, Runtime, RuntimeConfig, RuntimeError, ScriptedInputProvider,
    SeededRandom,
};

fn place(map: &mut Map, template: &EntityTemplate, x: i32, y: i32) -> EntityId {
    let entity = Entity::new(template).expect("valid template").at(Position::new(x, y));
    map.add_entity(entity).expect("position on map")
}

/// Walled 3x3 room: player in the middle, a fungus to the north.
fn duel() -> (Map, EntityId, EntityId) {
    let mut map = Map::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
    let player = place(&mut map, &EntityTemplate::player(), 2, 2);
    let fungus = place(&mut map, &EntityTemplate::fungus(), 2, 1);
    (map, player, fungus)
}

#[tokio::test]
async fn build_without_map_fails() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingMap)));
}

#[tokio::test]
async fn worker_runs_to_the_first_player_turn() {
    let (map, player, _) = duel();
    let runtime = Runtime::builder()
        .map(map)
        .random_source(ScriptedRng::constant(0.5))
        .build()
        .await
        .unwrap();

    let handle = runtime.handle();
    assert_eq!(handle.awaiting_input().await.unwrap(), Some(player));

    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.entities.len(), 2);
    assert_eq!(
        snapshot.render_ascii(),
        "#####\n#.F.#\n#.@.#\n#...#\n#####"
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn attacks_are_reported_on_the_next_turn() {
    let (map, player, fungus) = duel();
    let runtime = Runtime::builder()
        .map(map)
        .random_source(ScriptedRng::constant(0.5))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    // subscribe once the opening turn has been drawn so only the attack's
    // aftermath is observed
    assert_eq!(handle.awaiting_input().await.unwrap(), Some(player));
    let mut events = handle.subscribe_events();

    let outcome = handle
        .submit(PlayerCommand::Move(Direction::North))
        .await
        .unwrap();
    assert_eq!(outcome, InputOutcome::Consumed);

    // the player's next turn redraws, then waits
    let Ok(GameEvent::Refreshed(drawn)) = events.recv().await else {
        panic!("expected a refresh first");
    };
    assert_eq!(drawn.entity(fungus).and_then(|entity| entity.hp), Some(4));

    let event = events.recv().await.unwrap();
    assert_eq!(
        event,
        GameEvent::AwaitingInput {
            actor: player,
            messages: vec!["You hit the fungus for 6 damage!".to_owned()],
        }
    );

    // the snapshot keeps what the player saw even though the queue was cleared
    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.messages, vec!["You hit the fungus for 6 damage!".to_owned()]);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn blocked_moves_keep_waiting_on_the_same_player() {
    let mut map = Map::floor(3, 3);
    let player = place(&mut map, &EntityTemplate::player(), 1, 1);
    let runtime = Runtime::builder()
        .map(map)
        .random_source(ScriptedRng::constant(0.5))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    // (1, 1) -> (1, 2), then (1, 3) is past the bottom edge
    assert_eq!(
        handle.submit(PlayerCommand::Move(Direction::South)).await.unwrap(),
        InputOutcome::Consumed
    );
    assert_eq!(
        handle.submit(PlayerCommand::Move(Direction::South)).await.unwrap(),
        InputOutcome::Blocked
    );
    assert_eq!(handle.awaiting_input().await.unwrap(), Some(player));

    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.entity(player).unwrap().position, Position::new(1, 2));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn waiting_players_only_see_their_own_messages() {
    let mut map = Map::floor(3, 1);
    let first = place(&mut map, &EntityTemplate::player(), 0, 0);
    let second = place(&mut map, &EntityTemplate::player(), 1, 0);
    let runtime = Runtime::builder()
        .map(map)
        .random_source(ScriptedRng::constant(0.5))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(handle.awaiting_input().await.unwrap(), Some(first));
    let mut events = handle.subscribe_events();

    // the first player hits the second; both queues now hold a message
    assert_eq!(
        handle.submit(PlayerCommand::Move(Direction::East)).await.unwrap(),
        InputOutcome::Consumed
    );

    let Ok(GameEvent::Refreshed(drawn)) = events.recv().await else {
        panic!("expected a refresh first");
    };
    assert_eq!(drawn.messages.len(), 2);
    assert_eq!(
        events.recv().await.unwrap(),
        GameEvent::AwaitingInput {
            actor: second,
            messages: vec!["The player hits you for 6 damage!".to_owned()],
        }
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn scripted_provider_kills_the_fungus() {
    let (map, _, fungus) = duel();
    let mut runtime = Runtime::builder()
        .map(map)
        .random_source(ScriptedRng::constant(0.5))
        .player_provider(ScriptedInputProvider::new([
            PlayerCommand::Move(Direction::North),
            PlayerCommand::Move(Direction::North),
            PlayerCommand::Wait,
        ]))
        .build()
        .await
        .unwrap();

    assert_eq!(runtime.run(3).await.unwrap(), 3);

    let snapshot = runtime.handle().query_snapshot().await.unwrap();
    assert!(snapshot.entity(fungus).is_none());
    assert_eq!(snapshot.entities.len(), 1);

    // script exhausted
    assert!(matches!(runtime.step().await, Err(RuntimeError::Provider(_))));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn step_requires_a_provider() {
    let (map, _, _) = duel();
    let mut runtime = Runtime::builder().map(map).build().await.unwrap();

    assert!(matches!(runtime.step().await, Err(RuntimeError::ProviderNotSet)));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn a_map_without_players_is_over_immediately() {
    let mut map = Map::floor(4, 4);
    place(&mut map, &EntityTemplate::fungus(), 0, 0);

    let mut runtime = Runtime::builder()
        .map(map)
        .random_source(ScriptedRng::constant(0.99))
        .player_provider(RandomWalkProvider::new(1))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(handle.awaiting_input().await.unwrap(), None);
    assert!(matches!(
        handle.submit(PlayerCommand::Wait).await,
        Err(RuntimeError::GameOver)
    ));
    assert_eq!(runtime.run(10).await.unwrap(), 0);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn bundled_cavern_survives_a_random_walk() {
    let config = grotto_content::bundled::config().unwrap();
    let catalog = grotto_content::bundled::templates().unwrap();
    let map = grotto_content::bundled::cavern().unwrap();

    let mut placement = SeededRandom::new(7);
    let scenario = grotto_content::ScenarioBuilder::new(map)
        .player(catalog.require("player").unwrap().clone())
        .fungus(catalog.require("fungus").unwrap().clone())
        .fungus_count(10)
        .build(&mut placement)
        .unwrap();
    let player = scenario.player;

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_config: GameConfig {
                fungus_spread_chance: 0.5,
                ..config
            },
            seed: Some(7),
            ..RuntimeConfig::default()
        })
        .map(scenario.map)
        .player_provider(RandomWalkProvider::new(7))
        .build()
        .await
        .unwrap();

    // fungi never attack, so the player outlives every input
    assert_eq!(runtime.run(50).await.unwrap(), 50);
    let snapshot = runtime.handle().query_snapshot().await.unwrap();
    assert!(snapshot.entity(player).is_some());

    runtime.shutdown().await.unwrap();
}
