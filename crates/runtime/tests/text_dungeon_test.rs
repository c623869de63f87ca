use std::io::Write;

use agent_core::{Action, HungerStatus, Position};
use runtime::{ActionMap, Environment, RuntimeError, Scenario, TextDungeon};

fn index(action: Action) -> u32 {
    ActionMap::nle_reduced()
        .index_of(action)
        .expect("reduced map covers every action")
}

#[tokio::test]
async fn walls_block_movement() {
    let mut env = TextDungeon::new(Scenario::single_level(["|@.|"])).unwrap();
    let start = env.reset().await.unwrap();
    assert_eq!(start.position, Position::new(1, 0));
    assert_eq!(start.depth, 1);

    let blocked = env.step(index(Action::West)).await.unwrap();
    assert_eq!(blocked.observation.position, Position::new(1, 0));

    let moved = env.step(index(Action::East)).await.unwrap();
    assert_eq!(moved.observation.position, Position::new(2, 0));
    assert_eq!(moved.reward, 0.0);
    assert!(!moved.is_done());
}

#[tokio::test]
async fn pickup_pays_once_and_clears_the_tile() {
    let mut env = TextDungeon::new(Scenario::single_level(["|@$|"])).unwrap();
    env.reset().await.unwrap();
    env.step(index(Action::East)).await.unwrap();

    let first = env.step(index(Action::Pickup)).await.unwrap();
    assert_eq!(first.reward, 1.0);
    assert_eq!(first.observation.message, "You pick up a gold piece.");
    assert_eq!(
        first.observation.grid.char_at(Position::new(2, 0)),
        Some(b'.')
    );

    let second = env.step(index(Action::Pickup)).await.unwrap();
    assert_eq!(second.reward, 0.0);
    assert_eq!(second.observation.message, "There is nothing here to pick up.");
}

#[tokio::test]
async fn eating_food_resets_hunger() {
    let scenario = Scenario {
        starting_hunger: HungerStatus::Hungry,
        ..Scenario::single_level(["|%@|"])
    };
    let mut env = TextDungeon::new(scenario).unwrap();
    env.reset().await.unwrap();

    let nothing = env.step(index(Action::Eat)).await.unwrap();
    assert_eq!(nothing.reward, 0.0);
    assert_eq!(nothing.observation.hunger, HungerStatus::Hungry);

    env.step(index(Action::West)).await.unwrap();
    let eaten = env.step(index(Action::Eat)).await.unwrap();
    assert_eq!(eaten.reward, 1.0);
    assert_eq!(eaten.observation.hunger, HungerStatus::NotHungry);
}

#[tokio::test]
async fn descend_requires_stairs_and_a_lower_level() {
    let scenario = Scenario {
        levels: vec![
            vec!["|@>|".to_string()],
            vec!["|.@>|".to_string()],
        ],
        ..Scenario::single_level(["|@|"])
    };
    let mut env = TextDungeon::new(scenario).unwrap();
    env.reset().await.unwrap();

    let refused = env.step(index(Action::Descend)).await.unwrap();
    assert_eq!(refused.observation.depth, 1);
    assert_eq!(refused.observation.message, "You can't go down here.");

    env.step(index(Action::East)).await.unwrap();
    let below = env.step(index(Action::Descend)).await.unwrap();
    assert_eq!(below.observation.depth, 2);
    assert_eq!(below.observation.position, Position::new(2, 0));

    // No third level under these stairs.
    env.step(index(Action::East)).await.unwrap();
    let bottom = env.step(index(Action::Descend)).await.unwrap();
    assert_eq!(bottom.observation.depth, 2);
}

#[tokio::test]
async fn stepping_after_the_end_is_an_error() {
    let scenario = Scenario {
        step_limit: Some(1),
        ..Scenario::single_level(["|@.|"])
    };
    let mut env = TextDungeon::new(scenario).unwrap();

    assert!(matches!(
        env.step(index(Action::Wait)).await,
        Err(RuntimeError::EpisodeOver)
    ));

    env.reset().await.unwrap();
    let last = env.step(index(Action::Wait)).await.unwrap();
    assert!(last.truncated);
    assert!(matches!(
        env.step(index(Action::Wait)).await,
        Err(RuntimeError::EpisodeOver)
    ));
}

#[test]
fn scenarios_load_from_ron_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"(
            name: "from disk",
            levels: [["|@$>|"], ["|@%|"]],
            hunger_interval: Some(50),
            starting_hunger: Hungry,
        )"#
    )
    .unwrap();

    let scenario = Scenario::load(file.path()).unwrap();
    assert_eq!(scenario.name, "from disk");
    assert_eq!(scenario.levels.len(), 2);
    assert_eq!(scenario.hunger_interval, Some(50));
    assert_eq!(scenario.step_limit, None);
    assert_eq!(scenario.starting_hunger, HungerStatus::Hungry);
    assert_eq!(scenario.max_hp, 12);
    assert!(TextDungeon::new(scenario).is_ok());
}

#[test]
fn invalid_scenarios_are_rejected() {
    let missing = Scenario::load(std::path::Path::new("/nonexistent/scenario.ron"));
    assert!(matches!(missing, Err(RuntimeError::ScenarioIo { .. })));

    assert!(matches!(
        Scenario::from_ron_str("(levels: oops)"),
        Err(RuntimeError::ScenarioParse(_))
    ));

    let two_starts = TextDungeon::new(Scenario::single_level(["|@@|"]));
    assert!(matches!(two_starts, Err(RuntimeError::InvalidScenario(_))));

    let no_start = TextDungeon::new(Scenario::single_level(["|..|"]));
    assert!(matches!(no_start, Err(RuntimeError::InvalidScenario(_))));

    let ragged = TextDungeon::new(Scenario::single_level(["|@.|", "|.|"]));
    assert!(matches!(ragged, Err(RuntimeError::Grid(_))));
}
