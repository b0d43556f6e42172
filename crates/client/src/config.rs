//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Which input provider plays the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerMode {
    #[default]
    RandomWalk,
    Wait,
}

impl std::str::FromStr for PlayerMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "random" | "random-walk" => Ok(Self::RandomWalk),
            "wait" => Ok(Self::Wait),
            other => Err(format!("unknown player mode '{other}'")),
        }
    }
}

/// Headless session settings.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Seed for placement, the engine, and the random walker.
    pub seed: u64,
    /// Map name under `<data dir>/maps/`.
    pub map: String,
    pub fungus_count: usize,
    /// Player inputs to submit before stopping.
    pub turns: usize,
    pub player_mode: PlayerMode,
    /// Content directory; `None` uses the bundled data.
    pub data_dir: Option<PathBuf>,
    pub command_buffer_size: usize,
    /// Also write logs to a file under the platform cache directory.
    pub log_to_file: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            map: "cavern".to_owned(),
            fungus_count: grotto_content::ScenarioBuilder::DEFAULT_FUNGUS_COUNT,
            turns: 100,
            player_mode: PlayerMode::default(),
            data_dir: None,
            command_buffer_size: 32,
            log_to_file: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GROTTO_SEED` - RNG seed (default: 0)
    /// - `GROTTO_MAP` - map name (default: cavern)
    /// - `GROTTO_FUNGI` - fungi placed at start (default: 25)
    /// - `GROTTO_TURNS` - player inputs to play (default: 100)
    /// - `GROTTO_PLAYER` - `random` or `wait` (default: random)
    /// - `GROTTO_DATA_DIR` - content directory (default: bundled)
    /// - `GROTTO_COMMAND_BUFFER` - runtime command channel size (default: 32)
    /// - `GROTTO_LOG_FILE` - `true` to also log to a file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("GROTTO_SEED") {
            config.seed = seed;
        }
        if let Ok(map) = env::var("GROTTO_MAP") {
            config.map = map;
        }
        if let Some(count) = read_env::<usize>("GROTTO_FUNGI") {
            config.fungus_count = count;
        }
        if let Some(turns) = read_env::<usize>("GROTTO_TURNS") {
            config.turns = turns;
        }
        if let Some(mode) = read_env::<PlayerMode>("GROTTO_PLAYER") {
            config.player_mode = mode;
        }
        if let Ok(dir) = env::var("GROTTO_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(size) = read_env::<usize>("GROTTO_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(enabled) = read_env::<bool>("GROTTO_LOG_FILE") {
            config.log_to_file = enabled;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
