mod config;
mod door;
mod game;

use vampire_engine::logging::{init_logging, LoggingConfig};
use vampire_engine::window::Runtime;

use crate::config::GameConfig;
use crate::game::Game;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let game = Game::new(GameConfig::default());
    Runtime::run(config::runtime_config(), config::gpu_init(), game)
}
