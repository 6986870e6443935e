mod config;

use std::error::Error;

use comment_board::{post::display_posts, PostStore, SqliteStorage};
use config::Config;
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();

    let storage = SqliteStorage::open(config.database())?;
    let mut store = PostStore::load(storage)?;

    let command = config.command();
    if command.apply(&mut store)? {
        info!("{} done", command);
    }
    display_posts(store.posts());

    Ok(())
}
