pub mod command;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use std::path::PathBuf;

use command::Command;

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Where the posts are stored
    #[arg(long, default_value = "./comment-board/comment-board.db", env = "COMMENT_BOARD_DB")]
    database: PathBuf,
    #[command(subcommand)]
    command: Command,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .format_timestamp(None)
            .init();
    }
    pub const fn database(&self) -> &PathBuf {
        &self.database
    }
    pub const fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommand_and_database() {
        let config = Config::try_parse_from([
            "comment-board",
            "--database",
            "/tmp/board.db",
            "reply",
            "1",
            "21",
            "thanks",
        ])
        .unwrap();

        assert_eq!(config.database(), &PathBuf::from("/tmp/board.db"));
        assert_eq!(
            config.command(),
            &Command::Reply {
                post_id: "1".to_string(),
                comment_id: "21".to_string(),
                content: "thanks".to_string(),
            }
        );
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Config::try_parse_from(["comment-board"]).is_err());
    }
}
