mod commands;
mod terminal;

use commands::{CommandLine, request};
use terminal::logging;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(cfg.quiet);

    if cfg.user.is_empty() {
        warn!("No user given; pass --user or set LTS_USER");
    }

    let route = commands.command.route()?;
    request::request(route, commands.command.output_file(), &cfg).await
}
