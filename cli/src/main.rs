mod commands;
mod terminal;

use commands::{CommandLine, Commands, diff, interesting, list, probe};
use rekon_common::config::{Config, LookupConfig, ProbeConfig};
use terminal::print;

use crate::terminal::spinner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.no_banner, commands.quiet);

    let mut cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
        probe: ProbeConfig::default(),
        lookup: LookupConfig::default(),
    };

    match commands.command {
        Commands::Probe(args) => {
            cfg.probe = args.probe_config();
            probe::probe(args, &cfg).await
        }
        Commands::Diff(args) => {
            cfg.lookup = args.keywords.lookup_config();
            diff::diff(args, &cfg)
        }
        Commands::Interesting(args) => {
            cfg.lookup = args.keywords.lookup_config();
            interesting::interesting(args, &cfg)
        }
        Commands::List(args) => list::list(args, &cfg),
    }
}
