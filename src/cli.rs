use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bwh-traffic-bot")]
#[command(author, version, about = "Telegram bot reporting BandwagonHost VPS traffic usage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Print a traffic report to the console and exit
    Report {
        /// VEID to query; repeat for several. Defaults to BWH_VEID
        #[arg(long = "veid")]
        veids: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
