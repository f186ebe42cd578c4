use crate::commands::helps::list;
use crate::core::config::{self, CONFIG_FILE};
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct List {
    config: Option<PathBuf>,
}

impl Subcommand<()> for List {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(list::HELP))?;
        Ok(List {
            config: cli.get(Arg::option("config").value("file"))?,
        })
    }

    fn execute(self, _: &()) -> proc::Result {
        let config_file = self.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let projects = config::open_projects(&config_file)?;
        if projects.is_empty() == true {
            println!("info: no projects are defined in {}", config_file.display());
        }
        let listing = projects
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<String>>()
            .join("\n\n");
        println!("{}", listing);
        Ok(())
    }
}
