use crate::commands::helps::create;
use crate::core::config::{self, CONFIG_FILE};
use crate::core::runner::VivadoRunner;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Create {
    dir: PathBuf,
    project: Option<String>,
    config: Option<PathBuf>,
    vivado: Option<String>,
    tcl_only: bool,
    verbose: bool,
}

impl Subcommand<()> for Create {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(create::HELP))?;
        Ok(Create {
            // Flags
            tcl_only: cli.check(Arg::flag("tcl-only"))?,
            verbose: cli.check(Arg::flag("verbose"))?,
            // Options
            project: cli.get(Arg::option("project").value("name"))?,
            config: cli.get(Arg::option("config").value("file"))?,
            vivado: cli.get(Arg::option("vivado").value("path"))?,
            // Positionals
            dir: cli.require(Arg::positional("dir"))?,
        })
    }

    fn execute(self, _: &()) -> proc::Result {
        let config_file = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let project =
            config::open_project(&config_file, self.project.as_deref(), self.vivado.as_deref())?;

        if self.tcl_only == true {
            let script = project.create_tcl(&self.dir)?;
            println!("info: wrote script {}", script.display());
            return Ok(());
        }

        println!(
            "info: creating project {} in {}",
            project.get_name(),
            self.dir.display()
        );
        project.create_with(&self.dir, &VivadoRunner::new().verbose(self.verbose))?;
        println!(
            "info: created project file {}",
            project.project_file(&self.dir).display()
        );
        Ok(())
    }
}
