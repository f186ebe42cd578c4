use crate::commands::helps::build;
use crate::core::config::{self, CONFIG_FILE};
use crate::core::project::DEFAULT_THREADS;
use crate::core::runner::VivadoRunner;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Build {
    dir: PathBuf,
    project: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    threads: Option<usize>,
    vivado: Option<String>,
    synth_only: bool,
    tcl_only: bool,
    verbose: bool,
}

impl Subcommand<()> for Build {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(build::HELP))?;
        Ok(Build {
            // Flags
            synth_only: cli.check(Arg::flag("synth-only"))?,
            tcl_only: cli.check(Arg::flag("tcl-only"))?,
            verbose: cli.check(Arg::flag("verbose"))?,
            // Options
            project: cli.get(Arg::option("project").value("name"))?,
            config: cli.get(Arg::option("config").value("file"))?,
            output: cli.get(Arg::option("output").value("dir"))?,
            threads: cli.get(Arg::option("threads").value("n"))?,
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
        let threads = self.threads.unwrap_or(DEFAULT_THREADS);

        if self.tcl_only == true {
            let script =
                project.build_tcl(&self.dir, self.synth_only, threads, self.output.as_deref())?;
            println!("info: wrote script {}", script.display());
            return Ok(());
        }

        println!(
            "info: building project {} in {}",
            project.get_name(),
            self.dir.display()
        );
        project.build_with(
            &self.dir,
            self.output.as_deref(),
            self.synth_only,
            threads,
            &VivadoRunner::new().verbose(self.verbose),
        )?;
        match &self.output {
            Some(out) if self.synth_only == false => {
                println!("info: wrote bitstream and hardware to {}", out.display())
            }
            _ => println!("info: synthesis met the timing limit"),
        }
        Ok(())
    }
}
