use crate::commands::helps::vproj;
use crate::util::anyerror::AnyError;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};
use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq)]
pub struct Vproj {
    version: bool,
    color: Option<ColorMode>,
    command: Option<VprojSubcommand>,
}

impl Command for Vproj {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(vproj::HELP))?;
        Ok(Vproj {
            version: cli.check(Arg::flag("version"))?,
            color: cli.get(Arg::option("color").value("when"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // set the coloring mode before anything is displayed
        match self.color.unwrap_or(ColorMode::Auto) {
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
            ColorMode::Auto => (),
        }
        // prioritize version information
        if self.version == true {
            println!("vproj {}", VERSION);
            Ok(())
        // run the specified command
        } else if let Some(c) = self.command {
            c.execute(&())
        // if no command is given then print default help
        } else {
            Ok(println!("{}", vproj::HELP))
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum ColorMode {
    Always,
    Never,
    Auto,
}

impl FromStr for ColorMode {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "auto" => Ok(Self::Auto),
            _ => Err(AnyError(format!(
                "unknown coloring mode '{}': expected auto, always, or never",
                s
            ))),
        }
    }
}

use crate::commands::build::Build;
use crate::commands::create::Create;
use crate::commands::help::Help as HelpCommand;
use crate::commands::list::List;

#[derive(Debug, PartialEq)]
enum VprojSubcommand {
    Create(Create),
    Build(Build),
    List(List),
    Help(HelpCommand),
}

impl Subcommand<()> for VprojSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli.select(&["create", "build", "list", "help"])?.as_ref() {
            "create" => Ok(VprojSubcommand::Create(Create::interpret(cli)?)),
            "build" => Ok(VprojSubcommand::Build(Build::interpret(cli)?)),
            "list" => Ok(VprojSubcommand::List(List::interpret(cli)?)),
            "help" => Ok(VprojSubcommand::Help(HelpCommand::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, context: &()) -> proc::Result {
        match self {
            VprojSubcommand::Create(c) => c.execute(context),
            VprojSubcommand::Build(c) => c.execute(context),
            VprojSubcommand::List(c) => c.execute(context),
            VprojSubcommand::Help(c) => c.execute(context),
        }
    }
}
