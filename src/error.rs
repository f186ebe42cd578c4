use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("path {0:?} already exists{1}")]
    PathAlreadyExists(PathBuf, Hint),
    #[error("an output path must be specified when running implementation{0}")]
    MissingOutputPath(Hint),
    #[error("project file does not exist in the specified location: {0:?}")]
    ProjectFileNotFound(PathBuf),
    #[error("exited with error code: {0}")]
    ChildProcErrorCode(i32),
    #[error("terminated by signal")]
    ChildProcTerminated,
    #[error("failed to execute vivado process: {0}")]
    ToolProcFailed(LastError),
    #[error("failed to load module specialization {0:?}: {1}")]
    SpecializationLoad(PathBuf, LastError),
    #[error("module specialization {0:?} does not define a [module] constructor table")]
    MissingConstructor(PathBuf),
    #[error("no project named {0:?}{1}")]
    ProjectNotFound(String, Hint),
    #[error("a project must be specified{0}")]
    ProjectNotSpecified(Hint),
    #[error("no projects are defined in {0:?}")]
    NoProjectsDefined(PathBuf),
    #[error("unknown stage {0:?} for constraint usage: expected \"all\", \"synth\", or \"impl\"")]
    InvalidUsedIn(String),
    #[error("failed to parse {0:?}: {1}")]
    ConfigParse(PathBuf, LastError),
    #[error("missing configuration file {0:?}")]
    ConfigNotFound(PathBuf),
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = match s.split_whitespace().next() {
            Some(w) => w,
            None => return s,
        };
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1 && first_word.chars().any(|c| c.is_ascii_lowercase()) == false {
            s
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    ProjectsList,
    ProjectSelect,
    OutputOrSynthOnly,
    CreateNotBuild,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::ProjectsList => "use `vproj list` to see the list of defined projects",
            Self::ProjectSelect => {
                "use \"--project\" to select one of the projects defined in the configuration"
            }
            Self::OutputOrSynthOnly => {
                "pass \"--output <dir>\" to export the bitstream or use \"--synth-only\""
            }
            Self::CreateNotBuild => "use `vproj build` to build an existing project directory",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}
