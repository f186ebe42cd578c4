//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::error::Error;
use crate::util::anyerror::Fault;
use crate::util::filesystem;
use std::path::Path;

/// Executes a vivado binary against a generated TCL script.
pub trait ToolRunner {
    /// Runs `tool` on the `script`, blocking until the tool exits.
    ///
    /// Errors if the tool could not be started or exited with a non-zero status.
    fn run(&self, tool: &str, script: &Path) -> Result<(), Fault>;
}

/// Runs vivado in batch mode from the directory holding the script, so the
/// tool's own log and journal files are written next to the project.
#[derive(Debug, PartialEq, Default)]
pub struct VivadoRunner {
    verbose: bool,
}

impl VivadoRunner {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Displays the literal command before running it.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn args(script: &Path) -> Vec<String> {
        vec![
            String::from("-mode"),
            String::from("batch"),
            String::from("-notrace"),
            String::from("-source"),
            filesystem::to_tcl_path(script),
        ]
    }
}

impl ToolRunner for VivadoRunner {
    fn run(&self, tool: &str, script: &Path) -> Result<(), Fault> {
        // the script must stay reachable once the working directory changes
        let script = filesystem::absolute(script)?;
        let cwd = match script.parent() {
            Some(p) => p.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let args = Self::args(&script);
        // display the literal command being ran
        if self.verbose == true {
            let s = args
                .iter()
                .fold(String::new(), |x, y| x + "\"" + &y + "\" ");
            println!("info: running: {} {}", tool, s);
        }
        tracing::debug!("running {} from {:?}", tool, cwd);
        let mut proc = filesystem::invoke(&cwd, tool, &args)?;
        let exit_code = proc.wait()?;
        match exit_code.code() {
            Some(num) => {
                if num != 0 {
                    Err(Error::ChildProcErrorCode(num))?
                } else {
                    Ok(())
                }
            }
            None => Err(Error::ChildProcTerminated)?,
        }
    }
}
