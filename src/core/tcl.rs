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

//! Translation of a project description into vivado TCL.
//!
//! Both scripts are plain strings computed from the project description; no
//! file is written here.

use crate::core::constraint::Constraint;
use crate::core::generic::Generics;
use crate::core::module::Module;
use crate::error::{Error, Hint};
use crate::util::anyerror::Fault;
use crate::util::filesystem::{absolute, to_tcl_path};
use std::path::{Path, PathBuf};

/// Highest thread count `set_param general.maxThreads` accepts.
pub const MAX_THREADS: usize = 8;

/// Name of the bundled clock crossing constraint copied into each project.
pub const CLOCK_CROSSING_FILE: &str = "constrain_clock_crossings.tcl";

pub const SYNTH_RUN: &str = "synth_1";
pub const IMPL_RUN: &str = "impl_1";

/// Synthesis tolerates some negative slack.
///
/// The clock crossing constraint forces -100 on every unhandled crossing, so
/// anything above -90 is a genuine (and fixable in implementation) violation.
const SYNTH_SLACK_LIMIT: i32 = -90;
const IMPL_SLACK_LIMIT: i32 = 0;

/// One launched run and the criteria it must meet to continue the build.
#[derive(Debug, PartialEq)]
struct Stage<'a> {
    run: &'a str,
    slack_limit: i32,
    timing_error: String,
}

impl<'a> Stage<'a> {
    fn synthesis(run: &'a str) -> Self {
        Self {
            run: run,
            slack_limit: SYNTH_SLACK_LIMIT,
            timing_error: format!(
                "Timing not OK after {} run. Probably due to an unhandled clock crossings.",
                run
            ),
        }
    }

    fn implementation(run: &'a str) -> Self {
        Self {
            run: run,
            slack_limit: IMPL_SLACK_LIMIT,
            timing_error: format!("Timing not OK after {} run.", run),
        }
    }

    /// Launches the run, waits on it, then exits with an error if it did not
    /// finish or if its worst slack is below the limit.
    fn to_tcl(&self) -> String {
        let run = self.run;
        let mut tcl = format!("launch_runs {}\n", run);
        tcl += &format!("wait_on_run {}\n", run);
        tcl += "\n";
        tcl += &format!(
            "if {{[get_property PROGRESS [get_runs {}]] != \"100%\"}} {{\n",
            run
        );
        tcl += &format!("  puts \"ERROR: Run {} failed.\"\n", run);
        tcl += "  exit 1\n";
        tcl += "}\n";
        tcl += "\n";
        tcl += &format!("open_run {}\n", run);
        tcl += &format!(
            "if {{[expr {{[get_property SLACK [get_timing_paths -delay_type min_max]] < {}}}]}} {{\n",
            self.slack_limit
        );
        tcl += &format!("  puts \"ERROR: {}\"\n", self.timing_error);
        tcl += "  exit 1\n";
        tcl += "}\n";
        tcl
    }
}

/// Everything needed to write the TCL that creates and builds a project.
#[derive(Debug)]
pub struct VivadoTcl {
    name: String,
    modules: Vec<Box<dyn Module>>,
    part: String,
    top: String,
    block_design: Option<PathBuf>,
    generics: Generics,
    constraints: Vec<Constraint>,
    clock_crossings: Option<PathBuf>,
    entity_constraints: Vec<Constraint>,
}

impl VivadoTcl {
    pub fn new(name: &str, modules: Vec<Box<dyn Module>>, part: &str, top: &str) -> Self {
        Self {
            name: name.to_string(),
            modules: modules,
            part: part.to_string(),
            top: top.to_string(),
            block_design: None,
            generics: Generics::new(),
            constraints: Vec::new(),
            clock_crossings: None,
            entity_constraints: Vec::new(),
        }
    }

    /// Sets the TCL file that creates the block design.
    pub fn block_design(mut self, file: Option<PathBuf>) -> Self {
        self.block_design = file;
        self
    }

    pub fn generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self
    }

    /// Sets the user constraints, which are read first and in the given order.
    pub fn constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replaces the bundled clock crossing constraint with `file`.
    pub fn clock_crossings(mut self, file: Option<PathBuf>) -> Self {
        self.clock_crossings = file;
        self
    }

    /// Sets the constraints gathered from the modules, which are read last.
    pub fn entity_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.entity_constraints = constraints;
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_top(&self) -> &str {
        &self.top
    }

    pub fn get_modules(&self) -> &[Box<dyn Module>] {
        &self.modules
    }

    /// Lists every constraint read into a project living in `project_folder`.
    ///
    /// The user constraints come first, then the clock crossing constraint,
    /// then the entity constraints. Without an explicit clock crossing file,
    /// the bundled copy inside `project_folder` is referenced.
    pub fn constraints_for(&self, project_folder: &Path) -> Vec<Constraint> {
        let crossings = match &self.clock_crossings {
            Some(file) => file.clone(),
            None => project_folder.join(CLOCK_CROSSING_FILE),
        };
        let mut all = self.constraints.clone();
        all.push(Constraint::new(crossings));
        all.extend(self.entity_constraints.iter().cloned());
        all
    }

    /// Reads each module's synthesis files into the module's library.
    ///
    /// Modules without synthesis files are left out entirely.
    fn add_modules(&self) -> Result<String, Fault> {
        let mut tcl = String::new();
        for module in &self.modules {
            let files = module.get_synthesis_files()?;
            if files.is_empty() == true {
                continue;
            }
            let mut file_list = Vec::with_capacity(files.len());
            for file in &files {
                file_list.push(to_tcl_path(&absolute(file)?));
            }
            tcl += &format!(
                "read_vhdl -library {} -vhdl2008 {{{}}}\n",
                module.get_library_name(),
                file_list.join(" ")
            );
        }
        Ok(tcl)
    }

    fn add_block_design(&self) -> Result<String, Fault> {
        Ok(match &self.block_design {
            Some(file) => format!("source {}\n", to_tcl_path(&absolute(file)?)),
            None => String::new(),
        })
    }

    /// Sets the top level generics according to
    /// https://www.xilinx.com/support/answers/52217.html.
    fn add_generics(&self) -> String {
        match self.generics.is_empty() {
            true => String::new(),
            false => format!(
                "set_property generic {{{}}} [current_fileset]\n",
                self.generics.to_tcl_list()
            ),
        }
    }

    fn add_constraints(&self, project_folder: &Path) -> Result<String, Fault> {
        let mut tcl = String::new();
        for constraint in &self.constraints_for(project_folder) {
            let file = to_tcl_path(&absolute(constraint.get_file())?);
            tcl += &match constraint.get_reference() {
                Some(r) => format!("read_xdc -ref {} -unmanaged {}\n", r, file),
                None => format!("read_xdc -unmanaged {}\n", file),
            };
            if constraint.in_synthesis() == false {
                tcl += &format!("set_property used_in_synthesis false [get_files {}]\n", file);
            }
            if constraint.in_implementation() == false {
                tcl += &format!(
                    "set_property used_in_implementation false [get_files {}]\n",
                    file
                );
            }
        }
        Ok(tcl)
    }

    /// Writes the TCL that creates the project inside `project_folder`.
    pub fn create(&self, project_folder: &Path) -> Result<String, Fault> {
        let mut tcl = format!(
            "create_project {} {} -part {}\n",
            self.name,
            to_tcl_path(project_folder),
            self.part
        );
        tcl += "set_property target_language VHDL [current_project]\n";
        tcl += "\n";
        tcl += &self.add_modules()?;
        tcl += "\n";
        tcl += &self.add_block_design()?;
        tcl += "\n";
        tcl += &self.add_generics();
        tcl += "\n";
        tcl += &self.add_constraints(project_folder)?;
        tcl += "\n";
        tcl += &format!("set_property top {} [current_fileset]\n", self.top);
        tcl += "reorder_files -auto -disable_unused\n";
        tcl += "\n";
        tcl += "exit\n";
        Ok(tcl)
    }

    /// Writes the TCL that synthesizes the project and, unless `synth_only`
    /// is set, implements it and exports the bitstream and hardware
    /// definition into `output_path`.
    ///
    /// Requests for more than [MAX_THREADS] threads are capped.
    pub fn build(
        &self,
        project_file: &Path,
        synth_only: bool,
        num_threads: usize,
        output_path: Option<&Path>,
    ) -> Result<String, Fault> {
        let output_path = match (synth_only, output_path) {
            (_, Some(p)) => Some(absolute(p)?),
            (true, None) => None,
            (false, None) => return Err(Error::MissingOutputPath(Hint::OutputOrSynthOnly).into()),
        };
        let num_threads = num_threads.min(MAX_THREADS);

        let mut tcl = format!("open_project {}\n", to_tcl_path(&absolute(project_file)?));
        tcl += &format!("set_param general.maxThreads {}\n", num_threads);
        tcl += "\n";
        tcl += &Stage::synthesis(SYNTH_RUN).to_tcl();
        tcl += "\n";
        if let (false, Some(output_path)) = (synth_only, &output_path) {
            tcl += &Stage::implementation(IMPL_RUN).to_tcl();
            tcl += "\n";
            tcl += &self.write_bitstream(output_path);
            tcl += &self.write_hwdef(output_path);
            tcl += "\n";
        }
        tcl += "exit\n";
        Ok(tcl)
    }

    // vivado appends the file extension for both exports

    fn write_bitstream(&self, output_path: &Path) -> String {
        format!("write_bitstream {}\n", to_tcl_path(&output_path.join(&self.name)))
    }

    fn write_hwdef(&self, output_path: &Path) -> String {
        format!("write_hwdef {}\n", to_tcl_path(&output_path.join(&self.name)))
    }
}
