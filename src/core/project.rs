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

use crate::core::constraint::Constraint;
use crate::core::generic::Generics;
use crate::core::module::Module;
use crate::core::runner::{ToolRunner, VivadoRunner};
use crate::core::tcl::{VivadoTcl, CLOCK_CROSSING_FILE};
use crate::error::{Error, Hint, LastError};
use crate::util::anyerror::Fault;
use crate::util::environment::DEFAULT_VIVADO;
use crate::util::filesystem;
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub const CREATE_SCRIPT_FILE: &str = "create_vivado_project.tcl";
pub const BUILD_SCRIPT_FILE: &str = "build_vivado_project.tcl";
pub const PROJECT_FILE_EXT: &str = "xpr";

/// Thread count requested when none is given.
pub const DEFAULT_THREADS: usize = 12;

const TOP_SUFFIX: &str = "_top";

/// The constraint bundled with this tool that makes every unhandled clock
/// crossing fail timing.
const CLOCK_CROSSING_TCL: &str = include_str!("../../tcl/constrain_clock_crossings.tcl");

/// Optional settings for a [VivadoProject].
#[derive(Debug, Default)]
pub struct ProjectOptions {
    /// Name of the top level entity; defaults to `<name>_top`.
    pub top: Option<String>,
    /// TCL file that creates the block design.
    pub block_design: Option<PathBuf>,
    pub generics: Generics,
    /// Defaults to whatever `vivado` is found on the PATH.
    pub vivado_path: Option<String>,
    pub constraints: Vec<Constraint>,
    /// Where the project was defined, displayed when listing projects.
    pub defined_at: Option<String>,
    /// Replaces the bundled clock crossing constraint.
    pub clock_crossings: Option<PathBuf>,
}

/// A vivado project that can be created and built on disk.
///
/// Operations on the same project path must not run concurrently; vivado's
/// own project lock is the only guard and the caller is responsible for
/// serializing them.
#[derive(Debug)]
pub struct VivadoProject {
    name: String,
    top: String,
    vivado_path: String,
    defined_at: Option<String>,
    bundled_crossings: bool,
    tcl: VivadoTcl,
}

impl VivadoProject {
    /// Assembles the project.
    ///
    /// The constraints are the user's, then the clock crossing constraint,
    /// then every module's entity constraints in module order.
    pub fn new(
        name: &str,
        modules: Vec<Box<dyn Module>>,
        part: &str,
        options: ProjectOptions,
    ) -> Result<Self, Fault> {
        let top = options
            .top
            .unwrap_or_else(|| format!("{}{}", name, TOP_SUFFIX));
        let vivado_path = options
            .vivado_path
            .unwrap_or_else(|| DEFAULT_VIVADO.to_string());

        let mut entity_constraints = Vec::new();
        for module in &modules {
            entity_constraints.append(&mut module.get_entity_constraints()?);
        }
        tracing::debug!(
            "project {} reads {} user and {} entity constraints",
            name,
            options.constraints.len(),
            entity_constraints.len()
        );
        let bundled_crossings = options.clock_crossings.is_none();

        let tcl = VivadoTcl::new(name, modules, part, &top)
            .block_design(options.block_design)
            .generics(options.generics)
            .constraints(options.constraints)
            .clock_crossings(options.clock_crossings)
            .entity_constraints(entity_constraints);

        Ok(Self {
            name: name.to_string(),
            top: top,
            vivado_path: vivado_path,
            defined_at: options.defined_at,
            bundled_crossings: bundled_crossings,
            tcl: tcl,
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_top(&self) -> &str {
        &self.top
    }

    pub fn get_vivado_path(&self) -> &str {
        &self.vivado_path
    }

    pub fn get_tcl(&self) -> &VivadoTcl {
        &self.tcl
    }

    /// The project file vivado creates inside `project_path`.
    pub fn project_file(&self, project_path: &Path) -> PathBuf {
        project_path.join(format!("{}.{}", self.name, PROJECT_FILE_EXT))
    }

    /// Makes the directory `project_path` and writes the TCL that creates the
    /// project into it, along with the bundled clock crossing constraint
    /// unless another one was given.
    ///
    /// Errors if `project_path` already exists.
    pub fn create_tcl(&self, project_path: &Path) -> Result<PathBuf, Fault> {
        if project_path.exists() == true {
            return Err(Error::PathAlreadyExists(
                project_path.to_path_buf(),
                Hint::CreateNotBuild,
            )
            .into());
        }
        // vivado runs from inside the project folder
        let project_path = filesystem::absolute(project_path)?;
        let contents = self.tcl.create(&project_path)?;
        std::fs::create_dir_all(&project_path)?;

        if self.bundled_crossings == true {
            std::fs::write(project_path.join(CLOCK_CROSSING_FILE), CLOCK_CROSSING_TCL)?;
        }
        let script = project_path.join(CREATE_SCRIPT_FILE);
        std::fs::write(&script, contents)?;
        tracing::debug!("wrote {:?}", script);
        Ok(script)
    }

    /// Creates the project with vivado.
    ///
    /// The directory is kept even if vivado fails.
    pub fn create(&self, project_path: &Path) -> Result<(), Fault> {
        self.create_with(project_path, &VivadoRunner::new())
    }

    pub fn create_with(&self, project_path: &Path, runner: &dyn ToolRunner) -> Result<(), Fault> {
        let script = self.create_tcl(project_path)?;
        self.run(runner, &script)
    }

    /// Writes the TCL that builds the project living in `project_path`.
    ///
    /// Errors if the project file does not exist.
    pub fn build_tcl(
        &self,
        project_path: &Path,
        synth_only: bool,
        num_threads: usize,
        output_path: Option<&Path>,
    ) -> Result<PathBuf, Fault> {
        let project_file = self.project_file(project_path);
        if project_file.exists() == false {
            return Err(Error::ProjectFileNotFound(project_file).into());
        }
        let contents = self
            .tcl
            .build(&project_file, synth_only, num_threads, output_path)?;

        let script = project_path.join(BUILD_SCRIPT_FILE);
        std::fs::write(&script, contents)?;
        tracing::debug!("wrote {:?}", script);
        Ok(script)
    }

    /// Builds the project with vivado.
    ///
    /// The bitstream and hardware definition are written to `output_path`,
    /// which is required unless `synth_only` is set.
    pub fn build(
        &self,
        project_path: &Path,
        output_path: Option<&Path>,
        synth_only: bool,
        num_threads: usize,
    ) -> Result<(), Fault> {
        self.build_with(
            project_path,
            output_path,
            synth_only,
            num_threads,
            &VivadoRunner::new(),
        )
    }

    pub fn build_with(
        &self,
        project_path: &Path,
        output_path: Option<&Path>,
        synth_only: bool,
        num_threads: usize,
        runner: &dyn ToolRunner,
    ) -> Result<(), Fault> {
        if output_path.is_none() && synth_only == false {
            return Err(Error::MissingOutputPath(Hint::OutputOrSynthOnly).into());
        }
        let script = self.build_tcl(project_path, synth_only, num_threads, output_path)?;
        self.run(runner, &script)
    }

    fn run(&self, runner: &dyn ToolRunner, script: &Path) -> Result<(), Fault> {
        match runner.run(&self.vivado_path, script) {
            Ok(()) => Ok(()),
            Err(e) => Err(Error::ToolProcFailed(LastError(e.to_string())))?,
        }
    }
}

impl Display for VivadoProject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VivadoProject")?;
        if let Some(loc) = &self.defined_at {
            write!(f, " defined at: {}", loc)?;
        }
        write!(f, "\nName: {}\nTop level: {}", self.name, self.top)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::constraint::UsedIn;
    use crate::core::module::test::create_file;
    use crate::core::registry::Registry;
    use crate::core::runner::test::{relative_to_cwd, RecordedRuns};
    use crate::util::filesystem::to_tcl_path;

    const PART: &str = "xczu3eg-sfva625-1-i";

    struct Fixture {
        dir: tempfile::TempDir,
        project_folder: PathBuf,
        tb_vhd: PathBuf,
        proj: VivadoProject,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let modules_folder = dir.path().join("modules");
            // a library with some synth files and some test files
            create_file(&modules_folder.join("apa").join("a.vhd"));
            create_file(&modules_folder.join("apa").join("b.vhd"));
            let tb_vhd = create_file(&modules_folder.join("apa").join("test").join("c.vhd"));
            // a library with only test files
            create_file(&modules_folder.join("zebra").join("test").join("d.vhd"));
            // a library with an entity constraint
            create_file(&modules_folder.join("resync").join("resync.vhd"));
            create_file(&modules_folder.join("resync").join("entity_constraints").join("resync.tcl"));

            let modules = Registry::new().discover(&[modules_folder], None).unwrap();
            let proj = VivadoProject::new("name", modules, PART, ProjectOptions::default()).unwrap();
            Self {
                project_folder: dir.path().join("vivado"),
                tb_vhd: tb_vhd,
                dir: dir,
                proj: proj,
            }
        }
    }

    #[test]
    fn default_top_and_vivado() {
        let fx = Fixture::new();
        assert_eq!(fx.proj.get_top(), "name_top");
        assert_eq!(fx.proj.get_vivado_path(), "vivado");
    }

    #[test]
    fn constraint_order() {
        let dir = tempfile::tempdir().unwrap();
        let modules_folder = dir.path().join("modules");
        let resync = create_file(&modules_folder.join("resync").join("entity_constraints").join("resync.tcl"));
        let modules = Registry::new().discover(&[modules_folder], None).unwrap();

        let user = Constraint::new(PathBuf::from("/pins.tcl")).used_in(UsedIn::Impl);
        let proj = VivadoProject::new(
            "name",
            modules,
            PART,
            ProjectOptions {
                constraints: vec![user.clone()],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            proj.get_tcl().constraints_for(Path::new("/work/vivado")),
            vec![
                user,
                Constraint::new(PathBuf::from("/work/vivado").join(CLOCK_CROSSING_FILE)),
                Constraint::entity(resync, UsedIn::All),
            ]
        );
    }

    #[test]
    fn create_writes_script_and_runs_vivado() {
        let fx = Fixture::new();
        let runner = RecordedRuns::default();
        fx.proj.create_with(&fx.project_folder, &runner).unwrap();

        let runs = runner.runs.borrow();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "vivado");
        assert_eq!(runs[0].1, fx.project_folder.join(CREATE_SCRIPT_FILE));
        let tcl = &runs[0].2;
        assert!(tcl.contains("read_vhdl -library apa"));
        assert!(tcl.contains("zebra") == false);
        assert!(tcl.contains(&to_tcl_path(&fx.tb_vhd)) == false);
        assert!(tcl.contains("read_xdc -ref resync -unmanaged"));
    }

    #[test]
    fn create_copies_bundled_clock_crossing_constraint() {
        let fx = Fixture::new();
        let script = fx.proj.create_tcl(&fx.project_folder).unwrap();
        let tcl = std::fs::read_to_string(&script).unwrap();

        let copy = fx.project_folder.join(CLOCK_CROSSING_FILE);
        assert_eq!(std::fs::read_to_string(&copy).unwrap(), CLOCK_CROSSING_TCL);
        assert!(tcl.contains(&format!("read_xdc -unmanaged {}\n", to_tcl_path(&copy))));
    }

    #[test]
    fn create_leaves_out_bundled_copy_when_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let cdc = create_file(&dir.path().join("tcl").join("cdc.tcl"));
        let proj = VivadoProject::new(
            "name",
            Vec::new(),
            PART,
            ProjectOptions {
                clock_crossings: Some(cdc.clone()),
                ..Default::default()
            },
        )
        .unwrap();
        let project_folder = dir.path().join("vivado");
        let script = proj.create_tcl(&project_folder).unwrap();
        let tcl = std::fs::read_to_string(&script).unwrap();

        assert_eq!(project_folder.join(CLOCK_CROSSING_FILE).exists(), false);
        assert!(tcl.contains(&format!("read_xdc -unmanaged {}\n", to_tcl_path(&cdc))));
    }

    #[test]
    fn create_from_relative_project_path() {
        let fx = Fixture::new();
        let relative = relative_to_cwd(&fx.project_folder);
        assert!(relative.is_relative());

        let runner = RecordedRuns::default();
        fx.proj.create_with(&relative, &runner).unwrap();

        let runs = runner.runs.borrow();
        let script = &runs[0].1;
        // the runner gets a script it can find from any working directory
        assert!(script.is_absolute());
        assert!(script.exists());
        assert!(fx.project_folder.join(CREATE_SCRIPT_FILE).exists());
        let folder = script.parent().unwrap();
        assert!(runs[0].2.starts_with(&format!("create_project name {} -part", to_tcl_path(folder))));
    }

    #[test]
    fn create_should_raise_exception_if_project_path_already_exists() {
        let fx = Fixture::new();
        std::fs::create_dir_all(&fx.project_folder).unwrap();
        let runner = RecordedRuns::default();
        let err = fx.proj.create_with(&fx.project_folder, &runner).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fx.project_folder.join(CREATE_SCRIPT_FILE).exists(), false);
        assert_eq!(runner.runs.borrow().len(), 0);
    }

    #[test]
    fn create_keeps_directory_when_vivado_fails() {
        let fx = Fixture::new();
        let runner = RecordedRuns::failing(1);
        let err = fx.proj.create_with(&fx.project_folder, &runner).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to execute vivado process: exited with error code: 1"
        );
        assert_eq!(fx.project_folder.join(CREATE_SCRIPT_FILE).exists(), true);
    }

    #[test]
    fn build_should_raise_exception_if_project_does_not_exist() {
        let fx = Fixture::new();
        let runner = RecordedRuns::default();
        let err = fx
            .proj
            .build_with(&fx.project_folder, None, true, DEFAULT_THREADS, &runner)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            Error::ProjectFileNotFound(fx.proj.project_file(&fx.project_folder)).to_string()
        );
        assert_eq!(runner.runs.borrow().len(), 0);
    }

    #[test]
    fn build_with_impl_run_should_raise_exception_if_no_output_path_is_given() {
        let fx = Fixture::new();
        // the project exists, so only the missing output path can fail
        create_file(&fx.proj.project_file(&fx.project_folder));
        let runner = RecordedRuns::default();
        let err = fx
            .proj
            .build_with(&fx.project_folder, None, false, DEFAULT_THREADS, &runner)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            Error::MissingOutputPath(Hint::OutputOrSynthOnly).to_string()
        );
        assert_eq!(fx.project_folder.join(BUILD_SCRIPT_FILE).exists(), false);
        assert_eq!(runner.runs.borrow().len(), 0);
    }

    #[test]
    fn build_writes_script_and_runs_vivado() {
        let fx = Fixture::new();
        create_file(&fx.proj.project_file(&fx.project_folder));
        let output = fx.dir.path().join("output");
        let runner = RecordedRuns::default();
        fx.proj
            .build_with(&fx.project_folder, Some(&output), false, DEFAULT_THREADS, &runner)
            .unwrap();

        let runs = runner.runs.borrow();
        assert_eq!(runs[0].1, fx.project_folder.join(BUILD_SCRIPT_FILE));
        let tcl = &runs[0].2;
        assert!(tcl.contains("set_param general.maxThreads 8\n"));
        assert!(tcl.contains("launch_runs impl_1\n"));
        assert!(tcl.contains(&format!(
            "write_bitstream {}\n",
            to_tcl_path(&output.join("name"))
        )));
    }

    #[test]
    fn synth_only_build_needs_no_output() {
        let fx = Fixture::new();
        create_file(&fx.proj.project_file(&fx.project_folder));
        let runner = RecordedRuns::default();
        fx.proj
            .build_with(&fx.project_folder, None, true, 2, &runner)
            .unwrap();
        let runs = runner.runs.borrow();
        assert!(runs[0].2.contains("launch_runs impl_1") == false);
    }

    #[test]
    fn display_summary() {
        let proj = VivadoProject::new(
            "blinky",
            Vec::new(),
            PART,
            ProjectOptions {
                top: Some(String::from("blinky_wrapper")),
                defined_at: Some(String::from("/work/Vproj.toml")),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            proj.to_string(),
            "VivadoProject defined at: /work/Vproj.toml\nName: blinky\nTop level: blinky_wrapper"
        );
    }
}
