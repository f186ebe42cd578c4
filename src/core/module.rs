use crate::core::constraint::{Constraint, UsedIn};
use crate::core::generic::Generics;
use crate::util::anyerror::Fault;
use crate::util::filesystem;
use glob::Pattern;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// File extensions recognized as HDL source code.
pub const SOURCE_CODE_EXTENSIONS: [&str; 2] = ["vhd", "v"];

/// Subdirectory holding simulation-only sources.
pub const TEST_DIR: &str = "test";

/// Subdirectory holding constraints applied to every instance of an entity.
pub const ENTITY_CONSTRAINTS_DIR: &str = "entity_constraints";

const LIBRARY_SUFFIX: &str = "_lib";

/// Free-form options handed to [Module::configure_test_benches] by the
/// verification runner.
pub type BenchOptions = HashMap<String, String>;

/// The verification runner's side of test bench configuration.
pub trait BenchContext {
    /// Registers a configuration `name` of the test bench `bench` that runs
    /// with the given `generics`.
    fn add_config(&mut self, bench: &str, name: &str, generics: &Generics) -> Result<(), Fault>;
}

/// The default module: a directory of sources compiled into one library.
#[derive(Debug, PartialEq, Clone)]
pub struct BaseModule {
    path: PathBuf,
    name: String,
    library_suffix: bool,
}

impl BaseModule {
    /// Creates a new module rooted at the directory `path`.
    ///
    /// The module is named after the directory.
    pub fn new(path: PathBuf) -> Self {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => path.display().to_string(),
        };
        Self {
            path: path,
            name: name,
            library_suffix: false,
        }
    }

    /// Names the library `<name>_lib` instead of `<name>`.
    ///
    /// Built-in libraries are named e.g. `ieee` and not `ieee_lib`, so this
    /// only exists for projects that still depend on the old names.
    pub fn library_suffix(mut self, enabled: bool) -> Self {
        self.library_suffix = enabled;
        self
    }

    /// Lists the source code files directly inside each of the `folders`.
    ///
    /// Directories that do not exist contribute nothing.
    fn collect_source_files(folders: &[PathBuf]) -> Result<Vec<PathBuf>, Fault> {
        let mut files = Vec::new();
        for folder in folders {
            for entry in Self::list_folder(folder, "*")? {
                if entry.is_file() && filesystem::has_extension(&entry, &SOURCE_CODE_EXTENSIONS) {
                    files.push(entry);
                }
            }
        }
        Ok(files)
    }

    /// Lists every entry directly in `folder` matching the glob `pattern`.
    fn list_folder(folder: &Path, pattern: &str) -> Result<Vec<PathBuf>, Fault> {
        let glob_str = format!("{}/{}", Pattern::escape(&folder.display().to_string()), pattern);
        let mut entries = Vec::new();
        for entry in glob::glob(&glob_str)? {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

/// Behavior shared by every module variant.
///
/// Specialized variants only need to expose their [BaseModule] and override
/// whatever hooks they care about.
pub trait Module: Debug {
    fn base(&self) -> &BaseModule;

    fn get_path(&self) -> &PathBuf {
        &self.base().path
    }

    fn get_name(&self) -> &str {
        &self.base().name
    }

    /// The library this module's sources are compiled into.
    fn get_library_name(&self) -> String {
        let base = self.base();
        match base.library_suffix {
            true => format!("{}{}", base.name, LIBRARY_SUFFIX),
            false => base.name.clone(),
        }
    }

    /// Files that should be included in a synthesis project.
    ///
    /// The filesystem is read on every call.
    fn get_synthesis_files(&self) -> Result<Vec<PathBuf>, Fault> {
        BaseModule::collect_source_files(&[self.get_path().clone()])
    }

    /// Files that should be included in a simulation project.
    fn get_simulation_files(&self) -> Result<Vec<PathBuf>, Fault> {
        let root = self.get_path();
        BaseModule::collect_source_files(&[root.clone(), root.join(TEST_DIR)])
    }

    /// Constraints applied to a certain entity within the module.
    fn get_entity_constraints(&self) -> Result<Vec<Constraint>, Fault> {
        Ok(BaseModule::list_folder(&self.get_path().join(ENTITY_CONSTRAINTS_DIR), "*.tcl")?
            .into_iter()
            .filter(|f| f.is_file())
            .map(|f| Constraint::entity(f, UsedIn::All))
            .collect())
    }

    /// Sets up the module's test benches that run with several generic
    /// configurations.
    ///
    /// Does nothing unless a specialization overrides it.
    fn configure_test_benches(
        &self,
        _context: &mut dyn BenchContext,
        _options: &BenchOptions,
    ) -> Result<(), Fault> {
        Ok(())
    }
}

impl Module for BaseModule {
    fn base(&self) -> &BaseModule {
        self
    }
}
