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

use crate::core::module::{BaseModule, Module};
use crate::core::specialization::{self, LoadSpecialization, TomlSpecialization};
use crate::util::anyerror::Fault;
use glob::Pattern;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Builds a module from its directory.
pub type ModuleFactory = Box<dyn Fn(PathBuf) -> Box<dyn Module>>;

/// Discovers the modules living under a set of root directories.
///
/// A module is built by the first source that applies:
/// 1. a factory registered in code for the module's name
/// 2. a `module_<name>.toml` specialization file inside the module directory
/// 3. the default [BaseModule]
pub struct Registry {
    factories: HashMap<String, ModuleFactory>,
    loader: Box<dyn LoadSpecialization>,
    library_suffix: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            loader: Box::new(TomlSpecialization),
            library_suffix: false,
        }
    }

    /// Uses the legacy `<name>_lib` library names for default modules.
    pub fn library_suffix(mut self, enabled: bool) -> Self {
        self.library_suffix = enabled;
        self
    }

    /// Registers the `factory` that builds the module called `name`.
    pub fn register(mut self, name: &str, factory: ModuleFactory) -> Self {
        self.factories.insert(name.to_string(), factory);
        self
    }

    /// Finds every module directly under each of the `roots`, in the order the
    /// roots are given.
    ///
    /// When `names` is given, only modules with a listed name are kept.
    /// Modules sharing a name across roots are all returned.
    pub fn discover(
        &self,
        roots: &[PathBuf],
        names: Option<&HashSet<String>>,
    ) -> Result<Vec<Box<dyn Module>>, Fault> {
        let mut modules: Vec<Box<dyn Module>> = Vec::new();
        let mut seen = HashSet::new();

        for root in roots {
            for dir in Self::list_dirs(root)? {
                let name = match dir.file_name() {
                    Some(n) => n.to_string_lossy().to_string(),
                    None => continue,
                };
                if names.is_some_and(|set| set.contains(&name) == false) {
                    continue;
                }
                if seen.insert(name.clone()) == false {
                    tracing::warn!(
                        "module {:?} is defined more than once (again at {:?})",
                        name,
                        dir
                    );
                }
                modules.push(self.build(dir, &name)?);
            }
        }
        tracing::debug!("discovered {} modules", modules.len());
        Ok(modules)
    }

    /// Creates the module called `name` rooted at `dir`.
    fn build(&self, dir: PathBuf, name: &str) -> Result<Box<dyn Module>, Fault> {
        if let Some(factory) = self.factories.get(name) {
            tracing::trace!("using registered factory for module {}", name);
            return Ok(factory(dir));
        }
        let file = specialization::specialization_file(&dir, name);
        match file.exists() {
            true => {
                tracing::trace!("loading specialization {:?}", file);
                self.loader.load(&dir, &file)
            }
            false => Ok(Box::new(
                BaseModule::new(dir).library_suffix(self.library_suffix),
            )),
        }
    }

    /// Lists the immediate subdirectories of `root`.
    fn list_dirs(root: &Path) -> Result<Vec<PathBuf>, Fault> {
        let glob_str = format!("{}/*", Pattern::escape(&root.display().to_string()));
        let mut dirs = Vec::new();
        for entry in glob::glob(&glob_str)? {
            let entry = entry?;
            if entry.is_dir() == true {
                dirs.push(entry);
            }
        }
        Ok(dirs)
    }
}
