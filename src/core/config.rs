use crate::core::constraint::Constraint;
use crate::core::generic::Generics;
use crate::core::project::{ProjectOptions, VivadoProject};
use crate::core::registry::Registry;
use crate::error::{Error, Hint, LastError};
use crate::util::anyerror::Fault;
use crate::util::environment;
use crate::util::filesystem;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "Vproj.toml";

pub trait FromFile: FromStr
where
    Self: Sized,
    <Self as std::str::FromStr>::Err: 'static + StdError,
{
    fn from_file(path: &Path) -> Result<Self, Fault> {
        // try to open the file in read-only mode
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_str(&text)?)
    }
}

/// The declarative description of one or more vivado projects.
#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "project", default)]
    projects: Vec<ProjectEntry>,
}

/// One `[[project]]` entry.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    name: String,
    part: String,
    top: Option<String>,
    #[serde(rename = "block-design")]
    block_design: Option<PathBuf>,
    vivado: Option<String>,
    /// Directories whose subdirectories are modules, searched in order.
    #[serde(default)]
    modules: Vec<PathBuf>,
    /// Keeps only the modules named here.
    names: Option<Vec<String>>,
    #[serde(rename = "library-suffix", default)]
    library_suffix: bool,
    #[serde(default)]
    generics: Generics,
    #[serde(rename = "constraint", default)]
    constraints: Vec<Constraint>,
    #[serde(rename = "clock-crossings")]
    clock_crossings: Option<PathBuf>,
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl FromFile for Config {
    fn from_file(path: &Path) -> Result<Self, Fault> {
        if path.exists() == false {
            return Err(Error::ConfigNotFound(path.to_path_buf()).into());
        }
        let contents = std::fs::read_to_string(path)?;
        match Self::from_str(&contents) {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::ConfigParse(path.to_path_buf(), LastError(e.to_string())))?,
        }
    }
}

impl Config {
    pub fn get_projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    /// Picks the project called `name`.
    ///
    /// When no name is given, the configuration must define exactly one project.
    pub fn select(&self, name: Option<&str>, file: &Path) -> Result<&ProjectEntry, Error> {
        match name {
            Some(n) => match self.projects.iter().find(|p| p.name == n) {
                Some(p) => Ok(p),
                None => Err(Error::ProjectNotFound(n.to_string(), Hint::ProjectsList)),
            },
            None => match self.projects.len() {
                0 => Err(Error::NoProjectsDefined(file.to_path_buf())),
                1 => Ok(&self.projects[0]),
                _ => Err(Error::ProjectNotSpecified(Hint::ProjectSelect)),
            },
        }
    }
}

impl ProjectEntry {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_vivado(&self) -> Option<&str> {
        self.vivado.as_deref()
    }

    /// Discovers the entry's modules and assembles the project.
    ///
    /// Relative paths are resolved against `root`, the directory holding the
    /// configuration file.
    pub fn to_project(
        &self,
        root: &Path,
        vivado_path: String,
        defined_at: Option<String>,
    ) -> Result<VivadoProject, Fault> {
        let roots: Vec<PathBuf> = self
            .modules
            .iter()
            .map(|m| filesystem::resolve_rel_path(root, m))
            .collect();
        let names: Option<HashSet<String>> = self
            .names
            .as_ref()
            .map(|list| list.iter().cloned().collect());

        let modules = Registry::new()
            .library_suffix(self.library_suffix)
            .discover(&roots, names.as_ref())?;

        let options = ProjectOptions {
            top: self.top.clone(),
            block_design: self
                .block_design
                .as_ref()
                .map(|f| filesystem::resolve_rel_path(root, f)),
            generics: self.generics.clone(),
            vivado_path: Some(vivado_path),
            constraints: self
                .constraints
                .iter()
                .map(|c| c.clone().relative_to(root))
                .collect(),
            defined_at: defined_at,
            clock_crossings: self
                .clock_crossings
                .as_ref()
                .map(|f| filesystem::resolve_rel_path(root, f)),
        };
        VivadoProject::new(&self.name, modules, &self.part, options)
    }
}

/// The directory that relative paths in the configuration `file` are written against.
fn config_root(file: &Path) -> PathBuf {
    match file.parent() {
        Some(p) if p.as_os_str().is_empty() == false => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Reads the configuration `file` and assembles the project called `name`.
///
/// The `vivado` binary from the command-line takes priority over the one the
/// project entry sets.
pub fn open_project(
    file: &Path,
    name: Option<&str>,
    vivado: Option<&str>,
) -> Result<VivadoProject, Fault> {
    let cfg = Config::from_file(file)?;
    let entry = cfg.select(name, file)?;
    tracing::debug!("selected project {} from {:?}", entry.get_name(), file);
    entry.to_project(
        &config_root(file),
        environment::select_vivado(vivado, entry.get_vivado()),
        Some(file.display().to_string()),
    )
}

/// Reads the configuration `file` and assembles every project it defines.
pub fn open_projects(file: &Path) -> Result<Vec<VivadoProject>, Fault> {
    let cfg = Config::from_file(file)?;
    let root = config_root(file);
    cfg.get_projects()
        .iter()
        .map(|entry| {
            entry.to_project(
                &root,
                environment::select_vivado(None, entry.get_vivado()),
                Some(file.display().to_string()),
            )
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::constraint::UsedIn;
    use crate::core::module::test::create_file;

    const CFG_1: &str = r#"
[[project]]
name = "test_proj"
part = "xczu3eg-sfva625-1-i"
modules = ["modules", "/opt/shared"]
names = ["apa", "resync"]
generics = { enable = true, integer = 123, slv = "4'b0101" }

[[project.constraint]]
file = "pinning.tcl"

[[project.constraint]]
file = "clocks.tcl"
ref = "apa"
used-in = "synth"

[[project]]
name = "blinky"
part = "xc7z020clg400-1"
top = "blinky_wrapper"
block-design = "bd/system.tcl"
vivado = "/opt/Xilinx/Vivado/2017.4/bin/vivado"
library-suffix = true
"#;

    #[test]
    fn from_toml_string() {
        let cfg = Config::from_str(CFG_1).unwrap();
        assert_eq!(cfg.get_projects().len(), 2);
        let p = &cfg.get_projects()[0];
        assert_eq!(p.name, "test_proj");
        assert_eq!(p.modules, vec![PathBuf::from("modules"), PathBuf::from("/opt/shared")]);
        assert_eq!(
            p.generics.to_tcl_list(),
            "enable=1'b1 integer=123 slv=4'b0101"
        );
        assert_eq!(
            p.constraints,
            vec![
                Constraint::new(PathBuf::from("pinning.tcl")),
                Constraint::new(PathBuf::from("clocks.tcl"))
                    .reference("apa")
                    .used_in(UsedIn::Synth),
            ]
        );
        let p = &cfg.get_projects()[1];
        assert_eq!(p.top.as_deref(), Some("blinky_wrapper"));
        assert_eq!(p.get_vivado(), Some("/opt/Xilinx/Vivado/2017.4/bin/vivado"));
        assert_eq!(p.library_suffix, true);
    }

    #[test]
    fn unknown_keys_rejected() {
        let cfg = "[[project]]\nname = \"a\"\npart = \"p\"\ndevice = \"x\"\n";
        assert!(Config::from_str(cfg).is_err());
    }

    #[test]
    fn select_project() {
        let path = PathBuf::from(CONFIG_FILE);
        let cfg = Config::from_str(CFG_1).unwrap();
        assert_eq!(cfg.select(Some("blinky"), &path).unwrap().get_name(), "blinky");
        assert_eq!(
            cfg.select(Some("nope"), &path),
            Err(Error::ProjectNotFound(String::from("nope"), Hint::ProjectsList))
        );
        assert_eq!(
            cfg.select(None, &path),
            Err(Error::ProjectNotSpecified(Hint::ProjectSelect))
        );

        let cfg = Config::from_str("[[project]]\nname = \"a\"\npart = \"p\"\n").unwrap();
        assert_eq!(cfg.select(None, &path).unwrap().get_name(), "a");

        let cfg = Config::default();
        assert_eq!(cfg.select(None, &path), Err(Error::NoProjectsDefined(path.clone())));
    }

    #[test]
    fn from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.to_string(), Error::ConfigNotFound(path).to_string());
    }

    #[test]
    fn from_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_file(&dir.path().join(CONFIG_FILE));
        std::fs::write(&path, "[[project]]\nname = 1\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn entry_to_project() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        create_file(&root.join("modules").join("apa").join("a.vhd"));
        create_file(&root.join("modules").join("zebra").join("z.vhd"));
        create_file(&root.join("modules").join("resync").join("resync.vhd"));

        let cfg = Config::from_str(
            r#"
[[project]]
name = "test_proj"
part = "xczu3eg-sfva625-1-i"
modules = ["modules"]
names = ["apa", "resync"]
clock-crossings = "tcl/crossings.tcl"

[[project.constraint]]
file = "pinning.tcl"
"#,
        )
        .unwrap();
        let proj = cfg.get_projects()[0]
            .to_project(root, String::from("vivado"), Some(String::from("Vproj.toml")))
            .unwrap();
        assert_eq!(proj.get_top(), "test_proj_top");
        let names: Vec<&str> = proj
            .get_tcl()
            .get_modules()
            .iter()
            .map(|m| m.get_name())
            .collect();
        assert_eq!(names, vec!["apa", "resync"]);
        assert_eq!(
            proj.get_tcl().constraints_for(&root.join("vivado")),
            vec![
                Constraint::new(root.join("pinning.tcl")),
                Constraint::new(root.join("tcl").join("crossings.tcl")),
            ]
        );
    }

    #[test]
    fn open_selected_project() {
        let dir = tempfile::tempdir().unwrap();
        let file = create_file(&dir.path().join(CONFIG_FILE));
        std::fs::write(
            &file,
            "[[project]]\nname = \"a\"\npart = \"p\"\nvivado = \"/opt/vivado\"\n\n[[project]]\nname = \"b\"\npart = \"p\"\n",
        )
        .unwrap();

        let proj = open_project(&file, Some("a"), None).unwrap();
        assert_eq!(proj.get_vivado_path(), "/opt/vivado");
        let proj = open_project(&file, Some("a"), Some("/cli/vivado")).unwrap();
        assert_eq!(proj.get_vivado_path(), "/cli/vivado");
        assert_eq!(
            proj.to_string(),
            format!("VivadoProject defined at: {}\nName: a\nTop level: a_top", file.display())
        );
        assert!(open_project(&file, None, None).is_err());

        let all = open_projects(&file).unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.get_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn root_of_bare_file_name() {
        assert_eq!(config_root(Path::new(CONFIG_FILE)), PathBuf::from("."));
        assert_eq!(
            config_root(Path::new("/work/fpga/Vproj.toml")),
            PathBuf::from("/work/fpga")
        );
    }
}
