//! Loading of user-supplied module variants from a module's own directory.

use crate::core::generic::Generics;
use crate::core::module::{BaseModule, BenchContext, BenchOptions, Module};
use crate::error::{Error, LastError};
use crate::util::anyerror::Fault;
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SPECIALIZATION_PREFIX: &str = "module_";
const SPECIALIZATION_EXT: &str = "toml";

/// Option key that limits [SpecializedModule::configure_test_benches] to a
/// single test bench.
pub const BENCH_FILTER_KEY: &str = "bench";

/// Computes where the specialization for the module `name` living at `path`
/// must be placed.
pub fn specialization_file(path: &Path, name: &str) -> PathBuf {
    path.join(format!(
        "{}{}.{}",
        SPECIALIZATION_PREFIX, name, SPECIALIZATION_EXT
    ))
}

/// Turns a specialization file into a module.
pub trait LoadSpecialization {
    /// Constructs the module rooted at `path` from the specialization `file`.
    fn load(&self, path: &Path, file: &Path) -> Result<Box<dyn Module>, Fault>;
}

/// Reads specializations written as `module_<name>.toml` files.
#[derive(Debug, Default)]
pub struct TomlSpecialization;

impl LoadSpecialization for TomlSpecialization {
    fn load(&self, path: &Path, file: &Path) -> Result<Box<dyn Module>, Fault> {
        let text = std::fs::read_to_string(file)
            .map_err(|e| Error::SpecializationLoad(file.to_path_buf(), LastError(e.to_string())))?;
        let spec = SpecializationFile::from_str(&text)
            .map_err(|e| Error::SpecializationLoad(file.to_path_buf(), LastError(e.to_string())))?;
        Ok(Box::new(spec.construct(path.to_path_buf(), file)?))
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct SpecializationFile {
    module: Option<Constructor>,
    #[serde(rename = "test-bench", default)]
    test_benches: Vec<BenchConfig>,
}

/// The `[module]` table; its presence is what makes the file loadable.
#[derive(Debug, PartialEq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
struct Constructor {
    #[serde(rename = "library-suffix", default)]
    library_suffix: bool,
}

/// One generic configuration of a test bench.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    name: String,
    config: String,
    #[serde(default)]
    generics: Generics,
}

impl FromStr for SpecializationFile {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl SpecializationFile {
    fn construct(self, path: PathBuf, file: &Path) -> Result<SpecializedModule, Error> {
        match self.module {
            Some(ctor) => Ok(SpecializedModule::new(
                BaseModule::new(path).library_suffix(ctor.library_suffix),
                self.test_benches,
            )),
            None => Err(Error::MissingConstructor(file.to_path_buf())),
        }
    }
}

/// A module whose test benches run under several generic configurations.
#[derive(Debug, PartialEq)]
pub struct SpecializedModule {
    base: BaseModule,
    test_benches: Vec<BenchConfig>,
}

impl SpecializedModule {
    pub fn new(base: BaseModule, test_benches: Vec<BenchConfig>) -> Self {
        Self {
            base: base,
            test_benches: test_benches,
        }
    }
}

impl Module for SpecializedModule {
    fn base(&self) -> &BaseModule {
        &self.base
    }

    fn configure_test_benches(
        &self,
        context: &mut dyn BenchContext,
        options: &BenchOptions,
    ) -> Result<(), Fault> {
        let only = options.get(BENCH_FILTER_KEY);
        for tb in &self.test_benches {
            if only.is_some_and(|name| name != &tb.name) {
                continue;
            }
            tracing::debug!(
                "module {} adds config {} to {}",
                self.get_name(),
                tb.config,
                tb.name
            );
            context.add_config(&tb.name, &tb.config, &tb.generics)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::module::test::{create_file, RecordedBenches};

    const SPEC_1: &str = r#"
[module]
library-suffix = true

[[test-bench]]
name = "tb_resync"
config = "narrow"
generics = { width = 1, fast = false }

[[test-bench]]
name = "tb_resync"
config = "wide"
generics = { width = 32, fast = true }

[[test-bench]]
name = "tb_counter"
config = "default"
"#;

    #[test]
    fn convention_file_name() {
        assert_eq!(
            specialization_file(Path::new("/modules/resync"), "resync"),
            PathBuf::from("/modules/resync/module_resync.toml")
        );
    }

    #[test]
    fn load_specialized_module() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("resync");
        let file = create_file(&specialization_file(&root, "resync"));
        std::fs::write(&file, SPEC_1).unwrap();

        let m = TomlSpecialization.load(&root, &file).unwrap();
        assert_eq!(m.get_name(), "resync");
        assert_eq!(m.get_library_name(), "resync_lib");

        let mut ctx = RecordedBenches::default();
        m.configure_test_benches(&mut ctx, &BenchOptions::new()).unwrap();
        assert_eq!(
            ctx.configs,
            vec![
                (
                    String::from("tb_resync"),
                    String::from("narrow"),
                    String::from("width=1 fast=1'b0")
                ),
                (
                    String::from("tb_resync"),
                    String::from("wide"),
                    String::from("width=32 fast=1'b1")
                ),
                (
                    String::from("tb_counter"),
                    String::from("default"),
                    String::new()
                ),
            ]
        );
    }

    #[test]
    fn bench_filter_option() {
        let m = SpecializationFile::from_str(SPEC_1)
            .unwrap()
            .construct(PathBuf::from("/modules/resync"), Path::new("module_resync.toml"))
            .unwrap();
        let mut ctx = RecordedBenches::default();
        let opts = BenchOptions::from([(BENCH_FILTER_KEY.to_string(), "tb_counter".to_string())]);
        m.configure_test_benches(&mut ctx, &opts).unwrap();
        assert_eq!(ctx.configs.len(), 1);
        assert_eq!(ctx.configs[0].0, "tb_counter");
    }

    #[test]
    fn missing_constructor_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("apa");
        let file = create_file(&specialization_file(&root, "apa"));
        std::fs::write(&file, "[[test-bench]]\nname = \"tb\"\nconfig = \"c\"\n").unwrap();

        let err = TomlSpecialization.load(&root, &file).unwrap_err();
        assert_eq!(
            err.to_string(),
            Error::MissingConstructor(file).to_string()
        );
    }

    #[test]
    fn malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("apa");
        let file = create_file(&specialization_file(&root, "apa"));
        std::fs::write(&file, "[module]\nunknown-key = 1\n").unwrap();

        let err = TomlSpecialization.load(&root, &file).unwrap_err();
        assert!(err.to_string().starts_with("failed to load module specialization"));
    }
}
