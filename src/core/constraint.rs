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
use serde_derive::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The build stage(s) a constraint file takes part in.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum UsedIn {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "synth")]
    Synth,
    #[serde(rename = "impl")]
    Impl,
}

impl Default for UsedIn {
    fn default() -> Self {
        Self::All
    }
}

impl FromStr for UsedIn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "synth" => Ok(Self::Synth),
            "impl" => Ok(Self::Impl),
            _ => Err(Error::InvalidUsedIn(s.to_string())),
        }
    }
}

impl<'de> serde::Deserialize<'de> for UsedIn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Display for UsedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::All => "all",
                Self::Synth => "synth",
                Self::Impl => "impl",
            }
        )
    }
}

/// A physical or timing constraint script read into the project.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Constraint {
    file: PathBuf,
    #[serde(rename = "ref")]
    reference: Option<String>,
    #[serde(rename = "used-in", default)]
    used_in: UsedIn,
}

impl Constraint {
    /// Creates a project-wide constraint applied in every stage.
    pub fn new(file: PathBuf) -> Self {
        Self {
            file: file,
            reference: None,
            used_in: UsedIn::All,
        }
    }

    /// Creates a constraint scoped to one entity.
    ///
    /// The entity is named after the file's stem, so `resync.tcl` applies to
    /// every instance of the `resync` entity.
    pub fn entity(file: PathBuf, used_in: UsedIn) -> Self {
        let reference = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string());
        Self {
            file: file,
            reference: reference,
            used_in: used_in,
        }
    }

    /// Restricts the constraint to the stage(s) in `used_in`.
    pub fn used_in(mut self, used_in: UsedIn) -> Self {
        self.used_in = used_in;
        self
    }

    /// Scopes the constraint to the entity or module named `r`.
    pub fn reference(mut self, r: &str) -> Self {
        self.reference = Some(r.to_string());
        self
    }

    /// Resolves a relative `file` against `root`.
    pub fn relative_to(mut self, root: &Path) -> Self {
        self.file = crate::util::filesystem::resolve_rel_path(root, &self.file);
        self
    }

    pub fn get_file(&self) -> &PathBuf {
        &self.file
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn get_used_in(&self) -> UsedIn {
        self.used_in
    }

    /// Checks if the constraint is read during synthesis.
    pub fn in_synthesis(&self) -> bool {
        self.used_in != UsedIn::Impl
    }

    /// Checks if the constraint is read during implementation.
    pub fn in_implementation(&self) -> bool {
        self.used_in != UsedIn::Synth
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entity_reference_from_stem() {
        let c = Constraint::entity(PathBuf::from("/modules/apa/entity_constraints/resync.tcl"), UsedIn::All);
        assert_eq!(c.get_reference(), Some("resync"));
        assert_eq!(c.get_used_in(), UsedIn::All);

        let c = Constraint::new(PathBuf::from("pinning.tcl"));
        assert_eq!(c.get_reference(), None);
    }

    #[test]
    fn stage_scope() {
        let c = Constraint::new(PathBuf::from("a.xdc")).used_in(UsedIn::Synth);
        assert_eq!(c.in_synthesis(), true);
        assert_eq!(c.in_implementation(), false);

        let c = Constraint::new(PathBuf::from("a.xdc")).used_in(UsedIn::Impl);
        assert_eq!(c.in_synthesis(), false);
        assert_eq!(c.in_implementation(), true);

        let c = Constraint::new(PathBuf::from("a.xdc"));
        assert_eq!(c.in_synthesis(), true);
        assert_eq!(c.in_implementation(), true);
    }

    #[test]
    fn used_in_from_str() {
        assert_eq!(UsedIn::from_str("all").unwrap(), UsedIn::All);
        assert_eq!(UsedIn::from_str("synth").unwrap(), UsedIn::Synth);
        assert_eq!(UsedIn::from_str("impl").unwrap(), UsedIn::Impl);
        assert_eq!(
            UsedIn::from_str("route"),
            Err(Error::InvalidUsedIn(String::from("route")))
        );
    }

    #[test]
    fn from_toml() {
        let toml = r#"
file = "pinning.tcl"
ref = "top_pins"
used-in = "impl"
"#;
        let c: Constraint = toml::from_str(toml).unwrap();
        assert_eq!(
            c,
            Constraint::new(PathBuf::from("pinning.tcl"))
                .reference("top_pins")
                .used_in(UsedIn::Impl)
        );

        // stage defaults to all
        let c: Constraint = toml::from_str("file = \"clocks.tcl\"").unwrap();
        assert_eq!(c, Constraint::new(PathBuf::from("clocks.tcl")));

        // unknown keys are rejected
        assert!(toml::from_str::<Constraint>("file = \"a.tcl\"\nstage = \"all\"").is_err());
    }

    #[test]
    fn unknown_stage_in_toml() {
        let err = toml::from_str::<Constraint>("file = \"a.tcl\"\nused-in = \"route\"").unwrap_err();
        assert!(err
            .to_string()
            .contains(&Error::InvalidUsedIn(String::from("route")).to_string()));
    }

    #[test]
    fn relative_file_resolution() {
        let c = Constraint::new(PathBuf::from("pins.tcl")).relative_to(Path::new("/proj"));
        assert_eq!(c.get_file(), &PathBuf::from("/proj/pins.tcl"));
    }
}
