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

use std::env;

/// Overrides the default vivado binary.
pub const VPROJ_VIVADO: &str = "VPROJ_VIVADO";
/// Filter directives for diagnostic logging.
pub const VPROJ_LOG: &str = "VPROJ_LOG";

/// The binary used when nothing else selects one.
pub const DEFAULT_VIVADO: &str = "vivado";
/// The log filter used when `VPROJ_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Picks the vivado binary to run.
///
/// The first explicitly set value wins, in the order: command-line, project
/// file, then the `VPROJ_VIVADO` environment variable.
pub fn select_vivado(cli: Option<&str>, project: Option<&str>) -> String {
    select_vivado_with(cli, project, env::var(VPROJ_VIVADO).ok())
}

fn select_vivado_with(cli: Option<&str>, project: Option<&str>, env_var: Option<String>) -> String {
    cli.or(project)
        .map(|s| s.to_string())
        .or(env_var.filter(|s| s.is_empty() == false))
        .unwrap_or_else(|| DEFAULT_VIVADO.to_string())
}
