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

pub const HELP: &str = r#"Vproj creates and builds vivado projects from a project file.

Usage:
    vproj [options] [command]

Commands:
    create                generate and run the script that creates a project
    build                 generate and run the script that builds a project
    list                  display the projects defined in the project file

Options:
    --version             print version information and exit
    --color <when>        coloring: auto, always, never
    --help, -h            print help information

Use 'vproj help <command>' for more information about a command."#;
