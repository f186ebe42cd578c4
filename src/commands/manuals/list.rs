pub const MANUAL: &str = r#"NAME
    list - display the projects defined in the project file

SYNOPSIS
    vproj list [options]

DESCRIPTION
    This command reads the project file, discovers the modules of every project
    it defines, and displays where each project was defined along with its name
    and top level entity.

OPTIONS
    --config <file>
        Project file to read (default: Vproj.toml)

EXAMPLES
    vproj list
    vproj list --config fpga/Vproj.toml
"#;
