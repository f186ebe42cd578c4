pub const MANUAL: &str = r#"NAME
    create - generate and run the script that creates a project

SYNOPSIS
    vproj create [options] <dir>

DESCRIPTION
    This command makes the directory <dir> and writes the script
    'create_vivado_project.tcl' into it. Vivado is then run in batch mode on the
    script from inside <dir>.

    The script creates the project for the selected part, adds every module's
    synthesis sources into the module's own library, reads the constraints,
    and sets the top level entity and its generics.

    The directory must not already exist. It is kept even when vivado fails, so
    the script and the vivado log can be inspected.

    When the project file defines exactly one project, '--project' may be
    omitted.

OPTIONS
    --project <name>
        Project to create from the project file

    --config <file>
        Project file to read (default: Vproj.toml)

    --vivado <path>
        Vivado binary to run

    --tcl-only
        Write the creation script without running vivado

    --verbose
        Display the command being executed

EXAMPLES
    vproj create build/blinky
    vproj create --project blinky --vivado /opt/Xilinx/Vivado/2017.4/bin/vivado build/blinky
"#;
