pub const MANUAL: &str = r#"NAME
    vproj - vivado project compiler

SYNOPSIS
    vproj [options] [command]

DESCRIPTION
    Vproj reads a declarative project file describing one or more FPGA designs
    and turns each into the TCL scripts vivado needs to create and build the
    project. Vivado is then run in batch mode on the generated script.

    HDL sources are organized into modules. A module is any directory found
    directly inside one of the module roots listed in the project file. Its
    synthesis sources sit directly in the module directory and its testbenches
    in 'test/'. Constraints for the module's entities go in
    'entity_constraints/'.

COMMANDS
    create
        Generate and run the script that creates a project

    build
        Generate and run the script that builds a project

    list
        Display the projects defined in the project file

OPTIONS
    --version
        Print version information and exit

    --color <when>
        Coloring: auto, always, never

    --help, -h
        Print help information

ENVIRONMENT
    VPROJ_VIVADO
        Vivado binary to run when neither the command-line nor the project
        file sets one

    VPROJ_LOG
        Filter for diagnostic messages written to stderr (default: warn)

Use 'vproj help config' to read about the project file format.
"#;
