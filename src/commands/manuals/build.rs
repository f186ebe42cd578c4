pub const MANUAL: &str = r#"NAME
    build - generate and run the script that builds a project

SYNOPSIS
    vproj build [options] <dir>

DESCRIPTION
    This command writes the script 'build_vivado_project.tcl' into the
    directory of an already created project and runs vivado on it.

    Synthesis is run first and its timing is checked. A design whose worst
    negative slack is below -90 ns is assumed to be broken and the build stops.
    Unless '--synth-only' is set, implementation follows and must close timing
    with a worst negative slack of at least 0 ns. The bitstream and hardware
    definition are then written to the '--output' directory, which is required
    in that case.

    Runs use at most 8 threads no matter the value of '--threads'.

OPTIONS
    --project <name>
        Project to build from the project file

    --config <file>
        Project file to read (default: Vproj.toml)

    --output <dir>
        Directory to write the bitstream and hardware into

    --synth-only
        Stop after synthesis

    --threads <n>
        Number of parallel jobs for each run (default: 12)

    --vivado <path>
        Vivado binary to run

    --tcl-only
        Write the build script without running vivado

    --verbose
        Display the command being executed

EXAMPLES
    vproj build --output out/blinky build/blinky
    vproj build --synth-only --threads 4 build/blinky
"#;
