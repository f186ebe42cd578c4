pub const HELP: &str = r#"Build an existing vivado project.

Usage:
    vproj build [options] <dir>

Args:
    <dir>                   directory holding the project

Options:
    --project <name>        project to build from the project file
    --config <file>         project file to read (default: Vproj.toml)
    --output <dir>          directory to write the bitstream and hardware into
    --synth-only            stop after synthesis
    --threads <n>           number of parallel jobs for each run (default: 12)
    --vivado <path>         vivado binary to run
    --tcl-only              write the build script without running vivado
    --verbose               display the command being executed

Use 'vproj help build' to read more about the command.
"#;
