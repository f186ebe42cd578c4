pub const HELP: &str = r#"Create a vivado project.

Usage:
    vproj create [options] <dir>

Args:
    <dir>                   directory to create the project in

Options:
    --project <name>        project to create from the project file
    --config <file>         project file to read (default: Vproj.toml)
    --vivado <path>         vivado binary to run
    --tcl-only              write the creation script without running vivado
    --verbose               display the command being executed

Use 'vproj help create' to read more about the command.
"#;
