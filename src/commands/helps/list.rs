pub const HELP: &str = r#"Display the projects of a project file.

Usage:
    vproj list [options]

Options:
    --config <file>         project file to read (default: Vproj.toml)

Use 'vproj help list' to read more about the command.
"#;
