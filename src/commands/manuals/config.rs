pub const MANUAL: &str = r#"NAME
    config - the project file format

DESCRIPTION
    A project file, named 'Vproj.toml' by default, defines projects as an array
    of tables. Relative paths are resolved against the directory holding the
    project file.

    [[project]]
    name = "blinky"                 # required
    part = "xc7z020clg400-1"        # required
    top = "blinky_top"              # default: <name>_top
    block-design = "bd/system.tcl"  # sourced before the top level is set
    vivado = "/opt/vivado/bin/vivado"
    modules = ["modules"]           # directories holding the modules
    names = ["blinky", "resync"]    # keep only these modules
    library-suffix = false          # name libraries <module>_lib
    clock-crossings = "tcl/cdc.tcl" # replaces the bundled constraint
    generics = { enable = true, width = 8, init = "4'b0101" }

    [[project.constraint]]
    file = "pinning.tcl"            # required
    ref = "blinky"                  # scope to instances of this entity
    used-in = "impl"                # all, synth, or impl (default: all)

    Generics keep the order they are written in. Booleans are passed to vivado
    as 1'b1 and 1'b0.

MODULE SPECIALIZATION
    A module directory may hold 'module_<name>.toml' to change how the module is
    loaded. The file must contain a [module] table and may list testbench
    configurations.

    [module]
    library-suffix = true

    [[test-bench]]
    name = "tb_resync"
    config = "fast"
    generics = { stages = 2 }
"#;
