use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Resolves a relative path into a full path if given relative to some `root` path.
///
/// This function is helpful for resolving paths written in a configuration file
/// against the directory that holds the configuration file. Absolute paths are
/// returned untouched.
pub fn resolve_rel_path(root: &Path, p: &Path) -> PathBuf {
    match p.is_relative() {
        true => root.join(p),
        false => p.to_path_buf(),
    }
}

/// Makes `p` absolute by joining it onto the current working directory when
/// it is relative.
///
/// The path does not need to exist.
pub fn absolute(p: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(p)
}

/// Converts a path into a string the TCL interpreter accepts on every platform.
///
/// TCL treats `\` as an escape character, so separators are written as `/`.
pub fn to_tcl_path(p: &Path) -> String {
    p.display().to_string().replace('\\', "/")
}

/// Checks if the `file` ends with one of the `extensions`, ignoring case.
pub fn has_extension(file: &Path, extensions: &[&str]) -> bool {
    match file.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

/// Spawns the `command` with its `args` from the `cwd` directory.
///
/// Standard output and error are inherited so the external tool's log streams
/// directly to the user.
pub fn invoke(cwd: &Path, command: &str, args: &[String]) -> std::io::Result<Child> {
    Command::new(command)
        .current_dir(cwd)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
}
