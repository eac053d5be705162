use std::env;
use std::path::PathBuf;

/// System-wide install location for bundled natives
const PATH_SHARE: &str = "/usr/share/steamworks-loader";

/// Directory holding the bundled native libraries.
///
/// A system install wins; otherwise the `natives` folder next to the
/// running executable is used.
pub fn resource_dir() -> std::io::Result<PathBuf> {
    let localinstall = PathBuf::from(PATH_SHARE);
    if localinstall.exists() {
        return Ok(localinstall);
    }

    let exe = env::current_exe()?;
    let exe_dir = exe.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        )
    })?;
    Ok(exe_dir.join("natives"))
}

/// System temp directory (honours `TMPDIR` / `TEMP`)
pub fn temp_dir() -> PathBuf {
    env::temp_dir()
}

/// Current user's home directory, if the OS reports one
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}
