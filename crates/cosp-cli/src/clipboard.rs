//! Raw clipboard bytes via the platform paste commands.
//!
//! A one-shot CLI has no long-lived display connection, so it shells out to
//! pbpaste / wl-paste / xclip instead of holding a clipboard session.

use anyhow::Result;

pub fn read() -> Result<Vec<u8>> {
    imp::read()
}

#[cfg(unix)]
mod imp {
    use anyhow::{Context, Result, bail};
    use std::process::Command;

    #[cfg(target_os = "macos")]
    pub fn read() -> Result<Vec<u8>> {
        run_paste_command(Command::new("pbpaste"))
    }

    #[cfg(not(target_os = "macos"))]
    pub fn read() -> Result<Vec<u8>> {
        // Wayland first, X11 fallback.
        let mut wl_paste = Command::new("wl-paste");
        wl_paste.arg("--no-newline");
        if let Ok(data) = run_paste_command(wl_paste) {
            return Ok(data);
        }

        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard", "-o"]);
        run_paste_command(xclip)
    }

    fn run_paste_command(mut cmd: Command) -> Result<Vec<u8>> {
        let program = cmd.get_program().to_string_lossy().into_owned();
        let output = cmd
            .output()
            .with_context(|| format!("Failed to run {program}"))?;
        if !output.status.success() {
            bail!("{program} exited with {}", output.status);
        }
        Ok(output.stdout)
    }
}

#[cfg(not(unix))]
mod imp {
    use anyhow::{Result, bail};

    pub fn read() -> Result<Vec<u8>> {
        bail!("Clipboard paste is not supported on this platform")
    }
}
