use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

const DISABLE_ENV_VAR: &str = "TERMLIST_DISABLE_CLIPBOARD";

/// External clipboard sink. A failed write is recoverable; callers fall
/// back to printing the payload.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), AppError>;
}

pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn write(&mut self, _text: &str) -> Result<(), AppError> {
        Err(AppError::clipboard("no clipboard sink is available"))
    }
}

/// Pipes the payload into the stdin of a platform copy tool.
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new<P: Into<String>>(program: P, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl Clipboard for CommandClipboard {
    fn write(&mut self, text: &str) -> Result<(), AppError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| AppError::clipboard(err.to_string()))?;

        {
            let stdin = child
                .stdin
                .as_mut()
                .ok_or_else(|| AppError::clipboard("clipboard tool has no stdin"))?;
            stdin
                .write_all(text.as_bytes())
                .map_err(|err| AppError::clipboard(err.to_string()))?;
        }

        let status = child
            .wait()
            .map_err(|err| AppError::clipboard(err.to_string()))?;
        if !status.success() {
            return Err(AppError::clipboard(format!(
                "{} exited with {status}",
                self.program
            )));
        }

        Ok(())
    }
}

pub fn clipboard_from_env() -> Box<dyn Clipboard> {
    if std::env::var(DISABLE_ENV_VAR).is_ok() {
        return Box::new(UnavailableClipboard);
    }

    match platform_clipboard() {
        Ok(clipboard) => clipboard,
        Err(_) => Box::new(UnavailableClipboard),
    }
}

#[cfg(target_os = "linux")]
pub fn platform_clipboard() -> Result<Box<dyn Clipboard>, AppError> {
    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        Ok(Box::new(CommandClipboard::new("wl-copy", &[])))
    } else {
        Ok(Box::new(CommandClipboard::new(
            "xclip",
            &["-selection", "clipboard"],
        )))
    }
}

#[cfg(target_os = "macos")]
pub fn platform_clipboard() -> Result<Box<dyn Clipboard>, AppError> {
    Ok(Box::new(CommandClipboard::new("pbcopy", &[])))
}

#[cfg(windows)]
pub fn platform_clipboard() -> Result<Box<dyn Clipboard>, AppError> {
    Ok(Box::new(CommandClipboard::new("clip", &[])))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub fn platform_clipboard() -> Result<Box<dyn Clipboard>, AppError> {
    Err(AppError::clipboard(
        "clipboard is not supported on this platform",
    ))
}
