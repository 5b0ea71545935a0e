//! A [`FormSurface`] that renders to the terminal.
//!
//! Page state lives in a [`MemorySurface`]; this wrapper echoes every
//! user-visible change to stdout and answers the confirmation dialog from
//! stdin (or from a fixed `--confirm` answer in scripts).

use std::io::Write as _;
use std::process::{Command, Stdio};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use gridlead_surface::{
    Confirmation, ConfirmationPrompt, FieldId, FormSurface, MemorySurface, Status, StatusKind,
    SurfaceError,
};

use crate::{BOLD, CYAN, DIM, GREEN, RED, RESET, YELLOW};

const MAX_PROMPT_ATTEMPTS: usize = 3;

/// How the confirmation dialog gets its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfirmMode {
    /// Ask on stdin.
    Ask,
    /// Answer "I sent it".
    Sent,
    /// Answer "I couldn't send it".
    Failed,
    /// Close the dialog without answering.
    Skip,
}

/// Terminal front end for the lead form.
pub struct TerminalSurface {
    page: MemorySurface,
    open_links: bool,
    confirm: ConfirmMode,
}

impl TerminalSurface {
    pub fn new(page: MemorySurface, open_links: bool, confirm: ConfirmMode) -> Self {
        Self {
            page,
            open_links,
            confirm,
        }
    }

    async fn ask(&self, prompt: &ConfirmationPrompt) -> Result<Confirmation, SurfaceError> {
        println!();
        println!("{BOLD}{CYAN}✉ Did your email go out?{RESET}");
        println!("  {DIM}Re-open:{RESET} {}", prompt.reopen_uri);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        for _ in 0..MAX_PROMPT_ATTEMPTS {
            print!("  [{GREEN}y{RESET}] I sent it  [{RED}n{RESET}] I couldn't send it  [enter] skip: ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                return Ok(Confirmation::Dismissed);
            };
            match line.parse() {
                Ok(answer) => return Ok(answer),
                Err(e) => println!("  {YELLOW}{e}{RESET}"),
            }
        }
        Ok(Confirmation::Dismissed)
    }
}

#[async_trait::async_trait]
impl FormSurface for TerminalSurface {
    fn has_form(&self) -> bool {
        self.page.has_form()
    }

    fn has_control(&self, field: FieldId) -> bool {
        self.page.has_control(field)
    }

    fn text_value(&self, field: FieldId) -> Option<String> {
        self.page.text_value(field)
    }

    fn is_checked(&self, field: FieldId) -> Option<bool> {
        self.page.is_checked(field)
    }

    fn show_field_error(&self, field: FieldId, message: &str) {
        println!("  {RED}✗{RESET} {BOLD}{:<8}{RESET} {message}", field.as_str());
        self.page.show_field_error(field, message);
    }

    fn clear_field_error(&self, field: FieldId) {
        self.page.clear_field_error(field);
    }

    fn set_status(&self, status: Status) {
        if !status.is_empty() {
            let icon = match status.kind {
                StatusKind::Neutral => format!("{DIM}·{RESET}"),
                StatusKind::Pending => format!("{CYAN}…{RESET}"),
                StatusKind::Success => format!("{GREEN}{BOLD}✓{RESET}"),
                StatusKind::Error => format!("{RED}{BOLD}✗{RESET}"),
            };
            println!("{icon} {}", status.text);
        }
        self.page.set_status(status);
    }

    fn try_disable_submit(&self) -> bool {
        self.page.try_disable_submit()
    }

    fn enable_submit(&self) {
        self.page.enable_submit();
    }

    fn submit_enabled(&self) -> bool {
        self.page.submit_enabled()
    }

    fn reset(&self) {
        self.page.reset();
    }

    fn navigate(&self, uri: &str) -> bool {
        if !self.open_links {
            println!("  {DIM}Open this link to send your request:{RESET}");
            println!("  {uri}");
            return true;
        }
        match Command::new(opener()).arg(uri).stdout(Stdio::null()).stderr(Stdio::null()).status() {
            Ok(status) if status.success() => {
                debug!(opener = opener(), "mail client launched");
                true
            }
            Ok(status) => {
                warn!(opener = opener(), code = ?status.code(), "opener refused the link");
                false
            }
            Err(e) => {
                warn!(opener = opener(), error = %e, "could not run opener");
                false
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> bool {
        for (program, args) in CLIPBOARD_COMMANDS {
            if pipe_to(program, args, text).is_ok() {
                debug!(program, "copied request body to clipboard");
                return self.page.copy_to_clipboard(text);
            }
        }
        println!("{DIM}─────────────────────────────────────────{RESET}");
        println!("{text}");
        println!("{DIM}─────────────────────────────────────────{RESET}");
        false
    }

    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Confirmation {
        let answer = match self.confirm {
            ConfirmMode::Sent => Confirmation::Sent,
            ConfirmMode::Failed => Confirmation::CouldNotSend,
            ConfirmMode::Skip => Confirmation::Dismissed,
            ConfirmMode::Ask => self.ask(prompt).await.unwrap_or_else(|e| {
                warn!(error = %e, "confirmation prompt failed");
                Confirmation::Dismissed
            }),
        };
        self.page.confirm(prompt).await;
        answer
    }
}

const CLIPBOARD_COMMANDS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
];

fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<(), SurfaceError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(SurfaceError::Io(std::io::Error::other(format!(
            "{program} exited with {status}"
        ))))
    }
}
