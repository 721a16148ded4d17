//! The console event loop: host lines and session timers, whichever comes
//! first.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::{Console, Flow};

/// Runs the console until the host quits or input ends. Events are
/// written to `out` as they happen.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input or writing events fails.
pub async fn run<R, W>(console: &mut Console, input: R, out: &mut W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.flush(out)?;
    let mut lines = input.lines();
    loop {
        let wait = console
            .next_deadline()
            .map(|due| Duration::from_millis(due.saturating_sub(console.now_ms())));
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("input closed");
                    break;
                };
                let now = console.now_ms();
                if console.apply_line(&line, now, out)? == Flow::Quit {
                    info!("host quit");
                    break;
                }
            }
            () = sleep(wait.unwrap_or_default()), if wait.is_some() => {
                let now = console.now_ms();
                debug!(now, "timer wake-up");
                console.tick(now, out)?;
            }
        }
    }
    Ok(())
}
