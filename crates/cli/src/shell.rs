//! Line loop connecting a [`Session`] to an input reader and an output
//! writer.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::session::{Session, BANNER};

/// Runs until the session quits or input ends. A line that is not valid
/// UTF-8 is dropped and the loop keeps going; other read errors end it.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{BANNER}")?;
    let mut lines = input.lines();
    loop {
        write!(out, "{}", session.prompt())?;
        out.flush()?;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                writeln!(out)?;
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Ignoring unreadable input line: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };
        let step = session.handle(&line);
        for text in &step.lines {
            writeln!(out, "{text}")?;
        }
        if step.quit {
            break;
        }
    }
    Ok(())
}
