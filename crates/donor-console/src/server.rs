use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::error::ConsoleError;
use crate::protocol::{Request, Response};
use crate::session::Session;

/// Answer JSON-lines requests from `reader` until it is exhausted, writing one
/// response line per request. Blank lines are skipped; a line that does not
/// parse gets a `Response::Error` and the loop continues.
pub fn serve<R: BufRead, W: Write>(
    session: &mut Session,
    reader: R,
    mut writer: W,
) -> Result<usize, ConsoleError> {
    let mut handled = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                debug!(?request, "request received");
                session.handle(request)
            }
            Err(e) => Response::Error(format!("invalid request: {e}")),
        };

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }
    info!(handled, "input closed");
    Ok(handled)
}
