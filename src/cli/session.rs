use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, warn};

use super::CliError;
use crate::session::{Calculator, CalculatorConfig, InputEvent, Notification};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename = "inputRejected")]
struct InputRejected {
    error: String,
}

pub async fn run_session<R, W>(
    config: &CalculatorConfig,
    input: R,
    mut output: W,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut calculator = Calculator::new(config)?;
    let started = Instant::now();
    let mut outbox: Vec<Notification> = Vec::new();
    let mut lines = input.lines();
    let mut input_open = true;

    calculator.initial_render(&mut outbox);
    flush(&mut output, &mut outbox).await?;

    loop {
        let deadline = calculator.next_deadline();
        if !input_open && deadline.is_none() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let now = started.elapsed();
                calculator.poll(now, &mut outbox);
                match line? {
                    Some(line) => {
                        let rejected = handle_line(&mut calculator, &line, now, &mut outbox);
                        flush(&mut output, &mut outbox).await?;
                        if let Some(rejected) = rejected {
                            write_line(&mut output, &rejected).await?;
                        }
                    }
                    None => {
                        debug!("session input closed");
                        input_open = false;
                    }
                }
            }
            _ = sleep_until(started + deadline.unwrap_or_default()), if deadline.is_some() => {
                calculator.poll(started.elapsed(), &mut outbox);
            }
        }
        flush(&mut output, &mut outbox).await?;
    }

    output.flush().await?;
    Ok(())
}

fn handle_line(
    calculator: &mut Calculator,
    line: &str,
    now: std::time::Duration,
    outbox: &mut Vec<Notification>,
) -> Option<InputRejected> {
    if line.trim().is_empty() {
        return None;
    }
    let event = match serde_json::from_str::<InputEvent>(line) {
        Ok(event) => event,
        Err(err) => {
            warn!(%err, "malformed session event");
            return Some(InputRejected {
                error: format!("invalid event: {err}"),
            });
        }
    };
    match calculator.handle(event, now, outbox) {
        Ok(()) => None,
        Err(err) => {
            error!(%err, "parameter store rejected a write");
            Some(InputRejected {
                error: err.to_string(),
            })
        }
    }
}

async fn flush<W>(output: &mut W, outbox: &mut Vec<Notification>) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
{
    for notification in outbox.drain(..) {
        write_line(output, &notification).await?;
    }
    Ok(())
}

async fn write_line<W, T>(output: &mut W, value: &T) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut encoded = serde_json::to_vec(value)?;
    encoded.push(b'\n');
    output.write_all(&encoded).await?;
    Ok(())
}
