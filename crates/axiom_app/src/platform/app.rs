use std::io::{self, Stdout};

use anyhow::Context;
use axiom_app::{AppConfig, Session};
use axiom_core::Msg;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::cli::CliArgs;
use super::commands::{parse_line, Command, HELP};
use super::render::Renderer;

pub async fn run_app(args: CliArgs) -> anyhow::Result<()> {
    let config = AppConfig::resolve(args.overrides()).context("invalid configuration")?;
    let mut session = Session::connect(&config).context("cannot reach backend")?;
    info!(
        "axiom started api_url={} top_k={} reveal_delay={:?}",
        config.api_url, config.top_k, config.reveal_delay
    );

    let mut renderer = Renderer::new(io::stdout());
    renderer.print_line(&format!("axiom: asking {}", config.api_url))?;
    renderer.print_empty_hint()?;
    renderer.print_line(HELP)?;
    session.dispatch(Msg::DocumentsRequested);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut engine_open = true;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed, exiting");
                    break;
                };
                if !handle_line(&line, &mut session, &mut renderer)? {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                if session.state().is_busy() {
                    session.stop();
                } else {
                    break;
                }
            }
            alive = session.pump(), if engine_open => {
                if !alive {
                    warn!("engine event channel closed");
                    engine_open = false;
                }
            }
        }

        if let Some(view) = session.take_changes() {
            renderer.render(&view)?;
        }
    }

    if session.state().is_busy() {
        session.stop();
    }
    Ok(())
}

/// Returns `false` when the user asked to quit.
fn handle_line(
    line: &str,
    session: &mut Session,
    renderer: &mut Renderer<Stdout>,
) -> anyhow::Result<bool> {
    match parse_line(line) {
        Command::Query(query) => {
            if session.state().is_busy() {
                renderer.print_line("Still answering; /stop to interrupt.")?;
            } else {
                session.submit(&query);
            }
        }
        Command::Upload(path) => session.dispatch(Msg::UploadRequested(path)),
        Command::ListDocuments => {
            renderer.print_library(&session.view())?;
            session.dispatch(Msg::DocumentsRequested);
        }
        Command::Stop => session.stop(),
        Command::Reset => session.reset(),
        Command::Help => renderer.print_line(HELP)?,
        Command::Quit => return Ok(false),
        Command::Unknown(text) => {
            renderer.print_line(&format!("unknown command {text}"))?;
            renderer.print_line(HELP)?;
        }
    }
    Ok(true)
}
