use crate::config::Config;
use crate::output::spawn_preview_writer;
use crate::session::{report, EditSession, Flow};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use wiredit_client::{HttpAssistant, HttpRenderService};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Diagram file to open; starts from the template when omitted
    pub file: Option<PathBuf>,
}

pub async fn edit(args: EditArgs, config: &Config, cwd: &Path) -> Result<()> {
    let service = HttpRenderService::new(&config.server_url, config.render_timeout())?;
    let assistant = HttpAssistant::new(&config.server_url, config.assistant_timeout())?;

    let mut session = EditSession::new(config, cwd, Arc::new(service), Arc::new(assistant));
    if let Some(file) = &args.file {
        if let Err(err) = session.open(file) {
            report(&err);
        }
    }

    let writer = spawn_preview_writer(session.pipeline().subscribe(), session.downloads().clone());

    println!("{}", "wiredit interactive editor".bright_blue().bold());
    println!("  server:  {}", config.server_url);
    println!("  preview: {}", session.downloads().path().display());
    println!("  Type :help for commands, :quit to leave");
    println!();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = LinesStream::new(stdin.lines());

    loop {
        prompt(session.is_pasting(), session.pending_asks());
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else {
                    break;
                };
                if session.handle_line(&line?) == Flow::Quit {
                    break;
                }
            }
            Some(reply) = session.next_reply() => {
                println!();
                session.receive(reply);
            }
        }
    }

    writer.abort();
    Ok(())
}

fn prompt(pasting: bool, pending_asks: usize) {
    let marker = match (pasting, pending_asks) {
        (true, _) => "… ".to_string(),
        (false, 0) => "wiredit> ".to_string(),
        (false, n) => format!("wiredit ({n} asking)> "),
    };
    print!("{}", marker.dimmed());
    let _ = std::io::stdout().flush();
}
