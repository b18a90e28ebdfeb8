use crate::config::Config;
use crate::display::print_parts;
use crate::output::DownloadDir;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use wiredit_client::HttpRenderService;
use wiredit_common::RealFileSystem;
use wiredit_editor::DocumentIO;
use wiredit_preview::{RenderFormat, RenderRequest, RenderResult, RenderService};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Diagram file (.yml or .yaml)
    pub file: PathBuf,

    /// Output format (svg, png, html); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<RenderFormat>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn render(args: RenderArgs, config: &Config, cwd: &Path) -> Result<()> {
    let io = DocumentIO::new(RealFileSystem);
    let loaded = io.load(&cwd.join(&args.file))?;
    let format = args.format.unwrap_or(config.default_format);

    println!(
        "{} {} as {}",
        "Rendering".bright_blue().bold(),
        loaded.file_name,
        format
    );

    let service = HttpRenderService::new(&config.server_url, config.render_timeout())?;
    let request = RenderRequest {
        token: 1,
        document: loaded.text,
        format,
    };
    let result = RenderResult::from_response(request.token, format, service.render(&request).await);

    let diagram = match &result.outcome {
        Ok(diagram) => diagram,
        Err(err) => return Err(anyhow!("{} ({})", err, err.kind())),
    };

    let out = DownloadDir::new(match args.out {
        Some(dir) => cwd.join(dir),
        None => config.get_preview_dir(cwd),
    });
    for path in out.write_render(&result)? {
        println!("  {} {}", "✓".green(), path.display());
    }

    println!();
    print_parts(diagram.parts().as_ref());

    Ok(())
}
