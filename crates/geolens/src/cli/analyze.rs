//! The `geolens analyze` command: run one image through the pipeline.

use clap::Args;
use geolens_core::{AnalysisResponse, Analyzer, Config};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Publicly reachable URL of the image
    pub image_url: String,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the analyze command, printing the response JSON to stdout.
///
/// The URL is passed on exactly as given; only a blank one is rejected.
pub async fn execute(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    if args.image_url.trim().is_empty() {
        anyhow::bail!("Missing image URL");
    }

    let analyzer = Analyzer::from_config(&config)?;
    let response = analyzer.analyze(&args.image_url).await;
    println!("{}", render(&response, args.pretty)?);
    Ok(())
}

fn render(response: &AnalysisResponse, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
}
