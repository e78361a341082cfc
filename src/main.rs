use attrgen::{CliArgs, GeneratorConfig, LoggingConfig, init_logging, run};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = GeneratorConfig::from_args(cli)?;
    let summary = match run(config) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "generation failed");
            return Err(err);
        }
    };

    for artifact in &summary.artifacts {
        match &artifact.error {
            None => println!("wrote {}", artifact.path.display()),
            Some(err) => eprintln!("failed {}: {err}", artifact.path.display()),
        }
    }
    for asset in &summary.assets {
        match &asset.error {
            None => println!("wrote {} ({})", asset.path.display(), asset.kind),
            Some(err) => eprintln!("failed {} ({}): {err}", asset.path.display(), asset.kind),
        }
    }

    // Auxiliary asset failures are a mixed outcome, not a hard failure.
    if !summary.primary_succeeded() {
        anyhow::bail!("generation finished with failed artifacts");
    }
    Ok(())
}
