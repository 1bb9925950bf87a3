mod cli;

use anyhow::{Context, Result};
use cigartree::pipeline::Job;
use cigartree::publish::{HttpPublisher, Publisher, RecordingPublisher};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let job = Job::new(&args.family_id, &args.tree, &args.alignment)
        .with_format(args.format.into())
        .with_options(args.options());

    let publisher: Box<dyn Publisher> = if args.dry_run {
        Box::new(RecordingPublisher::new())
    } else {
        Box::new(HttpPublisher::new(&args.base_url))
    };

    let acknowledgement = job
        .run(&publisher, &mut std::io::stderr())
        .with_context(|| format!("failed to publish cigar tree for family '{}'", args.family_id))?;

    if let Some(document) = acknowledgement {
        println!("{}", serde_json::to_string_pretty(&document)?);
    }
    tracing::info!(family_id = %args.family_id, dry_run = args.dry_run, "cigartree: done");
    Ok(())
}
