use anyhow::Context;
use colored::Colorize;

use evmerge_engine::{verify, MergeEngine, MergeOptions};
use evmerge_harness::io::{read_indices, read_workload, write_indices, write_workload};
use evmerge_harness::{generate, rng_for, run, HarnessConfig, RunReport};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(args, &cli.format),
        Command::Generate(args) => cmd_generate(args, &cli.format),
        Command::Merge(args) => cmd_merge(args, &cli.format),
        Command::Verify(args) => cmd_verify(args, &cli.format),
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn harness_config(args: &WorkloadArgs) -> anyhow::Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HarnessConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.workload.seed = Some(seed);
    }
    if let Some(n) = args.max_partitions {
        config.workload.max_partitions = n;
    }
    if let Some(n) = args.max_extra_events {
        config.workload.max_extra_events = n;
    }
    if let Some(n) = args.max_increment {
        config.workload.max_increment = n;
    }
    config.validate()?;
    Ok(config)
}

fn merge_options(strict: bool) -> MergeOptions {
    if strict { MergeOptions::strict() } else { MergeOptions::default() }
}

fn cmd_run(args: RunArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut config = harness_config(&args.workload)?;
    if let Some(n) = args.iterations {
        config.iterations = n;
    }
    if args.strict {
        config.merge = MergeOptions::strict();
    }

    let reports = run(&config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => reports.iter().for_each(print_report),
    }

    let failed = reports.iter().filter(|r| !r.verified).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} runs failed verification", reports.len());
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "Merged {} events in {} partitions",
        report.events.to_string().bold(),
        report.partitions.to_string().bold()
    );
    println!("  took {}ns ({} comparisons)", report.elapsed_ns, report.comparisons);
    match &report.failure {
        None => println!("  {} ordering verified", "✓".green().bold()),
        Some(reason) => println!("  {} {}", "✗ failed:".red().bold(), reason),
    }
}

fn cmd_generate(args: GenerateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = harness_config(&args.workload)?;
    let workload = generate(&config.workload, &mut rng_for(&config.workload))?;
    write_workload(&args.out, &workload)
        .with_context(|| format!("writing {}", args.out.display()))?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "events": workload.store.len(),
                "partitions": workload.partitions.len(),
                "path": args.out,
            })
        ),
        OutputFormat::Text => println!(
            "{} Wrote {} events in {} partitions to {}",
            "✓".green().bold(),
            workload.store.len(),
            workload.partitions.len(),
            args.out.display().to_string().bold()
        ),
    }
    Ok(())
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let workload = read_workload(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let engine = MergeEngine::new(merge_options(args.strict));
    let mut partitions = workload.partitions.clone();
    let mut indices = Vec::new();
    let stats = engine.merge_into(&workload.store, &mut partitions, &mut indices)?;

    let Some(out) = &args.out else {
        println!("{}", serde_json::to_string(&indices)?);
        return Ok(());
    };
    write_indices(out, &indices).with_context(|| format!("writing {}", out.display()))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => println!(
            "{} Merged {} events from {} partitions into {}",
            "✓".green().bold(),
            stats.events_merged,
            stats.partitions_merged,
            out.display().to_string().bold()
        ),
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let workload = read_workload(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let indices = read_indices(&args.indices)
        .with_context(|| format!("reading {}", args.indices.display()))?;

    let result = verify(&workload.store, &workload.partitions, &indices);
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "verified": result.is_ok(),
                "failure": result.as_ref().err().map(ToString::to_string),
            })
        ),
        OutputFormat::Text => match &result {
            Ok(()) => println!("{} {} indices in order", "✓".green().bold(), indices.len()),
            Err(e) => println!("{} {}", "✗".red().bold(), e),
        },
    }
    result.context("index sequence failed verification")
}
