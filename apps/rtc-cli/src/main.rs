use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use rtc_app::{
    AppResult, build_report, get_group, group_report, import_tools_config, list_groups,
    load_config, render_report, save_report,
};
use rtc_config::ReportFormat;
use rtc_graph::ControlGraph;

#[derive(Parser)]
#[command(name = "rtc-cli")]
#[command(about = "RTC tools-config importer - control groups from rtcToolsConfig XML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the control groups of a tools-config file
    Groups {
        /// Path to the rtcToolsConfig XML file
        xml_path: PathBuf,
        /// Import config (YAML or JSON); built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the members and links of one control group
    Show {
        /// Path to the rtcToolsConfig XML file
        xml_path: PathBuf,
        /// Control group name
        group: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export a report of every control group
    Export {
        /// Path to the rtcToolsConfig XML file
        xml_path: PathBuf,
        /// Report format; overrides the config
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate an import config file
    CheckConfig {
        /// Path to the import config (YAML or JSON)
        config_path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Yaml => ReportFormat::Yaml,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Groups { xml_path, config } => cmd_groups(&xml_path, config.as_deref()),
        Commands::Show {
            xml_path,
            group,
            config,
        } => cmd_show(&xml_path, &group, config.as_deref()),
        Commands::Export {
            xml_path,
            format,
            output,
            config,
        } => cmd_export(
            &xml_path,
            format.map(ReportFormat::from),
            output.as_deref(),
            config.as_deref(),
        ),
        Commands::CheckConfig { config_path } => cmd_check_config(&config_path),
    }
}

fn import(
    xml_path: &Path,
    config_path: Option<&Path>,
) -> AppResult<(rtc_config::ImportConfig, ControlGraph)> {
    let config = load_config(config_path)?;
    tracing::debug!(config = ?config_path, "Import config loaded");
    let graph = import_tools_config(xml_path, &config)?;
    Ok((config, graph))
}

fn cmd_groups(xml_path: &Path, config_path: Option<&Path>) -> AppResult<()> {
    let (_config, graph) = import(xml_path, config_path)?;
    let groups = list_groups(&graph);

    if groups.is_empty() {
        println!("No control groups found in {}", xml_path.display());
    } else {
        println!("Control groups:");
        for group in groups {
            println!(
                "  {} ({} rules, {} conditions, {} signals, {} expressions, {} inputs, {} outputs)",
                group.name,
                group.rule_count,
                group.condition_count,
                group.signal_count,
                group.expression_count,
                group.input_count,
                group.output_count
            );
        }
    }
    if !graph.unresolved().is_empty() {
        println!("{} unresolved reference(s)", graph.unresolved().len());
    }
    Ok(())
}

fn cmd_show(xml_path: &Path, group_name: &str, config_path: Option<&Path>) -> AppResult<()> {
    let (_config, graph) = import(xml_path, config_path)?;
    let report = group_report(&graph, get_group(&graph, group_name)?);

    println!("Control group: {}", report.name);
    println!("  Inputs:");
    for input in &report.inputs {
        println!("    {}", input);
    }
    println!("  Outputs:");
    for output in &report.outputs {
        println!("    {}", output);
    }
    println!("  Rules:");
    for rule in &report.rules {
        println!("    {} [{}]", rule.id, rule.kind.label());
        println!("      inputs: {}", rule.inputs.join(", "));
        println!("      outputs: {}", rule.outputs.join(", "));
        if !rule.signals.is_empty() {
            println!("      signals: {}", rule.signals.join(", "));
        }
    }
    println!("  Conditions:");
    for condition in &report.conditions {
        println!("    {} [{}]", condition.id, condition.kind.label());
        if let Some(input) = &condition.input {
            println!("      input: {}", input);
        }
        println!("      true: {}", condition.true_outputs.join(", "));
        println!("      false: {}", condition.false_outputs.join(", "));
    }
    println!("  Signals:");
    for signal in &report.signals {
        println!("    {} <- {}", signal.id, signal.inputs.join(", "));
    }
    println!("  Mathematical expressions:");
    for expression in &report.mathematical_expressions {
        println!("    {} = {}", expression.name, expression.expression);
    }
    Ok(())
}

fn cmd_export(
    xml_path: &Path,
    format: Option<ReportFormat>,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> AppResult<()> {
    let (config, graph) = import(xml_path, config_path)?;
    let report = build_report(&graph, &config.report);
    let rendered = render_report(&report, format.unwrap_or(config.report.format))?;

    // Write to file or stdout
    if let Some(path) = output {
        save_report(path, &rendered)?;
        println!(
            "✓ Exported {} control groups to {}",
            report.groups.len(),
            path.display()
        );
    } else {
        print!("{}", rendered);
    }
    Ok(())
}

fn cmd_check_config(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = load_config(Some(config_path))?;
    println!(
        "✓ Config is valid (version {}, {} lookup-table tags)",
        config.version,
        config.lookup_tables.len()
    );
    Ok(())
}
