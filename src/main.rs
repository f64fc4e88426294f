use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resume_parser::core::FsOps;
use resume_parser::utils::{file_stem, output_file_path, validate_file_extension};
use resume_parser::{parse, years_of_experience, HtmlGenerator, ResumeConfig};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "resumd")]
#[command(about = "Turn a Markdown resume into structured data and styled HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding templates/<id>/<lang>/ layouts
    #[arg(long, global = true, env = "RESUME_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed resume as JSON
    Parse { input: PathBuf },
    /// Print the years of experience derived from the job periods
    Experience { input: PathBuf },
    /// Render the resume into a standalone HTML page
    Html {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, default_value = "v1")]
        template: String,
        #[arg(short, long, default_value = "en")]
        lang: String,
    },
    /// List the templates that can be rendered
    Templates,
}

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resume_parser=info,resumd=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ResumeConfig::from_env();
    if let Some(dir) = cli.templates_dir {
        config = config.with_templates_dir(dir);
    }

    match cli.command {
        Command::Parse { input } => {
            let record = parse(&read_markdown(&input).await?);
            println!(
                "{}",
                serde_json::to_string_pretty(&record).context("Failed to serialize resume")?
            );
        }

        Command::Experience { input } => {
            let record = parse(&read_markdown(&input).await?);
            println!("{}", years_of_experience(&record.jobs));
        }

        Command::Html {
            input,
            output,
            template,
            lang,
        } => {
            validate_file_extension(&input.to_string_lossy(), &["md"])?;
            let config = config.with_template(template).with_lang(&lang);
            let generator = HtmlGenerator::new(config)?;

            let result = generator.generate_html_from_file(&input).await;
            let html = match (result.success, result.html) {
                (true, Some(html)) => html,
                _ => {
                    let message = result.error.unwrap_or_else(|| "Unknown error".to_string());
                    error!("Generation failed: {}", message);
                    anyhow::bail!("Generation failed: {}", message);
                }
            };

            let output_path = output.unwrap_or_else(|| {
                output_file_path(
                    &generator.config.output_dir_absolute(),
                    &file_stem(&input),
                    &generator.config.template,
                    &generator.config.lang,
                    "html",
                )
            });
            FsOps::write_file_safe(&output_path, &html).await?;
            info!("HTML resume written to {}", output_path.display());
            println!("{}", output_path.display());
        }

        Command::Templates => {
            let generator = HtmlGenerator::new(config)?;
            for template in generator.template_manager().templates() {
                println!(
                    "{:<6} {:<12} {}",
                    template.id,
                    template.manifest.name,
                    template.manifest.description.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

async fn read_markdown(input: &Path) -> Result<String> {
    validate_file_extension(&input.to_string_lossy(), &["md"])?;
    FsOps::read_file_safe(input).await
}
