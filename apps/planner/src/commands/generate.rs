use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::warn;

use super::connect_service;
use crate::config::Config;
use crate::errors::PlanError;
use crate::planner::builder::PromptBuilder;
use crate::planner::models::{Level, PlanRequest, MAX_TOTAL_DAYS};
use crate::planner::service::{output_filename, PlanService};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Skill level: 初学者/中级/进阶 (or beginner/intermediate/advanced)
    #[arg(long, default_value = "初学者")]
    pub level: Level,
    /// Training goal, e.g. 步法更快、网前更细、杀球更有力
    #[arg(long, default_value = "正手高远球更稳定")]
    pub goal: String,
    /// Number of plan days, e.g. 7 or 14
    #[arg(
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(1..=MAX_TOTAL_DAYS as i64)
    )]
    pub days: u32,
    /// Minutes per session, e.g. 30/45/60
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub minutes: u32,
    /// Sessions per week, e.g. 3/4/5
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub freq: u32,
    /// Court and equipment description
    #[arg(long, default_value = "标准羽毛球场；球拍；羽毛球；可用墙/发球机则更好")]
    pub equipment: String,
    /// Model name (defaults to PLANNER_MODEL or gpt-4o-mini)
    #[arg(long)]
    pub model: Option<String>,
    /// Output file; generated from level, days and date when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Save the raw model text to the output file even when it is not a valid plan
    #[arg(long)]
    pub keep_raw: bool,
}

/// Generates a plan with the coach system instruction and writes it to a CSV file.
pub async fn run(config: &Config, args: GenerateArgs) -> Result<()> {
    let service = connect_service(config, args.model.clone(), PromptBuilder::cli())?;

    let request = PlanRequest::new(
        args.level,
        args.goal,
        args.days,
        args.minutes,
        Some(args.freq),
        args.equipment,
    )?;

    let out = args.out.unwrap_or_else(|| {
        PathBuf::from(output_filename(
            request.level(),
            request.total_days(),
            chrono::Local::now().date_naive(),
        ))
    });

    let csv_text = generate_to_file(&service, &request, &out, args.keep_raw).await?;

    println!("\n✅ 已生成：{}\n", out.display());
    println!("{csv_text}");
    Ok(())
}

/// Runs the pipeline and writes the extracted CSV to `out`. Returns the written text.
///
/// On a decode failure the raw text is printed for manual correction, and
/// written to `out` only when `keep_raw` is set. The call fails either way.
pub async fn generate_to_file(
    service: &PlanService,
    request: &PlanRequest,
    out: &Path,
    keep_raw: bool,
) -> Result<String> {
    match service.generate(request).await {
        Ok(plan) => {
            for warning in &plan.warnings {
                eprintln!("⚠️  {warning}");
            }
            write_csv(out, &plan.csv_text)?;
            Ok(plan.csv_text)
        }
        Err(PlanError::Decode { reason, raw_text }) => {
            println!("{raw_text}");
            if keep_raw {
                write_csv(out, &raw_text)?;
                warn!("Saved undecodable model output to {}", out.display());
            }
            bail!(
                "Could not decode the model output as a training plan CSV: {reason}. \
                The original text is shown above."
            )
        }
        Err(e) => Err(e.into()),
    }
}

fn write_csv(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, format!("{text}\n"))
        .with_context(|| format!("cannot write output file: {}", path.display()))
}
