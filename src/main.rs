use clap::Parser;
use evidence_ai_rust::backend::{HttpBackend, SyntheticBackend};
use evidence_ai_rust::{annotate, cli, config, error, intake, notify};

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use evidence_ai_common::{overlay, AnalyzeOutcome, UploadWorkflow};
use indicatif::ProgressBar;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, endpoint, offline, output, annotate: save_annotated } => {
            println!("🔍 evidence-ai - Evidence analysis\n");

            // 1. 画像読み込み
            println!("[1/3] Loading image...");
            let candidate = intake::candidate_from_path(&image).await?;
            if cli.verbose {
                println!(
                    "  {} ({} bytes, declared type {})",
                    candidate.file_name,
                    candidate.bytes.len(),
                    candidate.content_type
                );
            }

            let mut workflow =
                UploadWorkflow::new(intake::DataUriEncoder, notify::ConsoleNotifier);
            workflow.select(candidate)?;

            // 2. 解析
            let endpoint = endpoint.or_else(|| config.endpoint.clone());

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Analyzing image...");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let outcome = match endpoint {
                Some(url) if !offline => {
                    println!("[2/3] Analyzing via {}...", url);
                    let backend = HttpBackend::new(
                        url,
                        config.multipart_field.clone(),
                        Duration::from_secs(config.timeout_seconds),
                    )?;
                    workflow.analyze(&backend).await
                }
                _ => {
                    println!("[2/3] Analyzing offline (synthetic backend)...");
                    let backend =
                        SyntheticBackend::new(Duration::from_millis(config.synthetic_delay_ms));
                    workflow.analyze(&backend).await
                }
            };
            spinner.finish_and_clear();

            if let AnalyzeOutcome::Failed(err) = outcome {
                return Err(err.into());
            }

            // 3. オーバーレイ描画
            println!("[3/3] Rendering overlays...\n");
            let (Some(selected), Some(result)) = (workflow.image(), workflow.result()) else {
                return Ok(());
            };

            let boxes = overlay::render(selected, result);
            let summary = overlay::summarize(result);

            println!("Detected evidence:");
            if boxes.is_empty() {
                println!("  (nothing found)");
            }
            for b in &boxes {
                println!(
                    "  {} at x={} y={} w={} h={}",
                    b.label, b.region.x, b.region.y, b.region.width, b.region.height
                );
            }
            println!("\n  Items detected: {}", summary.detection_count);
            println!("  Avg confidence: {}%", summary.confidence_percent);
            if let Some(time) = &summary.processing_time {
                println!("  Processing time: {}", time);
            }

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(result)?;
                std::fs::write(&output_path, json)?;
                println!("✔ Result saved: {}", output_path.display());
            }

            if save_annotated {
                if result.annotated_preview.is_some() {
                    // サービスが注釈済み画像を返した場合、プレビューは
                    // 既に差し替わっている。ローカル焼き込みは元画像に行う
                    println!("✔ Service returned an annotated preview");
                }
                let annotated_path = annotate::annotated_output_path(&image);
                annotate::save_annotated(&selected.bytes, &boxes, &annotated_path)?;
                println!("✔ Annotated image saved: {}", annotated_path.display());
            }

            println!("\n✅ Analysis complete");
        }

        Commands::Config { set_endpoint, set_field, show } => {
            let mut config = config;

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
                println!("✔ Endpoint saved");
            }

            if let Some(field) = set_field {
                config.set_field(field)?;
                println!("✔ Multipart field saved");
            }

            if show {
                println!("Settings:");
                println!(
                    "  Endpoint: {}",
                    config.endpoint.as_deref().unwrap_or("(not set, synthetic backend)")
                );
                println!("  Multipart field: {}", config.multipart_field);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!("  Synthetic delay: {}ms", config.synthetic_delay_ms);
            }
        }
    }

    Ok(())
}
