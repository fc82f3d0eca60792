use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use timeline_core::{month_index, ExhibitConfig, ImageSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "timeline-cli",
    about = "Inspect exhibit timeline data and its image assets."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline in chronological order.
    Order {
        /// Timeline JSON file.
        #[arg(short, long)]
        input: PathBuf,
        /// Emit the ordered entries as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Check that every raster image has its AVIF and WebP siblings.
    Audit {
        /// Timeline JSON file.
        #[arg(short, long)]
        input: PathBuf,
        /// Case-study JSON file.
        #[arg(long)]
        cases: Option<PathBuf>,
        /// Directory that image paths are relative to.
        #[arg(long)]
        assets: PathBuf,
        /// Image shown for timeline entries without one.
        #[arg(long)]
        timeline_placeholder: Option<String>,
        /// Image shown for case studies without one.
        #[arg(long)]
        case_placeholder: Option<String>,
    },
}

/// One image path that is missing some of its files on disk.
#[derive(Debug, PartialEq)]
struct MissingAsset {
    owner: String,
    missing: Vec<String>,
}

#[derive(Debug, Default, PartialEq)]
struct AuditReport {
    checked: usize,
    placeholders: usize,
    missing: Vec<MissingAsset>,
}

fn asset_path(root: &Path, src: &str) -> PathBuf {
    root.join(src.trim_start_matches('/'))
}

fn audit_image(report: &mut AuditReport, root: &Path, owner: &str, image: &ImageSource) {
    if image.is_placeholder {
        report.placeholders += 1;
        warn!(owner, placeholder = %image.original, "no image path, placeholder will be shown");
        if !asset_path(root, &image.original).is_file() {
            report.missing.push(MissingAsset {
                owner: owner.to_string(),
                missing: vec![image.original.clone()],
            });
        }
        return;
    }

    report.checked += 1;
    let missing: Vec<String> = image
        .sources()
        .into_iter()
        .filter(|src| !asset_path(root, src).is_file())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        warn!(owner, ?missing, "image files missing");
        report.missing.push(MissingAsset {
            owner: owner.to_string(),
            missing,
        });
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Could not read file {path:?}"))
}

fn run_order(input: &Path, json: bool) -> anyhow::Result<()> {
    let entries = timeline_data::load_timeline_str(&read(input)?)?;
    let ordered = timeline_core::order(&entries);

    if json {
        println!("{}", serde_json::to_string_pretty(&ordered)?);
        return Ok(());
    }

    for entry in &ordered {
        println!(
            "{:>6}  {:>2}  {:<10}  {:<10}  {}",
            entry.date.year_label(),
            month_index(entry.date.month.as_deref()),
            entry.date.month_label(),
            entry.date.datetime_attr().unwrap_or_else(|| "-".to_string()),
            entry.title
        );
    }
    info!(entries = ordered.len(), "timeline ordered");
    Ok(())
}

fn run_audit(
    input: &Path,
    cases: Option<&Path>,
    assets: &Path,
    config: &ExhibitConfig,
) -> anyhow::Result<AuditReport> {
    let mut report = AuditReport::default();

    let entries = timeline_data::load_timeline_str(&read(input)?)?;
    for (index, entry) in entries.iter().enumerate() {
        let image =
            ImageSource::resolve(entry.image_path.as_deref(), &config.timeline_placeholder);
        audit_image(&mut report, assets, &entry.key(index), &image);
    }

    if let Some(path) = cases {
        let cases = timeline_data::load_cases_str(&read(path)?)?;
        for (index, case) in cases.iter().enumerate() {
            let image =
                ImageSource::resolve(case.image_path.as_deref(), &config.case_placeholder);
            audit_image(&mut report, assets, &case.key(index), &image);
        }
    }

    Ok(report)
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Order { input, json } => run_order(&input, json),
        Command::Audit {
            input,
            cases,
            assets,
            timeline_placeholder,
            case_placeholder,
        } => {
            let mut config = ExhibitConfig::default();
            if let Some(path) = timeline_placeholder {
                config.timeline_placeholder = path;
            }
            if let Some(path) = case_placeholder {
                config.case_placeholder = path;
            }
            config.validate()?;
            let report = run_audit(&input, cases.as_deref(), &assets, &config)?;
            for asset in &report.missing {
                println!("{}: missing {}", asset.owner, asset.missing.join(", "));
            }
            println!(
                "Checked: {}\nPlaceholders: {}\nIncomplete: {}",
                report.checked,
                report.placeholders,
                report.missing.len()
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, b"").expect("write");
    }

    #[test]
    fn audit_reports_missing_siblings_and_placeholders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let assets = dir.path().join("public");
        touch(&assets, "images/eniac.png");
        touch(&assets, "images/eniac.avif");
        touch(&assets, "images/eniac.webp");
        touch(&assets, "images/nato.jpg");
        touch(&assets, "images/logo.svg");
        touch(&assets, "images/placeholder.jpg");

        let timeline = dir.path().join("timeline.json");
        std::fs::write(
            &timeline,
            r#"[
                { "title": "ENIAC", "date": { "year": 1946 }, "imagePath": "/images/eniac.png" },
                { "title": "NATO", "date": { "year": 1968 }, "imagePath": "/images/nato.jpg" },
                { "title": "Logo", "date": { "year": 1970 }, "imagePath": "/images/logo.svg" },
                { "title": "Blank", "date": { "year": 1971 } }
            ]"#,
        )
        .expect("write timeline");

        let report =
            run_audit(&timeline, None, &assets, &ExhibitConfig::default()).expect("audit");

        assert_eq!(report.checked, 3);
        assert_eq!(report.placeholders, 1);
        assert_eq!(
            report.missing,
            vec![MissingAsset {
                owner: "NATO-1".to_string(),
                missing: vec!["/images/nato.avif".to_string(), "/images/nato.webp".to_string()],
            }]
        );
    }

    #[test]
    fn audit_fails_only_on_unreadable_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.json");
        let config = ExhibitConfig::default();
        assert!(run_audit(&missing, None, dir.path(), &config).is_err());
    }

    #[test]
    fn audit_uses_the_configured_placeholders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let assets = dir.path().join("public");
        touch(&assets, "brand/blank-era.png");

        let timeline = dir.path().join("timeline.json");
        std::fs::write(&timeline, r#"[{ "title": "Blank", "date": { "year": 1971 } }]"#)
            .expect("write timeline");
        let cases = dir.path().join("cases.json");
        std::fs::write(&cases, r#"[{ "company": "Acme" }]"#).expect("write cases");

        let config = ExhibitConfig {
            timeline_placeholder: "/brand/blank-era.png".to_string(),
            case_placeholder: "/brand/blank-case.png".to_string(),
            ..ExhibitConfig::default()
        };
        let report = run_audit(&timeline, Some(&cases), &assets, &config).expect("audit");

        assert_eq!(report.checked, 0);
        assert_eq!(report.placeholders, 2);
        assert_eq!(
            report.missing,
            vec![MissingAsset {
                owner: "Acme0".to_string(),
                missing: vec!["/brand/blank-case.png".to_string()],
            }]
        );
    }
}
