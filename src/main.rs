//! # SkillRadar
//!
//! Collects a week of technology news, finds what is trending and writes a
//! report tailored to the configured reader.
//!
//! ## Usage
//!
//! ```sh
//! skill_radar --config skill_radar.yaml --output-dir reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Collection**: Hacker News, Reddit and NewsAPI, concurrently
//! 2. **Normalization**: trim, drop incomplete records, tag technologies
//! 3. **Analysis**: dedup, must-read selection, trend ranking, report prose
//! 4. **Output**: console report, Markdown/HTML/JSON files and an index

use awful_aj::{config::AwfulJadeConfig, config_dir, template, template::ChatTemplate};
use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use skill_radar::analysis::normalize::normalize_all;
use skill_radar::analysis::tagger::KeywordTagger;
use skill_radar::analysis::vocabulary::Vocabulary;
use skill_radar::analysis::{TrendAnalyzer, note_window_mismatch};
use skill_radar::api::{RemoteBackend, remote_backend};
use skill_radar::cli::Cli;
use skill_radar::config::AppConfig;
use skill_radar::generate::TextGenerator;
use skill_radar::models::Article;
use skill_radar::outputs::{self, RenderContext, ReportFormat, console, index};
use skill_radar::sources::{CollectionWindow, SourceCollector, http_client};
use skill_radar::translate::{Translations, Translator};
use skill_radar::utils::{ensure_writable_dir, truncate_chars};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; real environment variables win.
    dotenvy::dotenv().ok();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("skill_radar starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.formats, offline = args.offline, "Parsed CLI arguments");

    let mut app_config = AppConfig::load(args.config.as_deref())?;
    if let Some(k) = args.must_read {
        app_config.report_settings.must_read_count = k;
    }
    if !args.formats.is_empty() {
        app_config.report_settings.output_formats = args.formats.clone();
    }

    let window = CollectionWindow::week_containing(Local::now().date_naive());
    let collector = SourceCollector::new(
        http_client()?,
        app_config.data_sources.clone(),
        args.news_api_key.clone(),
        app_config.report_settings.max_articles_per_source,
    );
    let tagger = KeywordTagger::default();

    if args.debug_sources {
        debug_sources(&collector, &tagger).await;
        return Ok(());
    }

    let formats = app_config.report_settings.output_formats.clone();
    let writes_files = formats.iter().any(|f| f.extension().is_some());
    // Early check: ensure the output dir is writable before spending time on collection
    if writes_files {
        if let Err(e) = ensure_writable_dir(&args.output_dir).await {
            error!(
                path = %args.output_dir.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Collect and normalize ----
    let raw = collector.collect_weekly(&window).await;
    let articles = normalize_all(raw, &tagger);
    info!(count = articles.len(), "Total articles to analyze");
    if articles.is_empty() {
        warn!("No articles collected; nothing to report");
        return Ok(());
    }

    // ---- Load LLM config & template ----
    let llm = if args.offline {
        info!("Offline mode: using fallback text only");
        None
    } else {
        match load_llm(&args).await {
            Ok(llm) => llm,
            Err(e) => {
                warn!(error = %e, "Could not load LLM config or template; continuing offline");
                None
            }
        }
    };

    let settings = &app_config.report_settings;
    let generator: TextGenerator<RemoteBackend<'_>> = match &llm {
        Some((config, template)) => TextGenerator::new(remote_backend(
            config,
            template,
            settings.max_retries,
        ))
        .with_call_timeout(Duration::from_secs(settings.generation_timeout_secs))
        .with_deadline(tokio::time::Instant::now() + Duration::from_secs(args.timeout_secs)),
        None => TextGenerator::offline(),
    };

    // ---- Analyze ----
    let analyzer = TrendAnalyzer::new(
        Vocabulary::default(),
        app_config.analysis_settings(),
        generator,
    );
    let report = analyzer.analyze(articles, &app_config.user_profile).await?;
    note_window_mismatch(&report, window.bounds());

    // ---- Translations ----
    let translations: Option<Translations> = match Translator::new(
        analyzer.generator(),
        &args.translate_to,
        settings.generation_concurrency,
    ) {
        Some(translator) if analyzer.generator().is_available() => {
            Some(translator.translate_articles(&report.must_read_articles).await)
        }
        Some(translator) => {
            warn!(language = translator.language(), "Translation needs an LLM; skipping");
            None
        }
        None => None,
    };

    // ---- Output ----
    let mut ctx = RenderContext::new(Local::now());
    if let Some(t) = &translations {
        ctx = ctx.with_translations(t);
    }

    if formats.contains(&ReportFormat::Console) {
        println!("{}", console::render(&report, &ctx));
    }

    if writes_files {
        let written: Vec<PathBuf> =
            match outputs::write_reports(&report, &formats, &args.output_dir, &ctx).await {
                Ok(written) => written,
                Err(e) => {
                    error!(error = %e, "Failed to write report files");
                    Vec::new()
                }
            };
        for path in &written {
            println!("Report saved to: {}", path.display());
        }

        if let Err(e) =
            index::update_index(&args.output_dir, &report, ctx.generated_at, &written).await
        {
            error!(error = %e, "Failed to update report index");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        trends = report.top_trends.len(),
        must_read = report.must_read_articles.len(),
        "Execution complete"
    );

    Ok(())
}

/// Load the awful_aj config (from `--aj-config` or the awful_aj config dir)
/// and the prompt template. `None` when no config exists.
async fn load_llm(args: &Cli) -> Result<Option<(AwfulJadeConfig, ChatTemplate)>, Box<dyn Error>> {
    let conf_file = match &args.aj_config {
        Some(path) => path.clone(),
        None => {
            let default = config_dir().map_err(|e| e.to_string())?.join("config.yaml");
            if !default.exists() {
                info!(path = %default.display(), "No awful_aj config found; running offline");
                return Ok(None);
            }
            default
        }
    };

    let config_path = conf_file
        .to_str()
        .ok_or_else(|| format!("not a valid config filename: {}", conf_file.display()))?;
    let config = awful_aj::config::load_config(config_path).map_err(|e| e.to_string())?;
    info!(config_path, "Loaded LLM configuration");

    let template = template::load_template(&args.template)
        .await
        .map_err(|e| e.to_string())?;
    info!(template = %args.template, "Loaded template");

    Ok(Some((config, template)))
}

/// Print what every source returns this week, without the window filter.
async fn debug_sources(collector: &SourceCollector, tagger: &KeywordTagger) {
    let (hn, reddit, news) = tokio::join!(
        collector.hacker_news(None),
        collector.reddit(None),
        collector.news_api(),
    );

    let mut all: Vec<Article> = Vec::new();
    for (name, raw) in [("Hacker News", hn), ("Reddit", reddit), ("NewsAPI", news)] {
        let articles = normalize_all(raw, tagger);
        print_source_sample(name, &articles);
        all.extend(articles);
    }

    println!("\n=== Totals ===");
    for (source, count) in all
        .iter()
        .map(|a| a.source.as_str())
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
    {
        println!("{source:<30} {count}");
    }
    println!("{:<30} {}", "All sources", all.len());

    println!("\n=== Top tags ===");
    for (tag, count) in all
        .iter()
        .flat_map(|a| a.tech_tags.iter().map(String::as_str))
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .take(15)
    {
        println!("{tag:<30} {count}");
    }
}

fn print_source_sample(name: &str, articles: &[Article]) {
    println!("\n=== {name}: {} articles ===", articles.len());
    for article in articles.iter().take(5) {
        println!(
            "- [{}] {} ({})",
            article.published_at.format("%Y-%m-%d"),
            truncate_chars(&article.title, 80),
            article.domain().unwrap_or_else(|| article.source.clone())
        );
        if !article.tech_tags.is_empty() {
            println!("    tags: {}", article.tech_tags.join(", "));
        }
    }
}
