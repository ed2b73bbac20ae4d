use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use swatchgrid::api;
use swatchgrid::assets::{AssetCategory, AssetLoader};
use swatchgrid::models::{Overlay, PaletteConfig, Thresholds};
use swatchgrid::rendering::SvgRenderer;
use swatchgrid::server;
use swatchgrid::services::{FileWatcher, PaletteReport, SwatchView, TemplateService};

#[derive(Parser)]
#[command(name = "swatchgrid")]
#[command(about = "Swatchgrid - accessible color palette checker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Start the HTTP server with dev mode (config reload, live page refresh)
    Dev,
    /// Render the palette grid to an SVG or PNG file
    Render {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Value drawn on each swatch
        #[arg(long, value_enum, default_value_t = Overlay::Contrast)]
        overlay: Overlay,

        /// Output format (defaults to the output file extension, then PNG)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// PNG scale factor, 1 to 4
        #[arg(short, long, default_value_t = 1.0)]
        scale: f32,
    },
    /// Print the classification of every swatch, grouped by step
    Classify {
        /// Value to classify by
        #[arg(long, value_enum, default_value_t = Overlay::Contrast)]
        overlay: Overlay,

        /// Only list flagged swatches
        #[arg(long)]
        invalid_only: bool,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract the SVG and HTML templates
        #[arg(long)]
        templates: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Swatchgrid API",
        description = "Accessible color palette checker for design-system color scales",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_index,
        api::handle_svg,
        api::handle_png,
        api::handle_palette,
        api::handle_swatch,
        api::handle_get_config,
        api::handle_put_config,
    ),
    components(schemas(
        swatchgrid::models::PaletteConfig,
        swatchgrid::models::Thresholds,
        swatchgrid::models::Overlay,
        swatchgrid::services::PaletteReport,
        swatchgrid::services::BaseRow,
        swatchgrid::services::StepGroup,
        swatchgrid::services::SwatchView,
    )),
    tags(
        (name = "Page", description = "Rendered palette page and images"),
        (name = "Palette", description = "Swatch classification"),
        (name = "Config", description = "Palette configuration")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            output,
            overlay,
            format,
            scale,
        }) => run_render_command(&output, overlay, format, scale),
        Some(Commands::Classify {
            overlay,
            invalid_only,
        }) => run_classify_command(overlay, invalid_only),
        Some(Commands::Init {
            config,
            templates,
            all,
            force,
            list,
        }) => run_init_command(config, templates, all, force, list),
        Some(Commands::Serve) => run_server(false).await,
        Some(Commands::Dev) => run_server(true).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swatchgrid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load the palette for a one-shot command, seeding configured paths first
fn load_cli_palette() -> anyhow::Result<(Arc<AssetLoader>, PaletteConfig)> {
    let asset_loader = Arc::new(AssetLoader::from_env());
    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed assets");
    }
    let config = PaletteConfig::load_from_assets(&asset_loader)
        .map_err(|e| anyhow::anyhow!("Failed to load palette configuration: {e}"))?;
    Ok((asset_loader, config))
}

/// Render the palette grid directly to a file (no server needed)
fn run_render_command(
    output: &Path,
    overlay: Overlay,
    format: Option<OutputFormat>,
    scale: f32,
) -> anyhow::Result<()> {
    init_cli_logging();

    let (asset_loader, config) = load_cli_palette()?;
    let report = PaletteReport::build(&config, overlay)?;
    let svg = TemplateService::new(asset_loader)
        .render_svg(&report)
        .map_err(|e| anyhow::anyhow!("Template error: {e}"))?;

    let bytes = match format.unwrap_or_else(|| OutputFormat::from_path(output)) {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => SvgRenderer::new()
            .render_png(&svg, scale)
            .map_err(|e| anyhow::anyhow!("Render error: {e}"))?,
    };

    std::fs::write(output, &bytes)?;
    println!(
        "Rendered {} ({} bytes, {} overlay, {} flagged)",
        output.display(),
        bytes.len(),
        overlay,
        report.invalid_count
    );

    Ok(())
}

/// Print the by-step layout as a table
fn run_classify_command(overlay: Overlay, invalid_only: bool) -> anyhow::Result<()> {
    init_cli_logging();

    let (_, config) = load_cli_palette()?;
    let report = PaletteReport::build(&config, overlay)?;

    println!("Overlay: {overlay} ({})", threshold_summary(overlay, &report.thresholds));
    println!();
    println!(
        "{:<8} {:<12} {:<9} {:>6}  {:<6} STATUS",
        "STEP", "BASE", "HEX", "VALUE", "TEXT"
    );

    let swatches: Vec<&SwatchView> = report
        .step_groups
        .iter()
        .flat_map(|group| &group.swatches)
        .filter(|swatch| !invalid_only || swatch.invalid)
        .collect();

    for swatch in &swatches {
        println!(
            "{:<8} {:<12} {:<9} {:>6}  {:<6} {}",
            swatch.step,
            swatch.base,
            swatch.hex,
            swatch.value,
            swatch.text_color,
            if swatch.invalid { "FLAGGED" } else { "ok" }
        );
    }

    let total: usize = report.step_groups.iter().map(|g| g.swatches.len()).sum();
    println!();
    println!("{} of {total} swatches flagged", report.invalid_count);

    Ok(())
}

fn threshold_summary(overlay: Overlay, thresholds: &Thresholds) -> String {
    match overlay {
        Overlay::Contrast => format!(
            "minimum contrast ratio {}",
            thresholds.minimum_contrast_ratio
        ),
        Overlay::Luminance => format!(
            "maximum luminance deviation {}",
            thresholds.maximum_luminance_deviation
        ),
    }
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    templates: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || templates {
        categories.push(AssetCategory::Templates);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, or --templates");
        eprintln!("\nRun 'swatchgrid init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();

    println!("Swatchgrid v{VERSION}");
    println!("Accessible color palette checker\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");

    let loader = AssetLoader::from_env();

    let config_source = match config_file {
        Some(ref path) if loader.has_external_config() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:    {config_source}");

    fn plural(n: usize) -> &'static str {
        if n == 1 {
            "file"
        } else {
            "files"
        }
    }

    let embedded_count = AssetLoader::list_embedded(AssetCategory::Templates).len();
    match templates_dir {
        Some(ref path) if PathBuf::from(path).exists() => {
            let count = loader.list_templates().len();
            println!(
                "  Templates: {path} ({count} {}, {embedded_count} embedded)",
                plural(count)
            );
        }
        _ => println!(
            "  Templates: embedded ({embedded_count} {})",
            plural(embedded_count)
        ),
    }

    match PaletteConfig::load_from_assets(&loader) {
        Ok(config) => println!(
            "\nPalette: {} bases x {} steps (contrast >= {}, luminance deviation <= {})",
            config.bases.len(),
            config.steps.len(),
            config.thresholds.minimum_contrast_ratio,
            config.thresholds.maximum_luminance_deviation
        ),
        Err(e) => println!("\nPalette: failed to load ({e})"),
    }

    println!("\nCommands:");
    println!("  swatchgrid serve      Start the HTTP server");
    println!("  swatchgrid dev        Start server with dev mode (config reload)");
    println!("  swatchgrid render     Render the palette grid to SVG or PNG");
    println!("  swatchgrid classify   Print swatch classifications");
    println!("  swatchgrid init       Extract embedded assets");
    println!("\nRun 'swatchgrid --help' for more details.");
}

/// Run the HTTP server, optionally with dev mode (config watching, SSE)
async fn run_server(dev_mode: bool) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swatchgrid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    let describe = |path: Option<&Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string())
    };
    tracing::info!(
        config = %describe(asset_loader.config_file()),
        templates = %describe(asset_loader.templates_dir()),
        "Asset sources configured"
    );

    // Seed if configured paths are empty
    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                templates = report.templates_seeded.len(),
                config = report.config_seeded,
                "Seeded empty paths with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let state = server::create_app_state(asset_loader.clone(), dev_mode)?;

    if dev_mode {
        spawn_config_reloader(&state, asset_loader);
    }

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    if dev_mode {
        tracing::info!(addr = %bind_addr, "Swatchgrid dev server listening");
    } else {
        tracing::info!(addr = %bind_addr, "Swatchgrid server listening");
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Reload the palette whenever the config file changes on disk
fn spawn_config_reloader(state: &server::AppState, asset_loader: Arc<AssetLoader>) {
    let watcher = FileWatcher::new(asset_loader.config_file().map(Path::to_path_buf));
    if !watcher.is_active() {
        tracing::warn!("File watcher not active - set CONFIG_FILE to enable config reload");
        return;
    }

    let store = state.store.clone();
    let mut rx = watcher.subscribe();
    tokio::spawn(async move {
        // Keep the watcher alive for as long as we listen
        let _watcher = watcher;
        loop {
            match rx.recv().await {
                Ok(event) => {
                    tracing::debug!(paths = ?event.paths, "Config file changed");
                    if let Err(e) = store.reload_from(&asset_loader) {
                        tracing::warn!(%e, "Keeping previous palette configuration");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Config change events lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
