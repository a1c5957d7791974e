use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use podmix::api;
use podmix::models::{AppConfig, OutputSpec};
use podmix::rendering::{self, DataUri, ExportPipeline, ImageFormat, UiPlacement};
use podmix::server;

#[derive(Parser)]
#[command(name = "podmix")]
#[command(about = "Podmix - design export and print-area compositing for print-on-demand products")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Export a design file directly to a PNG file
    Export {
        /// Design file (PNG, JPEG, WebP or SVG)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Filter descriptor, e.g. "brightness(1.1) contrast(1.2)"
        #[arg(short, long, default_value = "none")]
        filter: String,

        /// Product canvas width in pixels (composites when given with --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Product canvas height in pixels
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Design scale in percent
        #[arg(short, long, default_value_t = 100.0)]
        scale: f64,

        /// Horizontal offset from center, percent of the preview side
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        /// Vertical offset from center, percent of the preview side
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Podmix API",
        description = "Design export and print-area compositing for print-on-demand products",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_export,
        api::handle_print_export,
        api::handle_placement,
    ),
    components(schemas(
        api::ExportRequest,
        api::ExportResponse,
        api::ExportDimensions,
        api::ExportErrorResponse,
        api::Position,
        api::PlacementRequest,
        api::PlacementResponse,
        rendering::CanvasPlacement,
        rendering::PrintAreaPlacement,
    )),
    tags(
        (name = "Export", description = "Filtered and print-ready design export"),
        (name = "Placement", description = "Preview to print-area placement conversion")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export {
            input,
            output,
            filter,
            width,
            height,
            scale,
            x,
            y,
        }) => run_export_command(&input, &output, &filter, width.zip(height), scale, x, y),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Export a design file to PNG (no server needed)
fn run_export_command(
    input: &Path,
    output: &Path,
    filter: &str,
    canvas: Option<(u32, u32)>,
    scale: f64,
    x: f64,
    y: f64,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podmix=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let config = AppConfig::load(config_file.as_deref());
    let pipeline = ExportPipeline::new(&config);

    let bytes = std::fs::read(input)?;
    let source = DataUri::new(mime_from_extension(input), bytes);
    let filter = css_filter::parse(filter);

    let result = match canvas {
        Some((width, height)) => {
            let spec = OutputSpec::from_dimensions(
                width as f64,
                height as f64,
                &config.output_limits(),
            )?;
            let placement = UiPlacement::new(x, y, scale)?;
            pipeline.print(&source, &filter, &spec, &placement)?
        }
        None => pipeline.filtered(&source, &filter)?,
    };

    std::fs::write(output, &result.png)?;
    println!(
        "Exported {} ({}x{} @ {} DPI, {} bytes)",
        output.display(),
        result.width,
        result.height,
        result.dpi,
        result.png.len()
    );

    Ok(())
}

/// Declared type for a file; content sniffing still decides the decoder
fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => ImageFormat::Png.mime(),
        Some("jpg") | Some("jpeg") => ImageFormat::Jpeg.mime(),
        Some("webp") => ImageFormat::WebP.mime(),
        Some("svg") => ImageFormat::Svg.mime(),
        _ => "application/octet-stream",
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    // Header
    println!("Podmix v{VERSION}");
    println!("Design export and print-area compositing for print-on-demand products\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    // Effective configuration, without the load logging
    let config = match config_file.as_deref().map(std::fs::read_to_string) {
        Some(Ok(content)) => AppConfig::from_yaml(&content).unwrap_or_default(),
        _ => AppConfig::default(),
    };
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };

    println!("\nConfiguration ({config_source}):");
    println!(
        "  max_body_bytes       = {} MiB",
        config.max_body_bytes / (1024 * 1024)
    );
    println!("  max_output_dimension = {}", config.max_output_dimension);
    println!("  max_output_pixels    = {}", config.max_output_pixels);
    println!("  svg_working_size     = {}", config.svg_working_size);
    println!(
        "  fonts_dir            = {}",
        config
            .fonts_dir
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(system fonts only)".to_string())
    );

    // Commands section
    println!("\nCommands:");
    println!("  podmix serve    Start the HTTP server");
    println!("  podmix export   Export a design file to PNG");
    println!("\nRun 'podmix --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podmix=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = AppConfig::load(config_file.as_deref());

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Podmix server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
