//! Deskkit - desktop utility suite for records, documents, and archives.

use std::path::PathBuf;

use clap::Parser;
use deskkit as app;
use eframe::egui;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use app::config::{self, AppConfig, ConfigLoadResult};
use app::db;
use app::ui::App;

/// Desktop utility suite for records, documents, and archives.
#[derive(Parser)]
#[command(name = "deskkit")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr and a daily rolling file.
    let log_dir = config::data_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "deskkit.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(file_writer.and(std::io::stderr))
        .with_ansi(false)
        .init();

    tracing::info!("Deskkit starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults to {:?}", config_path);
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::error!("Config invalid: {}", e);
            eprintln!("Invalid configuration at {}: {e}", config_path.display());
            std::process::exit(1);
        }
    };

    run_app(config)
}

/// Run the main application.
fn run_app(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Deskkit")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_maximized(config.ui.start_maximized),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    // Connect to database and prepare the schema
    let pool = rt.block_on(async {
        if let Some(parent) = config.database.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let conn = db::connect(&config.database.connection_string())
            .await
            .expect("Failed to connect to database");

        db::init_schema(&conn).await.expect("Failed to initialize schema");

        if let Ok(counts) = db::connection::get_table_counts(&conn).await {
            tracing::info!(
                "Tables: {} users, {} students, {} employees",
                counts.users,
                counts.students,
                counts.employees
            );
        }

        conn
    });

    eframe::run_native(
        "Deskkit",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(pool, config, rt)))
        }),
    )
}
