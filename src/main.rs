use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};

use creativebook as app;

#[derive(Parser)]
#[command(name = "creativebook", about = "CreativeBook marketplace backend", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Send one verification email through the configured mail backend
    SendOtp(SendOtpArgs),
}

#[derive(Args)]
struct SendOtpArgs {
    /// Recipient address
    #[arg(long)]
    email: String,
    /// Code to include in the message
    #[arg(long)]
    code: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = app::config::load_config().context("failed to load configuration")?;
    app::config::init_tracing(cfg.log_level(), cfg.log_json);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cfg).await,
        Commands::Migrate => migrate(&cfg).await,
        Commands::SendOtp(args) => send_otp(&cfg, args).await,
    }
}

async fn serve(cfg: app::config::AppConfig) -> Result<()> {
    app::handlers::health::init_start_time();

    let db_pool = app::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        app::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let mailer = app::mail::build_mailer(&cfg.email).context("failed to configure mail backend")?;
    let state = app::AppState::new(Arc::new(db_pool), cfg.clone(), mailer);
    let router = app::app(state);

    let host: std::net::IpAddr = cfg
        .host
        .parse()
        .with_context(|| format!("invalid host address `{}`", cfg.host))?;
    let addr = SocketAddr::new(host, cfg.port);
    info!(debug = cfg.debug, "creativebook listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn migrate(cfg: &app::config::AppConfig) -> Result<()> {
    let db_pool = app::db::establish_connection_from_app_config(cfg).await?;
    app::db::run_migrations(&db_pool).await?;
    println!("Migrations applied");
    Ok(())
}

async fn send_otp(cfg: &app::config::AppConfig, args: SendOtpArgs) -> Result<()> {
    let mailer = app::mail::build_mailer(&cfg.email).context("failed to configure mail backend")?;
    let otp = app::mail::OtpMailer::from_config(mailer, cfg);

    otp.send_otp_email(&args.email, &args.code)
        .await
        .with_context(|| format!("failed to send verification email to {}", args.email))?;

    println!("Verification email sent to {}", args.email);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
