use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use portfolio_generator::core::gate::{AccessGate, FeatureFlag};
use portfolio_generator::core::{ConfigManager, Database, FsOps, ResumeExtractionClient};
use portfolio_generator::deploy::{
    DeployTarget, GithubDeployer, NetlifyDeployer, Provider, SiteDeployer,
};
use portfolio_generator::session::{CredentialStore, ExpiryPolicy, FileCredentialStore};
use portfolio_generator::upload_validator::UploadValidator;
use portfolio_generator::utils::validate_file_extension;
use portfolio_generator::{
    export_site, load_portfolio, logging, render_portfolio_document, start_web_server,
    GeneratedSite, PortfolioData, RenderContext,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Turn a resume into a deployable portfolio site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve,
    /// Render the self-contained preview document
    Render {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the downloadable file set
    Export {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Link the stylesheet and script instead of inlining them
        #[arg(long)]
        published: bool,
    },
    /// Print or save the sample portfolio document
    Sample {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Send a PDF resume to the extraction service
    Extract {
        pdf: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Publish a portfolio to a hosting provider
    Deploy {
        provider: ProviderArg,
        input: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, env = "FOLIO_DEPLOY_TOKEN")]
        token: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remember an access token for a provider
    Login {
        provider: ProviderArg,
        #[arg(long)]
        token: String,
        #[arg(long)]
        ttl_hours: Option<i64>,
    },
    /// Forget the stored token for a provider
    Logout { provider: ProviderArg },
    /// Inspect or toggle feature flags
    Flags {
        #[command(subcommand)]
        command: FlagsCommand,
    },
}

#[derive(Subcommand)]
enum FlagsCommand {
    List,
    Set { flag: String, state: FlagState },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Github,
    Netlify,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Github => Provider::Github,
            ProviderArg::Netlify => Provider::Netlify,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FlagState {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;

    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    match cli.command {
        Command::Serve => start_web_server(config).await,
        Command::Render { input, output } => {
            let data = load_portfolio(&input).await?;
            let html = render_portfolio_document(&data, &RenderContext::preview());
            write_or_print(output.as_deref(), &html).await
        }
        Command::Export {
            input,
            output,
            published,
        } => {
            let data = load_portfolio(&input).await?;
            for issue in data.validate() {
                warn!("{}: {}", issue.field, issue.message);
            }
            let context = if published {
                RenderContext::published()
            } else {
                RenderContext::download()
            };
            let output_dir = output.unwrap_or_else(|| config.environment.output_path.clone());
            let site_dir = export_site(&data, Some(output_dir), context).await?;
            println!("{}", site_dir.display());
            Ok(())
        }
        Command::Sample { output } => {
            let json = PortfolioData::sample().to_json_pretty()?;
            write_or_print(output.as_deref(), &json).await
        }
        Command::Extract { pdf, output } => {
            let data = extract(&config, &pdf).await?;
            write_or_print(output.as_deref(), &data.to_json_pretty()?).await
        }
        Command::Deploy {
            provider,
            input,
            name,
            token,
            description,
        } => deploy(&config, provider.into(), &input, &name, token, description).await,
        Command::Login {
            provider,
            token,
            ttl_hours,
        } => {
            let provider = Provider::from(provider);
            let store = FileCredentialStore::new(config.environment.credentials_path.clone());
            let credential = store
                .set(provider, &token, ExpiryPolicy::hours(ttl_hours)?)
                .await?;
            match credential.expires_at {
                Some(at) => println!("Stored {} token (expires {})", provider, at.to_rfc3339()),
                None => println!("Stored {} token", provider),
            }
            Ok(())
        }
        Command::Logout { provider } => {
            let provider = Provider::from(provider);
            let store = FileCredentialStore::new(config.environment.credentials_path.clone());
            if store.clear(provider).await? {
                println!("Removed {} token", provider);
            } else {
                println!("No {} token stored", provider);
            }
            Ok(())
        }
        Command::Flags { command } => {
            config.ensure_directories().await?;
            let db = Database::new(&config.environment.database_path).await?;
            let gate = AccessGate::new(db, config.quotas);
            match command {
                FlagsCommand::List => {
                    for status in gate.flags().await? {
                        println!(
                            "{:<20} {}",
                            status.flag.name(),
                            if status.enabled { "on" } else { "off" }
                        );
                    }
                }
                FlagsCommand::Set { flag, state } => {
                    let flag: FeatureFlag = flag.parse()?;
                    let enabled = matches!(state, FlagState::On);
                    gate.set_flag(flag, enabled).await?;
                    println!("{} {}", flag, if enabled { "on" } else { "off" });
                }
            }
            Ok(())
        }
    }
}

async fn write_or_print(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            FsOps::write_file_safe(path, content).await?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Falls back to the sample document when the service cannot help
async fn extract(config: &ConfigManager, pdf: &Path) -> Result<PortfolioData> {
    validate_file_extension(&pdf.to_string_lossy(), &["pdf"])?;
    let bytes = UploadValidator::validate_file(pdf)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.message, e.suggestion))?;

    let file_name = pdf
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume.pdf");

    let client = ResumeExtractionClient::new(
        &config.service.extraction_url,
        config.service.timeout_seconds,
    )?;

    match client.process_resume(bytes, file_name).await {
        Ok(data) => Ok(data),
        Err(e) => {
            warn!("Extraction failed, using the sample portfolio instead: {}", e);
            Ok(PortfolioData::sample())
        }
    }
}

async fn deploy(
    config: &ConfigManager,
    provider: Provider,
    input: &Path,
    name: &str,
    token: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => FileCredentialStore::new(config.environment.credentials_path.clone())
            .get(provider)
            .await?
            .map(|c| c.token)
            .with_context(|| {
                format!(
                    "No {} token stored. Run `folio login {}` or pass --token",
                    provider, provider
                )
            })?,
    };

    let data = load_portfolio(input).await?;
    let site = GeneratedSite::build(&data, &RenderContext::published());
    let target = DeployTarget::new(name, &token).with_description(description);

    let deployer: Box<dyn SiteDeployer> = match provider {
        Provider::Github => Box::new(GithubDeployer::new(
            &config.service.github_api_url,
            config.service.timeout_seconds,
        )?),
        Provider::Netlify => Box::new(NetlifyDeployer::new(
            &config.service.netlify_api_url,
            config.service.timeout_seconds,
        )?),
    };

    let outcome = deployer.deploy(&site, &target).await?;
    println!("Live: {}", outcome.live_url);
    println!("Admin: {}", outcome.admin_url);
    Ok(())
}
