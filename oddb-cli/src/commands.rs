//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};
use oddb_core::{OddbConfig, OddbError, SharedConfig};
use oddb_search::{
    Capability, CapabilityRegistry, ImageFetcher, ImageResolver, MediaKind, MetadataResolver,
    OpenDoubanClient, SearchError, SearchQuery, register_capabilities,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List search candidates for an id or a name
    Search(QueryArgs),
    /// Resolve full metadata, including cast and crew
    Metadata {
        #[command(flatten)]
        query: QueryArgs,
        /// Kind of library item being resolved
        #[arg(long, value_enum, default_value_t = KindArg::Movie)]
        kind: KindArg,
        /// Name cleaning regex, overriding ODDB_NAME_PATTERN for this run
        #[arg(long)]
        name_pattern: Option<String>,
    },
    /// Resolve primary and backdrop images for a subject id
    Images {
        /// Subject id
        id: String,
    },
    /// Download an image to a file
    FetchImage {
        /// Image URL
        url: String,
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show the capabilities registered with a host
    Capabilities,
}

/// Subject id or free-text name
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct QueryArgs {
    /// Subject id
    #[arg(long)]
    id: Option<String>,
    /// Title, possibly with release noise
    #[arg(long)]
    name: Option<String>,
}

impl QueryArgs {
    fn into_query(self) -> SearchQuery {
        match (self.id, self.name) {
            (Some(id), _) => SearchQuery::ByExternalId(id),
            (None, name) => SearchQuery::ByName(name.unwrap_or_default()),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Movie,
    Series,
    Season,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Series => MediaKind::Series,
            KindArg::Season => MediaKind::Season,
        }
    }
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = OddbConfig::from_env();
    config.validate().map_err(OddbError::from)?;
    let shared = SharedConfig::new(config.clone());

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    match command {
        Commands::Search(args) => {
            let resolver = MetadataResolver::new(client(&config)?, shared);
            let candidates = finish(resolver.search(&args.into_query(), &cancel).await)?;
            print_json(&candidates)
        }
        Commands::Metadata {
            query,
            kind,
            name_pattern,
        } => {
            let mut resolver = MetadataResolver::new(client(&config)?, shared);
            if let Some(pattern) = name_pattern {
                resolver = resolver.with_name_pattern(pattern);
            }
            let result =
                finish(resolver.resolve(&query.into_query(), kind.into(), &cancel).await)?;
            if !result.has_metadata {
                eprintln!("No metadata found");
            }
            print_json(&result)
        }
        Commands::Images { id } => {
            let resolver = ImageResolver::new(client(&config)?, shared);
            let images = finish(resolver.resolve_images(&id, &cancel).await)?;
            print_json(&images)
        }
        Commands::FetchImage { url, output } => {
            let fetcher = ImageFetcher::with_config(&config.api)?;
            let bytes = finish(fetcher.fetch(&url, &cancel).await)?;
            tokio::fs::write(&output, &bytes)
                .await
                .map_err(OddbError::from)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), output.display());
            Ok(())
        }
        Commands::Capabilities => {
            let descriptor = register_capabilities(&mut PrintingRegistry);
            print_json(&descriptor)
        }
    }
}

fn client(config: &OddbConfig) -> anyhow::Result<Arc<OpenDoubanClient>> {
    Ok(Arc::new(OpenDoubanClient::with_config(&config.api)?))
}

fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });
}

/// Turns cancellation into a readable error, passing everything else through.
fn finish<T>(result: Result<T, SearchError>) -> anyhow::Result<T> {
    match result {
        Err(e) if e.is_cancelled() => anyhow::bail!("cancelled"),
        other => Ok(other?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Registry that reports each capability on stderr.
struct PrintingRegistry;

impl CapabilityRegistry for PrintingRegistry {
    fn register(&mut self, provider: &str, capability: Capability) {
        eprintln!("{provider}: {capability:?}");
    }
}
