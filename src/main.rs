mod cli;

use releaseforge::{
    apply::{self, Applied, ApplyMode},
    catalog::{CatalogService, TmdbCatalog},
    config::{self, Config},
    namer::{NameRequest, Namer},
    paths,
    prompt::{NoPrompt, Prompter, TerminalPrompter},
};
use releaseforge_naming::{audio, codec, colour, language, resolution, FilenameHints, NameEngine};
use releaseforge_probe::{MediaInfoProber, MediaProber};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, NameArgs};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "releaseforge=trace,releaseforge_naming=trace,releaseforge_probe=trace".to_string()
        } else {
            "releaseforge=info,releaseforge_naming=info,releaseforge_probe=info".to_string()
        }
    });

    // Names and JSON go to stdout; keep diagnostics off it.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Name(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_name(args, cli.config.as_deref()))
        }
        Commands::Probe { file, json } => probe_file(&file, cli.config.as_deref(), json),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("releaseforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn mediainfo_prober(config: &Config) -> Result<MediaInfoProber> {
    let binary = releaseforge_probe::resolve_tool(
        releaseforge_probe::MEDIAINFO,
        config.tools.mediainfo_path.as_deref(),
    )?;
    Ok(MediaInfoProber::with_binary(binary))
}

fn tmdb_catalog(config: &Config) -> Result<Option<TmdbCatalog>> {
    let catalog = &config.catalog;
    if catalog.tmdb_api_key.trim().is_empty() {
        return Ok(None);
    }
    let mut tmdb = TmdbCatalog::new(&catalog.tmdb_api_key, &catalog.language)?
        .with_threshold(catalog.similarity_threshold);
    if let Some(base_url) = &catalog.base_url {
        tmdb = tmdb.with_base_url(base_url);
    }
    Ok(Some(tmdb))
}

async fn run_name(args: NameArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let paths = if args.paths.is_empty() {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        paths::load_bulk_file(&cwd)?
    } else {
        args.paths.clone()
    };

    let engine = NameEngine::new(config.groups.policy());
    let prober = mediainfo_prober(&config)?;
    let tmdb = tmdb_catalog(&config)?;
    let prompter: &dyn Prompter = if args.yes { &NoPrompt } else { &TerminalPrompter };
    let namer = Namer {
        engine: &engine,
        catalog: tmdb.as_ref().map(|t| t as &dyn CatalogService),
        prober: &prober,
        prompter,
    };

    let request = NameRequest {
        catalog_id: args.tmdb,
        title: args.title.clone(),
        year: args.year,
        is_movie: match (args.movie, args.tv) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        season: args.season,
        episode: args.episode,
        source: args.source.clone(),
        default_source: config.naming.default_source.clone(),
        group: args.group.clone(),
        edition: args.edition.clone(),
        repack: args.repack,
        format_variant: if args.extended {
            releaseforge_naming::FormatVariant::ExtendedTrackerFormat
        } else {
            config.naming.format_variant().map_err(anyhow::Error::msg)?
        },
        default_container: config.naming.container.clone(),
        language: args.language.clone(),
        resolution: args.resolution.clone(),
        per_episode: args.per_episode,
    };

    let mode = if args.hardlink {
        Some(ApplyMode::Hardlink)
    } else if args.rename {
        Some(ApplyMode::Rename)
    } else {
        None
    };

    let mut failed = 0usize;
    let mut banned = 0usize;
    for path in &paths {
        tracing::info!("Processing file: {:?}", path);
        let derivation = match namer.name_path(path, &request).await {
            Ok(d) => d,
            Err(e) => {
                tracing::error!("{:#}", e);
                failed += 1;
                continue;
            }
        };

        for warning in &derivation.warnings {
            tracing::warn!("{}: {}", derivation.name, warning);
        }
        if derivation.banned_group().is_some() {
            banned += 1;
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&derivation)?);
        } else {
            println!("{}", derivation.name);
        }

        let Some(mode) = mode else { continue };
        if !prompter.confirm("Is this acceptable?")? {
            tracing::info!("Skipped {:?}", path);
            continue;
        }
        match apply::apply(path, &derivation.name, mode) {
            Ok(Applied::Done(dest)) => tracing::info!("{} made to: {:?}", mode, dest),
            Ok(Applied::Skipped(dest)) => tracing::warn!("Not overwriting {:?}", dest),
            Err(e) => {
                tracing::error!("{:#}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} paths failed", failed, paths.len());
    }
    if args.strict_groups && banned > 0 {
        anyhow::bail!("{} derived name(s) use a banned release group", banned);
    }
    Ok(())
}

fn probe_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let media = mediainfo_prober(&config)?.probe(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&media)?);
        return Ok(());
    }

    let hints = FilenameHints::parse(&media.file_name);
    println!("File: {}", media.file_name);
    println!(
        "Video: {} {}x{}",
        media.video_format,
        media.width.map_or("?".to_string(), |w| w.to_string()),
        media.height.map_or("?".to_string(), |h| h.to_string())
    );
    match resolution::resolve(
        media.width,
        media.height,
        media.frame_rate.as_deref(),
        media.interlaced,
    ) {
        Ok(res) => println!("Resolution: {}", res),
        Err(e) => println!("Resolution: unresolved ({})", e),
    }
    let source = hints.source.clone().unwrap_or_default();
    println!(
        "Codec: {}",
        codec::resolve(&media.video_format, &media.video_codec_id, &media.file_name, &source)
    );
    println!("Colour: {}", colour::resolve(&media));
    match &media.audio {
        Some(track) => {
            println!("Audio: {}", audio::resolve(track));
            let lang = track.language.as_deref().map(language::resolve).unwrap_or_default();
            println!("Language: {}", if lang.is_empty() { "unknown" } else { &lang });
        }
        None => println!("Audio: none"),
    }
    if let Some(group) = &hints.release_group {
        println!("Group: {}", group);
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = releaseforge_probe::check_tools(config.tools.mediainfo_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install mediainfo to name files.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!(
                "  TMDB API key: {}",
                if config.catalog.tmdb_api_key.is_empty() { "not set" } else { "set" }
            );
            println!("  Similarity threshold: {}", config.catalog.similarity_threshold);
            println!("  Format: {}", config.naming.format);
            println!("  Container: {}", config.naming.container);
            println!(
                "  Extra banned groups: {}",
                config.groups.banned_web.len()
                    + config.groups.banned_remux.len()
                    + config.groups.banned_encode.len()
            );
            println!("  Extra collectives: {}", config.groups.collectives.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = Config::default();
            println!("Default config:");
            println!("  Format: {}", config.naming.format);
            println!("  Container: {}", config.naming.container);
        }
    }

    Ok(())
}
