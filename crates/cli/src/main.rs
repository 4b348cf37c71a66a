use clap::{Parser, Subcommand};
use sickseek_catalog::{nationality_options, Catalog, ProviderId, ReviewFilter};
use sickseek_core::{
    profile_share_link, resolve_category, search, CategoryFilter, CategoryIdentity, ClientConfig,
    FileDocumentStore, Identity, IdentityProvider, ImageRef, LocalIdentityProvider,
    ProfileChange, ProfileManager, ScanFlow, TagKind,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sickseek")]
#[command(about = "Sick&Seek provider discovery CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search providers (HOT providers first)
    Search {
        /// Free-text query matched against name, tags and location
        query: Option<String>,
        /// Category chip label, e.g. "Dental" (default: All)
        #[arg(long, default_value = "All")]
        category: String,
    },
    /// Show a provider with its reviews
    Provider {
        /// Provider id
        id: u32,
        /// Only show reviews from this nationality
        #[arg(long)]
        nationality: Option<String>,
    },
    /// Describe an insurance type, or list all of them
    Insurance {
        /// Insurance key, e.g. "NHIS"
        key: Option<String>,
    },
    /// Browse procedure flashcards
    Procedures {
        /// Category id, e.g. "dental"
        category: Option<String>,
        /// Procedure index within the category
        index: Option<usize>,
    },
    /// Resolve a label to its category identity
    Category {
        /// Label to resolve, e.g. "Dermatology"
        label: String,
    },
    /// Show the signed-in user's profile
    Profile,
    /// Add an allergy or medication tag
    AddTag {
        /// "allergy" or "medication"
        kind: String,
        value: String,
    },
    /// Remove an allergy or medication tag
    RemoveTag {
        /// "allergy" or "medication"
        kind: String,
        value: String,
    },
    /// Change the display name
    Rename {
        name: String,
    },
    /// Run the simulated prescription scan on an image
    Scan {
        /// Path to an image file
        path: PathBuf,
    },
    /// Print the link that opens the Health tab
    ShareLink {
        /// Origin the app is served from
        origin: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sickseek_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_lookup(|key| std::env::var(key).ok())?;
    let catalog = Catalog::load_builtin()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Some(Commands::Search { query, category }) => {
            let filter = CategoryFilter::parse(&category);
            let results = search(catalog.providers(), &filter, query.as_deref().unwrap_or(""));
            if results.is_empty() {
                println!("No providers found.");
            }
            for provider in results {
                println!(
                    "{:>3}  {}{}  [{}]  {}  ★{:.1} ({} reviews)  English: {}",
                    provider.id,
                    provider.name,
                    if provider.is_hot() { " HOT" } else { "" },
                    provider.specialty,
                    provider.location,
                    provider.rating,
                    provider.review_count,
                    provider.language.label()
                );
            }
        }
        Some(Commands::Provider { id, nationality }) => {
            let Some(provider) = catalog.provider(ProviderId(id)) else {
                eprintln!("Unknown provider: {}", id);
                return Ok(());
            };
            println!("{} [{}]", provider.name, provider.specialty);
            println!("{}", provider.location);
            println!("{}", provider.description);
            let insurance: Vec<&str> = provider.insurance.iter().map(|k| k.as_str()).collect();
            println!("Insurance: {}", insurance.join(", "));

            let reviews = catalog.reviews_for(provider.id);
            println!("Nationalities: {}", nationality_options(&reviews).join(", "));
            let filter = ReviewFilter::parse(nationality.as_deref().unwrap_or(""));
            for review in filter.apply(&reviews) {
                println!(
                    "  {} ({}) {}/5: {}",
                    review.author, review.nationality, review.rating, review.comment
                );
            }
        }
        Some(Commands::Insurance { key: Some(key) }) => {
            let info = catalog.insurance(&key.as_str().into());
            println!("{}", info.title);
            println!("Coverage: {}", info.coverage);
            println!("Benefits: {}", info.benefits);
            println!("Who: {}", info.eligibility);
            println!("Tips: {}", info.tips);
        }
        Some(Commands::Insurance { key: None }) => {
            for info in catalog.insurance_types() {
                println!("{}: {}", info.key, info.title);
            }
        }
        Some(Commands::Procedures { category, index }) => {
            print_procedures(&catalog, category.as_deref(), index);
        }
        Some(Commands::Category { label }) => {
            match resolve_category(catalog.categories(), &label) {
                CategoryIdentity::All => println!("all"),
                CategoryIdentity::Category(id) => println!("{}", id),
                CategoryIdentity::Uncategorised => println!("uncategorised"),
            }
        }
        Some(Commands::Profile) => {
            let manager = runtime.block_on(load_profile(&config))?;
            let profile = manager.profile();
            println!("Name: {}", profile.name);
            for kind in [TagKind::Allergy, TagKind::Medication] {
                println!("{}: {}", kind.label(), profile.tags(kind).join(", "));
            }
        }
        Some(Commands::AddTag { kind, value }) => {
            let kind = parse_kind(&kind)?;
            let change = runtime.block_on(async {
                let mut manager = load_profile(&config).await?;
                Ok::<_, Box<dyn std::error::Error>>(manager.add_tag(kind, &value).await)
            })?;
            report(change);
        }
        Some(Commands::RemoveTag { kind, value }) => {
            let kind = parse_kind(&kind)?;
            let change = runtime.block_on(async {
                let mut manager = load_profile(&config).await?;
                Ok::<_, Box<dyn std::error::Error>>(manager.remove_tag(kind, &value).await)
            })?;
            report(change);
        }
        Some(Commands::Rename { name }) => {
            let change = runtime.block_on(async {
                let mut manager = load_profile(&config).await?;
                Ok::<_, Box<dyn std::error::Error>>(manager.rename(&name).await)
            })?;
            report(change);
        }
        Some(Commands::Scan { path }) => {
            let annotations = runtime.block_on(async {
                let image = ImageRef::pick(&path).await?;
                let mut flow = ScanFlow::new(config.scan_delay());
                flow.start(image)?;
                println!("Scanning...");
                let annotations = flow.complete_after_delay().await?.clone();
                Ok::<_, Box<dyn std::error::Error>>(annotations)
            })?;
            for line in &annotations.lines {
                println!("{}", line);
            }
            println!("{}", annotations.disclaimer);
        }
        Some(Commands::ShareLink { origin }) => {
            println!("{}", profile_share_link(&origin));
        }
        None => {
            println!("Use 'sickseek --help' for commands");
        }
    }

    Ok(())
}

fn print_procedures(catalog: &Catalog, category: Option<&str>, index: Option<usize>) {
    let Some(category) = category else {
        for category in catalog.categories() {
            println!("{}: {}", category.id, category.label);
        }
        return;
    };
    let Some(category) = catalog.category(&category.into()) else {
        eprintln!("Unknown procedure category: {}", category);
        return;
    };
    match index {
        None => {
            for (i, procedure) in category.procedures.iter().enumerate() {
                println!("{}: {}", i, procedure.title);
            }
        }
        Some(index) => match category.procedure(index) {
            Some(procedure) => {
                println!("{}", procedure.title);
                for (n, step) in procedure.steps.iter().enumerate() {
                    println!("  {}. {}", n + 1, step);
                }
            }
            None => eprintln!("No procedure {} in {}", index, category.id),
        },
    }
}

fn parse_kind(kind: &str) -> Result<TagKind, Box<dyn std::error::Error>> {
    TagKind::parse(kind).ok_or_else(|| format!("unknown tag kind '{}'", kind).into())
}

/// Uses the configured local identity, signing in if no session exists.
///
/// Without a configured id the minted id is kept in the data directory, so every run edits
/// the same profile.
async fn load_profile(
    config: &ClientConfig,
) -> Result<ProfileManager<FileDocumentStore>, Box<dyn std::error::Error>> {
    let provider = LocalIdentityProvider::new(config.identity().clone())
        .with_id_file(config.identity_file());
    let identity: Identity = match provider.current_identity().await {
        Some(identity) => identity,
        None => provider.sign_in_interactive().await?,
    };
    let store = Arc::new(FileDocumentStore::new(config.data_dir()));
    Ok(ProfileManager::load(store, &identity).await)
}

fn report(change: ProfileChange) {
    match change {
        ProfileChange::Applied { persisted: true } => println!("Saved."),
        ProfileChange::Applied { persisted: false } => {
            eprintln!("Changed locally, but the profile could not be saved.")
        }
        ProfileChange::Rejected(reason) => println!("No change ({:?}).", reason),
    }
}
