mod console;

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Sleep;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console::Command;
use sickseek_catalog::Catalog;
use sickseek_core::{
    App, ClientConfig, Effect, FileDocumentStore, IdentityProvider, LocalIdentityProvider,
};

/// Main entry point for the Sick&Seek terminal client
///
/// Shows the splash screen while the startup identity check runs, then reads one command
/// per line from stdin and redraws the screen after each. Logs go to stderr.
///
/// # Environment Variables
/// - `SICKSEEK_DATA_DIR`: directory for stored profiles (default: "user_data")
/// - `SICKSEEK_SPLASH_MS`: splash duration in milliseconds (default: 2500)
/// - `SICKSEEK_SCAN_MS`: simulated scan duration, 2000 to 2500 (default: 2000)
/// - `SICKSEEK_START_HINT`: startup deep link, e.g. "#profile"
/// - `SICKSEEK_IDENTITY_ID` / `SICKSEEK_IDENTITY_NAME` / `SICKSEEK_IDENTITY_EMAIL`: local identity
/// - `SICKSEEK_SIGNED_IN`: start with an existing session for that identity
///
/// # Returns
/// * `Ok(())` - On `quit` or end of input
/// * `Err(anyhow::Error)` - If configuration or the catalog is invalid, or stdin fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sickseek_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_lookup(|key| std::env::var(key).ok())?;
    let catalog = Arc::new(Catalog::load_builtin()?);
    tracing::info!(
        "++ Loaded {} providers and {} procedure categories",
        catalog.providers().len(),
        catalog.categories().len()
    );

    let identity = Arc::new(
        LocalIdentityProvider::new(config.identity().clone()).with_id_file(config.identity_file()),
    );
    let store = Arc::new(FileDocumentStore::new(config.data_dir()));
    tracing::info!("++ Storing profiles under {}", store.root().display());

    let mut app = App::new(catalog, Arc::clone(&identity), store, &config);

    println!("{}", console::render(&app.screen()));
    start(&mut app, identity.as_ref(), config.splash_duration()).await;

    run(&mut app).await
}

/// Runs the splash timer and the startup identity check side by side. Whichever finishes
/// second decides whether the user lands on the sign-in gate or the shell; a check that
/// outlasts the splash shows the loading screen meanwhile.
async fn start<P: IdentityProvider>(
    app: &mut App<P, FileDocumentStore>,
    identity: &P,
    splash: Duration,
) {
    let check = identity.current_identity();
    let splash = tokio::time::sleep(splash);
    tokio::pin!(check, splash);
    let (mut resolved, mut splash_done) = (false, false);

    while !(resolved && splash_done) {
        tokio::select! {
            existing = &mut check, if !resolved => {
                resolved = true;
                app.session_resolved(existing).await;
                if !splash_done {
                    continue;
                }
            }
            _ = &mut splash, if !splash_done => {
                splash_done = true;
                app.splash_elapsed().await;
            }
        }
        println!("{}", console::render(&app.screen()));
    }
}

async fn run<P: IdentityProvider>(app: &mut App<P, FileDocumentStore>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut scan_timer: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match console::parse_command(&line) {
                    Ok(None) => continue,
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => {
                        println!("{}", console::HELP);
                        continue;
                    }
                    Ok(Some(Command::Share(origin))) => {
                        println!("{}", app.share_link(&origin));
                        continue;
                    }
                    Ok(Some(Command::SignIn(target))) => {
                        if let Err(e) = app.sign_in(target).await {
                            println!("Could not sign in: {e}");
                        }
                    }
                    Ok(Some(Command::Intent(intent))) => match app.dispatch(intent).await {
                        Ok(Effect::ScanTimer(delay)) => {
                            scan_timer = Some(Box::pin(tokio::time::sleep(delay)));
                        }
                        Ok(Effect::Profile(change)) => {
                            if let Some(note) = console::describe_change(change) {
                                println!("{note}");
                            }
                        }
                        Ok(Effect::None) => {}
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    },
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                }
            }
            _ = wait_for(&mut scan_timer) => {
                scan_timer = None;
                if let Err(e) = app.scan_elapsed() {
                    // The scan was reset while the timer was running.
                    tracing::debug!("scan timer ignored: {}", e);
                    continue;
                }
            }
        }

        if app.sync_identity().await {
            tracing::debug!("session changed by identity provider");
        }
        println!("{}", console::render(&app.screen()));
    }

    Ok(())
}

async fn wait_for(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
