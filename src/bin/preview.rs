//! Grew preview: renders a mentor profile view from a JSON fixture.
//!
//! Usage: `grew-preview <fixture.json> <profile-id> [page] [token]`
//!
//! Loads the fixture into the in-memory gateway, mounts the profile
//! controller, optionally jumps to a review page, and prints the view
//! snapshot and profile card as pretty JSON. `GREW_SCENARIO` applies a
//! devtools scenario (e.g. `reviews_down`) before mounting. Logging goes to
//! stderr through `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use grew_lib::config::load_config;
use grew_lib::devtools::{self, Fixture, FixtureGateway};
use grew_lib::types::Session;
use grew_lib::view::ProfileController;

struct Args {
    fixture: PathBuf,
    profile_no: i64,
    page: Option<u32>,
    token: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let (Some(fixture), Some(profile)) = (args.next(), args.next()) else {
        bail!("usage: grew-preview <fixture.json> <profile-id> [page] [token]");
    };
    let profile_no = profile
        .parse()
        .with_context(|| format!("invalid profile id: {}", profile))?;
    let page = args
        .next()
        .map(|p| p.parse().with_context(|| format!("invalid page: {}", p)))
        .transpose()?;

    Ok(Args {
        fixture: PathBuf::from(fixture),
        profile_no,
        page,
        token: args.next(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = load_config().unwrap_or_else(|e| {
        log::warn!("Using default config: {}", e);
        Default::default()
    });

    let fixture = Fixture::load(&args.fixture).map_err(anyhow::Error::msg)?;
    let gateway = Arc::new(FixtureGateway::new(fixture));
    if let Ok(scenario) = std::env::var("GREW_SCENARIO") {
        let description = devtools::apply_scenario(&scenario, &gateway).map_err(anyhow::Error::msg)?;
        log::info!("Scenario {}: {}", scenario, description);
    }

    // The token's member number comes from the fixture's token table.
    let session = match args.token {
        Some(token) => match gateway.fixture().tokens.get(&token).copied() {
            Some(member_no) => Session::signed_in(member_no, token),
            None => bail!("token {:?} is not in the fixture", token),
        },
        None => Session::anonymous(),
    };

    let controller = ProfileController::new(gateway, session, config);
    controller.mount(args.profile_no).await;
    if let Some(page) = args.page {
        controller.paginate(page).await;
    }

    let view = controller.snapshot();
    println!("{}", serde_json::to_string_pretty(&view)?);
    if let Some(card) = controller.card(chrono::Local::now().date_naive()) {
        println!("{}", serde_json::to_string_pretty(&card)?);
    }
    Ok(())
}
