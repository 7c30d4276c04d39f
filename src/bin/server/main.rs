use anyhow::anyhow;
use clap::{Parser, Subcommand};
use fred::clients::Pool;
use fred::interfaces::ClientLike;
use fred::prelude::ReconnectPolicy;
use sameframe::core::application::{Application, ApplicationServices};
use sameframe::core::config::Config;
use sameframe::domain::{auth, org, team, timeclock};
use sameframe::inbound::http::router;
use sameframe::outbound::db::connection::Db;
use sameframe::outbound::db::repository::Repository;
use sameframe::outbound::password::Argon2Hasher;
use sameframe::outbound::session::{SessionAdapter, SessionAdapterFactory};
use sameframe::outbound::timeclock::{NewTimeApiAdapterParams, TimeApiAdapter};
use sqlx::Postgres;
use sqlx::postgres::PgPoolOptions;
use std::process::exit;
use tower_sessions_redis_store::RedisStore;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias = Application<
    auth::Service<SessionAdapter, Repository, Argon2Hasher, SessionAdapterFactory>,
    org::Service<Repository>,
    team::Service<Repository, Repository>,
    timeclock::Service<TimeApiAdapter, Repository>,
>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long)]
    config_path: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Run,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.db.connection_string().as_str())
        .await
        .map_err(|e| anyhow!("could not connect to the database: {e}"))?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let application = create_application(pool, config)?;

    match cli.command {
        None => Ok(()),
        Some(subcommand) => match subcommand {
            Commands::Run => run_server(application).await,
        },
    }
}

fn create_application(
    pool: sqlx::Pool<Postgres>,
    config: Config,
) -> Result<ApplicationAlias, anyhow::Error> {
    let db = Db::new(pool);
    let repo = Repository::new(db.pool());

    let time_api = TimeApiAdapter::new(NewTimeApiAdapterParams {
        base_url: config.timeclock.base_url.clone(),
        api_key: config.timeclock.api_key.clone(),
    })
    .map_err(|e| anyhow!(e.to_string()))?;

    let session_factory = SessionAdapterFactory::new();
    let auth_service = auth::Service::new(repo.clone(), Argon2Hasher::new(), session_factory);
    let org_service = org::Service::new(repo.clone());
    let team_service = team::Service::new(repo.clone(), repo.clone());
    let timeclock_service = timeclock::Service::new(time_api, repo);

    Ok(Application::new(
        config,
        auth_service,
        org_service,
        team_service,
        timeclock_service,
    ))
}

async fn run_server(app: ApplicationAlias) -> anyhow::Result<()> {
    tracing::debug!("creating session store.");
    let session_store = new_session_store(app.config())
        .await
        .map_err(|_| anyhow!("failed to create redis session store"))?;
    tracing::debug!("created session store.");

    let router = router(app, session_store);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .map_err(|_| anyhow!("server failed to bind"))?;

    tracing::debug!(
        "listening on {}",
        listener
            .local_addr()
            .map_err(|_| anyhow!("failed to get local_addr"))?
    );

    axum::serve(listener, router)
        .await
        .map_err(|_| anyhow!("failed to start server"))
}

async fn new_session_store(config: Config) -> Result<RedisStore<Pool>, anyhow::Error> {
    let config: fred::types::config::Config = config
        .redis
        .try_into()
        .map_err(|_| anyhow!("failed to parse redis session store connection url"))?;

    let pool = Pool::new(
        config,
        None,
        None,
        Some(ReconnectPolicy::new_constant(0, 5_000)),
        10,
    )?;
    let redis_connection = pool.connect();
    tokio::spawn(redis_connection);
    pool.wait_for_connect().await.map_err(|e| {
        error!("could not connect to redis: {:?}", e);
        anyhow!("could not connect to redis")
    })?;

    let session_store = RedisStore::new(pool);

    Ok(session_store)
}
