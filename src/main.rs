use std::env;

use config::{Config, Environment, File};
use dotenvy::dotenv;
use env_logger::Env;

use school_dashboard::models::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine as long as the environment is set.
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build();

    let server_config = match settings.and_then(|settings| settings.try_deserialize::<ServerConfig>())
    {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting school dashboard API on {}:{}",
        server_config.address,
        server_config.port
    );

    school_dashboard::run(server_config).await
}
