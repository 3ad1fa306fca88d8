use snsign_core::{Context, OsEnv, Signer};
use snsign_snws2::{
    AuthorizationBuilder, Config, DefaultCredentialProvider, Environment, RequestSigner,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let env = Environment::new().from_env(&ctx)?;

    // Example 1: Compute an Authorization header with the builder directly
    println!("Example 1: AuthorizationBuilder");
    let mut builder = AuthorizationBuilder::with_environment("demo-token", env.clone());
    builder.path("/solarquery/api/v1/sec/datum/list");
    builder.extend_query_params([("nodeId", "1"), ("sourceId", "/meter/1")]);
    builder.save_signing_key("demo-secret");

    println!("Date: {}", builder.request_date_header_value());
    println!("Authorization: {}", builder.build_with_saved_key()?);
    println!("Canonical request:\n{}", builder.build_canonical_request_data());

    // Example 2: Sign an http request with credentials from config or env
    println!("\nExample 2: Signer");
    let config = Arc::new(Config::new().from_env(&ctx));
    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::with_config(config),
        RequestSigner::new().with_sn_date(true),
    );

    let url = format!(
        "{}://{}/solaruser/api/v1/sec/whoami",
        env.protocol,
        env.authority()
    );
    let (mut parts, _) = http::Request::get(url).body(())?.into_parts();
    match signer.sign(&mut parts).await {
        Ok(()) => println!("Signed headers: {:?}", parts.headers),
        Err(err) => println!(
            "Set {} and {} to sign requests: {err}",
            snsign_snws2::constants::SOLARNETWORK_TOKEN_ID,
            snsign_snws2::constants::SOLARNETWORK_TOKEN_SECRET
        ),
    }

    Ok(())
}
