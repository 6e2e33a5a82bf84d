//! Auth bridge command.

use anyhow::{Context, Result};
use sensai_core::auth::{AuthBridge, ProviderCredentials, UserProfile};
use sensai_core::config::Config;
use sensai_core::logging;

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Email reported by the identity provider
    #[arg(long)]
    email: String,
    /// Full display name (split into given/family names when those are absent)
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    given_name: Option<String>,
    #[arg(long)]
    family_name: Option<String>,
    /// Provider ID token forwarded to the backend
    #[arg(long, env = "SENSAI_ID_TOKEN", hide_env_values = true)]
    id_token: Option<String>,
    #[arg(long, hide = true)]
    access_token: Option<String>,
    /// Identity provider name (e.g. google)
    #[arg(long)]
    provider: Option<String>,
}

impl LoginArgs {
    fn into_parts(self) -> (UserProfile, ProviderCredentials) {
        let user = UserProfile {
            given_name: self.given_name,
            family_name: self.family_name,
            name: self.name,
            ..UserProfile::new(self.email)
        };
        let account = ProviderCredentials {
            access_token: self.access_token,
            id_token: self.id_token,
            provider: self.provider,
        };
        (user, account)
    }
}

/// Prints the backend record, or `{"id": null}` when registration failed.
pub async fn run(config: &Config, args: LoginArgs) -> Result<()> {
    logging::init_stderr(&config.log_level);

    let (user, account) = args.into_parts();
    let bridge = AuthBridge::new(config.backend_url.clone());
    let record = bridge.register_user(&user, &account).await;

    let json = serde_json::to_string_pretty(&record).context("serialize login result")?;
    println!("{json}");
    Ok(())
}
