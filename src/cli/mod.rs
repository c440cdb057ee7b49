use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::api::validate::validate_signup;
use crate::auth::hash_password;
use crate::database::models::{NewUser, User};
use crate::database::Store;

#[derive(Parser)]
#[command(name = "storefront-api")]
#[command(about = "Product catalog REST API with JWT authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Create a user account directly in the configured store")]
    CreateUser {
        #[arg(help = "Username for the new account")]
        username: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", help = "Password for the new account")]
        password: String,
    },
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve { port: None })
    }
}

/// Create an account for `create-user`. Refuses a store that does not outlive the process.
pub async fn create_user(store: &Store, username: String, password: String) -> anyhow::Result<User> {
    if !store.is_persistent() {
        anyhow::bail!("create-user requires DATABASE_URL; the in-memory store is discarded on exit");
    }

    let input = validate_signup(&json!({ "username": username, "password": password }))
        .map_err(|e| anyhow::anyhow!("{}: {:?}", e, e.field_errors()))?;

    if store.users.find_by_username(&input.username).await?.is_some() {
        anyhow::bail!("user '{}' already exists", input.username);
    }

    let password_hash = hash_password(&input.password)?;
    let user = store
        .users
        .create(NewUser {
            username: input.username,
            password_hash,
        })
        .await
        .context("failed to create user")?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["storefront-api"]);
        assert_eq!(cli.command(), Commands::Serve { port: None });
    }

    #[test]
    fn parses_serve_port() {
        let cli = Cli::parse_from(["storefront-api", "serve", "--port", "9000"]);
        assert_eq!(cli.command(), Commands::Serve { port: Some(9000) });
    }

    #[test]
    fn parses_create_user() {
        let cli = Cli::parse_from(["storefront-api", "create-user", "alice", "--password", "s3cret"]);
        assert_eq!(
            cli.command(),
            Commands::CreateUser {
                username: "alice".to_string(),
                password: "s3cret".to_string()
            }
        );
    }

    #[tokio::test]
    async fn create_user_refuses_memory_store() {
        let store = Store::memory();
        let err = create_user(&store, "alice".to_string(), "s3cretpass".to_string())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
        assert!(store.users.find_by_username("alice").await.unwrap().is_none());
    }
}
