//! Authentication commands.

use anyhow::Context;
use clap::Args;
use serde_json::json;
use swasthya_core::types::RegisterRequest;
use swasthya_reqwest::ApiClient;

use super::print_json;
use crate::TRACING_TARGET_COMMAND;

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "SWASTHYA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Full name; the first word becomes the first name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password (at least 8 characters)
    #[arg(long, env = "SWASTHYA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Account role
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub phone_number: Option<String>,

    /// Date of birth, e.g. 1990-04-21
    #[arg(long)]
    pub date_of_birth: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,
}

impl RegisterArgs {
    fn into_request(self) -> RegisterRequest {
        let mut request = RegisterRequest::from_full_name(&self.name, self.email, self.password);
        if let Some(role) = self.role {
            request = request.with_role(role);
        }
        if let Some(phone_number) = self.phone_number {
            request = request.with_phone_number(phone_number);
        }
        if let Some(date_of_birth) = self.date_of_birth {
            request = request.with_date_of_birth(date_of_birth);
        }
        if let Some(gender) = self.gender {
            request = request.with_gender(gender);
        }
        request
    }
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> anyhow::Result<()> {
    let response = client
        .login(args.email.trim(), args.password)
        .await
        .context("login failed")?;
    print_json(&response)
}

pub async fn register(client: &ApiClient, args: RegisterArgs) -> anyhow::Result<()> {
    let request = args.into_request();
    request.validate()?;

    let response = client
        .register(&request)
        .await
        .context("registration failed")?;
    print_json(&response)
}

pub async fn logout(client: &ApiClient) -> anyhow::Result<()> {
    client.logout().await.context("logout failed")?;
    tracing::info!(target: TRACING_TARGET_COMMAND, "Local session cleared");
    Ok(())
}

pub async fn me(client: &ApiClient) -> anyhow::Result<()> {
    let response = client
        .current_user()
        .await
        .context("failed to fetch current user")?;
    print_json(&response)
}

pub async fn session(client: &ApiClient) -> anyhow::Result<()> {
    let authenticated = client.is_authenticated().await?;
    let user = client.stored_user().await?;
    print_json(&json!({ "authenticated": authenticated, "user": user }))
}
