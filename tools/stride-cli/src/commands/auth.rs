//! Session commands.

use anyhow::{bail, Result};
use dialoguer::Password;
use stride_sdk::api::{Credentials, Registration};
use stride_sdk::{ApiError, ErrorKind, UserRecord};

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    ctx.enter_login();

    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = ctx.output.spinner("Signing in...");
    let result = ctx
        .client
        .auth()
        .login(&Credentials::new(&args.email, password))
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(user) => {
            signed_in(&user, ctx);
            Ok(())
        }
        Err(e) if e.kind == ErrorKind::AuthenticationExpired => {
            bail!("Invalid email or password")
        }
        Err(e) => Err(failed(e, ctx)),
    }
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    ctx.enter_login();

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let mut registration = Registration::new(Credentials::new(&args.email, password));
    if let Some(name) = args.name {
        registration = registration.with_full_name(name);
    }

    let spinner = ctx.output.spinner("Creating account...");
    let result = ctx.client.auth().register(&registration).await;
    spinner.finish_and_clear();

    match result {
        Ok(user) => {
            signed_in(&user, ctx);
            Ok(())
        }
        Err(e) => Err(failed(e, ctx)),
    }
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.client.auth().logout();
    ctx.output.success("Signed out");
    Ok(())
}

/// Run the whoami command.
pub async fn whoami(ctx: &Context) -> Result<()> {
    ctx.navigator.navigate("/account");

    if !ctx.client.session().is_authenticated() {
        ctx.output.info("Not signed in. Run `stride login` to sign in.");
        return Ok(());
    }

    let user = ctx.client.auth().me().await.map_err(|e| failed(e, ctx))?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
        return Ok(());
    }
    ctx.output.header("Account");
    ctx.output.kv("id", user.id.as_str());
    ctx.output.kv("email", &user.email);
    ctx.output.kv("name", user.display_name());
    Ok(())
}

fn signed_in(user: &UserRecord, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(user);
        return;
    }
    ctx.output
        .success(&format!("Signed in as {}", user.display_name()));
    ctx.output
        .debug(&format!("Session saved to {}", ctx.state_path.display()));
}

/// Print the details of `error` and turn it into a command failure.
pub(crate) fn failed(error: ApiError, ctx: &Context) -> anyhow::Error {
    ctx.output.api_error(&error);
    error.into()
}
