//! Authenticated user handler.

use cfctl_core::{CloudflareClient, User, UserPatch};

use crate::cli::{GlobalOpts, UserArgs, UserCommand};
use crate::error::CliError;
use crate::output;

fn user_detail(u: &User) -> String {
    [
        format!("ID:       {}", u.id),
        format!("Email:    {}", u.email.as_deref().unwrap_or("-")),
        format!("Username: {}", u.username.as_deref().unwrap_or("-")),
        format!("Name:     {}", u.name),
        format!("2FA:      {}", if u.two_factor { "enabled" } else { "disabled" }),
    ]
    .join("\n")
}

pub async fn handle(
    client: &CloudflareClient,
    args: &UserArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let user = match &args.command {
        UserCommand::Info => client.user().await?,
        UserCommand::Update { .. } => {
            let patch = user_patch(&args.command).unwrap_or_default();
            client.update_user(&patch).await?
        }
    };
    let out = output::render_single(&global.output, &user, user_detail, |u| u.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Fields given to `user update`; `None` for any other subcommand.
pub fn user_patch(cmd: &UserCommand) -> Option<UserPatch> {
    let UserCommand::Update {
        first_name,
        last_name,
        telephone,
        country,
        zipcode,
    } = cmd
    else {
        return None;
    };
    Some(UserPatch {
        first_name: first_name.clone(),
        last_name: last_name.clone(),
        telephone: telephone.clone(),
        country: country.clone(),
        zipcode: zipcode.clone(),
    })
}
