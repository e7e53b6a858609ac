use anyhow::Context;
use clap::Parser;
use notevault::application::{init, AccountVault, ConfigService, Vault};
use notevault::cli::{
    format_blob_list, format_note, format_note_list, format_skipped, format_usage, BlobCommand,
    Cli, Commands, NoteCommand,
};
use notevault::domain::{blob::has_allowed_extension, BlobKind, Session};
use notevault::error::VaultError;
use notevault::logging;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<VaultError>() {
            Some(vault_err) => {
                eprintln!("Error: {}", vault_err.display_with_suggestions());
                std::process::exit(vault_err.exit_code());
            }
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}

/// Credentials from the global flags
struct Login {
    user: Option<String>,
    password: Option<String>,
}

impl Login {
    fn require(&self) -> Result<(&str, &str), VaultError> {
        let user = self.user.as_deref().ok_or_else(|| {
            VaultError::InvalidInput("missing --user (or NOTEVAULT_USER)".to_string())
        })?;
        let password = self.password.as_deref().ok_or_else(|| {
            VaultError::InvalidInput("missing --password (or NOTEVAULT_PASSWORD)".to_string())
        })?;
        Ok((user, password))
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        root,
        user,
        password,
        command,
        ..
    } = cli;
    let login = Login { user, password };

    match command {
        Commands::Init => {
            init::init(&root)?;
            println!("Initialized vault at {}", root.display());
        }
        Commands::Register => {
            let (user, password) = login.require()?;
            let account = Vault::open(&root)?.register(user, password)?;
            println!("Registered account: {}", account);
        }
        Commands::Login => {
            with_account(&root, &login, |_, account| {
                println!("Logged in as {}", account.account());
                Ok(())
            })?;
        }
        Commands::Status => {
            let (user, password) = login.require()?;
            let vault = Vault::open(&root)?;
            let mut session = Session::new();
            let account = vault.login(&mut session, user, password)?;
            let usage = vault.usage(&session);
            vault.logout(&mut session);
            print!("{}", format_usage(account.as_str(), &usage?));
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(root);

            if list {
                let config = service.list()?;
                println!("default_color = {}", config.default_color);
                println!("id_collision = {}", config.id_collision);
                println!("image_extensions = {}", config.image_extensions.join(","));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: notevault config [--list | <key> [<value>]]");
                println!("Valid keys: default_color, id_collision, image_extensions");
            }
        }
        Commands::Note { action } => {
            with_account(&root, &login, |vault, account| {
                run_note(vault, account, action)
            })?;
        }
        Commands::File { action } => {
            with_account(&root, &login, |vault, account| {
                run_blob(vault, account, BlobKind::Files, action)
            })?;
        }
        Commands::Image { action } => {
            with_account(&root, &login, |vault, account| {
                run_blob(vault, account, BlobKind::Images, action)
            })?;
        }
    }

    Ok(())
}

/// Log in, run `f` against the account, then log out again
fn with_account<T>(
    root: &Path,
    login: &Login,
    f: impl FnOnce(&Vault, &AccountVault) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let (user, password) = login.require()?;
    let vault = Vault::open(root)?;
    let mut session = Session::new();
    vault.login(&mut session, user, password)?;

    let result = vault
        .account(&session)
        .map_err(anyhow::Error::from)
        .and_then(|account| f(&vault, &account));

    vault.logout(&mut session);
    result
}

fn run_note(vault: &Vault, account: &AccountVault, action: NoteCommand) -> anyhow::Result<()> {
    match action {
        NoteCommand::Add {
            title,
            content,
            color,
        } => {
            let color = color.unwrap_or_else(|| vault.config().default_color.clone());
            let id = account.create_note(&title, &content, &color)?;
            println!("Created note: {}", id);
        }
        NoteCommand::List => {
            let listing = account.list_notes()?;
            eprint!("{}", format_skipped(&listing.skipped));
            println!("{}", format_note_list(&listing.notes).trim_end());
        }
        NoteCommand::Show { id } => {
            print!("{}", format_note(&account.read_note(&id)?));
        }
        NoteCommand::Edit { id, content, color } => {
            if content.is_none() && color.is_none() {
                return Err(VaultError::InvalidInput(
                    "nothing to change: pass --content and/or --color".to_string(),
                )
                .into());
            }
            let current = account.read_note(&id)?;
            let content = content.unwrap_or(current.content);
            let color = color.unwrap_or(current.color);
            account.update_note(&id, &content, &color)?;
            println!("Updated note: {}", id);
        }
        NoteCommand::Rm { id } => {
            account.delete_note(&id)?;
            println!("Deleted note: {}", id);
        }
    }
    Ok(())
}

fn run_blob(
    vault: &Vault,
    account: &AccountVault,
    kind: BlobKind,
    action: BlobCommand,
) -> anyhow::Result<()> {
    match action {
        BlobCommand::Put { path, name } => {
            let name = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        VaultError::InvalidInput(format!(
                            "cannot derive a name from {}; pass --name",
                            path.display()
                        ))
                    })?,
            };

            let extensions = &vault.config().image_extensions;
            if kind == BlobKind::Images && !has_allowed_extension(&name, extensions) {
                return Err(VaultError::InvalidInput(format!(
                    "'{}' is not an allowed image type (allowed: {})",
                    name,
                    extensions.join(", ")
                ))
                .into());
            }

            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            account.store_blob(kind, &name, &bytes)?;
            println!("Stored {}: {}", kind.label(), name);
        }
        BlobCommand::List => {
            let names = account.list_blobs(kind)?;
            println!("{}", format_blob_list(kind.label(), &names).trim_end());
        }
        BlobCommand::Get { name, out } => {
            let bytes = account.fetch_blob(kind, &name)?;
            let out = out.unwrap_or_else(|| PathBuf::from(&name));

            if out.as_os_str() == "-" {
                std::io::stdout()
                    .write_all(&bytes)
                    .context("Failed to write to stdout")?;
            } else {
                fs::write(&out, &bytes)
                    .with_context(|| format!("Failed to write {}", out.display()))?;
                println!("Saved {} to {}", name, out.display());
            }
        }
        BlobCommand::Rm { name } => {
            account.delete_blob(kind, &name)?;
            println!("Deleted {}: {}", kind.label(), name);
        }
    }
    Ok(())
}
