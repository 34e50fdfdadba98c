use std::{
    error::Error,
    io,
    path::{Path, PathBuf},
    process::exit,
};

use clap::Parser;

use frost_catalog::{ADMIN_CREDENTIAL_FILE, AdminCredentialStore, PasswordHash, ValidatedPassword};

/// A utility for setting the password for the admin panel.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory that holds the JSON documents.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    validate_data_dir(&args.data_dir);

    let credential_path = args.data_dir.join(ADMIN_CREDENTIAL_FILE);
    let store = AdminCredentialStore::new(&credential_path);
    if store.get()?.is_some() {
        println!("Replacing the admin password stored in {credential_path:#?}");
    } else {
        println!("Setting the admin password in {credential_path:#?}");
    }

    let password_hash = match get_new_password_hash() {
        Some(password_hash) => password_hash,
        None => return Ok(()),
    };
    store.set(password_hash)?;

    println!("Password updated successfully!");

    Ok(())
}

fn validate_data_dir(data_dir: &Path) {
    if !data_dir.is_dir() {
        print_error(format!("Data directory does not exist at {data_dir:#?}!"));
        exit(1);
    }
}

fn get_new_password_hash() -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = prompt_password("Enter a new password: ")?;

        if let Err(error) = ValidatedPassword::new(&first_password) {
            print_error(error);
            continue;
        }

        let second_password = prompt_password("Enter the same password again: ")?;

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        let password_hash =
            match PasswordHash::from_raw_password(&first_password, PasswordHash::DEFAULT_COST) {
                Ok(password_hash) => password_hash,
                Err(error) => {
                    print_error(format!("Could not hash password: {error}. Try again."));
                    continue;
                }
            };

        return Some(password_hash);
    }
}

/// Read a password without echoing it, or `None` if stdin is closed or broken.
fn prompt_password(prompt: &str) -> Option<String> {
    match rpassword::prompt_password(prompt) {
        Ok(string) => Some(string),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(error) => {
            print_error(format!("Could not read password from stdin: {error}"));
            None
        }
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
