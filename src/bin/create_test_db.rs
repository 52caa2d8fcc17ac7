use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_tracker::{
    Email, NewUser, PasswordHash, UserStatus, ValidatedPassword, create_user, initialize_db,
};

/// A utility for creating a test database for the expense tracker REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const TEST_USERNAME: &str = "userone";
const TEST_EMAIL: &str = "Email@wp.pl";
const TEST_PASSWORD: &str = "Password1@";

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new(TEST_PASSWORD)?,
        PasswordHash::DEFAULT_COST,
    )?;

    let user = create_user(
        NewUser {
            username: TEST_USERNAME.to_owned(),
            email: Email::new(TEST_EMAIL)?,
            password_hash,
            status: UserStatus::Verified,
        },
        &conn,
    )?;

    println!(
        "Success! Created user {} ({}) with the ID {}.",
        user.username, user.email, user.id
    );

    Ok(())
}
