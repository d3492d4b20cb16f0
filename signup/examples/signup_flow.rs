//! Signup Flow Example
//!
//! Drives the signup form the way a view would:
//! - fills in a forbidden username, then a valid one
//! - enters a forbidden email and waits for the remote check
//! - adds two hobbies
//! - submits before and after everything is valid
//!
//! Pass a JSON config file as the first argument to override the defaults.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TerminalMode, TermLogger};
use signup_form::{SignupConfig, SignupError, SignupForm};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}

async fn run() -> Result<(), SignupError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SignupConfig::from_file(path)?,
        None => SignupConfig::default(),
    };
    let form = SignupForm::new(&config)?;

    form.username().set_value("Anna")?;
    println!("username 'Anna': {:?}", form.username().errors());

    form.username().set_value("Max")?;
    println!("username 'Max': {}", form.username().status());

    form.email().set_value("test@test.com")?;
    println!("email while checking: {}", form.email().status());
    form.email().settled().await;
    println!("email after check: {:?}", form.email().errors());

    form.email().set_value("max@example.com")?;
    form.append_hobby()?.set_value("chess")?;
    let climbing = form.append_hobby()?;

    let early = form.submit();
    println!("early submit: {}", early.status);

    climbing.set_value("climbing")?;
    form.form().settled().await;

    let snapshot = form.submit();
    println!("final submit: {} {}", snapshot.status, snapshot.value);

    Ok(())
}
