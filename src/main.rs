use std::process;

use locaudit::{
    cli::{Cli, CliHandler},
    error::AuditError,
};

#[tokio::main]
async fn main() {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ Argument parsing failed: {e}");
            process::exit(2);
        }
    };

    let handler = CliHandler::new(cli);

    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e}");
            match e {
                AuditError::InvalidArguments(_) => 2,
                // Unrecoverable setup or safety failures
                _ => 1,
            }
        }
    };

    process::exit(exit_code);
}
