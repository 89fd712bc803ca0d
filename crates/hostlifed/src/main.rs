use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin = io::stdin();
    match hostlifed::run_host(stdin.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            // Telemetry may not be installed when bootstrap fails early.
            eprintln!("hostlifed: {error}");
            ExitCode::FAILURE
        }
    }
}
