use std::process::ExitCode;

fn main() -> ExitCode {
    match cdr_rates::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Fatal error: {err}");
            ExitCode::FAILURE
        }
    }
}
