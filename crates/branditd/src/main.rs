use std::process::ExitCode;

fn main() -> ExitCode {
    match branditd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("branditd: {error}");
            ExitCode::FAILURE
        }
    }
}
