use std::process::ExitCode;

fn main() -> ExitCode {
    cycle_video::cli::run(std::env::args_os())
}
