use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());

    let result = range_sum_set::run(stdin.lock(), &mut output)
        .and_then(|()| output.flush().map_err(Into::into));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("range_sum_set: {err}");
            ExitCode::FAILURE
        }
    }
}
