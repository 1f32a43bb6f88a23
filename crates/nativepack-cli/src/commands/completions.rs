use super::EXIT_SUCCESS;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

const BIN_NAME: &str = "nativepack";

#[allow(clippy::unnecessary_wraps)]
pub fn run<C: CommandFactory>(shell: Shell) -> Result<u8, String> {
    write_completions::<C>(shell, &mut std::io::stdout());
    Ok(EXIT_SUCCESS)
}

fn write_completions<C: CommandFactory>(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut C::command(), BIN_NAME, out);
}
