use super::EXIT_SUCCESS;
use clap::CommandFactory;
use std::path::Path;

pub fn run<C: CommandFactory>(dir: &Path) -> Result<u8, String> {
    let written = write_pages(&C::command(), dir)?;
    println!("{written} man pages written to {}", dir.display());
    Ok(EXIT_SUCCESS)
}

/// Render `nativepack.1` plus one `nativepack-<sub>.1` per subcommand.
fn write_pages(cmd: &clap::Command, dir: &Path) -> Result<usize, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("failed to create dir: {e}"))?;
    let root = cmd.get_name().to_owned();
    write_page(cmd.clone(), &dir.join(format!("{root}.1")))?;
    let mut written = 1;
    for sub in cmd.get_subcommands() {
        let page = dir.join(format!("{root}-{}.1", sub.get_name()));
        write_page(sub.clone(), &page)?;
        written += 1;
    }
    Ok(written)
}

fn write_page(cmd: clap::Command, path: &Path) -> Result<(), String> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .map_err(|e| format!("man page render failed: {e}"))?;
    std::fs::write(path, &buf).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
