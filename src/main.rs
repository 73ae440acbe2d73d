use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let invocation = renamer::cli::parse();
    app::run(invocation)
}
