mod cli;
mod scene;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = cli::DemoOptions::parse(&args)?;
    cli::run(&options)
}
