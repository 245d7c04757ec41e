use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    fretwise_core::types::pattern::validate()?;

    // An optional shared link or route path selects the initial view
    let route = std::env::args().nth(1);
    fretwise::start(route)
}
