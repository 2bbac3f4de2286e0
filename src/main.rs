mod console;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let channels = marquee_bridge::BridgeChannels::default();
    marquee_backend::run(channels.backend_rx, channels.backend_tx);

    let frontend_rx = channels.frontend_rx;
    std::thread::spawn(move || console::print_backend_messages(frontend_rx));

    console::read_commands(std::io::stdin().lock(), channels.frontend_tx)
}
