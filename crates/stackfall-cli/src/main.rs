mod command;
mod record;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
