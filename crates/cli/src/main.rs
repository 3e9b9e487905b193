fn main() -> anyhow::Result<()> {
    retailbank_cli::run()
}
