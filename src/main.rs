fn main() -> anyhow::Result<()> {
    mkr_plugin::cli::run()
}
