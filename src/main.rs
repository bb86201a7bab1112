fn main() -> anyhow::Result<()> {
    email_classifier::cli::run()
}
