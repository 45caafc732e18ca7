fn main() -> anyhow::Result<()> {
    unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    turntable::app_core::Turntable::new()?.run()?;
    Ok(())
}
