fn main() -> anyhow::Result<()> {
    let theme = std::env::args().nth(1);
    let css = editor_theme::run(theme.as_deref())?;
    print!("{css}");
    Ok(())
}
