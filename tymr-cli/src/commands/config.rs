use anyhow::Result;
use owo_colors::OwoColorize;
use tymr_core::config::SchedulerConfig;

pub fn run() -> Result<()> {
    let config_path = SchedulerConfig::config_path()?;
    let config = SchedulerConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!(
        "  Config:     {} {}",
        config_path.display(),
        if config_path.exists() { "" } else { "(not created)" }.dimmed()
    );
    println!();

    println!("{}", "Settings".bold());
    println!("  Working hours:    {}-{}", config.work_start, config.work_end);
    println!("  Suggestions:      {}", config.max_suggestions);
    println!("  Default duration: {} min", config.default_duration);
    println!("  Monthly overflow: {:?}", config.monthly_overflow);
    println!();

    println!("{}", "Template".bold());
    println!("{}", SchedulerConfig::template().dimmed());

    Ok(())
}
