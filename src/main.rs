use clap::Parser;
use course_registration::config::demo;
use course_registration::utils::{logger, validation::Validate};
use course_registration::{CliConfig, RegistrationValidator, Result, ScenarioConfig};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting course-registration");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // Rejections are reported outcomes; only malformed input ends with a non-zero code.
    if let Err(e) = run(&config) {
        tracing::error!("❌ Registration run failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<()> {
    config.validate()?;

    let scenario_config = match &config.scenario {
        Some(path) => {
            tracing::info!("📁 Loading scenarios from: {}", path);
            ScenarioConfig::from_file(path)?
        }
        None => {
            tracing::info!("No scenario file given, running the built-in demonstration");
            demo::demo_config()?
        }
    };
    scenario_config.validate()?;

    let validator = RegistrationValidator::new(config.effective_max_credits(&scenario_config))?;
    let scenarios = scenario_config.build_scenarios()?;

    let outcomes: Vec<_> = scenarios.iter().map(|s| s.run(&validator)).collect();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in &outcomes {
        let marker = if outcome.result.is_accepted() { "✅" } else { "❌" };
        println!(
            "{} {} [{}, {} credits]: {}",
            marker, outcome.scenario, outcome.student, outcome.total_credits, outcome.result
        );
    }

    Ok(())
}
