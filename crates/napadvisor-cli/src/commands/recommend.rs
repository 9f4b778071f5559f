//! Recommend command: collects the three inputs and renders the result.

use chrono::{Local, Timelike};
use clap::Args;

use napadvisor_core::{
    evaluate, format_hour, Config, InputPolicy, NapEvaluation, NapInput, TirednessLabel,
};

#[derive(Args)]
pub struct RecommendArgs {
    /// Hour of day, 0-23 (default: current local hour)
    #[arg(long, allow_negative_numbers = true)]
    pub hour: Option<i64>,
    /// How tired you are, 1 (wide awake) to 10 (exhausted)
    #[arg(short, long, allow_negative_numbers = true)]
    pub tiredness: Option<i64>,
    /// Your age in years
    #[arg(short, long, allow_negative_numbers = true)]
    pub age: Option<i64>,
    /// Out-of-range handling: strict or clamp
    #[arg(long)]
    pub policy: Option<InputPolicy>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
    /// Show which rules produced the result
    #[arg(long)]
    pub explain: bool,
}

pub fn run(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let input = resolve_input(&args, &config, i64::from(Local::now().hour()))?;
    let evaluation = evaluate(&input);

    let json = args.json || config.output.json;
    let explain = args.explain || config.output.explain;

    if json {
        let out = if explain {
            serde_json::to_string_pretty(&evaluation)?
        } else {
            serde_json::to_string_pretty(&evaluation.recommendation)?
        };
        println!("{out}");
    } else {
        print!("{}", render_text(&evaluation, explain));
    }
    Ok(())
}

fn resolve_input(
    args: &RecommendArgs,
    config: &Config,
    current_hour: i64,
) -> Result<NapInput, napadvisor_core::ValidationError> {
    let policy = args.policy.unwrap_or(config.input.policy);
    let hour = args.hour.unwrap_or(current_hour);
    let tiredness = args
        .tiredness
        .unwrap_or_else(|| i64::from(config.defaults.tiredness_level));
    let age = args.age.unwrap_or_else(|| i64::from(config.defaults.age));

    tracing::debug!(hour, tiredness, age, %policy, "resolved inputs");
    policy.admit(hour, tiredness, age)
}

fn render_text(evaluation: &NapEvaluation, explain: bool) -> String {
    let input = &evaluation.input;
    let rec = &evaluation.recommendation;
    let mut out = String::new();

    out.push_str(&format!(
        "Time: {} | Tiredness: {}/10 ({}) | Age: {}\n\n",
        format_hour(input.current_hour()),
        input.tiredness_level(),
        TirednessLabel::for_level(input.tiredness_level()),
        input.age()
    ));

    if rec.should_nap {
        out.push_str("Yes, take a nap!\n");
    } else {
        out.push_str("No, skip the nap.\n");
    }
    out.push_str(&format!("  {}\n", rec.reason));

    if rec.should_nap {
        out.push_str(&format!(
            "\n  Recommended: {} min\n  Range:       {}-{} min\n",
            rec.recommended_duration, rec.min_duration, rec.max_duration
        ));
    }

    if let Some(warning) = &rec.warning {
        out.push_str(&format!("\n  Warning: {warning}\n"));
    }

    if explain {
        let band = evaluation.age_band;
        let window = evaluation.window;
        let raw = evaluation.raw_range;
        out.push_str("\nRule trace:\n");
        out.push_str(&format!(
            "  Age band:   {} (base {} min)\n",
            band.label, band.base_minutes
        ));
        out.push_str(&format!(
            "  Window:     {} ({} - {})\n",
            window.name,
            format_hour(window.start),
            format_hour(window.end % 24)
        ));
        out.push_str(&format!(
            "  Tiredness:  x{:.2} -> {} min\n",
            evaluation.tiredness_factor, evaluation.adjusted_duration
        ));
        out.push_str(&format!(
            "  Raw range:  {} min ({}-{})\n",
            raw.recommended, raw.min, raw.max
        ));
        for adjustment in &evaluation.adjustments {
            out.push_str(&format!("  - {}\n", adjustment.description()));
        }
    }

    out
}
