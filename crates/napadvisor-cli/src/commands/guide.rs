//! Guide command for displaying the recommendation rules.

use napadvisor_core::nap::rules::{self, NapGate, WarningRule};
use napadvisor_core::nap::{AGE_BANDS, NAP_WINDOWS};
use napadvisor_core::{format_hour, TirednessLabel};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let tables = serde_json::json!({
            "ageBands": AGE_BANDS,
            "windows": NAP_WINDOWS,
        });
        println!("{}", serde_json::to_string_pretty(&tables)?);
    } else {
        print!("{}", render_guide());
    }
    Ok(())
}

fn render_guide() -> String {
    let mut out = String::new();

    out.push_str("\nBase Nap Duration by Age\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    let mut lower = 0;
    for band in &AGE_BANDS {
        let ages = match band.below {
            Some(below) => format!("{lower}-{} years", below - 1),
            None => format!("{lower}+ years"),
        };
        out.push_str(&format!(
            "  {:<12} {:<12} {:>3} min\n",
            band.label, ages, band.base_minutes
        ));
        lower = band.below.unwrap_or(lower);
    }

    out.push_str("\nHow Tiredness Affects Duration\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    for level in 1..=10u8 {
        out.push_str(&format!(
            "  {:>2}  {:<18} x{:.2}\n",
            level,
            TirednessLabel::for_level(level).as_str(),
            rules::tiredness_factor(level)
        ));
    }

    out.push_str("\nWhen to Nap\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    for window in &NAP_WINDOWS {
        let gate = match window.gate {
            NapGate::MinTiredness(level) => format!("nap if tiredness >= {level}"),
            NapGate::Never => "no naps".to_string(),
        };
        out.push_str(&format!(
            "  {:>5} - {:<5}  {:<15} {}\n",
            format_hour(window.start),
            format_hour(window.end % 24),
            window.name,
            gate
        ));
        match window.warning {
            WarningRule::None => {}
            WarningRule::WhenNapping(text) | WarningRule::Always(text) => {
                out.push_str(&format!("                  ! {text}\n"));
            }
        }
    }

    out.push_str("\nAfter 30 minutes you enter deep sleep. Nap for under 30 minutes\n");
    out.push_str("or complete a full 90-minute cycle to avoid grogginess.\n");
    out
}
