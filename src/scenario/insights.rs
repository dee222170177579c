//! Plain-language framing of a scenario summary.

use serde::Serialize;

use super::aggregate::ScenarioSummary;

/// Selections at least this large get the "compounding at scale" note at week zero.
const SCALE_NOTE_MIN_COUNT: usize = 10;
const DISTRICT_SCALE_MIN_COUNT: usize = 50;

/// Thousands-separated whole number, "0" for non-finite input.
pub fn format_gallons(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn translate_gallons(gallons: f64) -> &'static str {
    if gallons >= 10000.0 {
        "This can ease pressure on streets, basements, and ground-floor apartments across the neighborhood during heavy rain."
    } else if gallons >= 1000.0 {
        "This can ease pressure on nearby basements and ground-floor apartments during heavy rain."
    } else if gallons >= 100.0 {
        "This can help reduce localized flooding during heavy rain."
    } else {
        "Every bit helps reduce strain on the drainage system."
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactMessage {
    pub headline: String,
    pub diverted: String,
    pub translation: &'static str,
    /// Only present when maintenance is delayed.
    pub lost: Option<String>,
}

pub fn impact_message(summary: &ScenarioSummary) -> Option<ImpactMessage> {
    if summary.count == 0 {
        return None;
    }
    let weeks = summary.weeks;
    let headline = if weeks == 0 {
        "If you maintained these rain gardens this week, you would divert:".to_string()
    } else {
        format!(
            "If maintenance were delayed {} week{}, diverted water drops to:",
            weeks,
            if weeks > 1 { "s" } else { "" }
        )
    };
    Some(ImpactMessage {
        headline,
        diverted: format!(
            "{} gallons of stormwater",
            format_gallons(summary.effective_gallons)
        ),
        translation: translate_gallons(summary.effective_gallons),
        lost: (weeks > 0).then(|| {
            format!(
                "Water lost due to delayed maintenance: {} gallons",
                format_gallons(summary.lost_gallons)
            )
        }),
    })
}

pub fn insights(summary: &ScenarioSummary) -> Vec<String> {
    let count = summary.count;
    if count == 0 {
        return Vec::new();
    }
    let loss = format!("{:.0}", summary.loss_percent);
    let mut lines = Vec::new();
    match summary.weeks {
        0 => {
            lines.push(
                "Routine maintenance maximizes performance. These gardens are operating at full capacity."
                    .to_string(),
            );
            if count >= SCALE_NOTE_MIN_COUNT {
                lines.push(format!(
                    "Small, distributed actions compound at scale. Maintaining {} gardens has significant collective impact.",
                    count
                ));
            }
        }
        1..=2 => lines.push(format!(
            "Early delays are recoverable. Performance has dropped {}%, but a quick response prevents deeper degradation.",
            loss
        )),
        3..=5 => {
            lines.push(format!(
                "Delayed maintenance cuts performance significantly. These gardens have lost {}% of their capacity.",
                loss
            ));
            lines.push(
                "Routine maintenance has a larger impact than adding new gardens. Preserving existing infrastructure is key."
                    .to_string(),
            );
        }
        _ => {
            lines.push(format!(
                "Delayed maintenance cuts performance by up to {}%. At this stage, gardens operate at minimum capacity.",
                loss
            ));
            lines.push(
                "Long delays require intervention, not just routine care. Restoration may be needed before normal performance resumes."
                    .to_string(),
            );
        }
    }
    if count >= DISTRICT_SCALE_MIN_COUNT {
        lines.push(
            "This selection shows district-scale potential. Coordinated maintenance across neighborhoods amplifies individual efforts."
                .to_string(),
        );
    }
    lines
}
