use chrono::{DateTime, Utc};

use crate::entities::MotorbikeState;
use crate::services::health_evaluator::evaluate_with;
use crate::value_objects::TieBreak;

pub const DEFAULT_ADVISORY_MODEL: &str = "gemini-3-flash-preview";

/// Shown whenever the advisory collaborator fails or times out.
pub const ADVICE_UNAVAILABLE_MESSAGE: &str = "Our expert mechanic is currently unavailable. \
Please ensure your oil and tire pressure are checked before your next ride. Ride safe!";

/// Shown when the collaborator answers with no text.
pub const EMPTY_ADVICE_MESSAGE: &str =
    "Ride safely! Perform regular checks to ensure your motorcycle remains in peak condition.";

pub const ADVICE_WORD_LIMIT: usize = 150;

/// Prompt handed to the advisory collaborator: odometer plus one line per
/// item with its service markers and current status.
pub fn advice_prompt(state: &MotorbikeState, now: DateTime<Utc>, tie_break: TieBreak) -> String {
    let items = state
        .maintenance_items
        .iter()
        .map(|item| {
            let health = evaluate_with(item, state.current_odo, now, tie_break);
            format!(
                "- {}: Last serviced at {}km on {} ({}) [status: {}, {:.0}% health]",
                item.name,
                item.last_service_odo,
                item.last_service_date.format("%Y-%m-%d"),
                item.description,
                health.status.as_str(),
                health.percentage
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Act as a world-class professional motorcycle mechanic.\n\
The user's motorcycle is a {}. The current odometer is {} km.\n\
Here is their current maintenance status:\n\
{}\n\n\
Please provide concise, professional, and actionable advice in English.\n\
Focus on the most critical maintenance items based on the current mileage.\n\
Use professional yet encouraging tone.\n\
Keep the response under {} words.",
        state.model_name, state.current_odo, items, ADVICE_WORD_LIMIT
    )
}
