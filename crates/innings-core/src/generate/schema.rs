//! Output-shape contract sent with roadmap requests.

use serde_json::{Value, json};

/// JSON schema every roadmap response must follow.
///
/// `pivot_options` is the only optional top-level field.
pub fn roadmap_schema() -> Value {
    let strings = json!({ "type": "array", "items": { "type": "string" } });

    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "current_status_analysis": { "type": "string" },
            "roadmap_steps": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "phase": { "type": "string" },
                        "duration": { "type": "string" },
                        "actions": strings,
                    },
                    "required": ["phase", "duration", "actions"],
                },
            },
            "pivot_options": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "role": { "type": "string" },
                        "description": { "type": "string" },
                        "pathway": { "type": "string" },
                    },
                    "required": ["role", "description", "pathway"],
                },
            },
            "key_institutions": strings,
            "financial_aid_tips": strings,
        },
        "required": [
            "title",
            "current_status_analysis",
            "roadmap_steps",
            "key_institutions",
            "financial_aid_tips",
        ],
    })
}
