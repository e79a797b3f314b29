//! Built-in example requests used to seed the input editor.

use crate::types::{
    ClassificationRequest, ExampleEntry, Tool, ToolInvocationAttempt, ToolParameterSchema,
};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

static CATALOG: Lazy<Vec<ExampleEntry>> = Lazy::new(|| {
    vec![
        ExampleEntry {
            name: "Correct Example".to_string(),
            description: "A properly formed tool call".to_string(),
            data: ClassificationRequest {
                query: "What's the weather in New York?".to_string(),
                enabled_tools: vec![Tool {
                    name: "get_weather".to_string(),
                    description: "Get current weather for a location".to_string(),
                    parameters: ToolParameterSchema::object([
                        ("location", ToolParameterSchema::string()),
                        (
                            "units",
                            ToolParameterSchema::string().with_enum(["celsius", "fahrenheit"]),
                        ),
                    ])
                    .with_required(["location"]),
                }],
                tool_calling: attempt(
                    "get_weather",
                    json!({"location": "New York", "units": "fahrenheit"}),
                ),
            },
        },
        ExampleEntry {
            name: "Wrong Function Name".to_string(),
            description: "Tool call uses incorrect function name".to_string(),
            data: ClassificationRequest {
                query: "Calculate 25 * 4".to_string(),
                enabled_tools: vec![Tool {
                    name: "calculator".to_string(),
                    description: "Perform calculations".to_string(),
                    parameters: ToolParameterSchema::object([(
                        "expression",
                        ToolParameterSchema::string(),
                    )]),
                }],
                tool_calling: attempt("calculate", json!({"expression": "25 * 4"})),
            },
        },
        ExampleEntry {
            name: "Incorrect Argument Type".to_string(),
            description: "Argument has wrong data type".to_string(),
            data: ClassificationRequest {
                query: "Set a reminder for 3pm".to_string(),
                enabled_tools: vec![Tool {
                    name: "set_reminder".to_string(),
                    description: "Create a reminder".to_string(),
                    parameters: ToolParameterSchema::object([
                        ("time", ToolParameterSchema::string()),
                        ("message", ToolParameterSchema::string()),
                    ]),
                }],
                tool_calling: attempt("set_reminder", json!({"time": 1500, "message": "Meeting"})),
            },
        },
    ]
});

fn attempt(name: &str, arguments: Value) -> ToolInvocationAttempt {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ToolInvocationAttempt {
        name: name.to_string(),
        arguments,
    }
}

/// The fixed, ordered example catalog. Initialised on first use.
pub fn built_in_examples() -> &'static [ExampleEntry] {
    &CATALOG
}
