use serde::Serialize;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use tera::{Context, Error as TeraError, Tera};

use crate::models::intent::Intent;

const INTENT_CLASSIFIER_TEMPLATE: &str = include_str!("prompts/intent_classifier.md");

#[derive(Serialize)]
struct IntentDescription {
    name: String,
    description: &'static str,
}

#[derive(Serialize)]
struct ClassifierContext {
    intents: Vec<IntentDescription>,
    receipt_intent: String,
    chat_intent: String,
}

fn describe(intent: Intent) -> &'static str {
    match intent {
        Intent::Swap => "the user wants to swap tokens now",
        Intent::GetSwapReceipt => "the user asks for the receipt of a swap they already made",
        Intent::NotSwap => "anything else, answered conversationally",
    }
}

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

pub fn load_prompt_file<T: Serialize>(
    template_file: impl AsRef<Path>,
    context_data: &T,
) -> Result<String, TeraError> {
    let template_content = fs::read_to_string(template_file.as_ref())
        .map_err(|e| TeraError::chain("Failed to read template file", e))?;
    load_prompt(&template_content, context_data)
}

/// Render the system prompt that makes the model answer with an intent.
///
/// A custom template receives the same context as the built-in one:
/// `intents` (each with `name` and `description`), `receipt_intent` and
/// `chat_intent`.
pub fn system_prompt(template_file: Option<&Path>) -> Result<String, TeraError> {
    let context = ClassifierContext {
        intents: Intent::iter()
            .map(|intent| IntentDescription {
                name: intent.to_string(),
                description: describe(intent),
            })
            .collect(),
        receipt_intent: Intent::GetSwapReceipt.to_string(),
        chat_intent: Intent::NotSwap.to_string(),
    };

    match template_file {
        Some(path) => load_prompt_file(path, &context),
        None => load_prompt(INTENT_CLASSIFIER_TEMPLATE, &context),
    }
}
