use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One cooking step as returned by the bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeStep {
    #[serde(default)]
    pub step: Option<i64>,
    #[serde(default)]
    pub content: String,
}

/// A recipe decoded from the bot's answer payload.
///
/// Bots omit fields freely, so everything defaults; presence of the
/// required attributes is checked by the caller via [`missing_required`].
/// `cook_time` and `calories` arrive as either text or numbers, hence the
/// raw JSON values.
///
/// [`missing_required`]: Recipe::missing_required
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cook_time: Option<Value>,
    #[serde(default)]
    pub calories: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub prep_steps: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Recipe {
    /// Required attributes that are absent or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.steps.is_empty() {
            missing.push("steps");
        }
        missing
    }
}

/// Text form of a scalar cell value. Strings pass through unquoted,
/// numbers render plainly, absent values become the empty string.
pub(crate) fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_unknown(text: &str) -> &str {
            if text.is_empty() {
                "unknown"
            } else {
                text
            }
        }

        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "Recipe:     {}", or_unknown(&self.name))?;
        writeln!(
            f,
            "Cook time:  {}",
            or_unknown(&scalar_text(self.cook_time.as_ref()))
        )?;
        writeln!(
            f,
            "Calories:   {}",
            or_unknown(&scalar_text(self.calories.as_ref()))
        )?;
        writeln!(
            f,
            "Difficulty: {}",
            or_unknown(self.difficulty.as_deref().unwrap_or(""))
        )?;
        writeln!(f, "Image:      {}", self.image.as_deref().unwrap_or("none"))?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            self.description.as_deref().unwrap_or("No description.")
        )?;
        writeln!(f)?;
        for (index, step) in self.steps.iter().enumerate() {
            let number = step.step.unwrap_or(index as i64 + 1);
            writeln!(f, "Step {}: {}", number, step.content)?;
        }
        write!(f, "{}", "=".repeat(50))
    }
}

/// What the bot answered: structured recipe data, or the raw text when
/// the answer content did not decode as a recipe.
#[derive(Debug, Clone)]
pub enum BotReply {
    Recipe(Recipe),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_payload() {
        let payload = r#"{
            "name": "Mapo Tofu",
            "cook_time": 25,
            "calories": "350 kcal",
            "image": "https://example.com/mapo.jpg",
            "description": "A classic Sichuan dish.",
            "steps": [
                {"step": 1, "content": "Dice the tofu."},
                {"step": 2, "content": "Fry the chili bean paste."}
            ],
            "tools": ["wok", "spatula"],
            "prep_steps": ["Soak the peppercorns"],
            "tips": ["Use silken tofu"],
            "difficulty": "medium"
        }"#;

        let recipe: Recipe = serde_json::from_str(payload).unwrap();
        assert_eq!(recipe.name, "Mapo Tofu");
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.steps[1].content, "Fry the chili bean paste.");
        assert_eq!(recipe.tools, vec!["wok", "spatula"]);
        assert!(recipe.missing_required().is_empty());
    }

    #[test]
    fn test_decode_partial_payload() {
        // Only a name - everything else should default rather than fail
        let recipe: Recipe = serde_json::from_str(r#"{"name": "Congee"}"#).unwrap();
        assert_eq!(recipe.name, "Congee");
        assert!(recipe.steps.is_empty());
        assert_eq!(recipe.missing_required(), vec!["steps"]);
    }

    #[test]
    fn test_missing_required_reports_blank_name() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"name": "  ", "steps": [{"content": "Boil."}]}"#).unwrap();
        assert_eq!(recipe.missing_required(), vec!["name"]);
    }

    #[test]
    fn test_scalar_text_coercion() {
        assert_eq!(scalar_text(None), "");
        assert_eq!(scalar_text(Some(&json!(null))), "");
        assert_eq!(scalar_text(Some(&json!("30 min"))), "30 min");
        assert_eq!(scalar_text(Some(&json!(30))), "30");
    }

    #[test]
    fn test_display_renders_steps() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"name": "Fried Rice", "steps": [{"content": "Heat the wok."}]}"#,
        )
        .unwrap();
        let card = recipe.to_string();
        assert!(card.contains("Recipe:     Fried Rice"));
        assert!(card.contains("Step 1: Heat the wok."));
    }
}
