use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::recipe::{self, InstructionStep};
use crate::error::Error;
use crate::models::comment::CommentView;
use crate::models::profile::ProfileCard;

/// Difficulty levels accepted on recipe drafts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Recipe row annotated with derived engagement stats.
///
/// Counts come from the edge tables at read time; `is_liked`/`is_saved`
/// are false when no viewer is given.
#[derive(Clone, Debug, Serialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: String,
    pub instructions: Vec<InstructionStep>,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub likes: u64,
    pub saves: u64,
    pub comments: u64,
    pub is_liked: bool,
    pub is_saved: bool,
}

/// Full detail view: the recipe plus its author and comment list.
#[derive(Clone, Debug, Serialize)]
pub struct RecipeDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: String,
    pub instructions: Vec<InstructionStep>,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: Option<ProfileCard>,
    pub likes: u64,
    pub saves: u64,
    /// Newest-first.
    pub comments: Vec<CommentView>,
}

/// Recipe creation form as submitted by the UI.
///
/// Numeric fields arrive as text and are parsed during validation; a
/// parse failure is a validation error, not a store error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category_id: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub difficulty: String,
    pub instructions: Vec<InstructionDraft>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InstructionDraft {
    pub instruction: String,
    pub tip: String,
}

/// A draft that passed validation, with numerics parsed and instruction
/// numbers rewritten to the dense 1..N order implied by array position.
#[derive(Clone, Debug)]
pub struct ValidatedRecipe {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Uuid,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub instructions: Vec<InstructionStep>,
}

pub fn validate_recipe_draft(draft: &RecipeDraft) -> Result<ValidatedRecipe, Error> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(Error::Validation("Title must not be empty".into()));
    }
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(Error::Validation("Description must not be empty".into()));
    }
    let image_url = draft.image_url.trim();
    if image_url.is_empty() {
        return Err(Error::Validation("Image URL must not be empty".into()));
    }

    if draft.category_id.trim().is_empty() {
        return Err(Error::Validation("Category must be selected".into()));
    }
    let category_id = draft
        .category_id
        .trim()
        .parse::<Uuid>()
        .map_err(|_| Error::Validation("Category id is not valid".into()))?;

    let difficulty = Difficulty::parse(&draft.difficulty).ok_or_else(|| {
        Error::Validation("Difficulty must be one of: Easy, Medium, Hard".into())
    })?;

    let prep_time = parse_minutes(&draft.prep_time, "Prep time")?;
    let cook_time = parse_minutes(&draft.cook_time, "Cook time")?;

    let servings = draft
        .servings
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::Validation("Servings must be a whole number".into()))?;
    if servings < 1 {
        return Err(Error::Validation("Servings must be at least 1".into()));
    }

    if draft.instructions.is_empty() {
        return Err(Error::Validation(
            "Recipe must have at least one instruction step".into(),
        ));
    }
    let mut instructions = Vec::with_capacity(draft.instructions.len());
    for (i, step) in draft.instructions.iter().enumerate() {
        let text = step.instruction.trim();
        if text.is_empty() {
            return Err(Error::Validation(format!(
                "Instruction step {} must not be empty",
                i + 1
            )));
        }
        let tip = step.tip.trim();
        instructions.push(InstructionStep {
            number: i as i32 + 1,
            instruction: text.to_string(),
            tip: (!tip.is_empty()).then(|| tip.to_string()),
        });
    }

    Ok(ValidatedRecipe {
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        category_id,
        prep_time,
        cook_time,
        servings,
        difficulty,
        instructions,
    })
}

fn parse_minutes(input: &str, field: &str) -> Result<i32, Error> {
    let minutes = input
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::Validation(format!("{field} must be a whole number of minutes")))?;
    if minutes < 0 {
        return Err(Error::Validation(format!("{field} must not be negative")));
    }
    Ok(minutes)
}

impl RecipeSummary {
    /// Plain projection with every derived field zeroed; the stats
    /// annotation fills them in afterwards.
    pub(crate) fn from_model(m: recipe::Model) -> Self {
        let instructions = m.steps();
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image_url: m.image_url,
            prep_time: m.prep_time,
            cook_time: m.cook_time,
            servings: m.servings,
            difficulty: m.difficulty,
            instructions,
            author_id: m.author_id,
            category_id: m.category_id,
            created_at: m.created_at,
            likes: 0,
            saves: 0,
            comments: 0,
            is_liked: false,
            is_saved: false,
        }
    }
}
