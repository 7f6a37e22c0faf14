use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Gender::Male, Language::Es) => "Masculino",
            (Gender::Female, Language::Es) => "Femenino",
            (Gender::Other, Language::Es) => "Otro",
            (Gender::Male, Language::En) => "Male",
            (Gender::Female, Language::En) => "Female",
            (Gender::Other, Language::En) => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    Athlete,
}

impl ActivityLevel {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (ActivityLevel::Sedentary, Language::Es) => "Sedentario",
            (ActivityLevel::Light, Language::Es) => "Ligero",
            (ActivityLevel::Moderate, Language::Es) => "Moderado",
            (ActivityLevel::Active, Language::Es) => "Muy Activo",
            (ActivityLevel::Athlete, Language::Es) => "Atleta",
            (ActivityLevel::Sedentary, Language::En) => "Sedentary",
            (ActivityLevel::Light, Language::En) => "Light",
            (ActivityLevel::Moderate, Language::En) => "Moderate",
            (ActivityLevel::Active, Language::En) => "Very Active",
            (ActivityLevel::Athlete, Language::En) => "Athlete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    #[default]
    None,
    Running,
    Strength,
    Yoga,
    Cycling,
    Swimming,
    Functional,
    Other,
}

impl ExerciseType {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (ExerciseType::None, Language::Es) => "Ninguno",
            (ExerciseType::Running, Language::Es) => "Running",
            (ExerciseType::Strength, Language::Es) => "Fuerza",
            (ExerciseType::Yoga, Language::Es) => "Yoga",
            (ExerciseType::Cycling, Language::Es) => "Ciclismo",
            (ExerciseType::Swimming, Language::Es) => "Natación",
            (ExerciseType::Functional, Language::Es) => "Funcional",
            (ExerciseType::Other, Language::Es) => "Otro",
            (ExerciseType::None, Language::En) => "None",
            (ExerciseType::Running, Language::En) => "Running",
            (ExerciseType::Strength, Language::En) => "Strength",
            (ExerciseType::Yoga, Language::En) => "Yoga",
            (ExerciseType::Cycling, Language::En) => "Cycling",
            (ExerciseType::Swimming, Language::En) => "Swimming",
            (ExerciseType::Functional, Language::En) => "Functional",
            (ExerciseType::Other, Language::En) => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    #[default]
    Standard,
    Vegan,
    Keto,
    Paleo,
    Mediterranean,
    IntermittentFasting,
}

impl DietType {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (DietType::Standard, Language::Es) => "Estándar",
            (DietType::Vegan, Language::Es) => "Vegana",
            (DietType::Keto, Language::Es) => "Cetogénica",
            (DietType::Paleo, Language::Es) => "Paleo",
            (DietType::Mediterranean, Language::Es) => "Mediterránea",
            (DietType::IntermittentFasting, Language::Es) => "Ayuno Intermitente",
            (DietType::Standard, Language::En) => "Standard",
            (DietType::Vegan, Language::En) => "Vegan",
            (DietType::Keto, Language::En) => "Ketogenic",
            (DietType::Paleo, Language::En) => "Paleo",
            (DietType::Mediterranean, Language::En) => "Mediterranean",
            (DietType::IntermittentFasting, Language::En) => "Intermittent Fasting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
    pub waist: f64,
    #[serde(default)]
    pub intolerances: Vec<String>,
    #[serde(default)]
    pub diseases: Vec<String>,
    #[serde(default)]
    pub disease_notes: BTreeMap<String, String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default)]
    pub genetic_markers: Vec<String>,
    #[serde(default)]
    pub supplements: Vec<String>,
    pub diet_type: DietType,
    pub activity_level: ActivityLevel,
    pub exercise_type: ExerciseType,
    #[serde(default)]
    pub exercise_description: String,
    pub exercise_frequency: u32,
    pub exercise_duration: u32,
    pub basal_steps: u32,
    #[serde(default)]
    pub basal_activity_desc: String,
    #[serde(default)]
    pub language: Language,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            weight: 70.0,
            height: 170.0,
            waist: 85.0,
            intolerances: Vec::new(),
            diseases: Vec::new(),
            disease_notes: BTreeMap::new(),
            treatments: Vec::new(),
            genetic_markers: Vec::new(),
            supplements: Vec::new(),
            diet_type: DietType::Standard,
            activity_level: ActivityLevel::Sedentary,
            exercise_type: ExerciseType::None,
            exercise_description: String::new(),
            exercise_frequency: 3,
            exercise_duration: 45,
            basal_steps: 5000,
            basal_activity_desc: String::new(),
            language: Language::Es,
        }
    }
}

impl UserProfile {
    /// Replaces the disease list and drops notes for diseases no longer present.
    pub fn set_diseases(&mut self, diseases: Vec<String>) {
        self.disease_notes
            .retain(|disease, _| diseases.iter().any(|d| d == disease));
        self.diseases = diseases;
    }

    pub fn set_disease_note(&mut self, disease: &str, note: &str) {
        self.disease_notes
            .insert(disease.to_string(), note.to_string());
    }

    /// Marks the genetic marker as present or absent. Setting it twice is a no-op.
    pub fn set_genetic_marker(&mut self, marker_id: &str, present: bool) {
        let known = self.genetic_markers.iter().any(|m| m == marker_id);
        if present && !known {
            self.genetic_markers.push(marker_id.to_string());
        } else if !present {
            self.genetic_markers.retain(|m| m != marker_id);
        }
    }

    /// Diseases rendered for prompts, each followed by its note when one exists.
    pub fn diseases_with_notes(&self) -> Vec<String> {
        self.diseases
            .iter()
            .map(|d| match self.disease_notes.get(d) {
                Some(note) if !note.trim().is_empty() => format!("{} (Details: {})", d, note),
                _ => d.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub struct ValidRanges {
    pub age: Range,
    pub weight: Range,
    pub height: Range,
    pub waist: Range,
    pub exercise_frequency: Range,
    pub exercise_duration: Range,
    pub basal_steps: Range,
}

pub const VALID_RANGES: ValidRanges = ValidRanges {
    age: Range { min: 12.0, max: 100.0 },
    weight: Range { min: 35.0, max: 250.0 },
    height: Range { min: 100.0, max: 230.0 },
    waist: Range { min: 40.0, max: 180.0 },
    exercise_frequency: Range { min: 0.0, max: 7.0 },
    exercise_duration: Range { min: 0.0, max: 240.0 },
    basal_steps: Range { min: 0.0, max: 50000.0 },
};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    Required,
    OutOfRange { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    pub fields: Vec<(&'static str, FieldError)>,
}

impl ValidationErrors {
    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| *name == field)
    }

    pub fn describe(&self, language: Language) -> String {
        let t = language.translations();
        self.fields
            .iter()
            .map(|(name, err)| match err {
                FieldError::Required => format!("{}: {}", name, t.error_required),
                FieldError::OutOfRange { min, max } => {
                    format!("{}: {} ({}-{})", name, t.error_invalid_range, min, max)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid profile: {}", self.describe(Language::En))
    }
}

impl std::error::Error for ValidationErrors {}

fn check_required(errors: &mut Vec<(&'static str, FieldError)>, name: &'static str, value: f64, range: Range) {
    if value == 0.0 || value.is_nan() {
        errors.push((name, FieldError::Required));
    } else {
        check_range(errors, name, value, range);
    }
}

fn check_range(errors: &mut Vec<(&'static str, FieldError)>, name: &'static str, value: f64, range: Range) {
    if !range.contains(value) {
        errors.push((
            name,
            FieldError::OutOfRange {
                min: range.min,
                max: range.max,
            },
        ));
    }
}

/// Checks every numeric field against its declared range.
///
/// Age, weight, height and waist are required; zero counts as missing.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationErrors> {
    let mut fields = Vec::new();
    let r = &VALID_RANGES;

    check_required(&mut fields, "age", f64::from(profile.age), r.age);
    check_required(&mut fields, "weight", profile.weight, r.weight);
    check_required(&mut fields, "height", profile.height, r.height);
    check_required(&mut fields, "waist", profile.waist, r.waist);
    check_range(&mut fields, "exerciseFrequency", f64::from(profile.exercise_frequency), r.exercise_frequency);
    check_range(&mut fields, "exerciseDuration", f64::from(profile.exercise_duration), r.exercise_duration);
    check_range(&mut fields, "basalSteps", f64::from(profile.basal_steps), r.basal_steps);

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { fields })
    }
}
