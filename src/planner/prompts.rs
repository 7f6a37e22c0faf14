use crate::diet::Meal;
use crate::profile::UserProfile;
use crate::reference::find_genetic_marker;

fn join_or(items: &[String], fallback: &str) -> String {
    let joined = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

fn text_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Genetic markers resolved to "label: description"; unknown ids are passed through.
fn genetics_info(profile: &UserProfile) -> Vec<String> {
    profile
        .genetic_markers
        .iter()
        .map(|id| match find_genetic_marker(id) {
            Some(marker) => format!("{}: {}", marker.label, marker.desc.get(profile.language)),
            None => id.clone(),
        })
        .collect()
}

pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let lang = profile.language;
    let en = crate::i18n::Language::En;
    format!(
        "Act as an Executive Chef, Clinical Nutritionist, Pharmacist and High-Performance Coach. Generate a comprehensive weekly plan written ENTIRELY IN {language}.

PATIENT PROFILE:
- Age: {age} years | Sex: {gender}
- Weight: {weight} kg | Height: {height} cm | Waist: {waist} cm
- Declared general activity level: {activity}

BASAL ACTIVITY (NEAT):
- Average daily steps: {steps}
- Daily activity description: {basal_desc}

SPORT / EXERCISE:
- Main sport: {exercise}
- Current frequency: {frequency} days/week
- Average duration: {duration} minutes/session
- Exercise description: {exercise_desc}

HEALTH AND BIOMEDICAL DATA:
- Current supplements: {supplements}
- Diseases and observations: {diseases}
- Medical treatments: {treatments}
- Food intolerances: {intolerances}
- Genetic markers: {genetics}
- Eating style: {diet}

GOLDEN RULES:
1. PRO INSTRUCTIONS: In \"instructions\", describe the process step by step using professional cooking techniques.
2. PRECISION NUTRITION: Adjust calories (TDEE) for metabolic balance considering both basal activity ({steps} steps) and sport. Never include foods the patient is intolerant to.
3. MOVEMENT PLAN: Write specific exercise recommendations in \"exercisePlan\".
4. NEAT STRATEGY: Write specific recommendations to optimise daily basal activity (steps, daily habits) in \"basalRecommendations\".
5. SUPPLEMENT GUIDANCE: In \"supplementAdvise\", review the current supplements and suggest others with solid evidence, flagging interactions with the listed treatments.
6. EXERCISE NOTE: For every day, add an \"exerciseNote\" tied to that day's effort.
7. Return exactly 7 days; each day's \"totalCalories\" must equal the sum of its four meals.
",
        language = lang.prompt_name(),
        age = profile.age,
        gender = profile.gender.label(en),
        weight = profile.weight,
        height = profile.height,
        waist = profile.waist,
        activity = profile.activity_level.label(en),
        steps = profile.basal_steps,
        basal_desc = text_or(&profile.basal_activity_desc, "Not specified"),
        exercise = profile.exercise_type.label(en),
        frequency = profile.exercise_frequency,
        duration = profile.exercise_duration,
        exercise_desc = text_or(&profile.exercise_description, "Not specified"),
        supplements = join_or(&profile.supplements, "None"),
        diseases = join_or(&profile.diseases_with_notes(), "None"),
        treatments = join_or(&profile.treatments, "None"),
        intolerances = join_or(&profile.intolerances, "None"),
        genetics = join_or(&genetics_info(profile), "Unknown"),
        diet = profile.diet_type.label(en),
    )
}

pub fn build_alternatives_prompt(meal: &Meal, profile: &UserProfile) -> String {
    format!(
        "As a Chef-Nutritionist, generate {count} alternative dishes for this meal: \"{name}\".
CRITICAL CONSTRAINTS:
1. NUTRITION: Approximately {calories} kcal, {protein}g protein, {carbs}g carbs and {fats}g fats (+/- 5%).
2. STYLE: \"{diet}\" diet, written in {language}. Avoid: {intolerances}.
3. DETAIL: Professional cooking instructions.
",
        count = super::schema::ALTERNATIVES_COUNT,
        name = meal.name,
        calories = meal.calories,
        protein = meal.protein,
        carbs = meal.carbs,
        fats = meal.fats,
        diet = profile.diet_type.label(crate::i18n::Language::En),
        language = profile.language.prompt_name(),
        intolerances = join_or(&profile.intolerances, "nothing in particular"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet::fixtures::meal;
    use crate::i18n::Language;
    use crate::profile::DietType;

    fn sample_profile() -> UserProfile {
        let mut profile = UserProfile {
            age: 42,
            weight: 82.5,
            basal_steps: 7200,
            language: Language::En,
            supplements: vec!["Omega 3".into()],
            treatments: vec!["Metformin".into()],
            intolerances: vec!["Lactose".into()],
            genetic_markers: vec!["FTO".into(), "XYZ1".into()],
            diet_type: DietType::Mediterranean,
            ..Default::default()
        };
        profile.set_diseases(vec!["Diabetes".into()]);
        profile.set_disease_note("Diabetes", "Type 2");
        profile
    }

    #[test]
    fn test_plan_prompt_embeds_profile() {
        let prompt = build_plan_prompt(&sample_profile());
        assert!(prompt.contains("ENTIRELY IN ENGLISH"));
        assert!(prompt.contains("Age: 42 years"));
        assert!(prompt.contains("Weight: 82.5 kg"));
        assert!(prompt.contains("(7200 steps)"));
        assert!(prompt.contains("Diabetes (Details: Type 2)"));
        assert!(prompt.contains("Metformin"));
        assert!(prompt.contains("Lactose"));
        assert!(prompt.contains("FTO (rs9939609): Associated with increased appetite"));
        assert!(prompt.contains("XYZ1"));
        assert!(prompt.contains("Eating style: Mediterranean"));
        assert!(prompt.contains("Daily activity description: Not specified"));
    }

    #[test]
    fn test_plan_prompt_placeholders_for_empty_lists() {
        let prompt = build_plan_prompt(&UserProfile::default());
        assert!(prompt.contains("ENTIRELY IN SPANISH"));
        assert!(prompt.contains("Current supplements: None"));
        assert!(prompt.contains("Genetic markers: Unknown"));
    }

    #[test]
    fn test_alternatives_prompt_carries_macros() {
        let prompt = build_alternatives_prompt(&meal("Tofu bowl", 520.0), &sample_profile());
        assert!(prompt.contains("generate 2 alternative dishes"));
        assert!(prompt.contains("\"Tofu bowl\""));
        assert!(prompt.contains("520 kcal, 20g protein, 30g carbs and 10g fats (+/- 5%)"));
        assert!(prompt.contains("\"Mediterranean\" diet"));
    }
}
