use std::fmt::Write;

use crate::diet::{DailyDiet, Meal, WeeklyDiet};
use crate::i18n::Language;
use crate::metrics::{bmi_category, calculate_bmi, calculate_cv_risk_score, format_date, format_full_date};
use crate::profile::UserProfile;
use crate::reference::{GENETIC_MARKERS, MEDICATIONS_IMPACT, SCIENTIFIC_REFERENCES};
use crate::tracking::{overall_change, ProgressEntry};

const BAR_WIDTH: f64 = 30.0;

/// The four summary cards shown above every tab.
pub fn dashboard(profile: &UserProfile, language: Language) -> String {
    let t = language.translations();
    let bmi = calculate_bmi(profile.weight, profile.height);
    let risk = calculate_cv_risk_score(profile.waist, profile.height);
    format!(
        "{}: {} ({}) | {}: {} cm | {}: {} | {}: {} kg",
        t.card_bmi,
        bmi,
        bmi_category(bmi).label(language),
        t.card_waist,
        profile.waist,
        t.card_cv_risk,
        risk.label(language),
        t.card_weight,
        profile.weight
    )
}

pub fn meal(out: &mut String, label: &str, meal: &Meal, with_recipe: bool) {
    let _ = writeln!(
        out,
        "  [{}] {} ({} kcal | P {}g C {}g G {}g | {} | {})",
        label, meal.name, meal.calories, meal.protein, meal.carbs, meal.fats, meal.prep_time, meal.difficulty
    );
    let _ = writeln!(out, "      {}", meal.description);
    if with_recipe {
        for line in meal.instructions.lines().filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "      > {}", line.trim());
        }
    }
}

pub fn day(out: &mut String, index: usize, day: &DailyDiet, language: Language, with_recipe: bool) {
    let t = language.translations();
    let _ = writeln!(out, "#{} {} - {} {}", index + 1, day.day, day.total_calories, t.diet_total);
    for (slot, m) in day.meals() {
        meal(out, slot.label(language), m, with_recipe);
    }
    let (protein, carbs, fats) = day.macro_totals();
    let _ = writeln!(
        out,
        "  {}: {} {}g | {} {}g | {} {}g",
        t.diet_macros, t.macro_protein, protein, t.macro_carbs, carbs, t.macro_fats, fats
    );
    if let Some(note) = day.exercise_note.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "  * {}", note);
    }
}

pub fn plan(diet: &WeeklyDiet, language: Language, only_day: Option<usize>) -> String {
    let t = language.translations();
    let mut out = String::new();
    match only_day {
        Some(index) => match diet.day(index) {
            Some(d) => day(&mut out, index, d, language, true),
            None => {
                let _ = writeln!(out, "{}", t.diet_no_plan);
            }
        },
        None => {
            for (i, d) in diet.plan.iter().enumerate() {
                day(&mut out, i, d, language, false);
                out.push('\n');
            }
            for (title, body) in [
                (t.diet_recommendations, &diet.recommendations),
                (t.diet_exercise_plan, &diet.exercise_plan),
                (t.diet_basal, &diet.basal_recommendations),
                (t.diet_supplements, &diet.supplement_advise),
            ] {
                let _ = writeln!(out, "== {} ==\n{}\n", title, body.trim());
            }
        }
    }
    out
}

/// Table of samples plus a text bar chart of weight.
pub fn tracking(history: &[ProgressEntry], language: Language) -> String {
    let t = language.translations();
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", t.tracking_title);
    if history.is_empty() {
        let _ = writeln!(out, "{}", t.tracking_empty);
        return out;
    }

    let _ = writeln!(out, "{:<12} {:>8} {:>8} {:>6}", t.col_date, t.col_weight, t.col_waist, t.col_bmi);
    for entry in history {
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>8} {:>6}",
            format_full_date(&entry.date, language),
            entry.weight,
            entry.waist,
            entry.bmi
        );
    }

    let min = history.iter().map(|e| e.weight).fold(f64::INFINITY, f64::min);
    let max = history.iter().map(|e| e.weight).fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(1.0);
    out.push('\n');
    for entry in history {
        let width = 1 + ((entry.weight - min) / span * BAR_WIDTH).round() as usize;
        let _ = writeln!(
            out,
            "{:>7} {} {}",
            format_date(&entry.date, language),
            "#".repeat(width),
            entry.weight
        );
    }

    if let Some((dw, dwaist, dbmi)) = overall_change(history) {
        let _ = writeln!(out, "\nΔ {}: {:+} kg | {}: {:+} cm | {}: {:+}", t.col_weight, dw, t.col_waist, dwaist, t.col_bmi, dbmi);
    }
    out
}

pub fn profile(profile: &UserProfile, language: Language) -> String {
    let t = language.translations();
    let list = |items: &[String]| {
        if items.is_empty() {
            t.profile_none.to_string()
        } else {
            items.join(", ")
        }
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}: {} | {}: {}", t.profile_age, profile.age, t.profile_gender, profile.gender.label(language));
    let _ = writeln!(
        out,
        "{}: {} kg | {}: {} cm | {}: {} cm",
        t.card_weight, profile.weight, t.profile_height, profile.height, t.card_waist, profile.waist
    );
    let _ = writeln!(
        out,
        "{}: {} | {}: {}",
        t.profile_diet,
        profile.diet_type.label(language),
        t.profile_activity,
        profile.activity_level.label(language)
    );
    let _ = writeln!(
        out,
        "{}: {} {}x{} min {}",
        t.profile_exercise,
        profile.exercise_type.label(language),
        profile.exercise_frequency,
        profile.exercise_duration,
        profile.exercise_description
    );
    let _ = writeln!(out, "{}: {} {}", t.profile_basal, profile.basal_steps, profile.basal_activity_desc);
    for (label, items) in [
        (t.profile_intolerances, list(&profile.intolerances)),
        (t.profile_diseases, list(&profile.diseases_with_notes())),
        (t.profile_treatments, list(&profile.treatments)),
        (t.profile_supplements, list(&profile.supplements)),
        (t.profile_markers, list(&profile.genetic_markers)),
    ] {
        let _ = writeln!(out, "{}: {}", label, items);
    }
    let _ = writeln!(out, "{}: {}", t.profile_language, profile.language);
    out
}

pub fn references(language: Language) -> String {
    let t = language.translations();
    let refs = &SCIENTIFIC_REFERENCES;
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", t.refs_title);
    for (title, body) in [
        (t.refs_methodology, refs.diets),
        (t.refs_tables, refs.nutritional_tables),
        (t.refs_cv_risk, refs.cv_risk),
    ] {
        let _ = writeln!(out, "\n{}\n  {}", title, body.get(language));
    }
    let _ = writeln!(out, "\n{}\n  {}", t.refs_meds, refs.medications.get(language));
    for med in MEDICATIONS_IMPACT {
        let _ = writeln!(out, "  - {}", med.get(language));
    }
    let _ = writeln!(out, "\n{}", t.refs_genetics);
    for marker in GENETIC_MARKERS {
        let _ = writeln!(out, "  - [{}] {}: {}", marker.id, marker.label, marker.desc.get(language));
    }
    out
}
