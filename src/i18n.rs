use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Name of the language written in English, used inside model prompts.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::Es => "SPANISH",
            Language::En => "ENGLISH",
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Language::Es => &ES,
            Language::En => &EN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// UI strings for one locale.
#[derive(Debug)]
pub struct Translations {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub working: &'static str,
    pub working_desc: &'static str,
    pub error_detected: &'static str,
    pub error_config: &'static str,
    pub error_required: &'static str,
    pub error_invalid_range: &'static str,
    pub error_fix_form: &'static str,
    pub reset_confirm: &'static str,
    pub reset_done: &'static str,
    pub card_bmi: &'static str,
    pub card_waist: &'static str,
    pub card_cv_risk: &'static str,
    pub card_weight: &'static str,
    pub tab_diet: &'static str,
    pub tab_evolution: &'static str,
    pub tab_profile: &'static str,
    pub tab_science: &'static str,
    pub diet_breakfast: &'static str,
    pub diet_lunch: &'static str,
    pub diet_snack: &'static str,
    pub diet_dinner: &'static str,
    pub diet_total: &'static str,
    pub diet_recommendations: &'static str,
    pub diet_exercise_plan: &'static str,
    pub diet_basal: &'static str,
    pub diet_supplements: &'static str,
    pub diet_no_plan: &'static str,
    pub diet_macros: &'static str,
    pub macro_protein: &'static str,
    pub macro_carbs: &'static str,
    pub macro_fats: &'static str,
    pub alternatives_title: &'static str,
    pub alternatives_none: &'static str,
    pub tracking_title: &'static str,
    pub tracking_empty: &'static str,
    pub col_date: &'static str,
    pub col_weight: &'static str,
    pub col_waist: &'static str,
    pub col_bmi: &'static str,
    pub report_evo_title: &'static str,
    pub report_generated: &'static str,
    pub email_subject: &'static str,
    pub email_intro: &'static str,
    pub email_last_entry: &'static str,
    pub email_footer: &'static str,
    pub refs_title: &'static str,
    pub refs_methodology: &'static str,
    pub refs_tables: &'static str,
    pub refs_cv_risk: &'static str,
    pub refs_meds: &'static str,
    pub refs_genetics: &'static str,
    pub profile_age: &'static str,
    pub profile_gender: &'static str,
    pub profile_height: &'static str,
    pub profile_diet: &'static str,
    pub profile_activity: &'static str,
    pub profile_exercise: &'static str,
    pub profile_basal: &'static str,
    pub profile_intolerances: &'static str,
    pub profile_diseases: &'static str,
    pub profile_treatments: &'static str,
    pub profile_supplements: &'static str,
    pub profile_markers: &'static str,
    pub profile_language: &'static str,
    pub profile_none: &'static str,
    pub onboarding: &'static str,
}

static ES: Translations = Translations {
    app_title: "NutriPlan",
    app_subtitle: "Tu plan nutricional personalizado",
    working: "Generando tu plan...",
    working_desc: "La IA está analizando tu perfil clínico y diseñando tu semana.",
    error_detected: "Error detectado",
    error_config: "La variable de entorno de la clave de API no está configurada. Define GEMINI_API_KEY (o API_KEY) y vuelve a intentarlo",
    error_required: "Campo obligatorio",
    error_invalid_range: "Valor fuera de rango",
    error_fix_form: "Corrige los errores del formulario antes de continuar",
    reset_confirm: "¿Seguro que quieres borrar todos tus datos? Esta acción no se puede deshacer.",
    reset_done: "Todos los datos han sido eliminados.",
    card_bmi: "IMC",
    card_waist: "Cintura",
    card_cv_risk: "Riesgo CV",
    card_weight: "Peso",
    tab_diet: "Plan",
    tab_evolution: "Evolución",
    tab_profile: "Perfil",
    tab_science: "Ciencia",
    diet_breakfast: "Desayuno",
    diet_lunch: "Comida",
    diet_snack: "Merienda",
    diet_dinner: "Cena",
    diet_total: "kcal totales",
    diet_recommendations: "Recomendaciones generales",
    diet_exercise_plan: "Plan de ejercicio",
    diet_basal: "Actividad basal (NEAT)",
    diet_supplements: "Suplementación",
    diet_no_plan: "Todavía no hay un plan generado.",
    diet_macros: "Macros del día",
    macro_protein: "Proteína",
    macro_carbs: "Carbohidratos",
    macro_fats: "Grasas",
    alternatives_title: "Alternativas inteligentes",
    alternatives_none: "No se encontraron alternativas.",
    tracking_title: "Tu evolución",
    tracking_empty: "Sin registros todavía.",
    col_date: "Fecha",
    col_weight: "Peso",
    col_waist: "Cintura",
    col_bmi: "IMC",
    report_evo_title: "Informe de Evolución",
    report_generated: "Generado",
    email_subject: "Mi Evolución Nutricional - NutriPlan AI",
    email_intro: "Hola,\n\nTe comparto mi evolución nutricional registrada en NutriPlan AI.",
    email_last_entry: "Último registro",
    email_footer: "Generado con Inteligencia Artificial.",
    refs_title: "Referencias científicas",
    refs_methodology: "Metodología",
    refs_tables: "Tablas nutricionales",
    refs_cv_risk: "Riesgo cardiovascular",
    refs_meds: "Impacto de medicamentos",
    refs_genetics: "Marcadores genéticos",
    profile_age: "Edad",
    profile_gender: "Sexo",
    profile_height: "Altura",
    profile_diet: "Dieta",
    profile_activity: "Actividad",
    profile_exercise: "Ejercicio",
    profile_basal: "Pasos basales",
    profile_intolerances: "Intolerancias",
    profile_diseases: "Enfermedades",
    profile_treatments: "Tratamientos",
    profile_supplements: "Suplementos",
    profile_markers: "Marcadores genéticos",
    profile_language: "Idioma",
    profile_none: "Ninguno",
    onboarding: "No hay perfil todavía. Ejecuta `nutriplan generate` para crear tu plan.",
};

static EN: Translations = Translations {
    app_title: "NutriPlan",
    app_subtitle: "Your personalised nutrition plan",
    working: "Generating your plan...",
    working_desc: "The AI is analysing your clinical profile and designing your week.",
    error_detected: "Error detected",
    error_config: "The API key environment variable is not configured. Set GEMINI_API_KEY (or API_KEY) and try again",
    error_required: "Required field",
    error_invalid_range: "Value out of range",
    error_fix_form: "Fix the form errors before continuing",
    reset_confirm: "Are you sure you want to erase all your data? This cannot be undone.",
    reset_done: "All data has been erased.",
    card_bmi: "BMI",
    card_waist: "Waist",
    card_cv_risk: "CV Risk",
    card_weight: "Weight",
    tab_diet: "Plan",
    tab_evolution: "Evolution",
    tab_profile: "Profile",
    tab_science: "Science",
    diet_breakfast: "Breakfast",
    diet_lunch: "Lunch",
    diet_snack: "Snack",
    diet_dinner: "Dinner",
    diet_total: "total kcal",
    diet_recommendations: "General recommendations",
    diet_exercise_plan: "Exercise plan",
    diet_basal: "Basal activity (NEAT)",
    diet_supplements: "Supplements",
    diet_no_plan: "No plan has been generated yet.",
    diet_macros: "Daily macros",
    macro_protein: "Protein",
    macro_carbs: "Carbs",
    macro_fats: "Fats",
    alternatives_title: "Smart alternatives",
    alternatives_none: "No alternatives found.",
    tracking_title: "Your progress",
    tracking_empty: "No entries yet.",
    col_date: "Date",
    col_weight: "Weight",
    col_waist: "Waist",
    col_bmi: "BMI",
    report_evo_title: "Progress Report",
    report_generated: "Generated",
    email_subject: "My Nutritional Progress - NutriPlan AI",
    email_intro: "Hi,\n\nSharing my nutritional progress logged in NutriPlan AI.",
    email_last_entry: "Latest log",
    email_footer: "Generated with AI.",
    refs_title: "Scientific references",
    refs_methodology: "Methodology",
    refs_tables: "Nutritional tables",
    refs_cv_risk: "Cardiovascular risk",
    refs_meds: "Medication impact",
    refs_genetics: "Genetic markers",
    profile_age: "Age",
    profile_gender: "Gender",
    profile_height: "Height",
    profile_diet: "Diet",
    profile_activity: "Activity",
    profile_exercise: "Exercise",
    profile_basal: "Basal steps",
    profile_intolerances: "Intolerances",
    profile_diseases: "Diseases",
    profile_treatments: "Treatments",
    profile_supplements: "Supplements",
    profile_markers: "Genetic markers",
    profile_language: "Language",
    profile_none: "None",
    onboarding: "No profile yet. Run `nutriplan generate` to create your plan.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        let parsed: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(parsed, Language::Es);
    }

    #[test]
    fn test_translations_differ_per_locale() {
        assert_eq!(Language::Es.translations().col_bmi, "IMC");
        assert_eq!(Language::En.translations().col_bmi, "BMI");
    }
}
