use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::diet::MealSlot;
use crate::i18n::Language;
use crate::profile::{ActivityLevel, DietType, ExerciseType, Gender, UserProfile};
use crate::session::Tab;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI-assisted weekly nutrition planner", long_about = None)]
pub struct Cli {
    /// Directory holding the saved profile, history and plan
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or edit the profile and generate a new weekly plan
    Generate(ProfileArgs),
    /// Show one of the views
    Show {
        #[arg(value_enum, default_value_t = Tab::Plan)]
        tab: Tab,
        /// Show a single day (1-7) with full recipes
        #[arg(long, value_parser = parse_day)]
        day: Option<usize>,
    },
    /// Log today's weight and waist
    Log {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        waist: f64,
    },
    /// Ask for alternatives to one meal and swap it
    Swap {
        /// Day of the plan (1-7)
        #[arg(long, value_parser = parse_day)]
        day: usize,
        #[arg(long, value_enum)]
        slot: MealSlot,
        /// Pick an alternative (1 or 2) without prompting
        #[arg(long)]
        choice: Option<usize>,
    },
    /// Export the progress history
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set the display and plan language
    Lang {
        #[arg(value_enum)]
        language: Language,
    },
    /// Erase the profile, history and plan
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Html,
    Email,
}

/// Profile fields; anything omitted keeps its saved (or default) value.
#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long, value_enum)]
    pub gender: Option<Gender>,
    /// Weight in kg
    #[arg(long)]
    pub weight: Option<f64>,
    /// Height in cm
    #[arg(long)]
    pub height: Option<f64>,
    /// Waist in cm
    #[arg(long)]
    pub waist: Option<f64>,
    #[arg(long = "intolerance")]
    pub intolerances: Vec<String>,
    #[arg(long = "disease")]
    pub diseases: Vec<String>,
    /// Note for a disease, as `name=note`
    #[arg(long = "disease-note", value_parser = parse_key_value)]
    pub disease_notes: Vec<(String, String)>,
    #[arg(long = "treatment")]
    pub treatments: Vec<String>,
    #[arg(long = "supplement")]
    pub supplements: Vec<String>,
    /// Genetic marker present in the user (FTO, MC4R, PPARG, APOE, ADRB2)
    #[arg(long = "marker")]
    pub markers: Vec<String>,
    /// Drop a saved genetic marker
    #[arg(long = "remove-marker")]
    pub removed_markers: Vec<String>,
    #[arg(long, value_enum)]
    pub diet: Option<DietType>,
    #[arg(long, value_enum)]
    pub activity: Option<ActivityLevel>,
    #[arg(long, value_enum)]
    pub exercise: Option<ExerciseType>,
    #[arg(long)]
    pub exercise_description: Option<String>,
    /// Training days per week
    #[arg(long)]
    pub exercise_frequency: Option<u32>,
    /// Minutes per session
    #[arg(long)]
    pub exercise_duration: Option<u32>,
    #[arg(long)]
    pub basal_steps: Option<u32>,
    #[arg(long)]
    pub basal_activity: Option<String>,
    /// Drop all saved list entries before applying the ones given here
    #[arg(long)]
    pub clear_lists: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=note, got '{}'", raw))
}

/// Days are numbered from 1 on the command line.
fn parse_day(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(day) if day >= 1 => Ok(day),
        _ => Err(format!("expected a day number starting at 1, got '{}'", raw)),
    }
}

fn extend_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

impl ProfileArgs {
    pub fn apply_to(&self, mut profile: UserProfile) -> UserProfile {
        if self.clear_lists {
            profile.intolerances.clear();
            profile.set_diseases(Vec::new());
            profile.treatments.clear();
            profile.supplements.clear();
            profile.genetic_markers.clear();
        }

        macro_rules! set_if_some {
            ($($arg:ident => $field:ident),* $(,)?) => {
                $(if let Some(value) = self.$arg.clone() {
                    profile.$field = value;
                })*
            };
        }
        set_if_some!(
            age => age,
            gender => gender,
            weight => weight,
            height => height,
            waist => waist,
            diet => diet_type,
            activity => activity_level,
            exercise => exercise_type,
            exercise_description => exercise_description,
            exercise_frequency => exercise_frequency,
            exercise_duration => exercise_duration,
            basal_steps => basal_steps,
            basal_activity => basal_activity_desc,
        );

        extend_unique(&mut profile.intolerances, &self.intolerances);
        extend_unique(&mut profile.treatments, &self.treatments);
        extend_unique(&mut profile.supplements, &self.supplements);
        let mut diseases = profile.diseases.clone();
        extend_unique(&mut diseases, &self.diseases);
        profile.set_diseases(diseases);
        for (disease, note) in &self.disease_notes {
            profile.set_disease_note(disease, note);
        }
        for marker in &self.markers {
            profile.set_genetic_marker(&marker.trim().to_uppercase(), true);
        }
        for marker in &self.removed_markers {
            profile.set_genetic_marker(&marker.trim().to_uppercase(), false);
        }
        profile
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
