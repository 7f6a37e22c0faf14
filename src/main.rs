use anyhow::{bail, Context, Result};
use chrono::Utc;
use nutriplan::api_connection::GenerativeModel;
use nutriplan::cli::{parse_args, Command, ExportFormat};
use nutriplan::config::AppConfig;
use nutriplan::export::{email_draft, history_to_csv, history_to_html};
use nutriplan::metrics::format_full_date;
use nutriplan::render;
use nutriplan::session::{Session, SessionError, Tab, View};
use nutriplan::store::PlanStore;
use std::io::{self, BufRead, Write};
use tokio::fs;

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "nutriplan=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    // Logs go to stderr so plan output on stdout stays clean.
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn prompt_line(question: &str) -> Result<String> {
    print!("{} ", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt_line(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí"))
}

fn show_view<M: GenerativeModel>(session: &Session<M>, day: Option<usize>) {
    let language = session.language();
    let t = language.translations();

    let profile = match (session.view(), session.profile()) {
        (View::Tab(_), Some(profile)) => profile,
        _ => {
            println!("{}", t.onboarding);
            return;
        }
    };

    let active = session.active_tab();
    println!("{} - {}", t.app_title, t.app_subtitle);
    println!("{}", render::dashboard(profile, language));
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label(language))
            } else {
                tab.label(language).to_string()
            }
        })
        .collect();
    println!("{}", tabs.join(" | "));
    println!();
    match active {
        Tab::Plan => match session.diet() {
            Some(diet) => print!("{}", render::plan(diet, language, day)),
            None => println!("{}", t.diet_no_plan),
        },
        Tab::Tracking => print!("{}", render::tracking(session.history(), language)),
        Tab::Profile => print!("{}", render::profile(profile, language)),
        Tab::References => print!("{}", render::references(language)),
    }
}

async fn run_swap<M: GenerativeModel>(
    session: &mut Session<M>,
    day: usize,
    slot: nutriplan::diet::MealSlot,
    choice: Option<usize>,
) -> Result<()> {
    let language = session.language();
    let t = language.translations();
    let index = day.checked_sub(1).context("days are numbered from 1")?;

    let ticket = session.begin_swap(index, slot)?;
    println!("{}", t.working);
    let alternatives = session.request_alternatives(&ticket).await?;
    if alternatives.is_empty() {
        println!("{}", t.alternatives_none);
        return Ok(());
    }

    println!("== {} ==", t.alternatives_title);
    let mut out = String::new();
    for (i, alt) in alternatives.iter().enumerate() {
        render::meal(&mut out, &(i + 1).to_string(), alt, true);
    }
    print!("{}", out);

    let picked = match choice {
        Some(choice) => choice,
        None => {
            let answer = prompt_line("#")?;
            if answer.is_empty() {
                return Ok(());
            }
            answer.parse::<usize>().context("choice must be a number")?
        }
    };
    let meal = picked
        .checked_sub(1)
        .and_then(|i| alternatives.get(i))
        .cloned()
        .with_context(|| format!("no alternative number {}", picked))?;

    let name = meal.name.clone();
    let total = session.apply_swap(ticket, meal)?;
    println!("{} -> {} ({} {})", slot.label(language), name, total, t.diet_total);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli_args = parse_args();
    let config = AppConfig::from_env().with_data_dir(cli_args.data_dir.clone());
    let store = PlanStore::open(&config.data_dir)
        .with_context(|| format!("Failed to open data directory '{}'", config.data_dir.display()))?;
    let mut session = Session::load(store, config.provider());

    match cli_args.command {
        Command::Generate(args) => {
            let base = session.profile().cloned().unwrap_or_default();
            let profile = args.apply_to(base);
            let t = session.language().translations();
            println!("{}\n{}", t.working, t.working_desc);
            let outcome = session.submit_profile(profile).await.map(|_| ());
            match outcome {
                Ok(()) => show_view(&session, None),
                Err(SessionError::Validation(errors)) => {
                    eprintln!("{}: {}", t.error_fix_form, errors.describe(session.language()));
                    bail!("profile rejected");
                }
                Err(e) => {
                    if let Some(banner) = session.error() {
                        eprintln!("{}", banner);
                    }
                    return Err(e.into());
                }
            }
        }
        Command::Show { tab, day } => {
            let day = day
                .map(|d| d.checked_sub(1).context("days are numbered from 1"))
                .transpose()?;
            session.select_tab(tab);
            show_view(&session, day);
        }
        Command::Log { weight, waist } => {
            let language = session.language();
            let entry = session.log_progress(weight, waist)?.clone();
            println!(
                "{}: {} kg | {} cm | {}",
                format_full_date(&entry.date, language),
                entry.weight,
                entry.waist,
                entry.bmi
            );
        }
        Command::Swap { day, slot, choice } => {
            run_swap(&mut session, day, slot, choice).await?;
        }
        Command::Export { format, output } => {
            let language = session.language();
            let history = session.history();
            let (body, default_name) = match format {
                ExportFormat::Csv => (history_to_csv(history, language)?, "mi-evolucion-nutriplan.csv".to_string()),
                ExportFormat::Html => {
                    let today = format_full_date(&Utc::now().to_rfc3339(), language);
                    (
                        history_to_html(history, language, &today),
                        format!("Evolucion_NutriPlan_{}.html", Utc::now().timestamp_millis()),
                    )
                }
                ExportFormat::Email => {
                    let link = email_draft(history, language)
                        .context("nothing to share: the history is empty")?;
                    println!("{}", link);
                    return Ok(());
                }
            };
            let path = output.unwrap_or_else(|| default_name.into());
            fs::write(&path, body)
                .await
                .with_context(|| format!("Failed to write export to '{}'", path.display()))?;
            println!("{}", path.display());
        }
        Command::Lang { language } => {
            session.set_language(language)?;
            println!("{}", language);
        }
        Command::Reset { yes } => {
            let t = session.language().translations();
            if yes || confirm(t.reset_confirm)? {
                session.reset()?;
                println!("{}", t.reset_done);
            }
        }
    }

    Ok(())
}
