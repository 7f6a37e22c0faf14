//! History exports: CSV download, standalone HTML report, mailto draft.

use anyhow::{Context, Result};
use html_escape::encode_text;

use crate::i18n::Language;
use crate::metrics::format_full_date;
use crate::tracking::ProgressEntry;

pub fn history_to_csv(history: &[ProgressEntry], language: Language) -> Result<String> {
    let header = match language {
        Language::Es => ["Fecha", "Peso(kg)", "Cintura(cm)", "IMC"],
        Language::En => ["Date", "Weight(kg)", "Waist(cm)", "BMI"],
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for entry in history {
        writer.write_record([
            format_full_date(&entry.date, language),
            entry.weight.to_string(),
            entry.waist.to_string(),
            entry.bmi.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

pub fn history_to_html(history: &[ProgressEntry], language: Language, generated_on: &str) -> String {
    let t = language.translations();
    let rows: String = history
        .iter()
        .map(|entry| {
            format!(
                "      <tr><td>{}</td><td>{} kg</td><td>{} cm</td><td>{}</td></tr>\n",
                encode_text(&format_full_date(&entry.date, language)),
                entry.weight,
                entry.waist,
                entry.bmi
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: Helvetica, Arial, sans-serif; margin: 0; color: #1e293b; }}
    header {{ background: #334155; color: #fff; padding: 24px 32px; }}
    header h1 {{ margin: 0 0 6px; font-size: 22px; }}
    header p {{ margin: 0; font-size: 11px; }}
    table {{ border-collapse: collapse; margin: 24px 32px; min-width: 60%; }}
    th {{ background: #10b981; color: #fff; text-align: left; }}
    th, td {{ border: 1px solid #cbd5e1; padding: 6px 12px; font-size: 13px; }}
  </style>
</head>
<body>
  <header>
    <h1>{title}</h1>
    <p>{generated}: {date}</p>
  </header>
  <table>
    <thead>
      <tr><th>{c_date}</th><th>{c_weight}</th><th>{c_waist}</th><th>{c_bmi}</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        lang = language.code(),
        title = encode_text(t.report_evo_title),
        generated = encode_text(t.report_generated),
        date = encode_text(generated_on),
        c_date = t.col_date,
        c_weight = t.col_weight,
        c_waist = t.col_waist,
        c_bmi = t.col_bmi,
        rows = rows,
    )
}

/// `mailto:` link summarising the latest sample, or `None` with no history.
pub fn email_draft(history: &[ProgressEntry], language: Language) -> Option<String> {
    let last = history.last()?;
    let t = language.translations();
    let body = format!(
        "{intro}\n\n{last_label}:\n- {w}: {weight} kg\n- {wa}: {waist} cm\n- {b}: {bmi}\n\n{footer}",
        intro = t.email_intro,
        last_label = t.email_last_entry,
        w = t.col_weight,
        weight = last.weight,
        wa = t.col_waist,
        waist = last.waist,
        b = t.col_bmi,
        bmi = last.bmi,
        footer = t.email_footer,
    );
    Some(format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(t.email_subject),
        urlencoding::encode(&body)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<ProgressEntry> {
        vec![
            ProgressEntry {
                date: "2024-03-05T08:00:00.000Z".into(),
                weight: 80.0,
                waist: 95.0,
                bmi: 24.7,
            },
            ProgressEntry {
                date: "2024-03-12T08:00:00.000Z".into(),
                weight: 78.5,
                waist: 93.0,
                bmi: 24.2,
            },
        ]
    }

    #[test]
    fn test_csv_localized_header() {
        let es = history_to_csv(&history(), Language::Es).unwrap();
        assert!(es.starts_with("Fecha,Peso(kg),Cintura(cm),IMC\n"));
        assert!(es.contains("12/03/2024,78.5,93,24.2"));

        let en = history_to_csv(&history(), Language::En).unwrap();
        assert!(en.starts_with("Date,Weight(kg),Waist(cm),BMI\n"));
        assert!(en.contains("03/05/2024,80,95,24.7"));
    }

    #[test]
    fn test_html_contains_rows() {
        let html = history_to_html(&history(), Language::En, "03/12/2024");
        assert!(html.contains("<title>Progress Report</title>"));
        assert!(html.contains("<td>78.5 kg</td>"));
        assert_eq!(html.matches("<tr><td>").count(), 2);
    }

    #[test]
    fn test_email_uses_last_entry() {
        let link = email_draft(&history(), Language::En).unwrap();
        assert!(link.starts_with("mailto:?subject=My%20Nutritional%20Progress"));
        assert!(link.contains("78.5%20kg"));
        assert!(!link.contains("80%20kg"));
    }

    #[test]
    fn test_email_requires_history() {
        assert!(email_draft(&[], Language::Es).is_none());
    }
}
