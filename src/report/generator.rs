//! Markdown and JSON report generation.
//!
//! This module renders single-session profile reports and batch
//! summaries from scored sessions.

use crate::models::{BatchReport, Bucket, Profile, QuizSessionAnswer, Report, ReportMetadata};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Which optional sections to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_answers: bool,
    pub include_insights: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_answers: true,
            include_insights: true,
        }
    }
}

impl From<&crate::config::ReportConfig> for ReportOptions {
    fn from(config: &crate::config::ReportConfig) -> Self {
        Self {
            include_answers: config.include_answers,
            include_insights: config.include_insights,
        }
    }
}

/// Generate a complete Markdown report for one session.
pub fn generate_markdown_report(report: &Report, options: &ReportOptions) -> String {
    let mut output = String::new();

    output.push_str("# PersonaScore Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata, &report.profile));
    output.push_str(&generate_buckets_section(&report.profile));
    output.push_str(&generate_top_section(&report.profile));

    if options.include_insights {
        output.push_str(&generate_insights_section(&report.profile.insights));
    }
    if options.include_answers {
        output.push_str(&generate_answers_section(&report.answers));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate a Markdown summary of a batch run.
pub fn generate_markdown_batch(batch: &BatchReport) -> String {
    let mut output = String::new();

    output.push_str("# PersonaScore Batch Report\n\n");
    output.push_str(&format!("- **Quiz:** {}\n", batch.quiz_title));
    output.push_str(&format!(
        "- **Generated:** {}\n",
        batch.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("- **Rounding:** {}\n", batch.rounding));
    output.push_str(&format!("- **Sessions Scored:** {}\n", batch.sessions.len()));
    if !batch.failures.is_empty() {
        output.push_str(&format!("- **Sessions Failed:** {}\n", batch.failures.len()));
    }
    output.push('\n');

    output.push_str("## Sessions\n\n");
    if batch.sessions.is_empty() {
        output.push_str("No sessions were scored.\n\n");
    } else {
        output.push_str("| Session | Feeling | Sensing | Intuition | Thinking | Top |\n");
        output.push_str("|:---|:---:|:---:|:---:|:---:|:---|\n");
        for report in &batch.sessions {
            let p = &report.profile.percentages;
            output.push_str(&format!(
                "| {} | {}% | {}% | {}% | {}% | {} |\n",
                report.metadata.session_name,
                p.feeling,
                p.sensing,
                p.intuition,
                p.thinking,
                top_label(&report.profile)
            ));
        }
        output.push('\n');

        output.push_str("### Dominant Buckets\n\n");
        output.push_str("| Bucket | Sessions |\n");
        output.push_str("|:---|:---:|\n");
        for (bucket, count) in batch.dominant_counts() {
            output.push_str(&format!("| {} {} | {} |\n", bucket.emoji(), bucket, count));
        }
        output.push('\n');
    }

    if !batch.failures.is_empty() {
        output.push_str("## Failures\n\n");
        for failure in &batch.failures {
            output.push_str(&format!("- `{}`: {}\n", failure.path, failure.error));
        }
        output.push('\n');
    }

    output.push_str(&generate_footer());
    output
}

fn top_label(profile: &Profile) -> String {
    profile
        .top
        .iter()
        .map(|t| t.bucket.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata, profile: &Profile) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Quiz:** {}\n", metadata.quiz_title));
    section.push_str(&format!("- **Session:** {}\n", metadata.session_name));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Answers Scored:** {}\n", profile.answers_scored));
    if profile.skipped_references > 0 {
        section.push_str(&format!(
            "- **Skipped References:** {}\n",
            profile.skipped_references
        ));
    }
    section.push_str(&format!("- **Rounding:** {}\n", metadata.rounding));
    section.push('\n');

    section
}

/// Generate the bucket breakdown table.
fn generate_buckets_section(profile: &Profile) -> String {
    let mut section = String::new();

    section.push_str("## Buckets\n\n");
    section.push_str("| Bucket | Raw | Percent |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for bucket in Bucket::ALL {
        section.push_str(&format!(
            "| {} {} | {} | {}% |\n",
            bucket.emoji(),
            bucket,
            profile.raw.get(bucket),
            profile.percentages.get(bucket)
        ));
    }
    section.push_str(&format!(
        "| **Total** | **{}** | **{}%** |\n\n",
        profile.raw.total(),
        profile.percentages.total()
    ));

    section
}

/// Generate the top buckets list.
fn generate_top_section(profile: &Profile) -> String {
    let mut section = String::new();

    section.push_str("## Top Buckets\n\n");
    for (i, ranked) in profile.top.iter().enumerate() {
        section.push_str(&format!(
            "{}. {} **{}** ({}%)\n",
            i + 1,
            ranked.bucket.emoji(),
            ranked.bucket,
            ranked.value
        ));
    }
    section.push('\n');

    section
}

/// Generate the insights section.
fn generate_insights_section(insights: &[String]) -> String {
    if insights.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Insights\n\n");
    for insight in insights {
        section.push_str(&format!("> 💡 {}\n>\n", insight));
    }
    section.push('\n');

    section
}

/// Generate the answer log.
fn generate_answers_section(answers: &[QuizSessionAnswer]) -> String {
    if answers.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Answers\n\n");
    section.push_str("| # | Question | Answer | Answered At |\n");
    section.push_str("|:---:|:---|:---|:---|\n");
    for (i, answer) in answers.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            answer.question_id,
            answer.answer_id,
            answer.answered_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by PersonaScore*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a JSON batch report.
pub fn generate_json_batch(batch: &BatchReport) -> Result<String> {
    serde_json::to_string_pretty(batch).map_err(Into::into)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
