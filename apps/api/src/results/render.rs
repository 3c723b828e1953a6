//! Plain-text rendering of a results page for the command line.

use std::fmt::Write as _;

use crate::results::view::{ResultsPage, ResultsView};
use crate::skills::models::Skill;

const BAR_WIDTH: usize = 40;

pub fn render_page(page: &ResultsPage) -> String {
    match page {
        ResultsPage::Redirect { location } => {
            format!("The skills data could not be read. Please upload your resume again ({location}).\n")
        }
        ResultsPage::Empty => "No Skills Data\n\
            It seems no skills data was provided or found. Please try uploading your resume again.\n"
            .to_string(),
        ResultsPage::Skills(view) => render_view(view),
    }
}

fn render_view(view: &ResultsView) -> String {
    let mut out = String::from("Detected Skills\n");
    for skill in view.skills() {
        let _ = writeln!(out, "  {} ({})", skill.name, format_level(skill.level));
    }

    if let Some(selected) = view.selected() {
        let _ = writeln!(out, "\nSkill Details: {}", selected.name);
        let description = if selected.description.is_empty() {
            "No description provided for this skill."
        } else {
            selected.description.as_str()
        };
        let _ = writeln!(out, "  {description}");
    }

    out.push_str("\nSkills Proficiency/Frequency\n");
    out.push_str(&render_chart(&view.ranked()));
    out
}

/// Horizontal bars scaled to the highest level. Non-positive levels get no bar.
fn render_chart(ranked: &[Skill]) -> String {
    let max = ranked.iter().map(|s| s.level).fold(0.0_f64, f64::max);
    let label_width = ranked.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for skill in ranked {
        let filled = if max > 0.0 && skill.level > 0.0 {
            ((skill.level / max) * BAR_WIDTH as f64).round().max(1.0) as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<label_width$} | {} {}",
            skill.name,
            "#".repeat(filled),
            format_level(skill.level)
        );
    }
    out
}

fn format_level(level: f64) -> String {
    if level.fract() == 0.0 && level.abs() < 1e15 {
        format!("{}", level as i64)
    } else {
        format!("{level}")
    }
}
